//! Patients and their requirements.

use std::collections::BTreeMap;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::{Day, FeatureId, PatientId, SpecialismId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

/// How strongly a patient requires a room feature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureRequest {
    /// Hard requirement.
    Needed,
    /// Soft requirement, penalized when missing.
    Preferred,
    #[default]
    DontCare,
}

/// A patient to be admitted during the planning horizon.
///
/// Days are half-open: the patient occupies a bed on
/// `admission_day..discharge_day`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Patient {
    pub id: PatientId,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub registration_day: Day,
    pub admission_day: Day,
    pub discharge_day: Day,
    /// Latest acceptable admission day. `None` means the stay may slide
    /// until it ends at the horizon.
    #[serde(default)]
    pub max_admission_day: Option<Day>,
    /// Slack days the stay may overrun its nominal discharge.
    #[serde(default)]
    pub variability: u32,
    pub specialism: SpecialismId,
    #[serde(default)]
    pub requests: BTreeMap<FeatureId, FeatureRequest>,
    /// Preferred maximum room capacity. `None` means no preference.
    #[serde(default)]
    pub preferred_capacity: Option<u32>,
}

impl Patient {
    /// Creates a patient registered and admitted on `admission_day`.
    pub fn new(
        id: PatientId,
        name: impl Into<String>,
        gender: Gender,
        age: u32,
        specialism: SpecialismId,
        admission_day: Day,
        discharge_day: Day,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            age,
            gender,
            registration_day: admission_day,
            admission_day,
            discharge_day,
            max_admission_day: None,
            variability: 0,
            specialism,
            requests: BTreeMap::new(),
            preferred_capacity: None,
        }
    }

    pub fn with_registration_day(mut self, day: Day) -> Self {
        self.registration_day = day;
        self
    }

    pub fn with_max_admission_day(mut self, day: Day) -> Self {
        self.max_admission_day = Some(day);
        self
    }

    pub fn with_variability(mut self, variability: u32) -> Self {
        self.variability = variability;
        self
    }

    pub fn with_request(mut self, feature: FeatureId, request: FeatureRequest) -> Self {
        self.requests.insert(feature, request);
        self
    }

    pub fn with_preferred_capacity(mut self, capacity: u32) -> Self {
        self.preferred_capacity = Some(capacity);
        self
    }

    /// Request level for a feature; absent features are `DontCare`.
    pub fn request(&self, feature: FeatureId) -> FeatureRequest {
        self.requests
            .get(&feature)
            .copied()
            .unwrap_or(FeatureRequest::DontCare)
    }

    /// Nominal number of nights in hospital.
    pub fn length_of_stay(&self) -> usize {
        self.discharge_day.saturating_sub(self.admission_day)
    }

    /// Discharge day clipped to the horizon.
    pub fn valid_discharge_day(&self, horizon: usize) -> Day {
        self.discharge_day.min(horizon)
    }

    /// Latest admission day the stay may be delayed to.
    pub fn latest_admission_day(&self, horizon: usize) -> Day {
        let latest = self
            .max_admission_day
            .unwrap_or_else(|| horizon.saturating_sub(self.length_of_stay()));
        latest.max(self.admission_day)
    }

    /// Days in hospital when admitted on `admission`, clipped to the horizon.
    pub fn window_from(&self, admission: Day, horizon: usize) -> Range<Day> {
        let end = (admission + self.length_of_stay()).min(horizon);
        admission..end.max(admission)
    }

    /// Days in hospital at the nominal admission day.
    pub fn nominal_window(&self, horizon: usize) -> Range<Day> {
        self.window_from(self.admission_day, horizon)
    }
}
