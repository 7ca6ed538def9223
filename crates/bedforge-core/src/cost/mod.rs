//! Cost and constraint evaluation for patient/room pairs.
//!
//! Static feasibility and static cost depend only on the instance, never on
//! occupancy. Capacity is tracked separately by the solver's calendar.

mod overlap;
mod tables;

use serde::{Deserialize, Serialize};

use crate::domain::{
    Department, DoctoringLevel, FeatureId, FeatureRequest, Instance, Patient, Room, RoomId,
};

pub use overlap::OverlapTable;
pub use tables::CostTables;

/// Penalty weights for soft constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct PenaltyWeights {
    /// Per preferred feature the room lacks.
    pub preferred_property: u64,
    /// Room larger than the patient's preferred capacity.
    pub preference: u64,
    /// Department only partially covers the patient's specialism.
    pub specialism: u64,
    /// Single-gender room of the opposite gender.
    pub gender: u64,
    /// Mid-stay room change.
    pub transfer: u64,
    /// Per day of delayed admission.
    pub delay: u64,
    /// Per day a variable-length stay risks overrunning into a full room.
    pub overcrowd_risk: u64,
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        Self {
            preferred_property: 20,
            preference: 10,
            specialism: 20,
            gender: 50,
            transfer: 100,
            delay: 2,
            overcrowd_risk: 1,
        }
    }
}

/// A hard constraint that rules out a patient/room pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HardViolation {
    MissingFeature(FeatureId),
    UntreatedSpecialism,
    AgeOutOfRange,
}

/// Checks the hard constraints for placing `patient` in `room`.
///
/// # Errors
///
/// Returns the first violated constraint.
pub fn check(patient: &Patient, room: &Room, department: &Department) -> Result<(), HardViolation> {
    if let Some((&feature, _)) = patient
        .requests
        .iter()
        .find(|(&f, &req)| req == FeatureRequest::Needed && !room.has_feature(f))
    {
        return Err(HardViolation::MissingFeature(feature));
    }
    if department.doctoring_level(patient.specialism) == DoctoringLevel::None {
        return Err(HardViolation::UntreatedSpecialism);
    }
    if !department.accepts_age(patient.age) {
        return Err(HardViolation::AgeOutOfRange);
    }
    Ok(())
}

/// Returns true if `patient` may be placed in `room` at all.
pub fn is_feasible(instance: &Instance, patient: &Patient, room: &Room) -> bool {
    check(patient, room, instance.department_of(room)).is_ok()
}

/// Per-night penalty of placing `patient` in `room`.
pub fn room_cost(weights: &PenaltyWeights, patient: &Patient, room: &Room, department: &Department) -> u64 {
    let mut cost = 0;

    let missing_preferred = patient
        .requests
        .iter()
        .filter(|(&f, &req)| req == FeatureRequest::Preferred && !room.has_feature(f))
        .count() as u64;
    cost += missing_preferred * weights.preferred_property;

    if patient
        .preferred_capacity
        .is_some_and(|preferred| room.capacity > preferred)
    {
        cost += weights.preference;
    }

    if department.doctoring_level(patient.specialism) == DoctoringLevel::Partial {
        cost += weights.specialism;
    }

    if room.policy.conflicts_with(patient.gender) {
        cost += weights.gender;
    }

    cost
}

/// Feasibility and per-night cost of every room for `patient`.
pub(crate) fn evaluate_rooms<'a>(
    instance: &'a Instance,
    weights: &'a PenaltyWeights,
    patient: &'a Patient,
) -> impl Iterator<Item = (RoomId, bool, u64)> + 'a {
    instance.rooms.iter().map(move |room| {
        let department = instance.department_of(room);
        let feasible = check(patient, room, department).is_ok();
        (room.id, feasible, room_cost(weights, patient, room, department))
    })
}
