//! Hospital rooms.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{DepartmentId, FeatureId, Gender, RoomId};

/// Gender policy of a room.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenderPolicy {
    SameGenderOnly,
    MaleOnly,
    FemaleOnly,
    #[default]
    Mixed,
}

impl GenderPolicy {
    /// Returns true if the policy conflicts with a patient's gender.
    ///
    /// Only the single-gender policies conflict statically. Same-gender
    /// rooms depend on co-occupants and carry no static cost.
    pub fn conflicts_with(self, gender: Gender) -> bool {
        matches!(
            (self, gender),
            (GenderPolicy::MaleOnly, Gender::Female) | (GenderPolicy::FemaleOnly, Gender::Male)
        )
    }
}

/// A hospital room with a fixed number of beds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub capacity: u32,
    pub department: DepartmentId,
    #[serde(default)]
    pub policy: GenderPolicy,
    #[serde(default)]
    pub features: BTreeSet<FeatureId>,
}

impl Room {
    /// Creates a mixed-policy room without features.
    pub fn new(id: RoomId, name: impl Into<String>, capacity: u32, department: DepartmentId) -> Self {
        Self {
            id,
            name: name.into(),
            capacity,
            department,
            policy: GenderPolicy::Mixed,
            features: BTreeSet::new(),
        }
    }

    pub fn with_policy(mut self, policy: GenderPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_feature(mut self, feature: FeatureId) -> Self {
        self.features.insert(feature);
        self
    }

    pub fn has_feature(&self, feature: FeatureId) -> bool {
        self.features.contains(&feature)
    }
}
