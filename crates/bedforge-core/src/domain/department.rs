//! Hospital departments.

use serde::{Deserialize, Serialize};

use super::{DepartmentId, SpecialismId};

/// Capability of a department to treat a specialism.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DoctoringLevel {
    /// Full treatment capability.
    Complete,
    /// Treatment possible at a soft penalty.
    Partial,
    /// No treatment capability; rooms of this department are infeasible.
    #[default]
    None,
}

/// A hospital department owning a set of rooms.
///
/// `min_age` / `max_age` of 0 leave that side of the age range unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    #[serde(default)]
    pub min_age: u32,
    #[serde(default)]
    pub max_age: u32,
    /// Doctoring level indexed by specialism. Missing entries are `None`.
    #[serde(default)]
    pub levels: Vec<DoctoringLevel>,
}

impl Department {
    /// Creates a department with an unbounded age range and no specialisms.
    pub fn new(id: DepartmentId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            min_age: 0,
            max_age: 0,
            levels: Vec::new(),
        }
    }

    /// Sets the accepted age range. 0 leaves a side unbounded.
    pub fn with_age_range(mut self, min_age: u32, max_age: u32) -> Self {
        self.min_age = min_age;
        self.max_age = max_age;
        self
    }

    /// Sets the doctoring level for a specialism.
    pub fn with_level(mut self, specialism: SpecialismId, level: DoctoringLevel) -> Self {
        if self.levels.len() <= specialism {
            self.levels.resize(specialism + 1, DoctoringLevel::None);
        }
        self.levels[specialism] = level;
        self
    }

    /// Returns the doctoring level for a specialism.
    pub fn doctoring_level(&self, specialism: SpecialismId) -> DoctoringLevel {
        self.levels
            .get(specialism)
            .copied()
            .unwrap_or(DoctoringLevel::None)
    }

    /// Returns true if `age` lies within the department's age range.
    pub fn accepts_age(&self, age: u32) -> bool {
        let above_min = self.min_age == 0 || age >= self.min_age;
        let below_max = self.max_age == 0 || age <= self.max_age;
        above_min && below_max
    }
}
