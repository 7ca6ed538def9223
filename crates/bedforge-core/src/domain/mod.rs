//! Instance model for patient admission scheduling.
//!
//! All entities live in contiguous arenas owned by [`Instance`] and refer to
//! each other by index:
//! - [`Department`]: age range and doctoring level per specialism
//! - [`Room`]: bed count, owning department, gender policy, features
//! - [`Patient`]: admission window, requirements and preferences
//! - [`Stay`]: the realized placement of one patient

mod department;
mod instance;
mod patient;
mod room;
mod stay;

pub use department::{Department, DoctoringLevel};
pub use instance::{Instance, InstanceBuilder};
pub use patient::{FeatureRequest, Gender, Patient};
pub use room::{GenderPolicy, Room};
pub use stay::{Stay, Transfer};

/// Index of a department in [`Instance::departments`].
pub type DepartmentId = usize;

/// Index of a room in [`Instance::rooms`].
pub type RoomId = usize;

/// Index of a patient in [`Instance::patients`].
pub type PatientId = usize;

/// Index of a room feature.
pub type FeatureId = usize;

/// Index of a medical specialism.
pub type SpecialismId = usize;

/// Day offset from the start of the planning horizon.
pub type Day = usize;
