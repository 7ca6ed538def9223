//! BedForge Core - instance model and cost evaluation
//!
//! This crate provides the static side of patient admission scheduling:
//! - Domain types for departments, rooms, patients and stays
//! - Hard-constraint checks and per-night soft costs
//! - Precomputed cost, feasibility and overlap tables
//! - Instance validation errors

pub mod cost;
pub mod domain;
pub mod error;

pub use cost::{CostTables, HardViolation, OverlapTable, PenaltyWeights};
pub use domain::{
    Day, Department, DepartmentId, DoctoringLevel, FeatureId, FeatureRequest, Gender,
    GenderPolicy, Instance, InstanceBuilder, Patient, PatientId, Room, RoomId, SpecialismId,
    Stay, Transfer,
};
pub use error::ModelError;
