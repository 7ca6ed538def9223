//! BedForge - Patient admission scheduling in Rust
//!
//! Builds a feasible bed schedule day by day, then improves it with tabu
//! search over change, swap, delay and transfer moves.
//!
//! # Example
//!
//! ```rust
//! use bedforge::prelude::*;
//!
//! let instance = Instance::builder(2)
//!     .with_department(
//!         Department::new(0, "General")
//!             .with_age_range(0, 120)
//!             .with_level(0, DoctoringLevel::Complete),
//!     )
//!     .with_room(Room::new(0, "A", 1, 0))
//!     .with_patient(Patient::new(0, "P0", Gender::Male, 40, 0, 0, 2))
//!     .build()
//!     .unwrap();
//!
//! let config = SolverConfig::new().with_iteration_limit(10).with_random_seed(7);
//! let report = Solver::new(&instance, config).unwrap().solve().unwrap();
//! assert_eq!(report.placed_count(), 1);
//! ```

pub use bedforge_config::{
    ConfigError, ConstructionConfig, EnvironmentMode, SolverConfig, TabuConfig, TerminationConfig,
};
pub use bedforge_core::{
    CostTables, Day, Department, DoctoringLevel, FeatureRequest, Gender, GenderPolicy, Instance,
    ModelError, Patient, PatientId, PenaltyWeights, Room, RoomId, Stay, Transfer,
};
pub use bedforge_solver::{
    AdmissionStatus, AssignmentRecord, Schedule, SolveReport, Solver, SolverError, SolverStats,
    TerminationReason,
};

#[cfg(feature = "console")]
pub mod console;

mod solver;
pub use solver::{run_solver, CONFIG_FILE};

pub mod prelude {
    pub use super::{
        Department, DoctoringLevel, FeatureRequest, Gender, GenderPolicy, Instance, Patient, Room,
    };
    pub use super::{EnvironmentMode, PenaltyWeights, SolverConfig};
    pub use super::{Schedule, SolveReport, Solver, SolverError, TerminationReason};
    pub use super::run_solver;
}
