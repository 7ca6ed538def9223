//! BedForge Solver Engine
//!
//! This crate turns a validated instance into a cheap, feasible schedule:
//! - Schedule, capacity calendar and the incremental working state
//! - ConstructionPhase: randomized day-by-day builder with restarts
//! - Neighborhood moves and the tabu search phase
//! - Termination conditions and run statistics
//! - Solver: runs the phases and produces a [`SolveReport`]

pub mod calendar;
pub mod error;
pub mod heuristic;
pub mod phase;
pub mod problem;
pub mod report;
pub mod schedule;
pub mod scope;
pub mod solver;
pub mod state;
pub mod stats;
pub mod termination;

pub use calendar::{BedDemand, CalendarMismatch, CalendarSnapshot, CapacityCalendar};
pub use error::SolverError;
pub use heuristic::{CandidateMove, Move, MoveKind, Neighborhood, PatientMove};
pub use phase::{
    Construction, ConstructionPhase, Phase, StepOutcome, TabuAttribute, TabuList,
    TabuSearchPhase,
};
pub use problem::Problem;
pub use report::{overcrowd_risk, SolveReport};
pub use schedule::{AdmissionStatus, AssignmentRecord, Schedule};
pub use scope::SolverScope;
pub use solver::Solver;
pub use state::WorkingState;
pub use stats::{PhaseStats, SolverStats};
pub use termination::{
    IterationCountTermination, OrTermination, Termination, TerminationReason, TimeTermination,
    UnimprovedIterationTermination,
};
