//! Solver phases
//!
//! A solve runs two phases in sequence:
//! - ConstructionPhase: builds an initial feasible schedule day by day
//! - TabuSearchPhase: improves it with tabu-guarded neighborhood moves

pub mod construction;
pub mod localsearch;

use std::fmt::Debug;

use crate::error::SolverError;
use crate::scope::SolverScope;

pub use construction::{Construction, ConstructionPhase};
pub use localsearch::{StepOutcome, TabuAttribute, TabuList, TabuSearchPhase};

/// A phase of the solving process.
///
/// Phases are executed in sequence by the solver. Each one works on the
/// working state held by the solver scope and records improvements as the
/// new best schedule.
pub trait Phase: Send + Debug {
    /// What the phase reports back when it finishes.
    type Outcome;

    /// Executes this phase.
    fn solve(&mut self, solver_scope: &mut SolverScope<'_, '_>)
        -> Result<Self::Outcome, SolverError>;

    /// Returns the name of this phase type.
    fn phase_type_name(&self) -> &'static str;
}
