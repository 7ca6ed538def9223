//! Termination based on lack of improvement.

use super::{Termination, TerminationReason};
use crate::scope::SolverScope;

/// Terminates if the best schedule has not improved for a number of steps.
///
/// Useful once the search has plateaued and further steps only cycle
/// through equally good schedules.
#[derive(Debug, Clone, Copy)]
pub struct UnimprovedIterationTermination {
    limit: u64,
}

impl UnimprovedIterationTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl Termination for UnimprovedIterationTermination {
    fn terminated_by(&self, solver_scope: &SolverScope<'_, '_>) -> Option<TerminationReason> {
        (solver_scope.steps_since_improvement() >= self.limit)
            .then_some(TerminationReason::UnimprovedLimit)
    }
}
