//! Iteration-count termination.

use super::{Termination, TerminationReason};
use crate::scope::SolverScope;

/// Terminates after a fixed number of search steps.
///
/// # Example
///
/// ```
/// use bedforge_solver::termination::IterationCountTermination;
///
/// let term = IterationCountTermination::new(1000);
/// assert_eq!(term.limit(), 1000);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct IterationCountTermination {
    limit: u64,
}

impl IterationCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }
}

impl Termination for IterationCountTermination {
    fn terminated_by(&self, solver_scope: &SolverScope<'_, '_>) -> Option<TerminationReason> {
        (solver_scope.total_step_count() >= self.limit).then_some(TerminationReason::IterationLimit)
    }
}
