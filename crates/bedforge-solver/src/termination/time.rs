//! Wall-clock termination.

use std::time::Duration;

use super::{Termination, TerminationReason};
use crate::scope::SolverScope;

/// Stops the search once the run has used up its time budget.
///
/// The clock starts at [`SolverScope::start_solving`], so time spent in
/// construction counts against the budget. A scope that was never started
/// never times out.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use bedforge_solver::termination::TimeTermination;
///
/// let budget = TimeTermination::millis(1500);
/// assert_eq!(budget.limit(), Duration::from_millis(1500));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TimeTermination {
    limit: Duration,
}

impl TimeTermination {
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    pub fn millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn seconds(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }
}

impl Termination for TimeTermination {
    fn terminated_by(&self, solver_scope: &SolverScope<'_, '_>) -> Option<TerminationReason> {
        let spent = solver_scope.elapsed()?;
        (spent >= self.limit).then_some(TerminationReason::TimeLimit)
    }
}
