//! Termination conditions for the search phase.

mod composite;
mod iteration;
mod time;
mod unimproved;

use std::fmt::Debug;

use serde::Serialize;

use crate::scope::SolverScope;

pub use composite::OrTermination;
pub use iteration::IterationCountTermination;
pub use time::TimeTermination;
pub use unimproved::UnimprovedIterationTermination;

/// Why a solve run stopped searching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    IterationLimit,
    TimeLimit,
    UnimprovedLimit,
    /// Every candidate of the last scan was tabu and none aspired.
    NoAdmissibleMove,
    /// The last scan produced no candidate at all.
    SearchExhausted,
}

impl TerminationReason {
    pub fn name(self) -> &'static str {
        match self {
            TerminationReason::IterationLimit => "iteration_limit",
            TerminationReason::TimeLimit => "time_limit",
            TerminationReason::UnimprovedLimit => "unimproved_limit",
            TerminationReason::NoAdmissibleMove => "no_admissible_move",
            TerminationReason::SearchExhausted => "search_exhausted",
        }
    }
}

/// Trait for determining when to stop searching.
///
/// Checked before every search step.
pub trait Termination: Send + Debug {
    /// Returns the reason to stop, or `None` to keep going.
    fn terminated_by(&self, solver_scope: &SolverScope<'_, '_>) -> Option<TerminationReason>;

    /// Returns true if solving should terminate.
    fn is_terminated(&self, solver_scope: &SolverScope<'_, '_>) -> bool {
        self.terminated_by(solver_scope).is_some()
    }
}

/// An absent limit never terminates.
impl<T: Termination> Termination for Option<T> {
    fn terminated_by(&self, solver_scope: &SolverScope<'_, '_>) -> Option<TerminationReason> {
        self.as_ref().and_then(|t| t.terminated_by(solver_scope))
    }
}

#[cfg(test)]
mod tests;
