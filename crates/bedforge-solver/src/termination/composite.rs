//! Any-of termination over a tuple of conditions.

use super::{Termination, TerminationReason};
use crate::scope::SolverScope;

/// Stops as soon as any child condition fires.
///
/// Children are checked in tuple order and the first reason wins. A child
/// of type `Option<T>` stands for a limit that may not be configured.
///
/// # Example
///
/// ```
/// use bedforge_solver::termination::{
///     IterationCountTermination, OrTermination, TimeTermination,
///     UnimprovedIterationTermination,
/// };
///
/// let time_budget: Option<TimeTermination> = None;
/// let termination = OrTermination::new((
///     IterationCountTermination::new(5_000),
///     time_budget,
///     Some(UnimprovedIterationTermination::new(500)),
/// ));
/// ```
#[derive(Debug)]
pub struct OrTermination<T>(pub T);

impl<T> OrTermination<T> {
    pub fn new(terminations: T) -> Self {
        Self(terminations)
    }
}

macro_rules! impl_or_termination {
    ($($idx:tt: $T:ident),+) => {
        impl<$($T),+> Termination for OrTermination<($($T,)+)>
        where
            $($T: Termination,)+
        {
            fn terminated_by(
                &self,
                solver_scope: &SolverScope<'_, '_>,
            ) -> Option<TerminationReason> {
                $(
                    if let Some(reason) = (self.0).$idx.terminated_by(solver_scope) {
                        return Some(reason);
                    }
                )+
                None
            }
        }
    };
}

impl_or_termination!(0: T0);
impl_or_termination!(0: T0, 1: T1);
impl_or_termination!(0: T0, 1: T1, 2: T2);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3, 4: T4);
