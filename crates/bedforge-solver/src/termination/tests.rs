//! Integration tests for termination conditions.

use super::*;
use crate::problem::Problem;
use bedforge_core::{PenaltyWeights, Stay};
use bedforge_test::scenario::{male_only_female, two_rooms_three_patients};

#[test]
fn test_iteration_count_termination() {
    let instance = two_rooms_three_patients();
    let problem = Problem::new(&instance, PenaltyWeights::default());
    let mut scope = SolverScope::new(&problem, 0);
    let term = IterationCountTermination::new(3);

    assert!(!term.is_terminated(&scope));
    scope.increment_step_count();
    scope.increment_step_count();
    assert!(!term.is_terminated(&scope));
    scope.increment_step_count();
    assert_eq!(
        term.terminated_by(&scope),
        Some(TerminationReason::IterationLimit)
    );
}

#[test]
fn test_time_termination_needs_started_scope() {
    let instance = two_rooms_three_patients();
    let problem = Problem::new(&instance, PenaltyWeights::default());
    let mut scope = SolverScope::new(&problem, 0);
    let term = TimeTermination::millis(0);

    assert!(!term.is_terminated(&scope));
    scope.start_solving();
    assert_eq!(term.terminated_by(&scope), Some(TerminationReason::TimeLimit));
    assert!(!TimeTermination::seconds(3600).is_terminated(&scope));
}

#[test]
fn test_unimproved_termination_resets_on_improvement() {
    let instance = male_only_female();
    let problem = Problem::new(&instance, PenaltyWeights::default());
    let mut scope = SolverScope::new(&problem, 0);
    assert!(scope.working_mut().place(&problem, 0, Stay::new(0, 2, 0)));
    scope.update_best_solution();
    let term = UnimprovedIterationTermination::new(2);

    scope.increment_step_count();
    assert!(!term.is_terminated(&scope));
    scope.increment_step_count();
    assert_eq!(
        term.terminated_by(&scope),
        Some(TerminationReason::UnimprovedLimit)
    );

    // The same cost is not an improvement.
    scope.update_best_solution();
    assert!(term.is_terminated(&scope));

    // Unplacing the costly patient is.
    scope.working_mut().clear();
    assert!(scope.update_best_solution());
    assert!(!term.is_terminated(&scope));
}

#[test]
fn test_absent_limit_never_terminates() {
    let instance = two_rooms_three_patients();
    let problem = Problem::new(&instance, PenaltyWeights::default());
    let mut scope = SolverScope::new(&problem, 0);
    scope.start_solving();
    for _ in 0..10 {
        scope.increment_step_count();
    }

    let term: Option<IterationCountTermination> = None;
    assert!(!term.is_terminated(&scope));
    assert!(Some(IterationCountTermination::new(10)).is_terminated(&scope));
}

#[test]
fn test_or_termination_reports_first_firing_child() {
    let instance = two_rooms_three_patients();
    let problem = Problem::new(&instance, PenaltyWeights::default());
    let mut scope = SolverScope::new(&problem, 0);
    scope.start_solving();

    let term = OrTermination::new((
        IterationCountTermination::new(1),
        None::<TimeTermination>,
        Some(UnimprovedIterationTermination::new(1)),
    ));
    assert!(!term.is_terminated(&scope));

    scope.increment_step_count();
    assert_eq!(
        term.terminated_by(&scope),
        Some(TerminationReason::IterationLimit)
    );
}

#[test]
fn test_reason_names() {
    assert_eq!(TerminationReason::SearchExhausted.name(), "search_exhausted");
    assert_eq!(TerminationReason::NoAdmissibleMove.name(), "no_admissible_move");
}
