//! Tests for the move module.

use super::*;
use bedforge_core::PenaltyWeights;
use bedforge_test::scenario::{delayed_admissions, two_rooms_three_patients};

// =============================================================================
// Rewrite tests
// =============================================================================

mod rewrite_tests {
    use super::*;

    #[test]
    fn test_change_rewrite_rooms() {
        let rw = ChangeMove::new(3, Stay::new(0, 3, 1), 2).rewrites()[0];
        assert_eq!(rw.patient, 3);
        assert_eq!(rw.left_rooms().as_slice(), &[1]);
        assert_eq!(rw.entered_rooms().as_slice(), &[2]);
        assert!(!rw.admission_changed());
    }

    #[test]
    fn test_partial_change_keeps_original_room() {
        let rw = PartialChangeMove::new(0, Stay::new(0, 4, 1), 2, 3).rewrites()[0];
        assert_eq!(rw.after, Stay::new(0, 4, 1).with_transfer(2, 3));
        assert!(rw.left_rooms().is_empty());
        assert_eq!(rw.entered_rooms().as_slice(), &[3]);
    }

    #[test]
    fn test_delay_changes_admission_only() {
        let rw = DelayMove::new(1, Stay::new(1, 3, 0), 3..5).rewrites()[0];
        assert_eq!(rw.after, Stay::new(3, 5, 0));
        assert!(rw.admission_changed());
        assert!(rw.left_rooms().is_empty());
        assert!(rw.entered_rooms().is_empty());
    }

    #[test]
    fn test_swap_exchanges_rooms() {
        let m = SwapMove::new((0, Stay::new(0, 2, 0)), (1, Stay::new(1, 3, 1)));
        let rws = m.rewrites();
        assert_eq!(rws.len(), 2);
        assert_eq!(rws[0].after, Stay::new(0, 2, 1));
        assert_eq!(rws[1].after, Stay::new(1, 3, 0));
        assert_eq!(m.patients(), (0, 1));
    }

    #[test]
    fn test_partial_swap_transfers_both() {
        let m = PartialSwapMove::new((0, Stay::new(0, 4, 0)), (1, Stay::new(1, 3, 1)), 2);
        let rws = m.rewrites();
        assert_eq!(rws[0].after, Stay::new(0, 4, 0).with_transfer(2, 1));
        assert_eq!(rws[1].after, Stay::new(1, 3, 1).with_transfer(2, 0));
    }
}

// =============================================================================
// PatientMove tests
// =============================================================================

mod patient_move_tests {
    use super::*;

    #[test]
    fn test_delegates_to_variant() {
        let inner = DelayMove::new(1, Stay::new(1, 3, 0), 2..4);
        let mv: PatientMove = inner.into();
        assert_eq!(mv.kind(), MoveKind::Delay);
        assert_eq!(mv.rewrites(), inner.rewrites());
        assert_eq!(mv, PatientMove::Delay(inner));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(MoveKind::Change.name(), "change");
        assert_eq!(MoveKind::PartialSwap.name(), "partial_swap");
    }
}

// =============================================================================
// CandidateMove tests
// =============================================================================

mod candidate_tests {
    use super::*;
    use crate::calendar::CapacityCalendar;

    fn booked(instance: &bedforge_core::Instance, stays: &[Stay]) -> CapacityCalendar {
        let mut calendar = CapacityCalendar::new(instance);
        for stay in stays {
            assert!(calendar.occupy_stay(stay));
        }
        calendar
    }

    #[test]
    fn test_rejects_full_room() {
        let instance = delayed_admissions();
        let problem = Problem::new(&instance, PenaltyWeights::default());
        let p0 = Stay::new(0, 2, 0);
        let p1 = Stay::new(1, 3, 1);
        let calendar = booked(&instance, &[p0, p1]);

        // W holds P0 on day 1.
        assert!(CandidateMove::evaluate(&problem, &calendar, ChangeMove::new(1, p1, 0)).is_none());
        // From day 2 W is free.
        let partial = CandidateMove::evaluate(
            &problem,
            &calendar,
            PartialChangeMove::new(1, p1, 2, 0),
        );
        assert!(partial.is_some());
    }

    #[test]
    fn test_swap_nets_out_released_beds() {
        let instance = delayed_admissions();
        let problem = Problem::new(&instance, PenaltyWeights::default());
        let p0 = Stay::new(0, 2, 0);
        let p1 = Stay::new(1, 3, 1);
        let calendar = booked(&instance, &[p0, p1]);

        let candidate = CandidateMove::evaluate(&problem, &calendar, SwapMove::new((0, p0), (1, p1)))
            .expect("swap fits");
        assert_eq!(candidate.kind(), MoveKind::Swap);
        assert_eq!(candidate.patients().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(candidate.days(), 0..3);
        assert_eq!(candidate.target_rooms().as_slice(), &[1, 0]);
        // Both prefer W; one night each moves between W and X.
        let preferred = problem.tables().cost(0, 1) - problem.tables().cost(0, 0);
        assert_eq!(candidate.delta(), 0);
        assert_eq!(preferred, problem.tables().cost(1, 1) - problem.tables().cost(1, 0));
    }

    #[test]
    fn test_delta_matches_stay_costs() {
        let instance = delayed_admissions();
        let weights = PenaltyWeights::default();
        let problem = Problem::new(&instance, weights);
        let p1 = Stay::new(1, 3, 1);
        let calendar = booked(&instance, &[p1]);

        let candidate =
            CandidateMove::evaluate(&problem, &calendar, PartialChangeMove::new(1, p1, 2, 0))
                .expect("fits");
        let tables = problem.tables();
        let patient = &instance.patients[1];
        let expected = tables.stay_cost(patient, &p1.with_transfer(2, 0)) as i64
            - tables.stay_cost(patient, &p1) as i64;
        assert_eq!(candidate.delta(), expected);
        assert_eq!(
            expected,
            weights.transfer as i64 - (tables.cost(1, 1) - tables.cost(1, 0)) as i64
        );
    }

    #[test]
    fn test_rejects_infeasible_room() {
        let instance = bedforge_test::scenario::seed_sensitive();
        let problem = Problem::new(&instance, PenaltyWeights::default());
        let p1 = Stay::new(0, 3, 0);
        let calendar = booked(&instance, &[p1]);

        // Room B lacks the oxygen P1 needs.
        assert!(!problem.tables().is_feasible(1, 1));
        assert!(CandidateMove::evaluate(&problem, &calendar, ChangeMove::new(1, p1, 1)).is_none());
    }

    #[test]
    fn test_same_room_rewrite_needs_no_spare_bed() {
        let instance = two_rooms_three_patients();
        let problem = Problem::new(&instance, PenaltyWeights::default());
        let stay = Stay::new(0, 3, 0).with_transfer(1, 1);
        let calendar = booked(&instance, &[stay, Stay::new(0, 3, 0), Stay::new(0, 3, 1)]);

        // Dropping the transfer back into room 0 needs beds on days 1 and 2,
        // where room 0 still has one free.
        let candidate = CandidateMove::evaluate(&problem, &calendar, ChangeMove::new(0, stay, 0))
            .expect("fits");
        assert_eq!(candidate.delta(), -(problem.weights().transfer as i64));
    }
}
