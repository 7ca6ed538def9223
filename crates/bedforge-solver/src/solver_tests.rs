//! End-to-end tests for the solver.

use super::*;
use crate::schedule::AdmissionStatus;
use crate::state::WorkingState;
use crate::termination::TerminationReason;
use bedforge_config::{ConfigError, EnvironmentMode};
use bedforge_core::{
    Department, DoctoringLevel, Gender, GenderPolicy, ModelError, PenaltyWeights, Patient, Room,
};
use bedforge_test::scenario::{
    delayed_admissions, male_only_female, overbooked, seed_sensitive, two_rooms_three_patients,
    with_unplaceable_patient,
};
use bedforge_test::WardParams;

fn config(iterations: u64, seed: u64) -> SolverConfig {
    SolverConfig::new()
        .with_iteration_limit(iterations)
        .with_random_seed(seed)
        .with_environment_mode(EnvironmentMode::FullAssert)
}

fn assert_capacity_respected(instance: &Instance, report: &SolveReport) {
    for room in &instance.rooms {
        for day in 0..instance.horizon {
            let occupants = report.schedule.occupants(room.id, day).count();
            assert!(
                occupants <= room.capacity as usize,
                "room {} day {day} holds {occupants}",
                room.id
            );
        }
    }
}

// =============================================================================
// Scenario tests
// =============================================================================

#[test]
fn test_two_rooms_three_patients() {
    let instance = two_rooms_three_patients();
    let report = Solver::new(&instance, config(50, 1))
        .unwrap()
        .solve()
        .unwrap();

    assert_eq!(report.total_cost, 0);
    assert_eq!(report.lower_bound, 0);
    assert_eq!(report.placed_count(), 3);
    assert_eq!(report.construction_attempts, 1);
    assert!(report.infeasible_patients.is_empty());
    assert_capacity_respected(&instance, &report);
}

#[test]
fn test_male_only_room_accepts_female_at_a_cost() {
    let instance = male_only_female();
    let report = Solver::new(&instance, config(20, 1))
        .unwrap()
        .solve()
        .unwrap();

    let record = report.assignments[0].unwrap();
    assert_eq!(record.room_before, 0);
    assert_eq!((record.admission, record.discharge), (0, 2));
    assert_eq!(report.total_cost, 100);
    assert_eq!(report.lower_bound, 100);
    assert_eq!(report.gap(), 0);
    // A lone patient in a single room has nowhere to move.
    assert_eq!(report.termination, TerminationReason::SearchExhausted);
}

#[test]
fn test_single_attempt_budget_exhausts() {
    let instance = overbooked();
    let solver = Solver::new(&instance, config(10, 1).with_retry_budget(1)).unwrap();

    let err = solver.solve().unwrap_err();
    assert!(matches!(
        err,
        SolverError::ConstructionExhausted { attempts: 1 }
    ));
}

#[test]
fn test_seed_sensitive_construction_is_deterministic() {
    let instance = seed_sensitive();
    let solver = Solver::new(&instance, config(10, 0)).unwrap();

    for seed in 0..8 {
        let a = solver.solve_with_seed(seed).unwrap();
        let b = solver.solve_with_seed(seed).unwrap();
        assert_eq!(a.construction_attempts, b.construction_attempts);
        assert_eq!(a.schedule, b.schedule);
        assert_eq!(a.schedule.stay(1).map(|s| s.room), Some(0));
    }
}

#[test]
fn test_unplaceable_patient_is_reported() {
    let instance = with_unplaceable_patient();
    let report = Solver::new(&instance, config(20, 3))
        .unwrap()
        .solve()
        .unwrap();

    assert_eq!(report.infeasible_patients, vec![1]);
    assert!(report.assignments[1].is_none());
    assert!(report.assignments[0].is_some());
    assert_eq!(report.schedule.status(1, 2), AdmissionStatus::Registered);
}

#[test]
fn test_delayed_admission_report() {
    let instance = delayed_admissions();
    let weights = PenaltyWeights::default();
    let report = Solver::new(&instance, config(200, 5))
        .unwrap()
        .solve()
        .unwrap();

    // Both stays fit without delay, one of them outside W.
    assert!(report.initial_cost <= 2 * weights.preferred_property);
    assert!(report.total_cost <= report.initial_cost);
    assert!(report.total_cost >= report.lower_bound);
    for (p, record) in report.assignments.iter().enumerate() {
        let record = record.unwrap();
        assert!(record.delay(&instance.patients[p]) <= 2);
    }
}

// =============================================================================
// Property tests
// =============================================================================

#[test]
fn test_properties_on_generated_wards() {
    for seed in 0..3 {
        let instance = WardParams::default().generate(seed);
        let solver = Solver::new(&instance, config(150, seed)).unwrap();
        let report = solver.solve().unwrap();
        let problem = solver.problem();

        // Capacity and consistency: the schedule books cleanly.
        assert_capacity_respected(&instance, &report);
        let state = WorkingState::from_schedule(problem, &report.schedule);

        // Feasibility: every used room is statically feasible.
        for (p, stay) in report.schedule.stays().enumerate() {
            if let Some(stay) = stay {
                assert!(problem.tables().is_stay_feasible(p, stay));
            }
        }

        // Incremental and recomputed costs agree.
        assert_eq!(state.cost(), report.total_cost);
        assert_eq!(state.recompute_cost(problem), report.total_cost);
        let summed: u64 = report.assignments.iter().flatten().map(|r| r.cost).sum();
        assert_eq!(summed, report.total_cost);

        // The best never gets worse than the constructed schedule.
        assert!(report.total_cost <= report.initial_cost);
        assert!(report.total_cost >= report.lower_bound);
    }
}

#[test]
fn test_same_seed_same_report() {
    let instance = WardParams::default().generate(4);
    let solver = Solver::new(&instance, config(80, 0)).unwrap();

    let a = solver.solve_with_seed(11).unwrap();
    let b = solver.solve_with_seed(11).unwrap();
    assert_eq!(a.schedule, b.schedule);
    assert_eq!(a.total_cost, b.total_cost);
    assert_eq!(a.iterations, b.iterations);
    assert_eq!(a.stats.moves_evaluated, b.stats.moves_evaluated);
}

#[test]
fn test_parallel_runs_pick_cheapest_lowest_index() {
    let instance = WardParams::default().generate(6);
    let solver = Solver::new(&instance, config(60, 100)).unwrap();

    let parallel = solver.solve_parallel(4).unwrap();
    let sequential: Vec<SolveReport> = (0..4)
        .map(|i| solver.solve_with_seed(100 + i).unwrap())
        .collect();
    let cheapest = sequential
        .iter()
        .min_by_key(|r| r.total_cost)
        .unwrap();

    assert_eq!(parallel.total_cost, cheapest.total_cost);
    assert_eq!(parallel.seed, cheapest.seed);
    assert_eq!(parallel.schedule, cheapest.schedule);
}

#[test]
fn test_parallel_runs_all_failing_return_error() {
    let instance = overbooked();
    let solver = Solver::new(&instance, config(10, 0).with_retry_budget(2)).unwrap();

    let err = solver.solve_parallel(3).unwrap_err();
    assert!(matches!(
        err,
        SolverError::ConstructionExhausted { attempts: 2 }
    ));
}

#[test]
fn test_unimproved_limit_stops_search() {
    let instance = two_rooms_three_patients();
    let mut cfg = config(1_000, 2).with_tabu_tenure(1);
    cfg.termination.unimproved_iteration_limit = Some(5);
    let report = Solver::new(&instance, cfg).unwrap().solve().unwrap();

    // Cost 0 cannot improve, so the search stops after five steps.
    assert_eq!(report.termination, TerminationReason::UnimprovedLimit);
    assert_eq!(report.iterations, 5);
}

#[test]
fn test_delay_past_horizon_does_not_shed_nights() {
    let instance = Instance::builder(5)
        .with_department(
            Department::new(0, "General")
                .with_age_range(0, 120)
                .with_level(0, DoctoringLevel::Complete),
        )
        .with_room(Room::new(0, "M", 1, 0).with_policy(GenderPolicy::MaleOnly))
        .with_patient(
            Patient::new(0, "F", Gender::Female, 62, 0, 0, 5).with_max_admission_day(4),
        )
        .build()
        .unwrap();
    let report = Solver::new(&instance, config(50, 1))
        .unwrap()
        .solve()
        .unwrap();

    assert_eq!(report.lower_bound, 250);
    assert!(report.total_cost >= report.lower_bound);
    assert_eq!(report.total_cost, 250);
    let record = report.assignments[0].unwrap();
    assert_eq!((record.admission, record.discharge), (0, 5));
}

// =============================================================================
// Validation tests
// =============================================================================

#[test]
fn test_rejects_invalid_config() {
    let instance = two_rooms_three_patients();
    let err = Solver::new(&instance, SolverConfig::new().with_tabu_tenure(0)).unwrap_err();
    assert!(matches!(err, SolverError::Config(ConfigError::Invalid(_))));
}

#[test]
fn test_rejects_invalid_instance() {
    let mut instance = two_rooms_three_patients();
    instance.rooms[1].capacity = 0;
    let err = Solver::new(&instance, SolverConfig::new()).unwrap_err();
    assert!(matches!(
        err,
        SolverError::InvalidInstance(ModelError::ZeroCapacity { .. })
    ));
}
