//! Lazy generation of feasible candidate moves.

use std::collections::VecDeque;

use bedforge_core::{PatientId, Stay};
use rand::Rng;

use super::r#move::{
    CandidateMove, ChangeMove, DelayMove, PartialChangeMove, PartialSwapMove, PatientMove,
    SwapMove,
};
use crate::problem::Problem;
use crate::state::WorkingState;

/// Iterator over the feasible moves of a working state.
///
/// Patients are visited once each, starting from `start` and wrapping
/// around. For each placed patient the moves come in a fixed order:
/// change, swap, delay, partial change, partial swap. Moves are generated
/// one patient at a time and checked only when pulled, so a caller that
/// stops early pays only for what it consumed.
///
/// Every yielded candidate fits the calendar and uses only statically
/// feasible rooms.
pub struct Neighborhood<'a, 'p> {
    problem: &'a Problem<'p>,
    state: &'a WorkingState,
    start: usize,
    visited: usize,
    pending: VecDeque<PatientMove>,
}

impl<'a, 'p> Neighborhood<'a, 'p> {
    pub fn new(problem: &'a Problem<'p>, state: &'a WorkingState, start: usize) -> Self {
        Self {
            problem,
            state,
            start,
            visited: 0,
            pending: VecDeque::new(),
        }
    }

    /// Starts at a uniformly random patient.
    pub fn random<R: Rng>(problem: &'a Problem<'p>, state: &'a WorkingState, rng: &mut R) -> Self {
        let n = problem.instance().patient_count();
        let start = if n == 0 { 0 } else { rng.random_range(0..n) };
        Self::new(problem, state, start)
    }

    fn expand(&mut self, patient: PatientId) {
        let Some(&stay) = self.state.schedule().stay(patient) else {
            return;
        };
        let tables = self.problem.tables();
        let rooms = tables.feasible_rooms(patient);

        for &room in rooms {
            if stay.is_uniform() && room == stay.room {
                continue;
            }
            self.pending
                .push_back(ChangeMove::new(patient, stay, room).into());
        }

        if !stay.is_uniform() {
            return;
        }

        let partners = self.uniform_partners(patient, stay);
        for &(q, other) in &partners {
            self.pending
                .push_back(SwapMove::new((patient, stay), (q, other)).into());
        }

        let horizon = self.problem.horizon();
        let p = &self.problem.instance().patients[patient];
        for admission in p.admission_day..=p.latest_admission_day(horizon) {
            if admission == stay.admission || admission >= horizon {
                continue;
            }
            let window = p.window_from(admission, horizon);
            self.pending
                .push_back(DelayMove::new(patient, stay, window).into());
        }

        for pivot in stay.admission + 1..stay.discharge {
            for &room in rooms {
                if room != stay.room {
                    self.pending
                        .push_back(PartialChangeMove::new(patient, stay, pivot, room).into());
                }
            }
        }

        for &(q, other) in &partners {
            let first = stay.admission.max(other.admission) + 1;
            let last = stay.discharge.min(other.discharge);
            for pivot in first..last {
                self.pending
                    .push_back(PartialSwapMove::new((patient, stay), (q, other), pivot).into());
            }
        }
    }

    /// Overlapping patients with a transfer-free stay in another room.
    fn uniform_partners(&self, patient: PatientId, stay: Stay) -> Vec<(PatientId, Stay)> {
        let schedule = self.state.schedule();
        self.problem
            .overlap()
            .partners(patient)
            .iter()
            .filter_map(|&q| schedule.stay(q).map(|s| (q, *s)))
            .filter(|(_, other)| other.is_uniform() && other.room != stay.room)
            .collect()
    }
}

impl Iterator for Neighborhood<'_, '_> {
    type Item = CandidateMove;

    fn next(&mut self) -> Option<CandidateMove> {
        let n = self.problem.instance().patient_count();
        loop {
            while let Some(mv) = self.pending.pop_front() {
                if let Some(candidate) =
                    CandidateMove::evaluate(self.problem, self.state.calendar(), mv)
                {
                    return Some(candidate);
                }
            }
            if self.visited >= n {
                return None;
            }
            let patient = (self.start + self.visited) % n;
            self.visited += 1;
            self.expand(patient);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::MoveKind;
    use bedforge_core::PenaltyWeights;
    use bedforge_test::scenario::{delayed_admissions, two_rooms_three_patients};
    use bedforge_test::WardParams;

    fn delayed_state(problem: &Problem<'_>) -> WorkingState {
        let mut state = WorkingState::empty(problem);
        assert!(state.place(problem, 0, Stay::new(0, 2, 0)));
        assert!(state.place(problem, 1, Stay::new(1, 3, 1)));
        state
    }

    #[test]
    fn test_move_order_per_patient() {
        let instance = delayed_admissions();
        let problem = Problem::new(&instance, PenaltyWeights::default());
        let state = delayed_state(&problem);

        let kinds: Vec<MoveKind> = Neighborhood::new(&problem, &state, 1)
            .take_while(|c| c.patients().next() == Some(1))
            .map(|c| c.kind())
            .collect();

        // W is taken on day 1, so P1 has no plain change.
        assert_eq!(
            kinds,
            vec![
                MoveKind::Swap,
                MoveKind::Delay,
                MoveKind::Delay,
                MoveKind::PartialChange
            ]
        );
    }

    #[test]
    fn test_delay_candidates_keep_room_and_price_delay() {
        let instance = delayed_admissions();
        let weights = PenaltyWeights::default();
        let problem = Problem::new(&instance, weights);
        let state = delayed_state(&problem);

        let delays: Vec<CandidateMove> = Neighborhood::new(&problem, &state, 0)
            .filter(|c| c.kind() == MoveKind::Delay && c.patients().next() == Some(1))
            .collect();

        // Admission 1 is current; 2 and 3 are allowed by the deadline.
        let admissions: Vec<_> = delays.iter().map(|c| c.rewrites()[0].after.admission).collect();
        assert_eq!(admissions, vec![2, 3]);
        for c in &delays {
            let after = c.rewrites()[0].after;
            assert_eq!(after.room, 1);
            assert_eq!(after.len(), 2);
        }
        assert_eq!(delays[0].delta(), weights.delay as i64);
        assert_eq!(delays[0].days(), 1..4);
        assert_eq!(delays[0].target_rooms().as_slice(), &[1]);
    }

    #[test]
    fn test_no_candidate_overbooks() {
        let instance = delayed_admissions();
        let problem = Problem::new(&instance, PenaltyWeights::default());
        let state = delayed_state(&problem);

        for candidate in Neighborhood::new(&problem, &state, 0) {
            let mut next = state.clone();
            next.apply(&candidate);
            next.assert_consistent(&problem);
        }
    }

    #[test]
    fn test_full_room_is_entered_only_by_swapping() {
        let instance = two_rooms_three_patients();
        let weights = PenaltyWeights::default();
        let problem = Problem::new(&instance, weights);
        let mut state = WorkingState::empty(&problem);
        assert!(state.place(&problem, 0, Stay::new(0, 3, 0)));
        assert!(state.place(&problem, 1, Stay::new(0, 3, 0)));
        assert!(state.place(&problem, 2, Stay::new(0, 3, 1)));

        let candidates: Vec<_> = Neighborhood::new(&problem, &state, 0).collect();
        let p2_kinds: Vec<_> = candidates
            .iter()
            .filter(|c| c.patients().next() == Some(2))
            .map(|c| c.kind())
            .collect();
        assert!(p2_kinds.contains(&MoveKind::Swap));
        assert!(p2_kinds
            .iter()
            .all(|k| matches!(k, MoveKind::Swap | MoveKind::PartialSwap)));

        for c in &candidates {
            let expected = match c.kind() {
                MoveKind::Change | MoveKind::Swap => 0,
                MoveKind::PartialChange => weights.transfer as i64,
                MoveKind::PartialSwap => 2 * weights.transfer as i64,
                MoveKind::Delay => unreachable!("no slack to delay anyone"),
            };
            assert_eq!(c.delta(), expected, "{:?}", c.as_move());
        }
    }

    #[test]
    fn test_generated_ward_candidates_apply_cleanly() {
        let instance = WardParams::default().generate(11);
        let problem = Problem::new(&instance, PenaltyWeights::default());
        let mut state = WorkingState::empty(&problem);
        for p in &instance.patients {
            let stay = Stay::in_room(p.nominal_window(instance.horizon), 0);
            assert!(state.place(&problem, p.id, stay));
        }

        let mut seen = 0;
        for candidate in Neighborhood::new(&problem, &state, 5).take(300) {
            for rw in candidate.rewrites() {
                assert_eq!(state.schedule().stay(rw.patient), Some(&rw.before));
            }
            let mut next = state.clone();
            next.apply(&candidate);
            assert_eq!(
                next.cost() as i64,
                state.cost() as i64 + candidate.delta()
            );
            next.assert_consistent(&problem);
            seen += 1;
        }
        assert!(seen > 0);
    }
}
