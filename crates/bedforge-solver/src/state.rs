//! The mutable search state: schedule, calendar and running cost.

use bedforge_core::{PatientId, Stay};

use crate::calendar::CapacityCalendar;
use crate::heuristic::CandidateMove;
use crate::problem::Problem;
use crate::schedule::Schedule;

/// A schedule together with the bed calendar it books and its cost.
///
/// Every mutation goes through this type so that the three never drift
/// apart. [`WorkingState::assert_consistent`] checks that they have not.
#[derive(Debug, Clone)]
pub struct WorkingState {
    schedule: Schedule,
    calendar: CapacityCalendar,
    cost: u64,
}

impl WorkingState {
    /// Creates a state with nobody placed.
    pub fn empty(problem: &Problem<'_>) -> Self {
        let instance = problem.instance();
        Self {
            schedule: Schedule::new(instance),
            calendar: CapacityCalendar::new(instance),
            cost: 0,
        }
    }

    /// Books every stay of `schedule` into a fresh calendar.
    ///
    /// # Panics
    ///
    /// Panics if the schedule overbooks a room.
    pub fn from_schedule(problem: &Problem<'_>, schedule: &Schedule) -> Self {
        let mut state = Self::empty(problem);
        for (patient, stay) in schedule.stays().enumerate() {
            if let Some(&stay) = stay {
                assert!(
                    state.place(problem, patient, stay),
                    "schedule overbooks a room for patient {patient}"
                );
            }
        }
        state
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn calendar(&self) -> &CapacityCalendar {
        &self.calendar
    }

    /// Running total cost.
    pub fn cost(&self) -> u64 {
        self.cost
    }

    /// Places `patient` for `stay`, booking its beds.
    ///
    /// Returns false, leaving the state unchanged, if a bed is missing.
    pub fn place(&mut self, problem: &Problem<'_>, patient: PatientId, stay: Stay) -> bool {
        if !self.calendar.occupy_stay(&stay) {
            return false;
        }
        self.record(problem, patient, stay);
        true
    }

    /// Records `stay` for `patient` whose beds the caller already booked.
    pub(crate) fn record(&mut self, problem: &Problem<'_>, patient: PatientId, stay: Stay) {
        debug_assert!(!self.schedule.is_placed(patient));
        let p = &problem.instance().patients[patient];
        self.cost += problem.tables().stay_cost(p, &stay);
        self.schedule.assign(patient, stay);
    }

    pub(crate) fn calendar_mut(&mut self) -> &mut CapacityCalendar {
        &mut self.calendar
    }

    /// Unplaces every patient and frees every bed.
    pub fn clear(&mut self) {
        for patient in 0..self.schedule.patient_count() {
            if let Some(stay) = self.schedule.unassign(patient) {
                self.calendar.release_stay(&stay);
            }
        }
        self.cost = 0;
        debug_assert!(self.calendar.is_empty());
    }

    /// Applies a checked move.
    ///
    /// # Panics
    ///
    /// Panics if the candidate was evaluated against a different state and
    /// no longer fits the calendar.
    pub fn apply(&mut self, candidate: &CandidateMove) {
        for rw in candidate.rewrites() {
            debug_assert_eq!(self.schedule.stay(rw.patient), Some(&rw.before));
            self.calendar.release_stay(&rw.before);
        }
        for rw in candidate.rewrites() {
            assert!(
                self.calendar.occupy_stay(&rw.after),
                "stale move {:?}: no bed for patient {}",
                candidate.kind(),
                rw.patient
            );
            self.schedule.assign(rw.patient, rw.after);
        }
        let delta = candidate.delta();
        self.cost = self
            .cost
            .checked_add_signed(delta)
            .unwrap_or_else(|| panic!("cost {} cannot absorb delta {delta}", self.cost));
    }

    /// Recomputes the cost from scratch.
    pub fn recompute_cost(&self, problem: &Problem<'_>) -> u64 {
        self.schedule.total_cost(problem.instance(), problem.tables())
    }

    /// Checks calendar, schedule and running cost against each other.
    ///
    /// # Panics
    ///
    /// Panics on the first inconsistency found.
    pub fn assert_consistent(&self, problem: &Problem<'_>) {
        if let Err(mismatch) = self.calendar.verify_against(&self.schedule) {
            panic!("calendar out of step with schedule: {mismatch}");
        }
        let tables = problem.tables();
        for (patient, stay) in self.schedule.stays().enumerate() {
            if let Some(stay) = stay {
                assert!(
                    tables.is_stay_feasible(patient, stay),
                    "patient {patient} placed in an infeasible room"
                );
            }
        }
        let recomputed = self.recompute_cost(problem);
        assert_eq!(
            self.cost, recomputed,
            "running cost {} drifted from recomputed {}",
            self.cost, recomputed
        );
    }

    pub fn into_schedule(self) -> Schedule {
        self.schedule
    }
}
