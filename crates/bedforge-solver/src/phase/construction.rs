//! Randomized day-by-day construction of an initial schedule.

use std::ops::Range;

use bedforge_core::{Day, PatientId, RoomId, Stay};
use rand::Rng;
use tracing::{debug, info, warn};

use super::Phase;
use crate::calendar::CapacityCalendar;
use crate::error::SolverError;
use crate::problem::Problem;
use crate::scope::SolverScope;
use crate::state::WorkingState;
use crate::stats::PhaseStats;

/// Result of a successful construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Construction {
    /// Attempts used, counting the successful one.
    pub attempts: u64,
    /// Cost of the constructed schedule.
    pub cost: u64,
}

/// Where an attempt ran out of beds.
#[derive(Debug, Clone, Copy)]
struct Stuck {
    day: Day,
    patient: PatientId,
}

/// Builds an initial schedule by walking the horizon day by day.
///
/// On each day, in patient id order:
/// - a patient admitted today is placed for the whole nominal stay;
/// - a patient registered but not yet admitted reserves beds for the
///   nominal stay, released again once the day is done.
///
/// Rooms are tried from a random feasible room onward, wrapping around.
/// If any patient finds no room, the day's bookings are rolled back and
/// the whole attempt restarts from day 0.
///
/// Patients without a single feasible room are skipped and stay unplaced.
#[derive(Debug, Clone)]
pub struct ConstructionPhase {
    retry_budget: u64,
}

impl ConstructionPhase {
    pub fn new(retry_budget: u64) -> Self {
        assert!(retry_budget > 0, "retry budget must be positive");
        Self { retry_budget }
    }

    pub fn retry_budget(&self) -> u64 {
        self.retry_budget
    }

    /// Builds a schedule into `state`, clearing whatever it held.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::ConstructionExhausted`] if every attempt
    /// gets stuck.
    pub fn build<R: Rng>(
        &self,
        problem: &Problem<'_>,
        state: &mut WorkingState,
        rng: &mut R,
    ) -> Result<u64, SolverError> {
        let tables = problem.tables();
        let placeable: Vec<PatientId> = problem
            .instance()
            .patients
            .iter()
            .map(|p| p.id)
            .filter(|&p| !tables.feasible_rooms(p).is_empty())
            .collect();

        for attempt in 1..=self.retry_budget {
            state.clear();
            match attempt_once(problem, state, &placeable, rng) {
                Ok(()) => return Ok(attempt),
                Err(stuck) => {
                    debug!(
                        event = "construction_restart",
                        attempt = attempt,
                        day = stuck.day,
                        patient = stuck.patient,
                    );
                }
            }
        }

        state.clear();
        Err(SolverError::ConstructionExhausted {
            attempts: self.retry_budget,
        })
    }
}

fn attempt_once<R: Rng>(
    problem: &Problem<'_>,
    state: &mut WorkingState,
    placeable: &[PatientId],
    rng: &mut R,
) -> Result<(), Stuck> {
    let horizon = problem.horizon();
    let patients = &problem.instance().patients;
    let tables = problem.tables();

    let mut committed: Vec<(PatientId, Stay)> = Vec::new();
    let mut tentative: Vec<Stay> = Vec::new();

    for day in 0..horizon {
        let snapshot = state.calendar().snapshot(day..horizon);
        committed.clear();
        tentative.clear();

        for &p in placeable {
            let patient = &patients[p];
            let admitted_today = patient.admission_day == day;
            let waiting = patient.registration_day <= day && day < patient.admission_day;
            if !admitted_today && !waiting {
                continue;
            }

            let window = patient.nominal_window(horizon);
            let rooms = tables.feasible_rooms(p);
            let Some(stay) = book_any(state.calendar_mut(), rooms, window, rng) else {
                state.calendar_mut().restore(&snapshot);
                return Err(Stuck { day, patient: p });
            };
            if admitted_today {
                committed.push((p, stay));
            } else {
                tentative.push(stay);
            }
        }

        for stay in &tentative {
            state.calendar_mut().release_stay(stay);
        }
        for &(p, stay) in &committed {
            state.record(problem, p, stay);
        }
    }
    Ok(())
}

/// Books `window` in the first room with a free bed every night, scanning
/// `rooms` from a random start and wrapping around.
fn book_any<R: Rng>(
    calendar: &mut CapacityCalendar,
    rooms: &[RoomId],
    window: Range<Day>,
    rng: &mut R,
) -> Option<Stay> {
    let start = rng.random_range(0..rooms.len());
    (0..rooms.len())
        .map(|i| rooms[(start + i) % rooms.len()])
        .map(|room| Stay::in_room(window.clone(), room))
        .find(|stay| calendar.occupy_stay(stay))
}

impl Phase for ConstructionPhase {
    type Outcome = Construction;

    fn solve(&mut self, solver_scope: &mut SolverScope<'_, '_>) -> Result<Construction, SolverError> {
        let phase_stats = PhaseStats::begin(0, "Construction", solver_scope.stats());
        info!(
            event = "phase_start",
            phase = phase_stats.phase_name,
            phase_index = phase_stats.phase_index,
        );

        let problem = solver_scope.problem();
        for p in problem.tables().infeasible_patients() {
            warn!(
                event = "static_infeasibility",
                patient = p,
                name = %problem.instance().patients[p].name,
            );
        }

        let (problem, state, rng) = solver_scope.step_parts();
        let attempts = self.build(problem, state, rng)?;

        if solver_scope.environment_mode().is_asserted() {
            solver_scope.working().assert_consistent(problem);
        }
        solver_scope.update_best_solution();
        let cost = solver_scope.current_cost();

        info!(
            event = "phase_end",
            phase = phase_stats.phase_name,
            phase_index = phase_stats.phase_index,
            duration_ms = phase_stats.elapsed_ms(),
            steps = attempts,
            speed = phase_stats.rate(attempts),
            score = cost,
            placed = solver_scope.working().schedule().placed_count(),
        );

        Ok(Construction { attempts, cost })
    }

    fn phase_type_name(&self) -> &'static str {
        "Construction"
    }
}
