//! The result of a solve, as handed to a reporter.

use bedforge_core::PatientId;
use serde::Serialize;

use crate::problem::Problem;
use crate::schedule::{AssignmentRecord, Schedule};
use crate::state::WorkingState;
use crate::stats::SolverStats;
use crate::termination::TerminationReason;

/// Everything a reporter needs about one finished run.
#[derive(Debug, Clone, Serialize)]
pub struct SolveReport {
    /// Seed of the run that produced this schedule.
    pub seed: u64,
    pub schedule: Schedule,
    /// Realized assignment per patient, `None` for unplaced patients.
    pub assignments: Vec<Option<AssignmentRecord>>,
    pub total_cost: u64,
    /// Cost of the constructed schedule before any search step.
    pub initial_cost: u64,
    pub lower_bound: u64,
    pub overcrowd_risk: u64,
    /// Patients with no feasible room, never placed.
    pub infeasible_patients: Vec<PatientId>,
    pub construction_attempts: u64,
    pub termination: TerminationReason,
    pub iterations: u64,
    pub stats: SolverStats,
}

impl SolveReport {
    /// Gap between the realized cost and the lower bound.
    pub fn gap(&self) -> u64 {
        self.total_cost.saturating_sub(self.lower_bound)
    }

    pub fn placed_count(&self) -> usize {
        self.schedule.placed_count()
    }
}

/// Risk that variable-length stays overrun into a full room.
///
/// For every placed patient whose stay may run `variability` days long,
/// each of those days after discharge (within the horizon) on which the
/// patient's last room has no free bed costs the `overcrowd_risk` weight.
///
/// Reported only; the search never optimizes it.
pub fn overcrowd_risk(problem: &Problem<'_>, schedule: &Schedule) -> u64 {
    let state = WorkingState::from_schedule(problem, schedule);
    let calendar = state.calendar();
    let horizon = problem.horizon();
    let weight = problem.weights().overcrowd_risk;

    problem
        .instance()
        .patients
        .iter()
        .zip(schedule.stays())
        .filter(|(p, _)| p.variability > 0)
        .filter_map(|(p, stay)| stay.map(|s| (p, s)))
        .map(|(p, stay)| {
            let room = stay.final_room();
            let end = (stay.discharge + p.variability as usize).min(horizon);
            let full_days = (stay.discharge..end)
                .filter(|&day| calendar.remaining(room, day) == 0)
                .count();
            full_days as u64 * weight
        })
        .sum()
}
