//! Tabu search phase implementation.

use std::time::Instant;

use tracing::{debug, info, trace};

use super::tabu::TabuList;
use crate::error::SolverError;
use crate::heuristic::{CandidateMove, MoveKind, Neighborhood};
use crate::phase::Phase;
use crate::scope::SolverScope;
use crate::stats::PhaseStats;
use crate::termination::{Termination, TerminationReason};

/// What a single search step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// A move was applied.
    Moved {
        kind: MoveKind,
        delta: i64,
        /// The move was tabu and admitted by aspiration.
        aspired: bool,
    },
    /// No move could be applied; the search is over.
    Stuck(TerminationReason),
}

/// Local search that always takes the cheapest admissible move, even when
/// it makes the schedule worse, and forbids undoing recent moves.
///
/// Each step:
/// 1. Scans the neighborhood from a random patient until `move_sample_size`
///    admissible candidates are found or the neighborhood runs out
/// 2. Takes the candidate with the lowest delta, the earliest on ties
/// 3. Applies it and makes its reverse tabu for `tenure` steps
/// 4. Records the result as the new best if strictly cheaper
///
/// A tabu candidate is admissible anyway if it would beat the best cost
/// (aspiration).
#[derive(Debug)]
pub struct TabuSearchPhase<T> {
    termination: T,
    tenure: u64,
    move_sample_size: usize,
    aspiration_enabled: bool,
    tabu: TabuList,
}

impl<T: Termination> TabuSearchPhase<T> {
    pub fn new(termination: T, tenure: usize, move_sample_size: usize) -> Self {
        assert!(tenure > 0, "tabu tenure must be positive");
        assert!(move_sample_size > 0, "move sample size must be positive");
        Self {
            termination,
            tenure: tenure as u64,
            move_sample_size,
            aspiration_enabled: true,
            tabu: TabuList::new(),
        }
    }

    pub fn with_aspiration(mut self, enabled: bool) -> Self {
        self.aspiration_enabled = enabled;
        self
    }

    pub fn tabu_list(&self) -> &TabuList {
        &self.tabu
    }

    /// Performs one search step.
    ///
    /// This is the only point at which the search may be preempted: between
    /// two calls the working state is consistent.
    pub fn step(&mut self, solver_scope: &mut SolverScope<'_, '_>) -> StepOutcome {
        let iteration = solver_scope.total_step_count();
        self.tabu.expire(iteration);

        let current = solver_scope.current_cost() as i64;
        let best = solver_scope.best_cost().map_or(current, |b| b as i64);

        let (problem, state, rng) = solver_scope.step_parts();
        let mut evaluated = 0u64;
        let mut admissible = 0usize;
        let mut chosen: Option<(CandidateMove, bool)> = None;

        for candidate in Neighborhood::random(problem, state, rng) {
            evaluated += 1;
            let tabu = self.tabu.is_tabu(candidate.rewrites());
            let aspired = tabu && self.aspiration_enabled && current + candidate.delta() < best;
            if tabu && !aspired {
                continue;
            }
            admissible += 1;

            let better = match &chosen {
                Some((c, _)) => candidate.delta() < c.delta(),
                None => true,
            };
            if better {
                chosen = Some((candidate, aspired));
            }
            if admissible >= self.move_sample_size {
                break;
            }
        }

        let Some((candidate, aspired)) = chosen else {
            solver_scope
                .stats_mut()
                .record_scan(evaluated, admissible as u64);
            let reason = if evaluated == 0 {
                TerminationReason::SearchExhausted
            } else {
                TerminationReason::NoAdmissibleMove
            };
            return StepOutcome::Stuck(reason);
        };

        state.apply(&candidate);
        solver_scope
            .stats_mut()
            .record_scan(evaluated, admissible as u64);

        let step = solver_scope.increment_step_count();
        self.tabu.record(candidate.rewrites(), step + self.tenure);

        if solver_scope.environment_mode().is_full_assert() {
            solver_scope.working().assert_consistent(problem);
        }
        let improved = solver_scope.update_best_solution();

        trace!(
            event = "step",
            step = step,
            kind = candidate.kind().name(),
            delta = candidate.delta(),
            aspired = aspired,
            score = solver_scope.current_cost(),
            improved = improved,
        );

        StepOutcome::Moved {
            kind: candidate.kind(),
            delta: candidate.delta(),
            aspired,
        }
    }
}

impl<T: Termination> Phase for TabuSearchPhase<T> {
    type Outcome = TerminationReason;

    fn solve(
        &mut self,
        solver_scope: &mut SolverScope<'_, '_>,
    ) -> Result<TerminationReason, SolverError> {
        let mut phase_stats = PhaseStats::begin(1, "Tabu Search", solver_scope.stats());
        info!(
            event = "phase_start",
            phase = phase_stats.phase_name,
            phase_index = phase_stats.phase_index,
        );

        let mut last_progress_time = Instant::now();
        let mut last_progress_moves = solver_scope.stats().moves_evaluated;

        let reason = loop {
            if let Some(reason) = self.termination.terminated_by(solver_scope) {
                break reason;
            }
            match self.step(solver_scope) {
                StepOutcome::Stuck(reason) => break reason,
                StepOutcome::Moved { .. } => phase_stats.record_step(),
            }

            // Log progress every second
            let now = Instant::now();
            if now.duration_since(last_progress_time).as_secs() >= 1 {
                let moves = solver_scope.stats().moves_evaluated;
                let elapsed_secs = now.duration_since(last_progress_time).as_secs_f64();
                let current_speed = ((moves - last_progress_moves) as f64 / elapsed_secs) as u64;
                debug!(
                    event = "progress",
                    steps = phase_stats.step_count,
                    speed = current_speed,
                    score = solver_scope.best_cost().unwrap_or_default(),
                    tabu = self.tabu.len(),
                );
                last_progress_time = now;
                last_progress_moves = moves;
            }
        };

        phase_stats.sync(solver_scope.stats());
        info!(
            event = "phase_end",
            phase = phase_stats.phase_name,
            phase_index = phase_stats.phase_index,
            duration_ms = phase_stats.elapsed_ms(),
            steps = phase_stats.step_count,
            speed = phase_stats.moves_per_second(),
            score = solver_scope.best_cost().unwrap_or_default(),
            reason = reason.name(),
        );

        Ok(reason)
    }

    fn phase_type_name(&self) -> &'static str {
        "TabuSearch"
    }
}
