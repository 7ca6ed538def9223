//! Solver-level scope.

use std::time::{Duration, Instant};

use bedforge_config::EnvironmentMode;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::problem::Problem;
use crate::schedule::Schedule;
use crate::state::WorkingState;
use crate::stats::SolverStats;

/// Everything one solve run owns: the working state, the best schedule seen
/// so far, the random source and the counters.
///
/// Each run has its own scope; nothing in it is shared between runs.
pub struct SolverScope<'a, 'p> {
    problem: &'a Problem<'p>,
    working: WorkingState,
    best_schedule: Option<Schedule>,
    best_cost: Option<u64>,
    rng: ChaCha8Rng,
    seed: u64,
    environment_mode: EnvironmentMode,
    start_time: Option<Instant>,
    total_step_count: u64,
    last_improvement_step: u64,
    stats: SolverStats,
}

impl<'a, 'p> SolverScope<'a, 'p> {
    pub fn new(problem: &'a Problem<'p>, seed: u64) -> Self {
        Self {
            problem,
            working: WorkingState::empty(problem),
            best_schedule: None,
            best_cost: None,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            environment_mode: EnvironmentMode::default(),
            start_time: None,
            total_step_count: 0,
            last_improvement_step: 0,
            stats: SolverStats::default(),
        }
    }

    pub fn with_environment_mode(mut self, mode: EnvironmentMode) -> Self {
        self.environment_mode = mode;
        self
    }

    pub fn start_solving(&mut self) {
        self.start_time = Some(Instant::now());
        self.total_step_count = 0;
        self.last_improvement_step = 0;
        self.stats.start();
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.start_time.map(|t| t.elapsed())
    }

    pub fn problem(&self) -> &'a Problem<'p> {
        self.problem
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn environment_mode(&self) -> EnvironmentMode {
        self.environment_mode
    }

    pub fn working(&self) -> &WorkingState {
        &self.working
    }

    pub fn working_mut(&mut self) -> &mut WorkingState {
        &mut self.working
    }

    /// Replaces the working state, e.g. with a freshly built schedule.
    pub fn set_working(&mut self, state: WorkingState) {
        self.working = state;
    }

    /// Cost of the working state.
    pub fn current_cost(&self) -> u64 {
        self.working.cost()
    }

    pub fn best_schedule(&self) -> Option<&Schedule> {
        self.best_schedule.as_ref()
    }

    pub fn best_cost(&self) -> Option<u64> {
        self.best_cost
    }

    /// Snapshots the working schedule if it is strictly cheaper than the
    /// best so far. Returns whether it was.
    pub fn update_best_solution(&mut self) -> bool {
        let current = self.working.cost();
        let is_better = match self.best_cost {
            None => true,
            Some(best) => current < best,
        };

        if is_better {
            self.best_schedule = Some(self.working.schedule().clone());
            self.best_cost = Some(current);
            self.last_improvement_step = self.total_step_count;
            self.stats.record_improvement();
        }
        is_better
    }

    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// Splits the scope into the parts a search step needs at once.
    pub fn step_parts(&mut self) -> (&'a Problem<'p>, &mut WorkingState, &mut ChaCha8Rng) {
        (self.problem, &mut self.working, &mut self.rng)
    }

    pub fn increment_step_count(&mut self) -> u64 {
        self.total_step_count += 1;
        self.stats.record_step();
        self.total_step_count
    }

    pub fn total_step_count(&self) -> u64 {
        self.total_step_count
    }

    /// Steps taken since the best schedule last improved.
    pub fn steps_since_improvement(&self) -> u64 {
        self.total_step_count - self.last_improvement_step
    }

    pub fn stats(&self) -> &SolverStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut SolverStats {
        &mut self.stats
    }

    /// Consumes the scope, returning the best schedule (or the working one
    /// if no best was ever recorded), its cost and the statistics.
    pub fn take_best_or_working(mut self) -> (Schedule, u64, SolverStats) {
        self.stats.finish();
        match (self.best_schedule, self.best_cost) {
            (Some(schedule), Some(cost)) => (schedule, cost, self.stats),
            _ => {
                let cost = self.working.cost();
                (self.working.into_schedule(), cost, self.stats)
            }
        }
    }
}
