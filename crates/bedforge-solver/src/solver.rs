//! Solver orchestration: construction, then tabu search, then the report.

use bedforge_config::SolverConfig;
use bedforge_core::Instance;
use rand::Rng;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::SolverError;
use crate::phase::{ConstructionPhase, Phase, TabuSearchPhase};
use crate::problem::Problem;
use crate::report::{overcrowd_risk, SolveReport};
use crate::scope::SolverScope;
use crate::termination::{
    IterationCountTermination, OrTermination, Termination, TimeTermination,
    UnimprovedIterationTermination,
};

/// Solves one instance under one configuration.
///
/// The cost tables are built once in [`Solver::new`] and shared by every
/// run, including parallel ones.
///
/// # Example
///
/// ```
/// use bedforge_config::SolverConfig;
/// use bedforge_solver::Solver;
/// use bedforge_test::scenario::two_rooms_three_patients;
///
/// let instance = two_rooms_three_patients();
/// let config = SolverConfig::new().with_iteration_limit(10).with_random_seed(1);
/// let report = Solver::new(&instance, config).unwrap().solve().unwrap();
///
/// assert_eq!(report.total_cost, 0);
/// assert_eq!(report.placed_count(), 3);
/// ```
#[derive(Debug)]
pub struct Solver<'a> {
    config: SolverConfig,
    problem: Problem<'a>,
}

impl<'a> Solver<'a> {
    /// Validates the instance and the configuration and precomputes the
    /// cost tables.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::InvalidInstance`] or [`SolverError::Config`].
    pub fn new(instance: &'a Instance, config: SolverConfig) -> Result<Self, SolverError> {
        instance.validate()?;
        config.validate()?;
        let problem = Problem::new(instance, config.penalty_weights);
        Ok(Self { config, problem })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn problem(&self) -> &Problem<'a> {
        &self.problem
    }

    /// Solves with the configured seed, or a random one if none is set.
    ///
    /// Runs `parallel_runs` independent restarts when that is above 1.
    pub fn solve(&self) -> Result<SolveReport, SolverError> {
        let seed = self
            .config
            .random_seed
            .unwrap_or_else(|| rand::rng().random());
        match self.config.parallel_runs {
            0 | 1 => self.solve_with_seed(seed),
            runs => self.solve_parallel_from(seed, runs),
        }
    }

    /// One construction and search run with the given seed.
    ///
    /// The same seed and configuration always give the same report, apart
    /// from timings, unless a time limit cuts the search short.
    pub fn solve_with_seed(&self, seed: u64) -> Result<SolveReport, SolverError> {
        let problem = &self.problem;
        let instance = problem.instance();
        let lower_bound = problem.tables().lower_bound(instance);
        info!(
            event = "solve_start",
            seed = seed,
            patients = instance.patient_count(),
            rooms = instance.room_count(),
            horizon = instance.horizon,
            lower_bound = lower_bound,
        );

        let mut scope = SolverScope::new(problem, seed)
            .with_environment_mode(self.config.environment_mode);
        scope.start_solving();

        let construction =
            ConstructionPhase::new(self.config.construction.retry_budget).solve(&mut scope)?;

        let tabu = &self.config.tabu;
        let mut search = TabuSearchPhase::new(self.termination(), tabu.tenure, tabu.move_sample_size)
            .with_aspiration(tabu.aspiration_enabled);
        let termination = search.solve(&mut scope)?;

        let iterations = scope.total_step_count();
        let (schedule, total_cost, stats) = scope.take_best_or_working();
        debug_assert_eq!(total_cost, schedule.total_cost(instance, problem.tables()));

        let report = SolveReport {
            seed,
            assignments: schedule.assignments(instance, problem.tables()),
            overcrowd_risk: overcrowd_risk(problem, &schedule),
            schedule,
            total_cost,
            initial_cost: construction.cost,
            lower_bound,
            infeasible_patients: problem.tables().infeasible_patients(),
            construction_attempts: construction.attempts,
            termination,
            iterations,
            stats,
        };

        info!(
            event = "solve_end",
            score = report.total_cost,
            initial = report.initial_cost,
            lower_bound = report.lower_bound,
            steps = report.iterations,
            moves_evaluated = report.stats.moves_evaluated,
            reason = termination.name(),
        );
        Ok(report)
    }

    /// Runs `runs` independent solves in parallel and keeps the cheapest.
    ///
    /// Run `i` uses seed `base + i`, with the base seed drawn as in
    /// [`Solver::solve`]. Ties go to the lowest run index.
    pub fn solve_parallel(&self, runs: usize) -> Result<SolveReport, SolverError> {
        let seed = self
            .config
            .random_seed
            .unwrap_or_else(|| rand::rng().random());
        self.solve_parallel_from(seed, runs)
    }

    fn solve_parallel_from(&self, base_seed: u64, runs: usize) -> Result<SolveReport, SolverError> {
        let results: Vec<Result<SolveReport, SolverError>> = (0..runs.max(1))
            .into_par_iter()
            .map(|run| {
                let result = self.solve_with_seed(base_seed.wrapping_add(run as u64));
                if let Ok(report) = &result {
                    debug!(event = "run_end", run = run, score = report.total_cost);
                }
                result
            })
            .collect();

        let mut best: Option<SolveReport> = None;
        let mut first_error: Option<SolverError> = None;
        for result in results {
            match result {
                Ok(report) => {
                    if best.as_ref().map_or(true, |b| report.total_cost < b.total_cost) {
                        best = Some(report);
                    }
                }
                Err(err) => {
                    first_error.get_or_insert(err);
                }
            }
        }

        match (best, first_error) {
            (Some(report), _) => Ok(report),
            (None, Some(err)) => Err(err),
            (None, None) => unreachable!("at least one run is always made"),
        }
    }

    fn termination(&self) -> impl Termination {
        let limits = &self.config.termination;
        OrTermination::new((
            IterationCountTermination::new(limits.iteration_limit),
            limits.time_limit().map(TimeTermination::new),
            limits
                .unimproved_iteration_limit
                .map(UnimprovedIterationTermination::new),
        ))
    }
}

#[cfg(test)]
#[path = "solver_tests.rs"]
mod tests;
