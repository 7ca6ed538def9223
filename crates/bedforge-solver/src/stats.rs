//! Solver and phase statistics.

use std::time::{Duration, Instant};

use serde::Serialize;

/// Counters for one solve run, shared by both phases.
///
/// Construction contributes only the elapsed time; every other counter
/// comes from tabu search steps.
///
/// # Example
///
/// ```
/// use bedforge_solver::stats::SolverStats;
///
/// let mut stats = SolverStats::default();
/// stats.start();
/// stats.record_scan(40, 12);
/// stats.record_step();
///
/// assert_eq!(stats.moves_evaluated, 40);
/// assert_eq!(stats.acceptance_rate(), 0.3);
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct SolverStats {
    #[serde(skip)]
    start_time: Option<Instant>,
    /// Search iterations taken.
    pub step_count: u64,
    /// Candidate moves looked at by the search.
    pub moves_evaluated: u64,
    /// Candidate moves that passed the tabu check.
    pub moves_accepted: u64,
    /// Steps that produced a new best schedule.
    pub improvements: u64,
    /// Wall time of the whole run, filled in by [`SolverStats::finish`].
    pub elapsed_ms: u64,
}

impl SolverStats {
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Freezes the elapsed time for reporting.
    pub fn finish(&mut self) {
        self.elapsed_ms = self.elapsed().as_millis() as u64;
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map(|t| t.elapsed()).unwrap_or_default()
    }

    /// Adds one neighborhood scan: `evaluated` candidates, of which
    /// `accepted` were admissible.
    pub fn record_scan(&mut self, evaluated: u64, accepted: u64) {
        debug_assert!(accepted <= evaluated);
        self.moves_evaluated += evaluated;
        self.moves_accepted += accepted;
    }

    pub fn record_step(&mut self) {
        self.step_count += 1;
    }

    pub fn record_improvement(&mut self) {
        self.improvements += 1;
    }

    pub fn moves_per_second(&self) -> f64 {
        per_second(self.moves_evaluated, self.elapsed())
    }

    /// Share of evaluated candidates that were admissible.
    pub fn acceptance_rate(&self) -> f64 {
        if self.moves_evaluated == 0 {
            0.0
        } else {
            self.moves_accepted as f64 / self.moves_evaluated as f64
        }
    }
}

/// Counters for a single phase, as deltas against the run totals at the
/// moment the phase began.
#[derive(Debug)]
pub struct PhaseStats {
    pub phase_index: usize,
    pub phase_name: &'static str,
    start_time: Instant,
    evaluated_at_start: u64,
    accepted_at_start: u64,
    pub step_count: u64,
    pub moves_evaluated: u64,
    pub moves_accepted: u64,
}

impl PhaseStats {
    pub fn begin(phase_index: usize, phase_name: &'static str, run: &SolverStats) -> Self {
        Self {
            phase_index,
            phase_name,
            start_time: Instant::now(),
            evaluated_at_start: run.moves_evaluated,
            accepted_at_start: run.moves_accepted,
            step_count: 0,
            moves_evaluated: 0,
            moves_accepted: 0,
        }
    }

    pub fn record_step(&mut self) {
        self.step_count += 1;
    }

    /// Pulls the move counters accumulated by the run since [`Self::begin`].
    pub fn sync(&mut self, run: &SolverStats) {
        self.moves_evaluated = run.moves_evaluated - self.evaluated_at_start;
        self.moves_accepted = run.moves_accepted - self.accepted_at_start;
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed().as_millis() as u64
    }

    /// `count` events over this phase's lifetime, per second.
    pub fn rate(&self, count: u64) -> u64 {
        per_second(count, self.elapsed()) as u64
    }

    pub fn moves_per_second(&self) -> u64 {
        self.rate(self.moves_evaluated)
    }
}

fn per_second(count: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        count as f64 / secs
    } else {
        0.0
    }
}
