//! Solver entry point that hides all internal wiring.

use std::path::Path;

use bedforge_config::SolverConfig;
use bedforge_core::Instance;
use bedforge_solver::{SolveReport, Solver, SolverError};
use tracing::debug;

/// Configuration file read by [`run_solver`] from the working directory.
pub const CONFIG_FILE: &str = "solver.toml";

/// Solves `instance` with the configuration in [`CONFIG_FILE`], or the
/// defaults if there is none.
///
/// A config file that exists but fails to parse is an error, not a
/// silent fallback.
pub fn run_solver(instance: &Instance) -> Result<SolveReport, SolverError> {
    #[cfg(feature = "console")]
    crate::console::init();

    let config = if Path::new(CONFIG_FILE).exists() {
        SolverConfig::load(CONFIG_FILE)?
    } else {
        debug!(event = "config_missing", path = CONFIG_FILE);
        SolverConfig::default()
    };

    Solver::new(instance, config)?.solve()
}
