//! Solver errors.

use bedforge_config::ConfigError;
use bedforge_core::ModelError;
use thiserror::Error;

/// Errors surfaced to the caller of a solve.
///
/// Statically infeasible patients and an exhausted neighborhood are not
/// errors: the former are listed in the report, the latter is a
/// [`TerminationReason`](crate::termination::TerminationReason).
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("no initial schedule found after {attempts} construction attempts")]
    ConstructionExhausted { attempts: u64 },

    #[error("invalid instance: {0}")]
    InvalidInstance(#[from] ModelError),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
