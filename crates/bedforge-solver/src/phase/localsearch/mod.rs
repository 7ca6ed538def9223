//! Tabu search
//!
//! Local search that moves to the cheapest admissible neighbor each step,
//! with a short-term memory that forbids undoing recent moves.

mod phase;
mod tabu;

pub use phase::{StepOutcome, TabuSearchPhase};
pub use tabu::{TabuAttribute, TabuList};
