//! Heuristic components for the local search
//!
//! This module contains:
//! - Moves: rewrites of one or two patient stays
//! - Neighborhood: lazy enumeration of the feasible moves of a state

pub mod r#move;
pub mod neighborhood;

// Re-export move types
pub use r#move::{
    CandidateMove, ChangeMove, DelayMove, Move, MoveKind, PartialChangeMove, PartialSwapMove,
    PatientMove, Rewrite, Rewrites, SwapMove,
};

pub use neighborhood::Neighborhood;
