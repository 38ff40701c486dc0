//! Dilemma Core - strategy-encoding players
//!
//! This crate provides the player model shared by the tournament and
//! evolution crates:
//! - Moves and strategy kinds (Simple, NMove, Blotto)
//! - Weight/observation vectors and the logistic decision rule
//! - Player construction specs for initial populations
//! - Configuration error taxonomy

pub mod error;
pub mod player;

// Re-exports for convenient access
pub use error::ConfigError;
pub use player::{Move, Player, PlayerSpec, StrategyKind, NOT_OBSERVED};
