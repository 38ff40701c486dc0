//! Configuration error taxonomy
//!
//! All variants are fatal and raised before any simulation work for the
//! affected step. Numeric edge cases (no-history bootstrap, zero-sum
//! fitness weighting) are handled locally by their modules and never
//! surface here.

use thiserror::Error;

use crate::player::StrategyKind;

/// Fatal configuration errors.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Perfect pairing requires an even number of players.
    #[error("population size {0} is odd; pairing needs an even count")]
    OddPopulation(usize),

    /// Selection and clone counts would overflow the population.
    #[error("next generation needs {needed} offspring slots but the population holds {available}")]
    PopulationTooSmall { needed: usize, available: usize },

    /// A Blotto allocation does not match the configured castle count.
    #[error("allocation covers {got} castles, game is configured for {expected}")]
    AllocationMismatch { expected: usize, got: usize },

    /// A player variant entered a tournament for a game it cannot play.
    #[error("{kind:?} players cannot enter this game")]
    WrongGame { kind: StrategyKind },
}
