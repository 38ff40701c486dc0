//! Dilemma Tournament - fitness through repeated matches
//!
//! This crate provides the tournament engine:
//! - Random perfect pairing of the population
//! - Match execution and payoff rules (Prisoner's Dilemma, Blotto)
//! - Round scheduling, sequential or one rayon task per pair
//!
//! ## Architecture
//!
//! - Level 1: run_tournament (orchestration)
//! - Level 2: run_round (phases)
//! - Level 3: play_match, create_pairing (steps)
//! - Level 4: configuration

mod config;
mod match_play;
mod pairing;
mod tournament;

pub use config::{GameRules, PayoffMatrix, TournamentConfig, BLOTTO_MATCH_POINTS};
pub use match_play::play_match;
pub use pairing::create_pairing;
pub use tournament::run_tournament;
