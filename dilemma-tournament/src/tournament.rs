//! Tournament execution - rounds of randomly paired matches
//!
//! Level 1 - Orchestration and Level 2 - Phases

use dilemma_core::{ConfigError, Player, StrategyKind};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::config::{GameRules, TournamentConfig};
use crate::match_play::play_match;
use crate::pairing::create_pairing;

// ============================================================================
// Level 1 - Orchestration
// ============================================================================

/// Run a full tournament, accumulating score on each player in place.
///
/// Each round draws a fresh random pairing of the whole population and
/// plays `matches_per_pair` matches within every pair. The field is
/// validated before any simulation work starts.
///
/// # Errors
/// `ConfigError::OddPopulation` for a field that cannot be paired,
/// `ConfigError::WrongGame` / `ConfigError::AllocationMismatch` for a
/// field that does not fit the game rules.
pub fn run_tournament<R: Rng>(
    players: &mut [Player],
    rules: &GameRules,
    config: &TournamentConfig,
    rng: &mut R,
) -> Result<(), ConfigError> {
    validate_field(players, rules)?;

    for _ in 0..config.rounds {
        run_round(players, rules, config, rng)?;
    }
    Ok(())
}

// ============================================================================
// Level 2 - Phases
// ============================================================================

/// Check the field before any match is played.
fn validate_field(players: &[Player], rules: &GameRules) -> Result<(), ConfigError> {
    if players.len() % 2 != 0 {
        return Err(ConfigError::OddPopulation(players.len()));
    }

    match rules {
        GameRules::PrisonersDilemma(_) => {
            for p in players {
                if p.kind == StrategyKind::Blotto {
                    return Err(ConfigError::WrongGame { kind: p.kind });
                }
            }
        }
        GameRules::Blotto { castles } => {
            for p in players {
                if p.kind != StrategyKind::Blotto {
                    return Err(ConfigError::WrongGame { kind: p.kind });
                }
                if p.allocation().len() != *castles {
                    return Err(ConfigError::AllocationMismatch {
                        expected: *castles,
                        got: p.allocation().len(),
                    });
                }
            }
        }
    }
    Ok(())
}

/// Run one round: a fresh pairing, then every pair's match batch.
///
/// Each pair owns its two players exclusively for the duration of its
/// batch, and draws moves from its own ChaCha8 stream seeded off the
/// master RNG before dispatch. The parallel path therefore shares no
/// mutable state between tasks; joining the rayon scope is the round
/// barrier.
fn run_round<R: Rng>(
    players: &mut [Player],
    rules: &GameRules,
    config: &TournamentConfig,
    rng: &mut R,
) -> Result<(), ConfigError> {
    let pair_count = players.len() / 2;
    let seeds: Vec<u64> = (0..pair_count).map(|_| rng.gen()).collect();

    let mut paired = create_pairing(players, rng)?;

    if config.parallel {
        paired
            .par_chunks_mut(2)
            .zip(seeds.par_iter())
            .for_each(|(pair, &seed)| {
                let mut pair_rng = ChaCha8Rng::seed_from_u64(seed);
                run_pair_matches(pair, rules, config.matches_per_pair, &mut pair_rng);
            });
    } else {
        for (pair, &seed) in paired.chunks_mut(2).zip(seeds.iter()) {
            let mut pair_rng = ChaCha8Rng::seed_from_u64(seed);
            run_pair_matches(pair, rules, config.matches_per_pair, &mut pair_rng);
        }
    }
    Ok(())
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

/// Run the match batch for a single pair.
fn run_pair_matches<R: Rng>(
    pair: &mut [&mut Player],
    rules: &GameRules,
    matches: usize,
    rng: &mut R,
) {
    let (left, right) = pair.split_at_mut(1);
    let a = &mut *left[0];
    let b = &mut *right[0];

    for _ in 0..matches {
        play_match(a, b, rules, rng);
    }
}
