//! Random perfect pairing
//!
//! Level 3 - Step-level implementation

use dilemma_core::{ConfigError, Player};
use rand::seq::SliceRandom;
use rand::Rng;

/// Produce a perfect pairing: a uniformly random permutation of the
/// population, where consecutive entries (0,1), (2,3), … form the
/// round's pairs. Every player appears exactly once.
///
/// # Errors
/// `ConfigError::OddPopulation` if the population cannot be perfectly
/// paired.
pub fn create_pairing<'a, R: Rng>(
    players: &'a mut [Player],
    rng: &mut R,
) -> Result<Vec<&'a mut Player>, ConfigError> {
    if players.len() % 2 != 0 {
        return Err(ConfigError::OddPopulation(players.len()));
    }

    let mut order: Vec<&mut Player> = players.iter_mut().collect();
    order.shuffle(rng);
    Ok(order)
}
