//! Dilemma Evolve - producing the next generation
//!
//! This crate provides the evolution engine:
//! - Selection (rank by tournament score, take the top K)
//! - Mutation operators (weight perturbation, Blotto soldier shift)
//! - Recombination operators (uniform and score-weighted blends)
//! - A strategy dispatcher that pads the new generation with fresh players
//!
//! Every strategy is a pure function of the scored population: the input
//! players are never mutated, and the output has the same size.

pub mod mutation;
pub mod recombination;
pub mod selection;

use dilemma_core::{ConfigError, Player, PlayerSpec};
use rand::Rng;

pub use mutation::{perturb_weight, shift_soldiers, PERTURBATION};
pub use recombination::{blend_by_score, blend_uniform};
pub use selection::rank_by_score;

/// Interchangeable reproduction policies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Top K parents each leave C perturbed clones.
    Mutation,
    /// Every unordered pair among the top K leaves one averaged child.
    PairwiseRecombination,
    /// Pairwise, but each child position is averaged by parent score.
    FitnessWeightedRecombination,
    /// Mutation specialized for Blotto: shift soldiers between castles.
    BlottoShift,
}

/// Evolution configuration.
#[derive(Clone, Copy, Debug)]
pub struct EvolutionConfig {
    /// How many of the best players reproduce (top K).
    pub select_count: usize,
    /// Clones per selected parent (mutation strategies only).
    pub clones_per_parent: usize,
    /// Spec used to pad the remainder of the population.
    pub filler: PlayerSpec,
}

/// Produce the next generation from a scored population.
///
/// Ranks descending by score, applies the reproduction policy to the
/// top `select_count` players, and fills the remaining slots with fresh
/// players built from the filler spec. The input population is read
/// only; the output always matches its length.
///
/// # Errors
/// `ConfigError::PopulationTooSmall` when the policy would create more
/// offspring than the population holds, `ConfigError::WrongGame` when
/// the Blotto shift strategy is configured with a non-Blotto filler.
pub fn evolve<R: Rng>(
    players: &[Player],
    strategy: Strategy,
    config: &EvolutionConfig,
    rng: &mut R,
) -> Result<Vec<Player>, ConfigError> {
    let ranked = rank_by_score(players);

    match strategy {
        Strategy::Mutation => evolve_clones(&ranked, config, rng, perturb_weight),
        Strategy::BlottoShift => {
            let max_per_castle = match config.filler {
                PlayerSpec::Blotto { soldiers, .. } => f64::from(soldiers),
                spec => return Err(ConfigError::WrongGame { kind: spec.kind() }),
            };
            evolve_clones(&ranked, config, rng, |parent, rng| {
                shift_soldiers(parent, max_per_castle, rng)
            })
        }
        Strategy::PairwiseRecombination => evolve_pairs(&ranked, config, rng, blend_uniform),
        Strategy::FitnessWeightedRecombination => evolve_pairs(&ranked, config, rng, blend_by_score),
    }
}

/// Clone-based reproduction: top K parents, C children each.
fn evolve_clones<R: Rng>(
    ranked: &[&Player],
    config: &EvolutionConfig,
    rng: &mut R,
    make_child: impl Fn(&Player, &mut R) -> Player,
) -> Result<Vec<Player>, ConfigError> {
    let offspring = config.select_count * config.clones_per_parent;
    check_capacity(offspring, config.select_count, ranked.len())?;

    let mut next = Vec::with_capacity(ranked.len());
    for parent in ranked.iter().take(config.select_count) {
        for _ in 0..config.clones_per_parent {
            next.push(make_child(parent, rng));
        }
    }
    pad_with_fresh(&mut next, ranked.len(), &config.filler, rng);
    Ok(next)
}

/// Pair-based reproduction: one child per unordered pair among the top K.
fn evolve_pairs<R: Rng>(
    ranked: &[&Player],
    config: &EvolutionConfig,
    rng: &mut R,
    blend: impl Fn(&Player, &Player) -> Player,
) -> Result<Vec<Player>, ConfigError> {
    let k = config.select_count;
    let offspring = k * k.saturating_sub(1) / 2; // C(K, 2)
    check_capacity(offspring, k, ranked.len())?;

    let mut next = Vec::with_capacity(ranked.len());
    for i in 0..k {
        for j in (i + 1)..k {
            next.push(blend(ranked[i], ranked[j]));
        }
    }
    pad_with_fresh(&mut next, ranked.len(), &config.filler, rng);
    Ok(next)
}

/// Reject configurations whose offspring overflow the population.
fn check_capacity(offspring: usize, selected: usize, available: usize) -> Result<(), ConfigError> {
    let needed = offspring.max(selected);
    if needed > available {
        return Err(ConfigError::PopulationTooSmall { needed, available });
    }
    Ok(())
}

/// Fill the remaining slots with freshly initialized players.
fn pad_with_fresh<R: Rng>(next: &mut Vec<Player>, size: usize, filler: &PlayerSpec, rng: &mut R) {
    while next.len() < size {
        next.push(filler.build(rng));
    }
}
