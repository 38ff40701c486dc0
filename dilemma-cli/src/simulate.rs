//! Generation loop - tournament, report, evolve, repeat
//!
//! The driver owns the control flow the core crates stay out of:
//! construct a population, score it in a tournament, log the leading
//! strategy, hand the scored population to an evolution strategy, and
//! feed the new generation back in.

use anyhow::Result;
use clap::{Args, ValueEnum};
use dilemma_core::{Player, PlayerSpec, StrategyKind};
use dilemma_evolve::{evolve, rank_by_score, EvolutionConfig, Strategy};
use dilemma_tournament::{run_tournament, GameRules, PayoffMatrix, TournamentConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

/// Arguments shared by every subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Population size (must be even)
    #[arg(long, default_value = "300")]
    pub population: usize,
    /// Number of generations (tournament + evolution cycles)
    #[arg(long, default_value = "100")]
    pub generations: usize,
    /// Rounds per tournament; each round re-pairs the population
    #[arg(long, default_value = "20")]
    pub rounds: usize,
    /// Matches between each pair within a round
    #[arg(long, default_value = "10")]
    pub matches_per_pair: usize,
    /// Top players selected to reproduce (default depends on the policy)
    #[arg(long)]
    pub select: Option<usize>,
    /// Mutated clones per selected parent
    #[arg(long, default_value = "6")]
    pub clones: usize,
    /// Run each round's pairs on one rayon task each
    #[arg(long)]
    pub parallel: bool,
    /// RNG seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,
    /// Print a JSON summary after the final generation
    #[arg(long)]
    pub json: bool,
}

/// Prisoner's Dilemma payoff overrides.
#[derive(Args, Debug)]
pub struct PayoffArgs {
    /// Payoff when both cooperate
    #[arg(long, default_value = "4.0")]
    pub coop_coop: f64,
    /// Payoff to a cooperator whose opponent defects
    #[arg(long, default_value = "0.0")]
    pub coop_def: f64,
    /// Payoff when both defect
    #[arg(long, default_value = "1.0")]
    pub def_def: f64,
    /// Payoff to a defector whose opponent cooperates
    #[arg(long, default_value = "5.0")]
    pub def_coop: f64,
}

impl Default for PayoffArgs {
    fn default() -> Self {
        Self {
            coop_coop: 4.0,
            coop_def: 0.0,
            def_def: 1.0,
            def_coop: 5.0,
        }
    }
}

/// Reproduction policy, selected by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EvolutionKind {
    /// Clone the best players and perturb one weight each
    Mutation,
    /// Average weights across every pair of top players
    Pairwise,
    /// Average weights in proportion to each parent's score
    FitnessWeighted,
}

/// Which population the simulation evolves.
#[derive(Debug)]
pub enum Variant {
    Simple,
    NMoves { memory: usize },
    Mixed { memory: usize },
    Blotto { castles: usize, soldiers: u32 },
}

/// Per-generation statistics kept for the JSON summary.
#[derive(Debug, Serialize)]
struct GenerationStats {
    generation: usize,
    best_score: f64,
    mean_score: f64,
    best_weights: Vec<f64>,
}

/// Final machine-readable report.
#[derive(Debug, Serialize)]
struct RunSummary {
    generations: Vec<GenerationStats>,
    champion: Player,
}

/// Run the full simulation: `generations` cycles of tournament scoring
/// followed by one evolution step each.
pub fn run(
    variant: &Variant,
    evolution: EvolutionKind,
    payoffs: &PayoffArgs,
    args: &RunArgs,
) -> Result<()> {
    anyhow::ensure!(args.population >= 2, "population needs at least two players");

    let mut rng = create_rng(args.seed);
    let rules = game_rules(variant, payoffs);
    let strategy = reproduction_strategy(variant, evolution);
    let select = args.select.unwrap_or_else(|| default_select(strategy));
    let tournament = TournamentConfig::new(args.rounds, args.matches_per_pair)
        .with_parallel(args.parallel);

    tracing::info!(
        "Starting run: variant={:?}, pop={}, gen={}, strategy={:?}, select={}",
        variant,
        args.population,
        args.generations,
        strategy,
        select
    );

    let mut players = initial_population(variant, args.population, &mut rng);
    let mut history = Vec::with_capacity(args.generations);
    let mut champion: Option<Player> = None;

    for generation in 0..args.generations {
        run_tournament(&mut players, &rules, &tournament, &mut rng)?;

        let stats = report_generation(generation, &players);
        champion = Some(best_of(&players));
        history.push(stats);

        let config = EvolutionConfig {
            select_count: select,
            clones_per_parent: args.clones,
            filler: filler_for(variant, generation),
        };
        players = evolve(&players, strategy, &config, &mut rng)?;
    }

    if args.json {
        if let Some(champion) = champion {
            let summary = RunSummary { generations: history, champion };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}

/// Seeded or entropy-backed master RNG.
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn game_rules(variant: &Variant, payoffs: &PayoffArgs) -> GameRules {
    match variant {
        Variant::Blotto { castles, .. } => GameRules::Blotto { castles: *castles },
        _ => GameRules::PrisonersDilemma(PayoffMatrix::new(
            payoffs.coop_coop,
            payoffs.coop_def,
            payoffs.def_def,
            payoffs.def_coop,
        )),
    }
}

fn reproduction_strategy(variant: &Variant, evolution: EvolutionKind) -> Strategy {
    match variant {
        Variant::Blotto { .. } => Strategy::BlottoShift,
        // Recombining across variants with different weight lengths is
        // not meaningful; mixed populations evolve by mutation.
        Variant::Mixed { .. } => Strategy::Mutation,
        _ => match evolution {
            EvolutionKind::Mutation => Strategy::Mutation,
            EvolutionKind::Pairwise => Strategy::PairwiseRecombination,
            EvolutionKind::FitnessWeighted => Strategy::FitnessWeightedRecombination,
        },
    }
}

/// Default top-K: pairwise policies breed C(K,2) children, so their
/// default stays far below the mutation default.
fn default_select(strategy: Strategy) -> usize {
    match strategy {
        Strategy::Mutation | Strategy::BlottoShift => 48,
        Strategy::PairwiseRecombination | Strategy::FitnessWeightedRecombination => 20,
    }
}

fn initial_population(variant: &Variant, size: usize, rng: &mut ChaCha8Rng) -> Vec<Player> {
    match variant {
        Variant::Simple => PlayerSpec::Simple.build_population(size, rng),
        Variant::NMoves { memory } => {
            PlayerSpec::NMove { memory: *memory }.build_population(size, rng)
        }
        Variant::Blotto { castles, soldiers } => {
            PlayerSpec::Blotto { castles: *castles, soldiers: *soldiers }
                .build_population(size, rng)
        }
        Variant::Mixed { memory } => (0..size)
            .map(|i| {
                if i % 2 == 0 {
                    Player::n_move(*memory, rng)
                } else {
                    Player::simple(rng)
                }
            })
            .collect(),
    }
}

/// Spec used to pad the next generation. Mixed runs alternate which
/// variant gets the fresh slots, so both bloodlines keep competing.
fn filler_for(variant: &Variant, generation: usize) -> PlayerSpec {
    match variant {
        Variant::Simple => PlayerSpec::Simple,
        Variant::NMoves { memory } => PlayerSpec::NMove { memory: *memory },
        Variant::Blotto { castles, soldiers } => {
            PlayerSpec::Blotto { castles: *castles, soldiers: *soldiers }
        }
        Variant::Mixed { memory } => {
            if generation % 2 == 0 {
                PlayerSpec::NMove { memory: *memory }
            } else {
                PlayerSpec::Simple
            }
        }
    }
}

/// Log the generation's leading strategy and collect its statistics.
fn report_generation(generation: usize, players: &[Player]) -> GenerationStats {
    let ranked = rank_by_score(players);
    let best = ranked[0];
    let mean = players.iter().map(|p| p.score).sum::<f64>() / players.len() as f64;

    tracing::info!(
        "Generation {}: best={:.1}, mean={:.1}",
        generation + 1,
        best.score,
        mean
    );
    match best.kind {
        StrategyKind::Simple => {
            // Log-odds read-out of a 1-move-memory strategy.
            tracing::info!(
                "  P(cooperate|cooperated)={:.3}, P(cooperate|defected)={:.3}",
                logistic(best.weights[1] + best.weights[2]),
                logistic(best.weights[1])
            );
        }
        _ => {
            tracing::info!("  best weights: {:?}", best.weights);
        }
    }

    GenerationStats {
        generation,
        best_score: best.score,
        mean_score: mean,
        best_weights: best.weights.clone(),
    }
}

fn best_of(players: &[Player]) -> Player {
    rank_by_score(players)[0].clone()
}

fn logistic(x: f64) -> f64 {
    x.exp() / (1.0 + x.exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_args() -> RunArgs {
        RunArgs {
            population: 8,
            generations: 2,
            rounds: 2,
            matches_per_pair: 2,
            select: Some(2),
            clones: 2,
            parallel: false,
            seed: Some(42),
            json: false,
        }
    }

    #[test]
    fn test_default_select_per_strategy() {
        assert_eq!(default_select(Strategy::Mutation), 48);
        assert_eq!(default_select(Strategy::BlottoShift), 48);
        assert_eq!(default_select(Strategy::PairwiseRecombination), 20);
        assert_eq!(default_select(Strategy::FitnessWeightedRecombination), 20);
    }

    #[test]
    fn test_mixed_population_interleaves_variants() {
        let mut rng = create_rng(Some(42));
        let players = initial_population(&Variant::Mixed { memory: 3 }, 10, &mut rng);

        let n_move = players.iter().filter(|p| p.kind == StrategyKind::NMove).count();
        let simple = players.iter().filter(|p| p.kind == StrategyKind::Simple).count();
        assert_eq!(n_move, 5);
        assert_eq!(simple, 5);
    }

    #[test]
    fn test_mixed_filler_alternates() {
        let variant = Variant::Mixed { memory: 4 };
        assert_eq!(filler_for(&variant, 0), PlayerSpec::NMove { memory: 4 });
        assert_eq!(filler_for(&variant, 1), PlayerSpec::Simple);
        assert_eq!(filler_for(&variant, 2), PlayerSpec::NMove { memory: 4 });
    }

    #[test]
    fn test_simple_run_completes() {
        let args = small_args();
        run(
            &Variant::Simple,
            EvolutionKind::Mutation,
            &PayoffArgs::default(),
            &args,
        )
        .unwrap();
    }

    #[test]
    fn test_blotto_run_completes() {
        let args = small_args();
        run(
            &Variant::Blotto { castles: 5, soldiers: 50 },
            EvolutionKind::Mutation,
            &PayoffArgs::default(),
            &args,
        )
        .unwrap();
    }

    #[test]
    fn test_pairwise_run_completes() {
        let mut args = small_args();
        args.select = Some(3); // C(3,2) = 3 children, 5 fresh
        run(
            &Variant::NMoves { memory: 2 },
            EvolutionKind::FitnessWeighted,
            &PayoffArgs::default(),
            &args,
        )
        .unwrap();
    }

    #[test]
    fn test_odd_population_fails() {
        let mut args = small_args();
        args.population = 7;
        let err = run(
            &Variant::Simple,
            EvolutionKind::Mutation,
            &PayoffArgs::default(),
            &args,
        )
        .unwrap_err();
        assert!(err.to_string().contains("odd"));
    }
}
