//! Dilemma CLI - command-line interface
//!
//! Commands:
//! - simple: evolve last-move-only Prisoner's Dilemma players
//! - nmoves: evolve players tracking the opponent's last N moves
//! - mixed: race Simple against NMove players across generations
//! - blotto: evolve Colonel Blotto soldier allocations

use clap::{Parser, Subcommand};

mod simulate;

use simulate::{EvolutionKind, PayoffArgs, RunArgs, Variant};

#[derive(Parser)]
#[command(name = "dilemma")]
#[command(about = "Genetic evolution of repeated-game strategies")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evolve players that react to the opponent's last move only
    Simple {
        #[command(flatten)]
        run: RunArgs,
        #[command(flatten)]
        payoffs: PayoffArgs,
        /// Reproduction policy
        #[arg(long, value_enum, default_value_t = EvolutionKind::Mutation)]
        evolution: EvolutionKind,
    },
    /// Evolve players that track the opponent's cooperation rate and last N moves
    Nmoves {
        #[command(flatten)]
        run: RunArgs,
        #[command(flatten)]
        payoffs: PayoffArgs,
        /// Reproduction policy
        #[arg(long, value_enum, default_value_t = EvolutionKind::Mutation)]
        evolution: EvolutionKind,
        /// Moves of opponent history each player tracks
        #[arg(long, default_value = "4")]
        memory: usize,
    },
    /// Half Simple, half NMove; padding alternates between the variants
    Mixed {
        #[command(flatten)]
        run: RunArgs,
        #[command(flatten)]
        payoffs: PayoffArgs,
        /// Moves of opponent history for the NMove half
        #[arg(long, default_value = "4")]
        memory: usize,
    },
    /// Evolve Colonel Blotto soldier allocations
    Blotto {
        #[command(flatten)]
        run: RunArgs,
        /// Number of contested castles
        #[arg(long, default_value = "10")]
        castles: usize,
        /// Soldier total each player allocates
        #[arg(long, default_value = "100")]
        soldiers: u32,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simple { run, payoffs, evolution } => {
            simulate::run(&Variant::Simple, evolution, &payoffs, &run)
        }
        Commands::Nmoves { run, payoffs, evolution, memory } => {
            simulate::run(&Variant::NMoves { memory }, evolution, &payoffs, &run)
        }
        Commands::Mixed { run, payoffs, memory } => simulate::run(
            &Variant::Mixed { memory },
            EvolutionKind::Mutation,
            &payoffs,
            &run,
        ),
        Commands::Blotto { run, castles, soldiers } => simulate::run(
            &Variant::Blotto { castles, soldiers },
            EvolutionKind::Mutation,
            &PayoffArgs::default(),
            &run,
        ),
    }
}
