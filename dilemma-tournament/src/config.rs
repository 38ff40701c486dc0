//! Configuration types for tournament play
//!
//! Level 4 - Utilities and configuration

use dilemma_core::Move;

/// Points a single Blotto match distributes between the pair.
///
/// Player 1 gains the castles it won, player 2 gains the remainder.
/// Fixed design constant: it does not scale with the castle count.
pub const BLOTTO_MATCH_POINTS: f64 = 10.0;

/// Payoff constants for the Prisoner's Dilemma, named from player 1's
/// perspective: `coop_def` is what the cooperator earns against a
/// defector, `def_coop` what the defector earns against a cooperator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PayoffMatrix {
    /// Both cooperate.
    pub coop_coop: f64,
    /// Earned by the cooperator in an asymmetric outcome.
    pub coop_def: f64,
    /// Both defect.
    pub def_def: f64,
    /// Earned by the defector in an asymmetric outcome.
    pub def_coop: f64,
}

impl Default for PayoffMatrix {
    fn default() -> Self {
        Self {
            coop_coop: 4.0,
            coop_def: 0.0,
            def_def: 1.0,
            def_coop: 5.0,
        }
    }
}

impl PayoffMatrix {
    /// Create a matrix from the four constants.
    pub fn new(coop_coop: f64, coop_def: f64, def_def: f64, def_coop: f64) -> Self {
        Self { coop_coop, coop_def, def_def, def_coop }
    }

    /// Score deltas for (player 1, player 2) given their moves.
    pub fn payoffs(&self, a: Move, b: Move) -> (f64, f64) {
        match (a, b) {
            (Move::Cooperate, Move::Cooperate) => (self.coop_coop, self.coop_coop),
            (Move::Defect, Move::Defect) => (self.def_def, self.def_def),
            (Move::Cooperate, Move::Defect) => (self.coop_def, self.def_coop),
            (Move::Defect, Move::Cooperate) => (self.def_coop, self.coop_def),
        }
    }
}

/// Which game a tournament plays.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameRules {
    /// Iterated Prisoner's Dilemma with the given payoffs.
    PrisonersDilemma(PayoffMatrix),
    /// Colonel Blotto over `castles` contested castles.
    Blotto { castles: usize },
}

/// Tournament configuration.
#[derive(Clone, Copy, Debug)]
pub struct TournamentConfig {
    /// Number of rounds; each round re-pairs the whole population.
    pub rounds: usize,
    /// Independent matches per pair within a round.
    pub matches_per_pair: usize,
    /// Whether pairs run on one rayon task each.
    pub parallel: bool,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            rounds: 20,
            matches_per_pair: 10,
            parallel: false,
        }
    }
}

impl TournamentConfig {
    /// Create a config with the given round and match counts.
    pub fn new(rounds: usize, matches_per_pair: usize) -> Self {
        Self {
            rounds,
            matches_per_pair,
            ..Default::default()
        }
    }

    /// Enable or disable per-pair parallelism.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payoff_matrix_defaults() {
        let payoffs = PayoffMatrix::default();
        assert_eq!(payoffs.coop_coop, 4.0);
        assert_eq!(payoffs.coop_def, 0.0);
        assert_eq!(payoffs.def_def, 1.0);
        assert_eq!(payoffs.def_coop, 5.0);
    }

    #[test]
    fn test_payoffs_by_outcome() {
        let payoffs = PayoffMatrix::new(4.0, 0.0, 1.0, 5.0);

        assert_eq!(payoffs.payoffs(Move::Cooperate, Move::Cooperate), (4.0, 4.0));
        assert_eq!(payoffs.payoffs(Move::Defect, Move::Defect), (1.0, 1.0));
        assert_eq!(payoffs.payoffs(Move::Cooperate, Move::Defect), (0.0, 5.0));
        assert_eq!(payoffs.payoffs(Move::Defect, Move::Cooperate), (5.0, 0.0));
    }

    #[test]
    fn test_tournament_config_defaults() {
        let config = TournamentConfig::default();
        assert_eq!(config.rounds, 20);
        assert_eq!(config.matches_per_pair, 10);
        assert!(!config.parallel);

        let config = TournamentConfig::new(5, 3).with_parallel(true);
        assert_eq!(config.rounds, 5);
        assert!(config.parallel);
    }
}
