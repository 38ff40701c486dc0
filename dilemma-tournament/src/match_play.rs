//! Single-match execution and payoff application
//!
//! Level 3 - Step-level implementation. No I/O happens here; this is the
//! hot loop of the tournament.

use dilemma_core::Player;
use rand::Rng;

use crate::config::{GameRules, PayoffMatrix, BLOTTO_MATCH_POINTS};

/// Run one match between a pair, accumulating score on both players.
///
/// Allocation lengths and player kinds are validated by the tournament
/// before any round starts, so this path is infallible.
pub fn play_match<R: Rng>(a: &mut Player, b: &mut Player, rules: &GameRules, rng: &mut R) {
    match rules {
        GameRules::PrisonersDilemma(payoffs) => play_dilemma(a, b, payoffs, rng),
        GameRules::Blotto { castles } => play_blotto(a, b, *castles),
    }
}

/// One Prisoner's Dilemma exchange: both players decide simultaneously,
/// both are informed of the opponent's move, then payoffs apply.
fn play_dilemma<R: Rng>(a: &mut Player, b: &mut Player, payoffs: &PayoffMatrix, rng: &mut R) {
    let move_a = a.decide_move(b, rng);
    let move_b = b.decide_move(a, rng);

    a.update_observation(move_b);
    b.update_observation(move_a);

    let (delta_a, delta_b) = payoffs.payoffs(move_a, move_b);
    a.score += delta_a;
    b.score += delta_b;
}

/// One Blotto engagement: allocations are compared castle by castle.
/// A strict majority takes the castle, a tie splits it. Scoring is
/// fixed-sum: player 1 gains the castles won, player 2 the remainder
/// of `BLOTTO_MATCH_POINTS`.
fn play_blotto(a: &mut Player, b: &mut Player, castles: usize) {
    let alloc_a = a.allocation();
    let alloc_b = b.allocation();

    let mut castles_won = 0.0;
    for i in 0..castles {
        if alloc_a[i] > alloc_b[i] {
            castles_won += 1.0;
        } else if alloc_a[i] == alloc_b[i] {
            castles_won += 0.5;
        }
    }

    a.score += castles_won;
    b.score += BLOTTO_MATCH_POINTS - castles_won;
}

#[cfg(test)]
mod tests {
    use super::*;
    use dilemma_core::{Move, StrategyKind};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Simple player whose bias weight forces the given move once the
    /// opponent has history.
    fn forced_player<R: Rng>(mv: Move, rng: &mut R) -> Player {
        let mut p = Player::simple(rng);
        let bias = match mv {
            Move::Cooperate => 50.0,
            Move::Defect => -50.0,
        };
        p.weights = vec![0.0, bias, 0.0];
        // Seed one observed move so the bootstrap path is skipped.
        p.update_observation(Move::Cooperate);
        p
    }

    #[test]
    fn test_dilemma_payoff_cooperate_vs_defect() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut a = forced_player(Move::Cooperate, &mut rng);
        let mut b = forced_player(Move::Defect, &mut rng);

        let rules = GameRules::PrisonersDilemma(PayoffMatrix::new(4.0, 0.0, 1.0, 5.0));
        play_match(&mut a, &mut b, &rules, &mut rng);

        assert_eq!(a.score, 0.0);
        assert_eq!(b.score, 5.0);
    }

    #[test]
    fn test_dilemma_payoff_mutual_outcomes() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let rules = GameRules::PrisonersDilemma(PayoffMatrix::new(4.0, 0.0, 1.0, 5.0));

        let mut a = forced_player(Move::Cooperate, &mut rng);
        let mut b = forced_player(Move::Cooperate, &mut rng);
        play_match(&mut a, &mut b, &rules, &mut rng);
        assert_eq!((a.score, b.score), (4.0, 4.0));

        let mut a = forced_player(Move::Defect, &mut rng);
        let mut b = forced_player(Move::Defect, &mut rng);
        play_match(&mut a, &mut b, &rules, &mut rng);
        assert_eq!((a.score, b.score), (1.0, 1.0));
    }

    #[test]
    fn test_dilemma_updates_both_histories() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut a = Player::simple(&mut rng);
        let mut b = Player::simple(&mut rng);
        let rules = GameRules::PrisonersDilemma(PayoffMatrix::default());

        assert!(!a.has_history());
        play_match(&mut a, &mut b, &rules, &mut rng);
        assert!(a.has_history());
        assert!(b.has_history());
    }

    /// [0, 50, 50] vs [34, 33, 33]: the concentrated player takes two of
    /// three castles and the fixed-sum split is (2, 8).
    #[test]
    fn test_blotto_majority_takes_castle() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut a = Player::blotto(3, 100, &mut rng);
        let mut b = Player::blotto(3, 100, &mut rng);
        a.weights = vec![0.0, 50.0, 50.0];
        b.weights = vec![34.0, 33.0, 33.0];

        play_match(&mut a, &mut b, &GameRules::Blotto { castles: 3 }, &mut rng);

        assert_eq!(a.score, 2.0);
        assert_eq!(b.score, 8.0);
        assert_eq!(a.kind, StrategyKind::Blotto);
    }

    #[test]
    fn test_blotto_tie_splits_castle() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut a = Player::blotto(2, 100, &mut rng);
        let mut b = Player::blotto(2, 100, &mut rng);
        a.weights = vec![50.0, 50.0];
        b.weights = vec![50.0, 50.0];

        play_match(&mut a, &mut b, &GameRules::Blotto { castles: 2 }, &mut rng);

        assert_eq!(a.score, 1.0);
        assert_eq!(b.score, 9.0);
    }
}
