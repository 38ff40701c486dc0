//! Selection - ranking a scored population
//!
//! Fitness here is the raw tournament score; selection always ranks
//! descending and the reproduction operators take a prefix.

use dilemma_core::Player;

/// Rank players by score, best first.
///
/// Ties break arbitrarily; scores are real-valued so this is rarely
/// exercised. Never mutates or reorders the input population.
pub fn rank_by_score(players: &[Player]) -> Vec<&Player> {
    let mut ranked: Vec<&Player> = players.iter().collect();
    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use dilemma_core::PlayerSpec;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_rank_by_score_descending() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut players = PlayerSpec::Simple.build_population(5, &mut rng);
        let scores = [3.0, 9.5, 1.0, 7.25, 4.0];
        for (p, &s) in players.iter_mut().zip(&scores) {
            p.score = s;
        }

        let ranked = rank_by_score(&players);
        let got: Vec<f64> = ranked.iter().map(|p| p.score).collect();
        assert_eq!(got, vec![9.5, 7.25, 4.0, 3.0, 1.0]);

        // Input order untouched.
        assert_eq!(players[0].score, 3.0);
    }
}
