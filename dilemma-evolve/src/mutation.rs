//! Mutation operators
//!
//! Asexual reproduction: clone a parent, then apply one small local
//! change. The weight perturbation serves Simple/NMove players; the
//! soldier shift is the Blotto specialization that preserves the
//! allocation invariants.

use dilemma_core::Player;
use rand::Rng;

/// Magnitude bound of a single weight perturbation.
pub const PERTURBATION: f64 = 0.01;

/// Clone `parent` and perturb exactly one uniformly chosen weight by a
/// uniform delta in [-PERTURBATION, PERTURBATION].
pub fn perturb_weight<R: Rng>(parent: &Player, rng: &mut R) -> Player {
    let mut child = parent.clone_fresh();
    let index = rng.gen_range(0..child.weights.len());
    child.weights[index] += rng.gen_range(-PERTURBATION..=PERTURBATION);
    child
}

/// Clone `parent` and shift a small integer number of soldiers (0 or 1)
/// from a donor castle to a distinct receiver castle.
///
/// The shift only applies when the receiver has headroom
/// (< `max_per_castle`) and the donor has a surplus (> 0), so the
/// soldier total is always preserved and every entry stays within
/// [0, max_per_castle].
pub fn shift_soldiers<R: Rng>(parent: &Player, max_per_castle: f64, rng: &mut R) -> Player {
    let mut child = parent.clone_fresh();
    let castles = child.weights.len();
    if castles < 2 {
        return child;
    }

    let receiver = rng.gen_range(0..castles);
    // Distinct donor, drawn uniformly from the remaining castles.
    let donor = (receiver + 1 + rng.gen_range(0..castles - 1)) % castles;
    let amount = f64::from(rng.gen_range(0..=1u32));

    if child.weights[receiver] < max_per_castle && child.weights[donor] > 0.0 {
        child.weights[receiver] += amount;
        child.weights[donor] -= amount;
    }
    child
}

#[cfg(test)]
mod tests {
    use super::*;
    use dilemma_core::PlayerSpec;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_perturbation_touches_at_most_one_weight() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let parent = PlayerSpec::NMove { memory: 4 }.build(&mut rng);

        for _ in 0..100 {
            let child = perturb_weight(&parent, &mut rng);
            let changed: Vec<usize> = parent
                .weights
                .iter()
                .zip(&child.weights)
                .enumerate()
                .filter(|(_, (pw, cw))| pw != cw)
                .map(|(i, _)| i)
                .collect();

            assert!(changed.len() <= 1, "changed {} weights", changed.len());
            if let Some(&i) = changed.first() {
                let delta = (child.weights[i] - parent.weights[i]).abs();
                assert!(delta <= PERTURBATION, "delta {} too large", delta);
            }
        }
    }

    #[test]
    fn test_perturbed_clone_leaves_parent_untouched() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let parent = PlayerSpec::Simple.build(&mut rng);
        let before = parent.weights.clone();

        for _ in 0..20 {
            let _ = perturb_weight(&parent, &mut rng);
        }
        assert_eq!(parent.weights, before);
    }

    #[test]
    fn test_shift_preserves_soldier_total_and_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let parent = PlayerSpec::Blotto { castles: 10, soldiers: 100 }.build(&mut rng);
        let total: f64 = parent.weights.iter().sum();

        let mut current = parent;
        for _ in 0..500 {
            current = shift_soldiers(&current, 100.0, &mut rng);
            let sum: f64 = current.weights.iter().sum();
            assert_eq!(sum, total);
            for &w in &current.weights {
                assert!((0.0..=100.0).contains(&w), "allocation {} out of range", w);
            }
        }
    }

    #[test]
    fn test_shift_never_overfills_or_drains() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut parent = PlayerSpec::Blotto { castles: 2, soldiers: 100 }.build(&mut rng);
        parent.weights = vec![100.0, 0.0];

        // A full castle can only donate, an empty one can only receive.
        for _ in 0..50 {
            let child = shift_soldiers(&parent, 100.0, &mut rng);
            assert!(child.weights[0] <= 100.0);
            assert!(child.weights[1] >= 0.0);
            assert_eq!(child.weights[0] + child.weights[1], 100.0);
        }
    }

    #[test]
    fn test_shift_single_castle_is_noop() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let parent = PlayerSpec::Blotto { castles: 1, soldiers: 100 }.build(&mut rng);
        let child = shift_soldiers(&parent, 100.0, &mut rng);
        assert_eq!(child.weights, vec![100.0]);
    }
}
