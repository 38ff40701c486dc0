//! Recombination operators
//!
//! Sexual reproduction: every unordered pair among the selected parents
//! produces one child. The uniform blend averages weights position by
//! position; the score-weighted blend biases each position toward the
//! fitter parent.

use dilemma_core::Player;

/// Child whose weights are the arithmetic mean of the two parents'.
///
/// The child inherits the first parent's kind and memory depth. When
/// parents carry different weight lengths (mixed populations) the blend
/// covers the common prefix and the remainder stays with parent 1.
pub fn blend_uniform(a: &Player, b: &Player) -> Player {
    let mut child = a.clone_fresh();
    for (w, wb) in child.weights.iter_mut().zip(&b.weights) {
        *w = (*w + wb) / 2.0;
    }
    child
}

/// Child whose weights average the parents' proportionally to their
/// tournament scores: `(w1*s1 + w2*s2) / (s1 + s2)`.
///
/// When both parents scored zero they blend equally; the division never
/// sees a zero denominator.
pub fn blend_by_score(a: &Player, b: &Player) -> Player {
    let (mut score_a, mut score_b) = (a.score, b.score);
    if score_a == 0.0 && score_b == 0.0 {
        score_a = 1.0;
        score_b = 1.0;
    }

    let mut child = a.clone_fresh();
    for (w, (wa, wb)) in child
        .weights
        .iter_mut()
        .zip(a.weights.iter().zip(&b.weights))
    {
        *w = (wa * score_a + wb * score_b) / (score_a + score_b);
    }
    child
}
