//! Player model - strategy encoding and the logistic decision rule
//!
//! A player owns a weight vector (the evolved parameters) and an
//! observation vector (opponent-history features for the match in
//! progress). Simple and NMove players convert history into a cooperation
//! probability through a normalized dot product and a logistic transform;
//! Blotto players ignore history and play their weight vector directly.

use rand::Rng;
use serde::Serialize;

/// Observation value meaning "not yet observed".
///
/// Every defined feature (bias, move, cooperation rate) is non-negative,
/// so the sentinel is never produced by the update path and an exact
/// comparison is safe.
pub const NOT_OBSERVED: f64 = -1.0;

/// Observation slot for the opponent's running cooperation rate.
/// Stays at the sentinel for Simple players, which carry a zero weight there.
const COOP_RATE_SLOT: usize = 0;
/// Observation slot for the constant bias term (always 1.0).
const BIAS_SLOT: usize = 1;
/// Observation slot for the opponent's most recent move; older moves sit
/// at deeper indices.
const LAST_MOVE_SLOT: usize = 2;

/// A move in the iterated Prisoner's Dilemma.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Move {
    Cooperate,
    Defect,
}

impl Move {
    /// Feature value recorded in observation vectors.
    pub fn feature(self) -> f64 {
        match self {
            Move::Cooperate => 1.0,
            Move::Defect => 0.0,
        }
    }

    /// Draw a uniformly random move.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            Move::Cooperate
        } else {
            Move::Defect
        }
    }
}

/// Which strategy family a player belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum StrategyKind {
    /// Reacts to the opponent's last move only.
    Simple,
    /// Reacts to the opponent's cooperation rate and last N moves.
    NMove,
    /// Allocates a fixed soldier total across castles; ignores the opponent.
    Blotto,
}

/// A strategy-encoding player.
///
/// `weights` and `observations` are aligned positionally and have equal
/// length for Simple/NMove players. Blotto players keep an empty
/// observation vector; their weights are the per-castle allocation and
/// always sum to the configured soldier total.
#[derive(Clone, Debug, Serialize)]
pub struct Player {
    /// Strategy family.
    pub kind: StrategyKind,
    /// Evolved parameters.
    pub weights: Vec<f64>,
    /// Opponent-history features; `NOT_OBSERVED` marks undefined entries.
    pub observations: Vec<f64>,
    /// Accumulated fitness across a tournament. Reset only by replacement.
    pub score: f64,
    /// How many past opponent moves are tracked (castle count for Blotto).
    pub memory_depth: usize,
    /// Opponent moves recorded so far in this tournament.
    moves_seen: u32,
    /// How many of those moves were cooperations.
    coops_seen: u32,
}

impl Player {
    /// Create a Simple player: a constant weight and a last-move weight,
    /// both uniform in [-1, 1]. The cooperation-rate slot is carried with
    /// a zero weight so the vectors stay aligned across variants.
    pub fn simple<R: Rng>(rng: &mut R) -> Self {
        let mut observations = vec![NOT_OBSERVED; 3];
        observations[BIAS_SLOT] = 1.0;
        Self {
            kind: StrategyKind::Simple,
            weights: vec![0.0, rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)],
            observations,
            score: 0.0,
            memory_depth: 1,
            moves_seen: 0,
            coops_seen: 0,
        }
    }

    /// Create an NMove player tracking the opponent's cooperation rate and
    /// last `memory` moves. All weights start uniform in [-1, 1].
    ///
    /// # Panics
    /// Panics if `memory` is zero.
    pub fn n_move<R: Rng>(memory: usize, rng: &mut R) -> Self {
        assert!(memory > 0, "NMove players need at least one move of memory");
        let len = memory + 2;
        let weights = (0..len).map(|_| rng.gen_range(-1.0..1.0)).collect();
        let mut observations = vec![NOT_OBSERVED; len];
        observations[BIAS_SLOT] = 1.0;
        Self {
            kind: StrategyKind::NMove,
            weights,
            observations,
            score: 0.0,
            memory_depth: memory,
            moves_seen: 0,
            coops_seen: 0,
        }
    }

    /// Create a Blotto player with a uniformly random partition of
    /// `soldiers` across `castles`: sort `castles - 1` cut points in
    /// [0, soldiers] and take consecutive differences.
    ///
    /// # Panics
    /// Panics if `castles` is zero.
    pub fn blotto<R: Rng>(castles: usize, soldiers: u32, rng: &mut R) -> Self {
        assert!(castles > 0, "Blotto players need at least one castle");
        let mut cuts: Vec<u32> = (0..castles - 1).map(|_| rng.gen_range(0..=soldiers)).collect();
        cuts.sort_unstable();

        let mut weights = Vec::with_capacity(castles);
        let mut prev = 0;
        for cut in cuts {
            weights.push(f64::from(cut - prev));
            prev = cut;
        }
        weights.push(f64::from(soldiers - prev));

        Self {
            kind: StrategyKind::Blotto,
            weights,
            observations: Vec::new(),
            score: 0.0,
            memory_depth: castles,
            moves_seen: 0,
            coops_seen: 0,
        }
    }

    /// Whether any opponent move has been recorded this tournament.
    ///
    /// This is the explicit "history exists" flag consulted by opponents
    /// for the bootstrap move; it never depends on which observation
    /// entries happen to be defined.
    pub fn has_history(&self) -> bool {
        self.moves_seen > 0
    }

    /// Decide a Prisoner's Dilemma move against `opponent`.
    ///
    /// If the opponent has no recorded history yet the move is uniformly
    /// random (no features to condition on). Otherwise the defined
    /// observation entries are folded into a normalized linear score and
    /// passed through the logistic transform `p = e^s / (1 + e^s)`;
    /// the player cooperates with probability `p`.
    pub fn decide_move<R: Rng>(&self, opponent: &Player, rng: &mut R) -> Move {
        if !opponent.has_history() {
            return Move::random(rng);
        }

        let s = self.history_score();
        let p = s.exp() / (1.0 + s.exp());
        if rng.gen_range(0.0..1.0) < p {
            Move::Cooperate
        } else {
            Move::Defect
        }
    }

    /// Dot product of weights with the defined observations, normalized by
    /// the count of defined entries. Undefined entries are excluded, not
    /// treated as zero.
    fn history_score(&self) -> f64 {
        let mut sum = 0.0;
        let mut defined = 0usize;
        for (w, obs) in self.weights.iter().zip(&self.observations) {
            if *obs != NOT_OBSERVED {
                sum += w * obs;
                defined += 1;
            }
        }
        if defined == 0 {
            0.0
        } else {
            sum / defined as f64
        }
    }

    /// Record the opponent's latest move.
    ///
    /// Slides the move window back one slot (the oldest entry falls off),
    /// writes the new move at the most-recent slot, and for NMove players
    /// refreshes the running cooperation rate. The rate is only computed
    /// after the counters are incremented, so it never divides by zero.
    pub fn update_observation(&mut self, opponent_move: Move) {
        if self.kind == StrategyKind::Blotto {
            return;
        }

        self.moves_seen += 1;
        if opponent_move == Move::Cooperate {
            self.coops_seen += 1;
        }

        let oldest = LAST_MOVE_SLOT + self.memory_depth - 1;
        for i in (LAST_MOVE_SLOT..oldest).rev() {
            self.observations[i + 1] = self.observations[i];
        }
        self.observations[LAST_MOVE_SLOT] = opponent_move.feature();

        if self.kind == StrategyKind::NMove {
            self.observations[COOP_RATE_SLOT] =
                f64::from(self.coops_seen) / f64::from(self.moves_seen);
        }
    }

    /// Clone the strategy: same kind, memory depth, and a deep copy of the
    /// weights. Observations, score, and counters reset to the initial
    /// state, so the clone enters the next tournament untouched.
    pub fn clone_fresh(&self) -> Player {
        let observations = match self.kind {
            StrategyKind::Blotto => Vec::new(),
            StrategyKind::Simple | StrategyKind::NMove => {
                let mut obs = vec![NOT_OBSERVED; self.weights.len()];
                obs[BIAS_SLOT] = 1.0;
                obs
            }
        };
        Player {
            kind: self.kind,
            weights: self.weights.clone(),
            observations,
            score: 0.0,
            memory_depth: self.memory_depth,
            moves_seen: 0,
            coops_seen: 0,
        }
    }

    /// The per-castle soldier allocation. A Blotto player's entire move.
    pub fn allocation(&self) -> &[f64] {
        &self.weights
    }
}

/// Factory for constructing fresh players of a configured variant.
///
/// Used both for initial populations and for padding the next generation
/// after an evolution step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum PlayerSpec {
    /// Last-move-only players.
    Simple,
    /// Players with `memory` moves of opponent history.
    NMove { memory: usize },
    /// Blotto players splitting `soldiers` across `castles`.
    Blotto { castles: usize, soldiers: u32 },
}

impl PlayerSpec {
    /// The strategy family this spec constructs.
    pub fn kind(&self) -> StrategyKind {
        match self {
            PlayerSpec::Simple => StrategyKind::Simple,
            PlayerSpec::NMove { .. } => StrategyKind::NMove,
            PlayerSpec::Blotto { .. } => StrategyKind::Blotto,
        }
    }

    /// Build one fresh player.
    pub fn build<R: Rng>(&self, rng: &mut R) -> Player {
        match *self {
            PlayerSpec::Simple => Player::simple(rng),
            PlayerSpec::NMove { memory } => Player::n_move(memory, rng),
            PlayerSpec::Blotto { castles, soldiers } => Player::blotto(castles, soldiers, rng),
        }
    }

    /// Build an initial population of `size` fresh players.
    pub fn build_population<R: Rng>(&self, size: usize, rng: &mut R) -> Vec<Player> {
        (0..size).map(|_| self.build(rng)).collect()
    }
}
