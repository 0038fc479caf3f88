use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::Bot;
use crate::sim::{Action, Game, Player};

/// Uniformly random keys, reproducible from its seed
#[derive(Debug, Clone)]
pub struct RandomBot {
    rng: Pcg32,
    /// Chance of holding kick on a given tick, within [0, 1]
    kick_probability: f64,
}

impl RandomBot {
    pub fn new(seed: u64) -> Self {
        Self::with_kick_probability(seed, 0.5)
    }

    /// Out-of-range probabilities are clamped; NaN never kicks
    pub fn with_kick_probability(seed: u64, kick_probability: f64) -> Self {
        let kick_probability = if kick_probability.is_nan() {
            0.0
        } else {
            kick_probability.clamp(0.0, 1.0)
        };
        Self {
            rng: Pcg32::seed_from_u64(seed),
            kick_probability,
        }
    }

    pub fn kick_probability(&self) -> f64 {
        self.kick_probability
    }
}

impl Bot for RandomBot {
    fn step(&mut self, _player: &Player, _game: &Game) -> Action {
        let x = self.rng.random_range(-1..=1);
        let y = self.rng.random_range(-1..=1);
        let kick = self.rng.random_bool(self.kick_probability);
        Action::new(x, y, kick)
    }
}
