//! Core domain: session outcome and the shared random source.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameOutcome {
    Win,
    Lose,
}

/// Top-level session record. The outcome is set at most once.
#[derive(Resource, Debug, Default)]
pub struct Session {
    outcome: Option<GameOutcome>,
}

impl Session {
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Record the outcome; false when one was already recorded.
    pub fn finish(&mut self, outcome: GameOutcome) -> bool {
        if self.outcome.is_some() {
            return false;
        }
        self.outcome = Some(outcome);
        true
    }
}

/// Randomness for enemy choices, spawn picks and bonus kinds.
#[derive(Resource, Debug, Clone)]
pub struct GameRng(pub ChaCha8Rng);

impl GameRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_seed(rand::rng().random())
    }
}
