//! Injectable randomness for dice and shuffles.
//!
//! Engines never reach for a global generator. Every random outcome comes
//! from a [`GameRng`] (or any [`DiceSource`]) handed in by the caller, so a
//! seed fully determines a game and tests can script exact dice.
//!
//! ```
//! use parlor_rules::core::{DiceSource, GameRng};
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//! assert_eq!(a.roll_die(), b.roll_die());
//! ```

use std::collections::VecDeque;
use std::hash::{Hash, Hasher};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Anything that can produce six-sided die values.
pub trait DiceSource {
    /// Produce one value in `1..=6`.
    fn roll_die(&mut self) -> u8;
}

/// Seedable ChaCha8 generator shared by all engines.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Non-reproducible generator for production play.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fork an independent but deterministic branch.
    ///
    /// Hand the fork to a computer opponent and its choices leave the
    /// game's own shuffle/dice stream untouched.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        Self::new(fork_seed)
    }

    /// Independent stream for a named purpose ("deal", "dice", ...).
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Capture the generator position, e.g. to hand the stream to a peer.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            fork_counter: state.fork_counter,
        }
    }
}

impl DiceSource for GameRng {
    fn roll_die(&mut self) -> u8 {
        self.inner.gen_range(1..=6)
    }
}

/// Serializable generator position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
    pub fork_counter: u64,
}

/// Preset die values, consumed front to back.
///
/// Once exhausted it keeps returning 1, which never unlocks a housed
/// token, so a short script cannot accidentally grant extra moves.
#[derive(Clone, Debug, Default)]
pub struct ScriptedDice {
    values: VecDeque<u8>,
}

impl ScriptedDice {
    #[must_use]
    pub fn new(values: impl IntoIterator<Item = u8>) -> Self {
        Self {
            values: values.into_iter().map(|v| v.clamp(1, 6)).collect(),
        }
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl DiceSource for ScriptedDice {
    fn roll_die(&mut self) -> u8 {
        self.values.pop_front().unwrap_or(1)
    }
}
