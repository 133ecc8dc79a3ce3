//! Mancala board state.
//!
//! Two rows of pits laid out as one ring: pits `0..n` belong to player 0,
//! `n..2n` to player 1. Sowing always walks toward higher indices and
//! wraps, so player 0's last pit feeds player 1's first.

use std::ops::Range;

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::config::{CaptureRule, MancalaConfig};
use crate::core::error::RulesError;
use crate::core::player::{PlayerId, PlayerMap};

/// Immutable Mancala game state.
///
/// Invariant: `seeds_in_play() + scores` equals `total_seeds()` of the
/// starting board after every transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MancalaState {
    /// Seed count per pit, both rows.
    pub pits: Vector<u32>,

    /// Captured seeds per player.
    pub scores: PlayerMap<u32>,

    pub current_player: PlayerId,

    pub is_game_over: bool,

    /// Remaining clock per player, in seconds.
    pub timers: PlayerMap<u32>,

    /// Whose clock is running.
    pub active_timer: PlayerId,

    /// Set when a clock reached zero.
    pub timed_out: Option<PlayerId>,

    pub capture: CaptureRule,
}

impl MancalaState {
    /// Fresh board from a validated config.
    pub(crate) fn from_config(config: &MancalaConfig) -> Self {
        let pits = std::iter::repeat(config.seeds_per_pit)
            .take(config.pits_per_side * 2)
            .collect();
        Self {
            pits,
            scores: PlayerMap::with_value(2, 0),
            current_player: PlayerId::new(0),
            is_game_over: false,
            timers: PlayerMap::with_value(2, config.turn_timer_secs),
            active_timer: PlayerId::new(0),
            timed_out: None,
            capture: config.capture,
        }
    }

    /// Hand-built position, e.g. for puzzles or tests.
    ///
    /// `pits` must form two equal non-empty rows holding at most
    /// [`MancalaConfig::MAX_TOTAL_SEEDS`] seeds.
    ///
    /// ```
    /// use parlor_rules::core::PlayerId;
    /// use parlor_rules::mancala::MancalaState;
    ///
    /// let state = MancalaState::from_pits(vec![0, 1, 2, 3], PlayerId::new(1)).unwrap();
    /// assert_eq!(state.pits_per_side(), 2);
    /// assert_eq!(state.seeds_in_play(), 6);
    /// assert!(MancalaState::from_pits(vec![1, 2, 3], PlayerId::new(0)).is_err());
    /// ```
    pub fn from_pits(pits: Vec<u32>, current_player: PlayerId) -> Result<Self, RulesError> {
        if pits.is_empty() || pits.len() % 2 != 0 {
            return Err(RulesError::InvalidConfig(format!(
                "board needs two equal non-empty rows, got {} pits",
                pits.len()
            )));
        }
        if current_player.index() > 1 {
            return Err(RulesError::InvalidConfig(format!("{current_player} has no seat on a mancala board")));
        }
        let total = pits.iter().try_fold(0u32, |acc, &n| acc.checked_add(n));
        if total.map_or(true, |t| t > MancalaConfig::MAX_TOTAL_SEEDS) {
            return Err(RulesError::InvalidConfig(format!(
                "board holds more than {} seeds",
                MancalaConfig::MAX_TOTAL_SEEDS
            )));
        }
        let defaults = MancalaConfig::default();
        Ok(Self {
            pits: pits.into_iter().collect(),
            scores: PlayerMap::with_value(2, 0),
            current_player,
            is_game_over: false,
            timers: PlayerMap::with_value(2, defaults.turn_timer_secs),
            active_timer: current_player,
            timed_out: None,
            capture: defaults.capture,
        })
    }

    #[must_use]
    pub fn with_scores(mut self, first: u32, second: u32) -> Self {
        self.scores = PlayerMap::from_vec(vec![first, second]);
        self
    }

    #[must_use]
    pub fn with_capture(mut self, capture: CaptureRule) -> Self {
        self.capture = capture;
        self
    }

    #[must_use]
    pub fn pits_per_side(&self) -> usize {
        self.pits.len() / 2
    }

    /// Pit indices belonging to `player`.
    #[must_use]
    pub fn row(&self, player: PlayerId) -> Range<usize> {
        let n = self.pits_per_side();
        let start = player.index() * n;
        start..start + n
    }

    #[must_use]
    pub fn owner_of(&self, pit: usize) -> PlayerId {
        PlayerId::new((pit / self.pits_per_side()) as u8)
    }

    /// Seeds left in `player`'s row.
    #[must_use]
    pub fn row_seeds(&self, player: PlayerId) -> u32 {
        self.row(player).map(|i| self.pits[i]).sum()
    }

    #[must_use]
    pub fn seeds_in_play(&self) -> u32 {
        self.pits.iter().sum()
    }

    /// Seeds on the board plus seeds captured. Constant over a game.
    #[must_use]
    pub fn total_seeds(&self) -> u32 {
        self.seeds_in_play() + self.scores.values().sum::<u32>()
    }

    /// Can the player to move sow from `pit`?
    #[must_use]
    pub fn is_playable(&self, pit: usize) -> bool {
        !self.is_game_over
            && pit < self.pits.len()
            && self.owner_of(pit) == self.current_player
            && self.pits[pit] > 0
    }

    /// Move every seed left on the board into its row owner's score.
    pub(crate) fn sweep(&mut self) {
        for player in [PlayerId::new(0), PlayerId::new(1)] {
            let remaining = self.row_seeds(player);
            for i in self.row(player) {
                self.pits[i] = 0;
            }
            self.scores[player] += remaining;
        }
        self.is_game_over = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_and_owners() {
        let state = MancalaState::from_config(&MancalaConfig::default());
        assert_eq!(state.pits.len(), 12);
        assert_eq!(state.row(PlayerId::new(1)), 6..12);
        assert_eq!(state.owner_of(5), PlayerId::new(0));
        assert_eq!(state.owner_of(6), PlayerId::new(1));
        assert_eq!(state.total_seeds(), 48);
    }

    #[test]
    fn test_sweep_conserves_seeds() {
        let mut state = MancalaState::from_pits(vec![1, 2, 0, 4], PlayerId::new(0)).unwrap().with_scores(3, 1);
        let before = state.total_seeds();
        state.sweep();

        assert!(state.is_game_over);
        assert_eq!(state.seeds_in_play(), 0);
        assert_eq!(state.scores[PlayerId::new(0)], 6);
        assert_eq!(state.scores[PlayerId::new(1)], 5);
        assert_eq!(state.total_seeds(), before);
    }

    #[test]
    fn test_is_playable() {
        let state = MancalaState::from_pits(vec![0, 2, 3, 3], PlayerId::new(0)).unwrap();
        assert!(!state.is_playable(0)); // empty
        assert!(state.is_playable(1));
        assert!(!state.is_playable(2)); // opponent row
        assert!(!state.is_playable(9)); // off board
    }

    #[test]
    fn test_from_pits_rejects_bad_boards() {
        assert!(MancalaState::from_pits(vec![], PlayerId::new(0)).is_err());
        assert!(MancalaState::from_pits(vec![1, 2, 3], PlayerId::new(0)).is_err());
        assert!(MancalaState::from_pits(vec![1, 1], PlayerId::new(2)).is_err());
        assert!(matches!(
            MancalaState::from_pits(vec![u32::MAX, 1], PlayerId::new(0)),
            Err(RulesError::InvalidConfig(_))
        ));
        assert!(MancalaState::from_pits(vec![MancalaConfig::MAX_TOTAL_SEEDS + 1, 0], PlayerId::new(0)).is_err());
    }
}
