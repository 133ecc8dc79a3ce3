//! Rules engine trait for the individual games.
//!
//! Games implement `RulesEngine` to expose:
//! - Which moves are legal for the player the game is waiting on
//! - How a move produces the next state
//! - Win/draw conditions
//!
//! Play modes and the computer opponent only talk to games through this
//! trait. States are values: `apply_move` never touches its input.

use std::fmt::Debug;

use crate::core::error::RulesError;
use crate::core::player::PlayerId;

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Nobody won (equal scores, blocked card game).
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            GameResult::Winner(p) => Some(*p),
            GameResult::Draw => None,
        }
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_moves`: empty when the game is over or waiting on chance
///   (an unrolled Ludo turn)
/// - `actor`: the player whose input is awaited, which in the card game
///   can differ from the nominal turn owner (defender, forced drawer)
/// - `apply_move`: must be deterministic and leave `state` untouched
/// - `result`: `None` while the game continues
pub trait RulesEngine {
    /// Immutable game state.
    type State: Clone + Debug;

    /// Move descriptor.
    type Move: Clone + Debug + PartialEq;

    /// Number of seats at the table.
    fn player_count(&self, state: &Self::State) -> usize;

    /// Player whose input is awaited.
    fn actor(&self, state: &Self::State) -> PlayerId;

    /// All legal moves for `actor`.
    fn legal_moves(&self, state: &Self::State) -> Vec<Self::Move>;

    /// Produce the next state.
    fn apply_move(&self, state: &Self::State, mv: &Self::Move) -> Result<Self::State, RulesError>;

    /// Terminal outcome, if any.
    fn result(&self, state: &Self::State) -> Option<GameResult>;

    // === Convenience Methods ===

    /// Check membership in the legal set.
    fn is_legal(&self, state: &Self::State, mv: &Self::Move) -> bool {
        self.legal_moves(state).contains(mv)
    }

    /// Is the game over?
    fn is_terminal(&self, state: &Self::State) -> bool {
        self.result(state).is_some()
    }
}
