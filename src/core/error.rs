//! Error type shared by every engine and play mode.

use thiserror::Error;

use super::player::PlayerId;
use crate::whot::{Card, Suit};

/// Everything a rules transition can reject.
///
/// The card engine reports illegal input through this type. Mancala and
/// Ludo treat illegal input as a no-op in their own API and only surface
/// [`RulesError::IllegalMove`] through the generic `RulesEngine` seam.
#[derive(Debug, Error)]
pub enum RulesError {
    #[error("{player} acted but the engine is waiting on {expected}")]
    NotYourTurn { player: PlayerId, expected: PlayerId },

    #[error("{player} does not hold {card}")]
    CardNotInHand { player: PlayerId, card: Card },

    #[error("{card} cannot be played in the current state")]
    IllegalCard { card: Card },

    #[error("a suit must be called before play continues")]
    AwaitingSuitCall,

    #[error("a forced draw is in progress")]
    AwaitingForcedDraw,

    #[error("{player} must pick the stacked penalty")]
    PenaltyPending { player: PlayerId },

    #[error("no suit call is pending for {player}")]
    NoSuitCallPending { player: PlayerId },

    #[error("{suit} cannot be called")]
    InvalidSuitCall { suit: Suit },

    #[error("no forced draw is pending")]
    NoForcedDraw,

    #[error("illegal move: {0}")]
    IllegalMove(String),

    #[error("game is already over")]
    GameOver,

    #[error("unsupported player count {count}")]
    InvalidPlayerCount { count: usize },

    #[error("dealing {requested} cards needs more than the {available} in the deck")]
    DeckTooSmall { requested: usize, available: usize },

    #[error("both players picked the same color")]
    DuplicateColor,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("{player} holds {balance} but the stake is {stake}")]
    InsufficientBalance { player: PlayerId, balance: u64, stake: u64 },

    #[error("balances cover {balances} players but the game seats {players}")]
    SeatMismatch { balances: usize, players: usize },

    #[error("malformed remote state: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed snapshot: {0}")]
    Snapshot(#[from] bincode::Error),
}
