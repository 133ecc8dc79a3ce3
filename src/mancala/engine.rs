//! Mancala transitions: sowing, capture, clocks.
//!
//! Illegal input (game over, wrong row, empty pit) returns the state
//! unchanged. Callers that need to know should check
//! [`legal_moves`] first or go through [`MancalaEngine`], which reports
//! the same input as an error.

use log::{debug, info, trace};

use super::board::MancalaState;
use crate::core::config::MancalaConfig;
use crate::core::error::RulesError;
use crate::core::player::PlayerId;
use crate::rules::{GameResult, RulesEngine};

/// Standard 6x4 board with the default clock.
#[must_use]
pub fn initialize() -> MancalaState {
    MancalaState::from_config(&MancalaConfig::default())
}

/// Board from a custom configuration.
pub fn initialize_with(config: &MancalaConfig) -> Result<MancalaState, RulesError> {
    config.validate()?;
    Ok(MancalaState::from_config(config))
}

/// Pits the player to move may sow from.
#[must_use]
pub fn legal_moves(state: &MancalaState) -> Vec<usize> {
    if state.is_game_over {
        return Vec::new();
    }
    state
        .row(state.current_player)
        .filter(|&pit| state.pits[pit] > 0)
        .collect()
}

/// Sow from `pit` for the player to move.
///
/// Seeds go one per pit around the ring, origin included on a lap. If the
/// last seed lands in an opponent pit whose count now satisfies the
/// capture rule, that pit is taken and the walk continues backward through
/// the opponent row while the rule keeps holding.
#[must_use]
pub fn apply_move(state: &MancalaState, pit: usize) -> MancalaState {
    if !state.is_playable(pit) {
        debug!(
            "ignoring mancala move at pit {} by {} (game over: {})",
            pit, state.current_player, state.is_game_over
        );
        return state.clone();
    }

    let mut next = state.clone();
    let mover = state.current_player;
    let ring = next.pits.len();

    let mut seeds = next.pits[pit];
    next.pits[pit] = 0;
    let mut cursor = pit;
    while seeds > 0 {
        cursor = (cursor + 1) % ring;
        next.pits[cursor] += 1;
        seeds -= 1;
    }

    let captured = capture_from(&mut next, mover, cursor);
    next.scores[mover] += captured;
    trace!("{} sowed pit {} ending at {}, captured {}", mover, pit, cursor, captured);

    let opponent = mover.opponent();
    next.current_player = opponent;
    next.active_timer = opponent;

    if next.row_seeds(PlayerId::new(0)) == 0 || next.row_seeds(PlayerId::new(1)) == 0 {
        next.sweep();
        info!(
            "mancala over: {} - {}",
            next.scores[PlayerId::new(0)],
            next.scores[PlayerId::new(1)]
        );
    }

    next
}

/// Take seeds backward from `last` while the pits belong to the opponent
/// and satisfy the capture rule. Returns the number captured.
fn capture_from(state: &mut MancalaState, mover: PlayerId, last: usize) -> u32 {
    let opponent_row = state.row(mover.opponent());
    let mut captured = 0;
    let mut cursor = last;

    while opponent_row.contains(&cursor) && state.capture.captures(state.pits[cursor]) {
        captured += state.pits[cursor];
        state.pits[cursor] = 0;
        if cursor == opponent_row.start {
            break;
        }
        cursor -= 1;
    }

    captured
}

/// Run the active clock down by `elapsed_secs`.
///
/// A clock reaching zero ends the game: the board is swept and the player
/// who ran out loses regardless of score.
#[must_use]
pub fn tick(state: &MancalaState, elapsed_secs: u32) -> MancalaState {
    if state.is_game_over {
        return state.clone();
    }

    let mut next = state.clone();
    let running = next.active_timer;
    next.timers[running] = next.timers[running].saturating_sub(elapsed_secs);

    if next.timers[running] == 0 {
        next.timed_out = Some(running);
        next.sweep();
        info!("mancala over: {} ran out of time", running);
    }

    next
}

/// Outcome of a finished game.
#[must_use]
pub fn result(state: &MancalaState) -> Option<GameResult> {
    if !state.is_game_over {
        return None;
    }
    if let Some(loser) = state.timed_out {
        return Some(GameResult::Winner(loser.opponent()));
    }

    let (a, b) = (state.scores[PlayerId::new(0)], state.scores[PlayerId::new(1)]);
    Some(match a.cmp(&b) {
        std::cmp::Ordering::Greater => GameResult::Winner(PlayerId::new(0)),
        std::cmp::Ordering::Less => GameResult::Winner(PlayerId::new(1)),
        std::cmp::Ordering::Equal => GameResult::Draw,
    })
}

/// `RulesEngine` adapter for Mancala. Moves are pit indices.
#[derive(Clone, Copy, Debug, Default)]
pub struct MancalaEngine;

impl RulesEngine for MancalaEngine {
    type State = MancalaState;
    type Move = usize;

    fn player_count(&self, _state: &MancalaState) -> usize {
        2
    }

    fn actor(&self, state: &MancalaState) -> PlayerId {
        state.current_player
    }

    fn legal_moves(&self, state: &MancalaState) -> Vec<usize> {
        legal_moves(state)
    }

    fn apply_move(&self, state: &MancalaState, pit: &usize) -> Result<MancalaState, RulesError> {
        if state.is_game_over {
            return Err(RulesError::GameOver);
        }
        if !state.is_playable(*pit) {
            return Err(RulesError::IllegalMove(format!("pit {pit} is not playable")));
        }
        Ok(apply_move(state, *pit))
    }

    fn result(&self, state: &MancalaState) -> Option<GameResult> {
        result(state)
    }
}
