//! Ludo transitions: rolling, moving, passing.
//!
//! Turn policy after a move:
//! - a die left unused: same player moves again without rolling
//! - all dice used: next player rolls, unless the roll earned a bonus
//!   (double six by default, see [`BonusRule`])
//!
//! Illegal input returns the state unchanged and is logged at `debug`.

use log::{debug, info, trace};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::state::{Die, LudoColor, LudoState, TokenPosition};
use crate::core::config::{BonusRule, LudoConfig};
use crate::core::error::RulesError;
use crate::core::player::PlayerId;
use crate::core::rng::DiceSource;
use crate::rules::{GameResult, RulesEngine};

/// Move one token with one die.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveAction {
    pub token: usize,
    pub die_index: usize,
    pub from: TokenPosition,
    pub to: TokenPosition,
}

pub fn initialize(color_a: LudoColor, color_b: LudoColor) -> Result<LudoState, RulesError> {
    initialize_with(color_a, color_b, LudoConfig::default())
}

pub fn initialize_with(
    color_a: LudoColor,
    color_b: LudoColor,
    config: LudoConfig,
) -> Result<LudoState, RulesError> {
    if color_a == color_b {
        return Err(RulesError::DuplicateColor);
    }
    Ok(LudoState::new(color_a, color_b, config))
}

/// Roll two dice for the current player.
#[must_use]
pub fn roll_dice(state: &LudoState, dice: &mut impl DiceSource) -> LudoState {
    if !can_roll(state) {
        return state.clone();
    }
    let values = [dice.roll_die(), dice.roll_die()];
    roll_dice_with(state, values)
}

/// Apply a known roll, e.g. one replayed from a remote peer.
#[must_use]
pub fn roll_dice_with(state: &LudoState, values: [u8; 2]) -> LudoState {
    if !can_roll(state) {
        return state.clone();
    }
    if values.iter().any(|v| !(1..=6).contains(v)) {
        debug!("ignoring out-of-range roll {:?}", values);
        return state.clone();
    }

    let mut next = state.clone();
    next.dice = values.iter().map(|&v| Die::new(v)).collect();
    next.waiting_for_roll = false;
    trace!("{} rolled {:?}", next.current_player, values);
    next
}

fn can_roll(state: &LudoState) -> bool {
    if state.winner.is_some() || !state.waiting_for_roll {
        debug!(
            "ignoring roll: waiting={} winner={:?}",
            state.waiting_for_roll, state.winner
        );
        return false;
    }
    true
}

/// Every token move available with the unused dice.
///
/// Each die is considered on its own; two dice are never combined into one
/// move.
#[must_use]
pub fn get_valid_moves(state: &LudoState) -> SmallVec<[MoveAction; 8]> {
    let mut moves = SmallVec::new();
    if state.winner.is_some() || state.waiting_for_roll {
        return moves;
    }

    let player = state.player(state.current_player);
    for (die_index, die) in state.unused_dice() {
        for (token, &from) in player.tokens.iter().enumerate() {
            if let Some(to) = from.advanced_by(die.value) {
                moves.push(MoveAction {
                    token,
                    die_index,
                    from,
                    to,
                });
            }
        }
    }
    moves
}

/// Spend a die to move a token, then resolve the turn.
#[must_use]
pub fn apply_move(state: &LudoState, mv: &MoveAction) -> LudoState {
    if !get_valid_moves(state).contains(mv) {
        debug!("ignoring invalid ludo move {:?} by {}", mv, state.current_player);
        return state.clone();
    }

    let mut next = state.clone();
    let mover = state.current_player;
    next.dice[mv.die_index].used = true;
    next.player_mut(mover).tokens[mv.token] = mv.to;

    if next.config.capture_on_landing {
        capture_at(&mut next, mover, mv.to);
    }

    if next.player(mover).all_finished() {
        next.winner = Some(mover);
        next.dice.clear();
        next.waiting_for_roll = false;
        info!("ludo over: {} wins", mover);
        return next;
    }

    if next.dice.iter().any(|d| !d.used) {
        return next;
    }

    let bonus = earns_bonus(&next.dice, next.config.bonus);
    next.dice.clear();
    next.waiting_for_roll = true;
    if !bonus {
        next.current_player = mover.opponent();
    }
    trace!("turn now {} (bonus: {})", next.current_player, bonus);
    next
}

fn earns_bonus(dice: &[Die], rule: BonusRule) -> bool {
    match (dice, rule) {
        ([a, b], BonusRule::DoubleSixOnly) => a.value == 6 && b.value == 6,
        ([a, b], BonusRule::AnyDouble) => a.value == b.value,
        _ => false,
    }
}

/// Send home any opposing token sharing the landing ring cell.
fn capture_at(state: &mut LudoState, mover: PlayerId, landed: TokenPosition) {
    let TokenPosition::Track(position) = landed else {
        return;
    };
    let Some(cell) = state.player(mover).color.ring_cell(position) else {
        return;
    };

    let victim = state.player_mut(mover.opponent());
    let color = victim.color;
    for token in victim.tokens.iter_mut() {
        if let TokenPosition::Track(p) = *token {
            if color.ring_cell(p) == Some(cell) {
                debug!("{} captured a {:?} token on cell {}", mover, color, cell);
                *token = TokenPosition::House;
            }
        }
    }
}

/// Give up the rest of the roll and hand the turn over.
///
/// The engine never calls this itself; callers use it when
/// [`get_valid_moves`] comes back empty after a roll.
#[must_use]
pub fn pass_turn(state: &LudoState) -> LudoState {
    if state.winner.is_some() || state.waiting_for_roll {
        debug!("ignoring pass: nothing rolled or game over");
        return state.clone();
    }

    let mut next = state.clone();
    next.dice.clear();
    next.waiting_for_roll = true;
    next.current_player = state.current_player.opponent();
    trace!("{} passed", state.current_player);
    next
}

/// A Ludo move as seen through [`RulesEngine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LudoMove {
    Token(MoveAction),
    /// Only legal when a roll left no token move.
    Pass,
}

/// `RulesEngine` adapter for Ludo.
///
/// Rolling is a chance event outside the move set: while
/// `waiting_for_roll` is set, `legal_moves` is empty and the caller rolls
/// with [`roll_dice`].
#[derive(Clone, Copy, Debug, Default)]
pub struct LudoEngine;

impl RulesEngine for LudoEngine {
    type State = LudoState;
    type Move = LudoMove;

    fn player_count(&self, _state: &LudoState) -> usize {
        2
    }

    fn actor(&self, state: &LudoState) -> PlayerId {
        state.current_player
    }

    fn legal_moves(&self, state: &LudoState) -> Vec<LudoMove> {
        if state.winner.is_some() || state.waiting_for_roll {
            return Vec::new();
        }
        let moves: Vec<_> = get_valid_moves(state).into_iter().map(LudoMove::Token).collect();
        if moves.is_empty() {
            vec![LudoMove::Pass]
        } else {
            moves
        }
    }

    fn apply_move(&self, state: &LudoState, mv: &LudoMove) -> Result<LudoState, RulesError> {
        if state.winner.is_some() {
            return Err(RulesError::GameOver);
        }
        if !self.is_legal(state, mv) {
            return Err(RulesError::IllegalMove(format!("{mv:?}")));
        }
        Ok(match mv {
            LudoMove::Token(action) => apply_move(state, action),
            LudoMove::Pass => pass_turn(state),
        })
    }

    fn result(&self, state: &LudoState) -> Option<GameResult> {
        state.winner.map(GameResult::Winner)
    }
}
