//! Rule variants as a table of plain functions.
//!
//! Each [`RuleVersion`] maps to a [`RuleSet`]: one legality check, one
//! effect resolver, and the card numbers it treats as special. The engine
//! looks the set up once per call and never branches on the version
//! itself for play legality or effects.
//!
//! Effects run on a state where the card has already left the hand and
//! sits on top of the pile, with `pending_action` still describing the
//! situation the card was played into.

use log::trace;
use serde::{Deserialize, Serialize};

use super::card::Card;
use super::state::{NextAction, PendingAction, WhotState};
use crate::core::player::PlayerId;

/// Rule variant tag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum RuleVersion {
    /// Defendable penalties, hold/suspend chains, general market draws.
    #[default]
    Rule1,
    /// Skip, undefendable pick-two, everyone-draws market, no wild cards.
    Rule2,
}

impl From<RuleVersion> for &'static str {
    fn from(version: RuleVersion) -> Self {
        match version {
            RuleVersion::Rule1 => "rule1",
            RuleVersion::Rule2 => "rule2",
        }
    }
}

impl TryFrom<String> for RuleVersion {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "rule1" => Ok(RuleVersion::Rule1),
            "rule2" => Ok(RuleVersion::Rule2),
            other => Err(format!("unknown rule version `{other}`")),
        }
    }
}

impl RuleVersion {
    /// Legality and effect functions for this variant.
    #[must_use]
    pub fn rules(self) -> &'static RuleSet {
        match self {
            RuleVersion::Rule1 => &RULE1,
            RuleVersion::Rule2 => &RULE2,
        }
    }
}

/// Can `card` be played onto `state` by the awaited player?
pub type ValidityFn = fn(&WhotState, &Card) -> bool;

/// Resolve the played card's effect for `player`.
pub type EffectFn = fn(&mut WhotState, PlayerId, Card);

/// One rule variant.
#[derive(Debug)]
pub struct RuleSet {
    pub is_valid_move: ValidityFn,
    pub apply_effect: EffectFn,
    /// Numbers with an effect beyond passing the turn.
    pub special_numbers: &'static [u8],
}

impl RuleSet {
    #[must_use]
    pub fn is_special(&self, card: &Card) -> bool {
        card.is_wild() || self.special_numbers.contains(&card.number)
    }
}

static RULE1: RuleSet = RuleSet {
    is_valid_move: rule1_is_valid,
    apply_effect: rule1_effect,
    special_numbers: &[1, 2, 5, 8, 14, 20],
};

static RULE2: RuleSet = RuleSet {
    is_valid_move: rule2_is_valid,
    apply_effect: rule2_effect,
    special_numbers: &[1, 2, 14, 20],
};

/// Free-play match against the pile top, honoring a called suit.
fn matches_top(state: &WhotState, card: &Card) -> bool {
    let Some(top) = state.top_card() else {
        return true;
    };
    if top.is_wild() {
        return match state.called_suit {
            Some(suit) => card.suit == suit || card.is_wild(),
            None => true,
        };
    }
    card.matches(top)
}

fn rule1_is_valid(state: &WhotState, card: &Card) -> bool {
    match state.pending_action {
        Some(PendingAction::CallSuit { .. }) | Some(PendingAction::Draw { .. }) => false,
        _ if card.is_wild() => true,
        Some(PendingAction::Defend { .. }) => matches!(card.number, 2 | 5),
        Some(PendingAction::Continue { .. }) => {
            let reference = match state.last_played_card {
                Some(last) if last.is_wild() => state.called_suit,
                Some(last) => Some(last.suit),
                None => state.called_suit.or_else(|| state.top_card().map(|c| c.suit)),
            };
            reference.map_or(true, |suit| card.suit == suit)
        }
        None => matches_top(state, card),
    }
}

fn rule1_effect(state: &mut WhotState, player: PlayerId, card: Card) {
    let next = state.next_player(player, 1);
    match card.number {
        // Hold and suspend: same player goes again.
        1 | 8 => {
            state.current_player = player;
            state.pending_action = Some(PendingAction::Continue { player });
            state.last_played_card = Some(card);
        }
        // General market.
        14 => {
            state.current_player = next;
            state.pending_action = Some(PendingAction::Draw {
                player: next,
                count: 1,
                return_turn_to: player,
            });
            state.last_played_card = Some(card);
        }
        2 | 5 => {
            state.pending_pick += if card.number == 2 { 2 } else { 3 };
            state.current_player = next;
            state.pending_action = Some(PendingAction::Defend {
                player: next,
                count: state.pending_pick,
                return_turn_to: player,
            });
            state.last_played_card = Some(card);
        }
        Card::WILD_NUMBER => {
            let in_battle = matches!(
                state.pending_action,
                Some(PendingAction::Defend { .. }) | Some(PendingAction::Continue { .. })
            );
            state.called_suit = None;
            state.pending_pick = 0;
            state.current_player = player;
            state.pending_action = Some(PendingAction::CallSuit {
                player,
                next_action: if in_battle { NextAction::Continue } else { NextAction::Pass },
            });
            state.last_played_card = Some(card);
        }
        _ => {
            state.current_player = next;
            state.pending_action = None;
            state.pending_pick = 0;
            state.last_played_card = None;
        }
    }
    trace!("rule1 {} by {}: pending {:?}", card, player, state.pending_action);
}

fn rule2_is_valid(state: &WhotState, card: &Card) -> bool {
    if state.pending_pick > 0 || state.pending_action.is_some() {
        return false;
    }
    if state.must_play_normal && RULE2.is_special(card) {
        return false;
    }
    matches_top(state, card)
}

fn rule2_effect(state: &mut WhotState, player: PlayerId, card: Card) {
    state.last_played_card = Some(card);
    match card.number {
        // Skip the next player.
        1 => {
            state.current_player = state.next_player(player, 2);
            state.must_play_normal = true;
        }
        2 => {
            state.pending_pick += 2;
            state.current_player = state.next_player(player, 1);
            state.must_play_normal = true;
        }
        // Everyone else draws one, in seat order.
        14 => {
            for step in 1..state.player_count() {
                let target = state.next_player(player, step);
                state.draw_one(target);
            }
            state.current_player = state.next_player(player, 1);
            state.must_play_normal = true;
        }
        Card::WILD_NUMBER => {
            state.called_suit = None;
            state.current_player = player;
            state.must_play_normal = false;
            state.pending_action = Some(PendingAction::CallSuit {
                player,
                next_action: NextAction::Pass,
            });
        }
        _ => {
            state.current_player = state.next_player(player, 1);
            state.must_play_normal = false;
        }
    }
    trace!("rule2 {} by {}: turn {}", card, player, state.current_player);
}
