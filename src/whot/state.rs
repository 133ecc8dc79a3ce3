//! Whot table state and the pending-action machine.
//!
//! ## Pending actions
//!
//! `pending_action` names what the engine waits for before free play
//! resumes:
//! - `Continue`: the same player must play again or draw
//! - `Defend`: the target must stack a penalty card or draw `count`
//! - `Draw`: the target is drawing `count` cards one at a time
//! - `CallSuit`: the player who dropped a wild card must name a suit
//!
//! `None` is free play for `current_player`.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::card::{Card, Suit};
use super::variant::RuleVersion;
use crate::core::player::PlayerId;

/// What happens after a suit is called.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum NextAction {
    /// Turn moves on.
    Pass,
    /// Same player keeps playing.
    Continue,
}

impl From<NextAction> for &'static str {
    fn from(action: NextAction) -> Self {
        match action {
            NextAction::Pass => "pass",
            NextAction::Continue => "continue",
        }
    }
}

impl TryFrom<String> for NextAction {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pass" => Ok(NextAction::Pass),
            "continue" => Ok(NextAction::Continue),
            other => Err(format!("unknown next action `{other}`")),
        }
    }
}

/// What the engine is waiting for.
///
/// On the wire this is a flat object with a `type` tag. The tag and any
/// nested enum strings are accepted in any casing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "PendingActionRecord", try_from = "PendingActionRecord")]
pub enum PendingAction {
    Continue {
        player: PlayerId,
    },
    Defend {
        player: PlayerId,
        count: u32,
        return_turn_to: PlayerId,
    },
    Draw {
        player: PlayerId,
        count: u32,
        return_turn_to: PlayerId,
    },
    CallSuit {
        player: PlayerId,
        next_action: NextAction,
    },
}

impl PendingAction {
    /// Player whose input is awaited.
    #[must_use]
    pub fn player(&self) -> PlayerId {
        match *self {
            PendingAction::Continue { player }
            | PendingAction::Defend { player, .. }
            | PendingAction::Draw { player, .. }
            | PendingAction::CallSuit { player, .. } => player,
        }
    }
}

/// Flat wire form of [`PendingAction`].
#[derive(Clone, Debug, Serialize, Deserialize)]
struct PendingActionRecord {
    #[serde(rename = "type")]
    kind: String,
    player: PlayerId,
    #[serde(default)]
    count: u32,
    #[serde(default)]
    return_turn_to: Option<PlayerId>,
    #[serde(default)]
    next_action: Option<NextAction>,
}

impl From<PendingAction> for PendingActionRecord {
    fn from(action: PendingAction) -> Self {
        let (kind, count, return_turn_to, next_action) = match action {
            PendingAction::Continue { .. } => ("continue", 0, None, None),
            PendingAction::Defend { count, return_turn_to, .. } => ("defend", count, Some(return_turn_to), None),
            PendingAction::Draw { count, return_turn_to, .. } => ("draw", count, Some(return_turn_to), None),
            PendingAction::CallSuit { next_action, .. } => ("call_suit", 0, None, Some(next_action)),
        };
        Self {
            kind: kind.to_string(),
            player: action.player(),
            count,
            return_turn_to,
            next_action,
        }
    }
}

impl TryFrom<PendingActionRecord> for PendingAction {
    type Error = String;

    fn try_from(record: PendingActionRecord) -> Result<Self, Self::Error> {
        let player = record.player;
        let return_turn_to = || {
            record
                .return_turn_to
                .ok_or_else(|| format!("`{}` needs return_turn_to", record.kind))
        };
        match record.kind.trim().to_ascii_lowercase().as_str() {
            "continue" => Ok(PendingAction::Continue { player }),
            "defend" => Ok(PendingAction::Defend {
                player,
                count: record.count,
                return_turn_to: return_turn_to()?,
            }),
            "draw" => Ok(PendingAction::Draw {
                player,
                count: record.count,
                return_turn_to: return_turn_to()?,
            }),
            "call_suit" | "callsuit" => Ok(PendingAction::CallSuit {
                player,
                next_action: record.next_action.unwrap_or(NextAction::Pass),
            }),
            other => Err(format!("unknown pending action `{other}`")),
        }
    }
}

/// One seat at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhotPlayer {
    pub name: String,
    pub hand: Vector<Card>,
}

/// Immutable Whot table state.
///
/// Invariant: market + pile + all hands is always the dealt deck, as a
/// multiset. See [`WhotState::card_census`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhotState {
    pub players: Vector<WhotPlayer>,

    /// Draw pile; the front is the top.
    pub market: Vector<Card>,

    /// Discard pile; the back is the active card.
    pub pile: Vector<Card>,

    pub current_player: PlayerId,

    /// Seat rotation, +1 in both variants. Neither variant reverses play,
    /// but `next_player` honors -1 for hand-built tables.
    pub direction: i8,

    pub pending_action: Option<PendingAction>,

    /// Cards stacked by penalty plays and not yet drawn.
    pub pending_pick: u32,

    /// Suit named after the last wild card.
    pub called_suit: Option<Suit>,

    /// Suit reference for chained special plays.
    pub last_played_card: Option<Card>,

    /// Special cards are locked out for the next play.
    #[serde(default)]
    pub must_play_normal: bool,

    pub rule_version: RuleVersion,

    pub winner: Option<PlayerId>,
}

impl WhotState {
    /// Table from explicit hands, market and pile.
    ///
    /// Player names default to "Player N". Useful for puzzles and for
    /// rebuilding a known position.
    #[must_use]
    pub fn from_parts(
        hands: Vec<Vec<Card>>,
        market: Vec<Card>,
        pile: Vec<Card>,
        rule_version: RuleVersion,
    ) -> Self {
        let players = hands
            .into_iter()
            .enumerate()
            .map(|(i, hand)| WhotPlayer {
                name: format!("Player {i}"),
                hand: hand.into_iter().collect(),
            })
            .collect();
        Self {
            players,
            market: market.into_iter().collect(),
            pile: pile.into_iter().collect(),
            current_player: PlayerId::new(0),
            direction: 1,
            pending_action: None,
            pending_pick: 0,
            called_suit: None,
            last_played_card: None,
            must_play_normal: false,
            rule_version,
            winner: None,
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// A player's hand. Indexes like `PlayerMap`, so an unseated id
    /// panics; use [`WhotState::get_hand`] for ids from outside the table.
    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &Vector<Card> {
        &self.players[player.index()].hand
    }

    #[must_use]
    pub fn get_hand(&self, player: PlayerId) -> Option<&Vector<Card>> {
        self.players.get(player.index()).map(|p| &p.hand)
    }

    /// The card to match against.
    #[must_use]
    pub fn top_card(&self) -> Option<&Card> {
        self.pile.last()
    }

    /// Player whose input is awaited.
    #[must_use]
    pub fn actor(&self) -> PlayerId {
        self.pending_action
            .map_or(self.current_player, |action| action.player())
    }

    /// Seat `steps` places after `from` in the current direction.
    #[must_use]
    pub fn next_player(&self, from: PlayerId, steps: usize) -> PlayerId {
        from.advance(self.player_count(), steps, self.direction)
    }

    /// Move the market's top card into `player`'s hand.
    pub(crate) fn draw_one(&mut self, player: PlayerId) -> Option<Card> {
        let card = self.market.pop_front()?;
        self.players[player.index()].hand.push_back(card);
        Some(card)
    }

    /// Draw up to `count` cards, stopping early if the market runs out.
    pub(crate) fn draw_many(&mut self, player: PlayerId, count: u32) -> Vec<Card> {
        (0..count).map_while(|_| self.draw_one(player)).collect()
    }

    /// Remove one copy of `card` from a hand.
    pub(crate) fn remove_from_hand(&mut self, player: PlayerId, card: &Card) -> bool {
        let hand = &mut self.players[player.index()].hand;
        match hand.index_of(card) {
            Some(pos) => {
                hand.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Every card on the table, counted.
    #[must_use]
    pub fn card_census(&self) -> FxHashMap<Card, usize> {
        let mut census = FxHashMap::default();
        let hands = self.players.iter().flat_map(|p| p.hand.iter());
        for card in self.market.iter().chain(self.pile.iter()).chain(hands) {
            *census.entry(*card).or_insert(0) += 1;
        }
        census
    }

    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.market.len() + self.pile.len() + self.players.iter().map(|p| p.hand.len()).sum::<usize>()
    }
}
