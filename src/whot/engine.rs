//! Whot transitions.
//!
//! Unlike the board games, every illegal input here is an error: the
//! caller catches it at the point where a tap becomes an engine call and
//! shows it as a no-op. Running out of market cards is never an error.

use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use super::card::{generate_deck, Card, Suit};
use super::state::{NextAction, PendingAction, WhotPlayer, WhotState};
use super::variant::RuleVersion;
use crate::core::config::WhotConfig;
use crate::core::error::RulesError;
use crate::core::player::PlayerId;
use crate::core::rng::GameRng;
use crate::rules::{GameResult, RulesEngine};

/// Opening table plus the deck it was dealt from.
#[derive(Clone, Debug)]
pub struct WhotDeal {
    pub state: WhotState,
    /// Every card in play, in shuffled order before dealing.
    pub full_deck: Vec<Card>,
}

/// Shuffle, deal `config.hand_size` cards each, and turn up a pile card.
///
/// The pile starts with the first non-special card in the market, or the
/// market's top card if every remaining card is special.
pub fn initialize(
    player_names: &[&str],
    config: &WhotConfig,
    rng: &mut GameRng,
) -> Result<WhotDeal, RulesError> {
    let seats = player_names.len();
    if !(2..=255).contains(&seats) {
        return Err(RulesError::InvalidPlayerCount { count: seats });
    }

    let mut deck = generate_deck(config.wild_card_count());
    let needed = config
        .hand_size
        .checked_mul(seats)
        .and_then(|n| n.checked_add(1))
        .unwrap_or(usize::MAX);
    if needed > deck.len() {
        return Err(RulesError::DeckTooSmall {
            requested: needed,
            available: deck.len(),
        });
    }
    rng.shuffle(&mut deck);

    let mut market: im::Vector<Card> = deck.iter().copied().collect();
    let mut hands = vec![im::Vector::new(); seats];
    for _ in 0..config.hand_size {
        for hand in hands.iter_mut() {
            if let Some(card) = market.pop_front() {
                hand.push_back(card);
            }
        }
    }

    let rules = config.rule_version.rules();
    let opening = market.iter().position(|c| !rules.is_special(c)).unwrap_or(0);
    let mut pile = im::Vector::new();
    pile.push_back(market.remove(opening));

    let players = player_names
        .iter()
        .zip(hands)
        .map(|(name, hand)| WhotPlayer {
            name: (*name).to_string(),
            hand,
        })
        .collect();

    let state = WhotState {
        players,
        market,
        pile,
        current_player: PlayerId::new(0),
        direction: 1,
        pending_action: None,
        pending_pick: 0,
        called_suit: None,
        last_played_card: None,
        must_play_normal: false,
        rule_version: config.rule_version,
        winner: None,
    };
    debug!(
        "dealt {} cards to {} players under {:?}, pile {:?}",
        config.hand_size,
        seats,
        config.rule_version,
        state.top_card()
    );

    Ok(WhotDeal { state, full_deck: deck })
}

/// Cards `player` could legally play right now.
#[must_use]
pub fn legal_cards(state: &WhotState, player: PlayerId) -> Vec<Card> {
    if state.winner.is_some() || player != state.actor() {
        return Vec::new();
    }
    let Some(hand) = state.get_hand(player) else {
        return Vec::new();
    };
    let valid = state.rule_version.rules().is_valid_move;
    let mut cards: Vec<Card> = Vec::new();
    for card in hand.iter() {
        if valid(state, card) && !cards.contains(card) {
            cards.push(*card);
        }
    }
    cards
}

/// Common gate for play/pick: game running, right player, no suit call
/// or forced draw outstanding.
fn check_turn(state: &WhotState, player: PlayerId) -> Result<(), RulesError> {
    if state.winner.is_some() {
        return Err(RulesError::GameOver);
    }
    match state.pending_action {
        Some(PendingAction::CallSuit { .. }) => return Err(RulesError::AwaitingSuitCall),
        Some(PendingAction::Draw { .. }) if player != state.actor() => {
            return Err(RulesError::AwaitingForcedDraw)
        }
        _ => {}
    }
    let expected = state.actor();
    if player != expected {
        return Err(RulesError::NotYourTurn { player, expected });
    }
    Ok(())
}

/// Play `card` from `player`'s hand.
pub fn play_card(state: &WhotState, player: PlayerId, card: Card) -> Result<WhotState, RulesError> {
    check_turn(state, player)?;
    if matches!(state.pending_action, Some(PendingAction::Draw { .. })) {
        return Err(RulesError::AwaitingForcedDraw);
    }
    if state.rule_version == RuleVersion::Rule2 && state.pending_pick > 0 {
        return Err(RulesError::PenaltyPending { player });
    }
    if !state.hand(player).contains(&card) {
        return Err(RulesError::CardNotInHand { player, card });
    }

    let rules = state.rule_version.rules();
    if !(rules.is_valid_move)(state, &card) {
        debug!("{} tried illegal {} on {:?}", player, card, state.top_card());
        return Err(RulesError::IllegalCard { card });
    }

    let mut next = state.clone();
    next.remove_from_hand(player, &card);
    next.pile.push_back(card);
    if !card.is_wild() {
        next.called_suit = None;
    }

    if next.hand(player).is_empty() {
        next.winner = Some(player);
        next.pending_action = None;
        next.pending_pick = 0;
        info!("whot over: {} played out with {}", player, card);
        return Ok(next);
    }

    (rules.apply_effect)(&mut next, player, card);
    Ok(next)
}

/// Draw for `player`.
///
/// - Facing a `defend`: draw the stacked count, turn goes back to the
///   attacker
/// - Target of a `draw`: one forced-draw step
/// - rule2 with a stacked pick: draw it all, turn ends
/// - Otherwise: draw one, turn ends; with an empty market nothing happens
pub fn pick_card(state: &WhotState, player: PlayerId) -> Result<(WhotState, Vec<Card>), RulesError> {
    check_turn(state, player)?;

    let mut next = state.clone();
    let drawn = match state.pending_action {
        Some(PendingAction::Draw { .. }) => {
            let (next, card) = execute_forced_draw(state)?;
            return Ok((next, card.into_iter().collect()));
        }
        Some(PendingAction::Defend { count, return_turn_to, .. }) => {
            let drawn = next.draw_many(player, count);
            next.pending_action = None;
            next.pending_pick = 0;
            next.last_played_card = None;
            next.current_player = return_turn_to;
            drawn
        }
        _ if state.rule_version == RuleVersion::Rule2 && state.pending_pick > 0 => {
            let drawn = next.draw_many(player, state.pending_pick);
            next.pending_pick = 0;
            next.must_play_normal = false;
            next.current_player = next.next_player(player, 1);
            drawn
        }
        _ => {
            let Some(card) = next.draw_one(player) else {
                debug!("{} tried to draw from an empty market", player);
                return Ok((state.clone(), Vec::new()));
            };
            next.pending_action = None;
            next.pending_pick = 0;
            next.last_played_card = None;
            next.must_play_normal = false;
            next.current_player = next.next_player(player, 1);
            vec![card]
        }
    };

    trace!("{} drew {} card(s)", player, drawn.len());
    Ok((next, drawn))
}

/// Name a suit after a wild card.
pub fn call_suit(state: &WhotState, player: PlayerId, suit: Suit) -> Result<WhotState, RulesError> {
    let next_action = match state.pending_action {
        Some(PendingAction::CallSuit { player: caller, next_action }) if caller == player => next_action,
        _ => return Err(RulesError::NoSuitCallPending { player }),
    };
    if suit == Suit::Whot {
        return Err(RulesError::InvalidSuitCall { suit });
    }

    let mut next = state.clone();
    next.called_suit = Some(suit);
    match next_action {
        NextAction::Pass => {
            next.pending_action = None;
            next.current_player = next.next_player(player, 1);
        }
        NextAction::Continue => {
            next.pending_action = Some(PendingAction::Continue { player });
            next.current_player = player;
        }
    }
    trace!("{} called {}", player, suit);
    Ok(next)
}

/// Draw one card for the target of a `draw` pending action.
///
/// When the count reaches zero or the market runs dry, the pending action
/// clears and the turn goes to `return_turn_to`. A short draw is not an
/// error.
pub fn execute_forced_draw(state: &WhotState) -> Result<(WhotState, Option<Card>), RulesError> {
    let Some(PendingAction::Draw { player, count, return_turn_to }) = state.pending_action else {
        return Err(RulesError::NoForcedDraw);
    };

    let mut next = state.clone();
    let finish = |next: &mut WhotState| {
        next.pending_action = None;
        next.current_player = return_turn_to;
    };

    if count == 0 {
        finish(&mut next);
        return Ok((next, None));
    }

    match next.draw_one(player) {
        None => {
            debug!("market ran out with {} forced draw(s) left for {}", count, player);
            finish(&mut next);
            Ok((next, None))
        }
        Some(card) => {
            if count == 1 || next.market.is_empty() {
                if count > 1 {
                    debug!("market ran out with {} forced draw(s) left for {}", count - 1, player);
                }
                finish(&mut next);
            } else {
                next.pending_action = Some(PendingAction::Draw {
                    player,
                    count: count - 1,
                    return_turn_to,
                });
            }
            Ok((next, Some(card)))
        }
    }
}

/// First player with an empty hand.
#[must_use]
pub fn check_winner(state: &WhotState) -> Option<PlayerId> {
    state
        .players
        .iter()
        .position(|p| p.hand.is_empty())
        .map(|i| PlayerId::new(i as u8))
}

/// A card-game move as seen through [`RulesEngine`]. Always made by the
/// awaited player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WhotMove {
    Play(Card),
    Pick,
    CallSuit(Suit),
    ForcedDraw,
}

/// `RulesEngine` adapter for Whot.
#[derive(Clone, Copy, Debug, Default)]
pub struct WhotEngine;

impl RulesEngine for WhotEngine {
    type State = WhotState;
    type Move = WhotMove;

    fn player_count(&self, state: &WhotState) -> usize {
        state.player_count()
    }

    fn actor(&self, state: &WhotState) -> PlayerId {
        state.actor()
    }

    fn legal_moves(&self, state: &WhotState) -> Vec<WhotMove> {
        if state.winner.is_some() {
            return Vec::new();
        }
        match state.pending_action {
            Some(PendingAction::CallSuit { .. }) => Suit::CALLABLE.iter().map(|&s| WhotMove::CallSuit(s)).collect(),
            Some(PendingAction::Draw { .. }) => vec![WhotMove::ForcedDraw],
            _ => {
                let mut moves: Vec<_> = legal_cards(state, state.actor())
                    .into_iter()
                    .map(WhotMove::Play)
                    .collect();
                let forced_pick = matches!(state.pending_action, Some(PendingAction::Defend { .. }))
                    || (state.rule_version == RuleVersion::Rule2 && state.pending_pick > 0);
                if forced_pick || !state.market.is_empty() {
                    moves.push(WhotMove::Pick);
                }
                moves
            }
        }
    }

    fn apply_move(&self, state: &WhotState, mv: &WhotMove) -> Result<WhotState, RulesError> {
        let actor = state.actor();
        match *mv {
            WhotMove::Play(card) => play_card(state, actor, card),
            WhotMove::Pick => pick_card(state, actor).map(|(next, _)| next),
            WhotMove::CallSuit(suit) => call_suit(state, actor, suit),
            WhotMove::ForcedDraw => execute_forced_draw(state).map(|(next, _)| next),
        }
    }

    /// A winner, or a draw when the market is empty and the awaited
    /// player has nothing to play.
    fn result(&self, state: &WhotState) -> Option<GameResult> {
        if let Some(winner) = state.winner.or_else(|| check_winner(state)) {
            return Some(GameResult::Winner(winner));
        }
        if self.legal_moves(state).is_empty() {
            debug!("whot blocked: empty market and no playable card for {}", state.actor());
            return Some(GameResult::Draw);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(suit: Suit, n: u8) -> Card {
        Card::new(suit, n)
    }

    fn p(i: u8) -> PlayerId {
        PlayerId::new(i)
    }

    #[test]
    fn test_initialize_deals_and_conserves() {
        let mut rng = GameRng::new(42);
        let deal = initialize(&["ada", "bo"], &WhotConfig::new(RuleVersion::Rule1, 5), &mut rng).unwrap();
        let state = &deal.state;

        assert_eq!(deal.full_deck.len(), 54);
        assert_eq!(state.hand(p(0)).len(), 5);
        assert_eq!(state.hand(p(1)).len(), 5);
        assert_eq!(state.pile.len(), 1);
        assert_eq!(state.market.len(), 54 - 11);
        assert_eq!(state.players[1].name, "bo");
        assert!(!RuleVersion::Rule1.rules().is_special(state.top_card().unwrap()));

        let mut expected = rustc_hash::FxHashMap::default();
        for card in &deal.full_deck {
            *expected.entry(*card).or_insert(0usize) += 1;
        }
        assert_eq!(state.card_census(), expected);
    }

    #[test]
    fn test_initialize_is_seed_deterministic() {
        let config = WhotConfig::new(RuleVersion::Rule2, 4);
        let a = initialize(&["a", "b", "c"], &config, &mut GameRng::new(9)).unwrap();
        let b = initialize(&["a", "b", "c"], &config, &mut GameRng::new(9)).unwrap();
        assert_eq!(a.state, b.state);
        assert_eq!(a.full_deck.len(), 49);
    }

    #[test]
    fn test_initialize_rejects_bad_tables() {
        let mut rng = GameRng::new(1);
        assert!(matches!(
            initialize(&["solo"], &WhotConfig::default(), &mut rng),
            Err(RulesError::InvalidPlayerCount { count: 1 })
        ));
        assert!(matches!(
            initialize(&["a", "b"], &WhotConfig::new(RuleVersion::Rule1, 30), &mut rng),
            Err(RulesError::DeckTooSmall { .. })
        ));
    }

    #[test]
    fn test_initialize_rejects_huge_hand_size() {
        let config = WhotConfig::new(RuleVersion::Rule1, usize::MAX / 2 + 1);
        assert!(matches!(
            initialize(&["a", "b"], &config, &mut GameRng::new(1)),
            Err(RulesError::DeckTooSmall { requested: usize::MAX, .. })
        ));
    }

    #[test]
    fn test_normal_card_passes_turn() {
        let state = WhotState::from_parts(
            vec![vec![c(Suit::Circle, 3), c(Suit::Star, 4)], vec![c(Suit::Cross, 7)]],
            vec![c(Suit::Square, 10)],
            vec![c(Suit::Circle, 7)],
            RuleVersion::Rule1,
        );
        let next = play_card(&state, p(0), c(Suit::Circle, 3)).unwrap();
        assert_eq!(next.current_player, p(1));
        assert_eq!(next.top_card(), Some(&c(Suit::Circle, 3)));
        assert_eq!(next.pending_action, None);
        // Input untouched
        assert_eq!(state.hand(p(0)).len(), 2);
    }

    #[test]
    fn test_play_errors() {
        let state = WhotState::from_parts(
            vec![vec![c(Suit::Circle, 3), c(Suit::Star, 4)], vec![c(Suit::Cross, 7)]],
            vec![],
            vec![c(Suit::Circle, 7)],
            RuleVersion::Rule1,
        );
        assert!(matches!(
            play_card(&state, p(1), c(Suit::Cross, 7)),
            Err(RulesError::NotYourTurn { .. })
        ));
        assert!(matches!(
            play_card(&state, p(0), c(Suit::Star, 4)),
            Err(RulesError::IllegalCard { .. })
        ));
        assert!(matches!(
            play_card(&state, p(0), c(Suit::Cross, 7)),
            Err(RulesError::CardNotInHand { .. })
        ));
    }

    #[test]
    fn test_hold_keeps_player_in_continue() {
        let state = WhotState::from_parts(
            vec![vec![c(Suit::Circle, 1), c(Suit::Circle, 11), c(Suit::Star, 3)], vec![c(Suit::Cross, 7)]],
            vec![],
            vec![c(Suit::Circle, 7)],
            RuleVersion::Rule1,
        );
        let held = play_card(&state, p(0), c(Suit::Circle, 1)).unwrap();
        assert_eq!(held.current_player, p(0));
        assert_eq!(held.pending_action, Some(PendingAction::Continue { player: p(0) }));
        assert_eq!(legal_cards(&held, p(0)), vec![c(Suit::Circle, 11)]);

        let done = play_card(&held, p(0), c(Suit::Circle, 11)).unwrap();
        assert_eq!(done.current_player, p(1));
        assert_eq!(done.pending_action, None);
        assert_eq!(done.last_played_card, None);
    }

    #[test]
    fn test_suspend_keeps_player_in_continue() {
        let state = WhotState::from_parts(
            vec![
                vec![c(Suit::Circle, 8), c(Suit::Star, 3), c(Suit::Circle, 11), Card::wild()],
                vec![c(Suit::Cross, 7)],
            ],
            vec![c(Suit::Square, 10)],
            vec![c(Suit::Circle, 7)],
            RuleVersion::Rule1,
        );
        let suspended = play_card(&state, p(0), c(Suit::Circle, 8)).unwrap();
        assert_eq!(suspended.current_player, p(0));
        assert_eq!(suspended.pending_action, Some(PendingAction::Continue { player: p(0) }));
        assert_eq!(suspended.last_played_card, Some(c(Suit::Circle, 8)));
        assert_eq!(legal_cards(&suspended, p(0)), vec![c(Suit::Circle, 11), Card::wild()]);
        assert!(matches!(
            play_card(&suspended, p(0), c(Suit::Star, 3)),
            Err(RulesError::IllegalCard { .. })
        ));
        assert!(matches!(
            play_card(&suspended, p(1), c(Suit::Cross, 7)),
            Err(RulesError::NotYourTurn { .. })
        ));
    }

    #[test]
    fn test_general_market_forces_one_draw_then_returns() {
        let state = WhotState::from_parts(
            vec![vec![c(Suit::Star, 14), c(Suit::Star, 2)], vec![c(Suit::Cross, 7)]],
            vec![c(Suit::Square, 10), c(Suit::Square, 11)],
            vec![c(Suit::Star, 7)],
            RuleVersion::Rule1,
        );
        let next = play_card(&state, p(0), c(Suit::Star, 14)).unwrap();
        assert_eq!(
            next.pending_action,
            Some(PendingAction::Draw { player: p(1), count: 1, return_turn_to: p(0) })
        );
        assert!(matches!(play_card(&next, p(1), c(Suit::Cross, 7)), Err(RulesError::AwaitingForcedDraw)));

        let (after, drawn) = execute_forced_draw(&next).unwrap();
        assert_eq!(drawn, Some(c(Suit::Square, 10)));
        assert_eq!(after.pending_action, None);
        assert_eq!(after.current_player, p(0));
        assert_eq!(after.hand(p(1)).len(), 2);
    }

    #[test]
    fn test_pick_as_forced_draw_target_steps_once() {
        let mut state = WhotState::from_parts(
            vec![vec![c(Suit::Star, 2)], vec![c(Suit::Cross, 7)]],
            vec![c(Suit::Square, 10), c(Suit::Square, 11)],
            vec![c(Suit::Star, 14)],
            RuleVersion::Rule1,
        );
        state.pending_action = Some(PendingAction::Draw { player: p(1), count: 2, return_turn_to: p(0) });
        state.current_player = p(1);

        let (next, drawn) = pick_card(&state, p(1)).unwrap();
        assert_eq!(drawn.len(), 1);
        assert_eq!(
            next.pending_action,
            Some(PendingAction::Draw { player: p(1), count: 1, return_turn_to: p(0) })
        );
        assert!(matches!(pick_card(&state, p(0)), Err(RulesError::AwaitingForcedDraw)));
    }

    #[test]
    fn test_wild_then_call_suit_passes() {
        let state = WhotState::from_parts(
            vec![vec![Card::wild(), c(Suit::Star, 4)], vec![c(Suit::Cross, 7)]],
            vec![],
            vec![c(Suit::Circle, 7)],
            RuleVersion::Rule1,
        );
        let wild = play_card(&state, p(0), Card::wild()).unwrap();
        assert_eq!(
            wild.pending_action,
            Some(PendingAction::CallSuit { player: p(0), next_action: NextAction::Pass })
        );
        assert!(matches!(pick_card(&wild, p(0)), Err(RulesError::AwaitingSuitCall)));
        assert!(matches!(
            call_suit(&wild, p(1), Suit::Cross),
            Err(RulesError::NoSuitCallPending { .. })
        ));
        assert!(matches!(
            call_suit(&wild, p(0), Suit::Whot),
            Err(RulesError::InvalidSuitCall { .. })
        ));

        let called = call_suit(&wild, p(0), Suit::Cross).unwrap();
        assert_eq!(called.called_suit, Some(Suit::Cross));
        assert_eq!(called.current_player, p(1));
        assert_eq!(called.pending_action, None);
    }

    #[test]
    fn test_call_suit_without_pending_is_error() {
        let state = WhotState::from_parts(vec![vec![c(Suit::Star, 4)], vec![]], vec![], vec![], RuleVersion::Rule1);
        assert!(matches!(
            call_suit(&state, p(0), Suit::Star),
            Err(RulesError::NoSuitCallPending { .. })
        ));
    }

    #[test]
    fn test_wild_escapes_defend_and_continues() {
        let mut state = WhotState::from_parts(
            vec![vec![c(Suit::Circle, 4)], vec![Card::wild(), c(Suit::Star, 3), c(Suit::Cross, 3)]],
            vec![c(Suit::Square, 10)],
            vec![c(Suit::Circle, 2)],
            RuleVersion::Rule1,
        );
        state.pending_pick = 2;
        state.current_player = p(1);
        state.pending_action = Some(PendingAction::Defend { player: p(1), count: 2, return_turn_to: p(0) });

        let wild = play_card(&state, p(1), Card::wild()).unwrap();
        assert_eq!(wild.pending_pick, 0);
        assert_eq!(
            wild.pending_action,
            Some(PendingAction::CallSuit { player: p(1), next_action: NextAction::Continue })
        );

        let called = call_suit(&wild, p(1), Suit::Star).unwrap();
        assert_eq!(called.pending_action, Some(PendingAction::Continue { player: p(1) }));
        assert_eq!(legal_cards(&called, p(1)), vec![c(Suit::Star, 3)]);
    }

    #[test]
    fn test_free_draw_ends_turn_and_empty_market_is_noop() {
        let state = WhotState::from_parts(
            vec![vec![c(Suit::Star, 4)], vec![c(Suit::Cross, 7)]],
            vec![c(Suit::Square, 10)],
            vec![c(Suit::Circle, 7)],
            RuleVersion::Rule1,
        );
        let (next, drawn) = pick_card(&state, p(0)).unwrap();
        assert_eq!(drawn, vec![c(Suit::Square, 10)]);
        assert_eq!(next.current_player, p(1));

        let (same, none) = pick_card(&next, p(1)).unwrap();
        assert!(none.is_empty());
        assert_eq!(same, next);
    }

    #[test]
    fn test_last_card_wins() {
        let state = WhotState::from_parts(
            vec![vec![c(Suit::Circle, 2)], vec![c(Suit::Cross, 7)]],
            vec![],
            vec![c(Suit::Circle, 7)],
            RuleVersion::Rule1,
        );
        let next = play_card(&state, p(0), c(Suit::Circle, 2)).unwrap();
        assert_eq!(next.winner, Some(p(0)));
        assert_eq!(next.pending_action, None);
        assert_eq!(check_winner(&next), Some(p(0)));
        assert!(matches!(pick_card(&next, p(1)), Err(RulesError::GameOver)));
        assert_eq!(WhotEngine.result(&next), Some(GameResult::Winner(p(0))));
    }

    #[test]
    fn test_blocked_table_is_a_draw() {
        let state = WhotState::from_parts(
            vec![vec![c(Suit::Star, 4)], vec![c(Suit::Cross, 7)]],
            vec![],
            vec![c(Suit::Circle, 7)],
            RuleVersion::Rule1,
        );
        assert!(WhotEngine.legal_moves(&state).is_empty());
        assert_eq!(WhotEngine.result(&state), Some(GameResult::Draw));
    }

    #[test]
    fn test_rule2_skip_and_must_play_normal() {
        let state = WhotState::from_parts(
            vec![
                vec![c(Suit::Cross, 1), c(Suit::Cross, 5)],
                vec![c(Suit::Cross, 3)],
                vec![c(Suit::Cross, 2), c(Suit::Cross, 7)],
            ],
            vec![],
            vec![c(Suit::Cross, 11)],
            RuleVersion::Rule2,
        );
        let skipped = play_card(&state, p(0), c(Suit::Cross, 1)).unwrap();
        assert_eq!(skipped.current_player, p(2));
        assert!(skipped.must_play_normal);
        assert_eq!(legal_cards(&skipped, p(2)), vec![c(Suit::Cross, 7)]);

        let next = play_card(&skipped, p(2), c(Suit::Cross, 7)).unwrap();
        assert!(!next.must_play_normal);
        assert_eq!(next.current_player, p(0));
    }

    #[test]
    fn test_rule2_pick_two_is_not_defendable() {
        let state = WhotState::from_parts(
            vec![vec![c(Suit::Star, 2), c(Suit::Star, 8)], vec![c(Suit::Circle, 2), c(Suit::Star, 7)]],
            vec![c(Suit::Square, 10), c(Suit::Square, 11), c(Suit::Square, 13)],
            vec![c(Suit::Star, 4)],
            RuleVersion::Rule2,
        );
        let next = play_card(&state, p(0), c(Suit::Star, 2)).unwrap();
        assert_eq!(next.pending_pick, 2);
        assert_eq!(next.current_player, p(1));
        assert_eq!(next.pending_action, None);
        assert!(legal_cards(&next, p(1)).is_empty());
        assert!(matches!(
            play_card(&next, p(1), c(Suit::Circle, 2)),
            Err(RulesError::PenaltyPending { .. })
        ));
        assert_eq!(WhotEngine.legal_moves(&next), vec![WhotMove::Pick]);

        let (after, drawn) = pick_card(&next, p(1)).unwrap();
        assert_eq!(drawn.len(), 2);
        assert_eq!(after.pending_pick, 0);
        assert_eq!(after.current_player, p(0));
        assert!(!after.must_play_normal);
    }

    #[test]
    fn test_rule2_general_market_everyone_draws() {
        let state = WhotState::from_parts(
            vec![vec![c(Suit::Star, 14), c(Suit::Star, 8)], vec![c(Suit::Circle, 3)], vec![c(Suit::Cross, 3)]],
            vec![c(Suit::Square, 10), c(Suit::Square, 11), c(Suit::Square, 13)],
            vec![c(Suit::Star, 4)],
            RuleVersion::Rule2,
        );
        let next = play_card(&state, p(0), c(Suit::Star, 14)).unwrap();
        assert_eq!(next.hand(p(1)).len(), 2);
        assert_eq!(next.hand(p(2)).len(), 2);
        assert_eq!(next.hand(p(0)).len(), 1);
        assert_eq!(next.market.len(), 1);
        assert_eq!(next.current_player, p(1));
        assert!(next.must_play_normal);
        assert_eq!(next.card_census(), state.card_census());
    }

    #[test]
    fn test_engine_moves_for_suit_call() {
        let state = WhotState::from_parts(
            vec![vec![Card::wild(), c(Suit::Star, 4)], vec![c(Suit::Cross, 7)]],
            vec![],
            vec![c(Suit::Circle, 7)],
            RuleVersion::Rule1,
        );
        let engine = WhotEngine;
        let wild = engine.apply_move(&state, &WhotMove::Play(Card::wild())).unwrap();
        let moves = engine.legal_moves(&wild);
        assert_eq!(moves.len(), 5);
        assert!(!moves.contains(&WhotMove::CallSuit(Suit::Whot)));
    }
}
