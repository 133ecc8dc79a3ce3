//! Whot, the shape-suited shedding game.
//!
//! Match the pile's top card by suit or number; first empty hand wins.
//! Two rule variants decide what the special numbers do:
//!
//! | Card | rule1                        | rule2                      |
//! |------|------------------------------|----------------------------|
//! | 1    | hold on, play again          | skip the next player       |
//! | 2    | pick two, defendable         | pick two, not defendable   |
//! | 5    | pick three, defendable       | normal                     |
//! | 8    | suspension, play again       | normal                     |
//! | 14   | next player draws one        | everyone else draws one    |
//! | 20   | wild, call a suit            | wild, call a suit          |
//!
//! Variant behavior lives in [`RuleSet`] tables; the transitions in this
//! module are shared.

mod card;
mod engine;
mod state;
mod variant;

pub use card::{generate_deck, Card, Suit};
pub use engine::{
    call_suit, check_winner, execute_forced_draw, initialize, legal_cards, pick_card, play_card, WhotDeal,
    WhotEngine, WhotMove,
};
pub use state::{NextAction, PendingAction, WhotPlayer, WhotState};
pub use variant::{EffectFn, RuleSet, RuleVersion, ValidityFn};
