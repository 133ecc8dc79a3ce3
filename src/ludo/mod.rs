//! Two-player Ludo.
//!
//! - Roll two dice; each die moves one token on its own
//! - A six brings a token out of the house onto path position 0
//! - Exactly 58 steps takes a token home; first with four home wins
//! - Double six earns another roll (configurable)

mod engine;
mod state;

pub use engine::{
    apply_move, get_valid_moves, initialize, initialize_with, pass_turn, roll_dice, roll_dice_with, LudoEngine,
    LudoMove, MoveAction,
};
pub use state::{Die, LudoColor, LudoPlayer, LudoState, TokenPosition, FINISH, LAST_RING_POSITION, RING_CELLS};
