//! Two-row Mancala (Ayo/Oware family).
//!
//! - Pick a non-empty pit in your row and sow its seeds one per pit
//! - Land in an opponent pit that now holds a capturing count to take it,
//!   then keep taking backward while the rule holds
//! - The game ends when a row runs dry or a clock hits zero

mod board;
mod engine;

pub use board::MancalaState;
pub use engine::{apply_move, initialize, initialize_with, legal_moves, result, tick, MancalaEngine};
