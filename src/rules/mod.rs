//! Rules engine trait shared by the games.
//!
//! Every game implements `RulesEngine` to define:
//! - Legal moves for the awaited player
//! - How moves produce the next state
//! - Win/draw conditions
//!
//! Play modes and opponents are generic over this trait and never
//! interpret game-specific concepts directly.

pub mod engine;

pub use engine::{GameResult, RulesEngine};
