//! Core types shared by every game: players, RNG, configuration, errors.
//!
//! Nothing here knows the rules of a particular game. Games take their
//! configuration as plain data and report failures through `RulesError`.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;

pub use config::{BattleConfig, BonusRule, CaptureRule, LudoConfig, MancalaConfig, WhotConfig};
pub use error::RulesError;
pub use player::{PlayerId, PlayerMap};
pub use rng::{DiceSource, GameRng, GameRngState, ScriptedDice};
