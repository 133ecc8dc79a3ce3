//! # parlor-rules
//!
//! Rule engines for three turn-based table games: two-row Mancala,
//! two-player Ludo and the Whot card game (two rule variants).
//!
//! ## Design Principles
//!
//! 1. **States are values**: every transition takes a state and returns a
//!    new one. Persistent `im` vectors keep those copies cheap.
//!
//! 2. **Injected randomness**: shuffles and dice go through `GameRng` or a
//!    `DiceSource`, so every game replays from a seed or a script.
//!
//! 3. **One error policy per engine**: Mancala and Ludo ignore illegal
//!    input and hand the state back unchanged; Whot returns a
//!    `RulesError`. Through the `RulesEngine` trait all three report
//!    illegal moves as errors.
//!
//! ## Modules
//!
//! - `core`: players, RNG, configuration, errors
//! - `rules`: `RulesEngine` trait shared by the games
//! - `mancala`: sowing and capture
//! - `ludo`: dice, tokens, bonus turns
//! - `whot`: deck, pending actions, rule variants
//! - `modes`: battle (stake) and online wrappers
//! - `opponent`: computer opponents over the legal-move set

pub mod core;
pub mod ludo;
pub mod mancala;
pub mod modes;
pub mod opponent;
pub mod rules;
pub mod whot;

// Re-export commonly used types
pub use crate::core::{
    BattleConfig, BonusRule, CaptureRule, DiceSource, GameRng, GameRngState, LudoConfig, MancalaConfig, PlayerId,
    PlayerMap, RulesError, ScriptedDice, WhotConfig,
};

pub use crate::rules::{GameResult, RulesEngine};

pub use crate::ludo::{LudoEngine, LudoMove, LudoState};
pub use crate::mancala::{MancalaEngine, MancalaState};
pub use crate::whot::{Card, RuleVersion, Suit, WhotEngine, WhotMove, WhotState};

pub use crate::modes::{BattleSession, OnlineSession};
pub use crate::opponent::{FirstLegalOpponent, OpponentPolicy, UniformOpponent};
