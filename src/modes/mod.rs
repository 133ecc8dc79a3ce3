//! Play modes that wrap any [`RulesEngine`](crate::rules::RulesEngine).
//!
//! - `battle`: stakes escrowed up front, pot settled once on the outcome
//! - `online`: local move validation plus wholesale remote snapshots

pub mod battle;
pub mod online;

pub use battle::{is_eligible, BattleSession, Settlement};
pub use online::{decode_snapshot, OnlineSession, Snapshot};
