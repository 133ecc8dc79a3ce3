//! Engine configuration.
//!
//! Each game is configured with plain data handed to its `initialize`
//! function:
//! - `MancalaConfig`: board size, seeds, capture rule, clock
//! - `LudoConfig`: bonus-turn policy, optional capture-on-landing
//! - `WhotConfig`: rule version, hand size, wild card count
//! - `BattleConfig`: stake for battle mode
//!
//! All configs deserialize with defaults for missing fields, so a partial
//! JSON document from a settings screen is enough.

use serde::{Deserialize, Serialize};

use super::error::RulesError;
use crate::whot::RuleVersion;

/// Which landing counts capture an opponent pit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureRule {
    /// Any even count (2, 4, ...).
    #[default]
    Even,
    /// Exactly 2 or 3 (Oware/Ayo).
    TwoOrThree,
}

impl CaptureRule {
    /// Does a pit holding `count` seeds after the landing get captured?
    #[must_use]
    pub fn captures(self, count: u32) -> bool {
        match self {
            CaptureRule::Even => count > 0 && count % 2 == 0,
            CaptureRule::TwoOrThree => count == 2 || count == 3,
        }
    }
}

/// Mancala board configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MancalaConfig {
    /// Pits in each player's row.
    pub pits_per_side: usize,

    /// Seeds in every pit at the start.
    pub seeds_per_pit: u32,

    pub capture: CaptureRule,

    /// Per-player countdown in seconds.
    pub turn_timer_secs: u32,
}

impl Default for MancalaConfig {
    fn default() -> Self {
        Self {
            pits_per_side: 6,
            seeds_per_pit: 4,
            capture: CaptureRule::Even,
            turn_timer_secs: 300,
        }
    }
}

impl MancalaConfig {
    /// Most seeds a board may start with, both rows together.
    pub const MAX_TOTAL_SEEDS: u32 = 10_000;

    #[must_use]
    pub fn with_pits_per_side(mut self, pits: usize) -> Self {
        self.pits_per_side = pits;
        self
    }

    #[must_use]
    pub fn with_seeds_per_pit(mut self, seeds: u32) -> Self {
        self.seeds_per_pit = seeds;
        self
    }

    #[must_use]
    pub fn with_capture(mut self, capture: CaptureRule) -> Self {
        self.capture = capture;
        self
    }

    #[must_use]
    pub fn with_timer(mut self, secs: u32) -> Self {
        self.turn_timer_secs = secs;
        self
    }

    pub fn validate(&self) -> Result<(), RulesError> {
        if self.pits_per_side == 0 || self.pits_per_side > 64 {
            return Err(RulesError::InvalidConfig(format!(
                "pits_per_side must be 1..=64, got {}",
                self.pits_per_side
            )));
        }
        if self.seeds_per_pit == 0 {
            return Err(RulesError::InvalidConfig("seeds_per_pit must be positive".into()));
        }
        let total = u32::try_from(self.pits_per_side * 2)
            .ok()
            .and_then(|pits| pits.checked_mul(self.seeds_per_pit))
            .filter(|&total| total <= Self::MAX_TOTAL_SEEDS);
        if total.is_none() {
            return Err(RulesError::InvalidConfig(format!(
                "{} pits of {} seeds exceeds {} seeds",
                self.pits_per_side * 2,
                self.seeds_per_pit,
                Self::MAX_TOTAL_SEEDS
            )));
        }
        Ok(())
    }
}

/// When a player who used up both dice rolls again.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusRule {
    /// Only a double six grants another roll.
    #[default]
    DoubleSixOnly,
    /// Traditional: any double grants another roll.
    AnyDouble,
}

/// Ludo configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LudoConfig {
    pub bonus: BonusRule,

    /// Send an opposing token home when landing on its ring cell.
    pub capture_on_landing: bool,
}

impl LudoConfig {
    #[must_use]
    pub fn with_bonus(mut self, bonus: BonusRule) -> Self {
        self.bonus = bonus;
        self
    }

    #[must_use]
    pub fn with_capture_on_landing(mut self) -> Self {
        self.capture_on_landing = true;
        self
    }
}

/// Whot configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WhotConfig {
    pub rule_version: RuleVersion,

    /// Cards dealt to each player.
    pub hand_size: usize,

    /// Override the number of wild cards (5 for rule1, 0 for rule2).
    pub wild_cards: Option<usize>,
}

impl Default for WhotConfig {
    fn default() -> Self {
        Self {
            rule_version: RuleVersion::Rule1,
            hand_size: 6,
            wild_cards: None,
        }
    }
}

impl WhotConfig {
    #[must_use]
    pub fn new(rule_version: RuleVersion, hand_size: usize) -> Self {
        Self {
            rule_version,
            hand_size,
            wild_cards: None,
        }
    }

    #[must_use]
    pub fn with_wild_cards(mut self, count: usize) -> Self {
        self.wild_cards = Some(count);
        self
    }

    /// Wild cards actually put in the deck.
    #[must_use]
    pub fn wild_card_count(&self) -> usize {
        self.wild_cards.unwrap_or(match self.rule_version {
            RuleVersion::Rule1 => 5,
            RuleVersion::Rule2 => 0,
        })
    }
}

/// Battle (stake) mode configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Coins each player puts into the pot.
    pub stake: u64,
}

impl BattleConfig {
    #[must_use]
    pub fn new(stake: u64) -> Self {
        Self { stake }
    }
}
