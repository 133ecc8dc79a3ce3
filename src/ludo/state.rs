//! Ludo state: two players, four tokens each, up to two dice.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;

use crate::core::config::LudoConfig;
use crate::core::player::PlayerId;

/// Steps from path start to home. Landing exactly here finishes a token.
pub const FINISH: u8 = 58;

/// Cells on the ring every color shares.
pub const RING_CELLS: u8 = 52;

/// Last path position still on the shared ring; beyond it is the
/// private home column.
pub const LAST_RING_POSITION: u8 = 50;

pub const TOKENS_PER_PLAYER: usize = 4;

/// Token colors. Serialized lowercase; deserialized in any casing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LudoColor {
    Red,
    Green,
    Yellow,
    Blue,
}

impl LudoColor {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            LudoColor::Red => "red",
            LudoColor::Green => "green",
            LudoColor::Yellow => "yellow",
            LudoColor::Blue => "blue",
        }
    }

    /// Ring cell where this color's path starts.
    #[must_use]
    pub const fn start_offset(self) -> u8 {
        match self {
            LudoColor::Red => 0,
            LudoColor::Green => 13,
            LudoColor::Yellow => 26,
            LudoColor::Blue => 39,
        }
    }

    /// Absolute ring cell for a path position, or `None` in the home column.
    #[must_use]
    pub fn ring_cell(self, position: u8) -> Option<u8> {
        (position <= LAST_RING_POSITION).then(|| (self.start_offset() + position) % RING_CELLS)
    }
}

impl std::str::FromStr for LudoColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" => Ok(LudoColor::Red),
            "green" => Ok(LudoColor::Green),
            "yellow" => Ok(LudoColor::Yellow),
            "blue" => Ok(LudoColor::Blue),
            other => Err(format!("unknown ludo color `{other}`")),
        }
    }
}

impl Serialize for LudoColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LudoColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Where a token is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenPosition {
    /// Not yet entered.
    House,
    /// Steps along the owner's path, `0..FINISH`.
    Track(u8),
    Finished,
}

impl TokenPosition {
    /// Where `steps` would take this token, if anywhere.
    #[must_use]
    pub fn advanced_by(self, steps: u8) -> Option<TokenPosition> {
        match self {
            TokenPosition::House if steps == 6 => Some(TokenPosition::Track(0)),
            TokenPosition::House | TokenPosition::Finished => None,
            TokenPosition::Track(p) => match p.saturating_add(steps) {
                t if t < FINISH => Some(TokenPosition::Track(t)),
                FINISH => Some(TokenPosition::Finished),
                _ => None,
            },
        }
    }
}

/// One die and whether it has been spent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Die {
    pub value: u8,
    pub used: bool,
}

impl Die {
    #[must_use]
    pub fn new(value: u8) -> Self {
        Self { value, used: false }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LudoPlayer {
    pub color: LudoColor,
    pub tokens: [TokenPosition; TOKENS_PER_PLAYER],
}

impl LudoPlayer {
    #[must_use]
    pub fn new(color: LudoColor) -> Self {
        Self {
            color,
            tokens: [TokenPosition::House; TOKENS_PER_PLAYER],
        }
    }

    #[must_use]
    pub fn all_finished(&self) -> bool {
        self.tokens.iter().all(|t| *t == TokenPosition::Finished)
    }
}

/// Immutable Ludo game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LudoState {
    pub players: [LudoPlayer; 2],

    /// Current roll; empty while waiting for a roll.
    pub dice: SmallVec<[Die; 2]>,

    pub current_player: PlayerId,

    pub waiting_for_roll: bool,

    pub winner: Option<PlayerId>,

    pub config: LudoConfig,
}

impl LudoState {
    pub(crate) fn new(a: LudoColor, b: LudoColor, config: LudoConfig) -> Self {
        Self {
            players: [LudoPlayer::new(a), LudoPlayer::new(b)],
            dice: SmallVec::new(),
            current_player: PlayerId::new(0),
            waiting_for_roll: true,
            winner: None,
            config,
        }
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &LudoPlayer {
        &self.players[id.index() & 1]
    }

    pub(crate) fn player_mut(&mut self, id: PlayerId) -> &mut LudoPlayer {
        &mut self.players[id.index() & 1]
    }

    /// Place a player's tokens directly, e.g. to set up a position.
    #[must_use]
    pub fn with_tokens(mut self, id: PlayerId, tokens: [TokenPosition; TOKENS_PER_PLAYER]) -> Self {
        self.player_mut(id).tokens = tokens;
        self
    }

    #[must_use]
    pub fn unused_dice(&self) -> impl Iterator<Item = (usize, &Die)> {
        self.dice.iter().enumerate().filter(|(_, d)| !d.used)
    }
}
