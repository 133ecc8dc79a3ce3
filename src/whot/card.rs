//! Whot cards and deck composition.
//!
//! Five shape suits with fixed number tables, plus wild "whot" cards that
//! always carry the number 20.

use serde::{Deserialize, Serialize};

/// Card suit. Serialized lowercase; deserialized in any casing so states
/// coming back from a remote peer normalize on the way in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum Suit {
    Circle,
    Triangle,
    Cross,
    Square,
    Star,
    /// Wild marker.
    Whot,
}

impl Suit {
    /// Suits a player may name after a wild card.
    pub const CALLABLE: [Suit; 5] = [Suit::Circle, Suit::Triangle, Suit::Cross, Suit::Square, Suit::Star];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Suit::Circle => "circle",
            Suit::Triangle => "triangle",
            Suit::Cross => "cross",
            Suit::Square => "square",
            Suit::Star => "star",
            Suit::Whot => "whot",
        }
    }
}

impl From<Suit> for &'static str {
    fn from(suit: Suit) -> Self {
        suit.as_str()
    }
}

impl TryFrom<String> for Suit {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl std::str::FromStr for Suit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "circle" => Ok(Suit::Circle),
            "triangle" => Ok(Suit::Triangle),
            "cross" => Ok(Suit::Cross),
            "square" => Ok(Suit::Square),
            "star" => Ok(Suit::Star),
            "whot" => Ok(Suit::Whot),
            other => Err(format!("unknown suit `{other}`")),
        }
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numbers printed on each shape suit.
const DECK_TABLE: [(Suit, &[u8]); 5] = [
    (Suit::Circle, &[1, 2, 3, 4, 5, 7, 8, 10, 11, 12, 13, 14]),
    (Suit::Triangle, &[1, 2, 3, 4, 5, 7, 8, 10, 11, 12, 13, 14]),
    (Suit::Cross, &[1, 2, 3, 5, 7, 10, 11, 13, 14]),
    (Suit::Square, &[1, 2, 3, 5, 7, 10, 11, 13, 14]),
    (Suit::Star, &[1, 2, 3, 4, 5, 7, 8]),
];

/// A single card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub number: u8,
}

impl Card {
    pub const WILD_NUMBER: u8 = 20;

    #[must_use]
    pub const fn new(suit: Suit, number: u8) -> Self {
        Self { suit, number }
    }

    #[must_use]
    pub const fn wild() -> Self {
        Self::new(Suit::Whot, Self::WILD_NUMBER)
    }

    #[must_use]
    pub fn is_wild(&self) -> bool {
        self.suit == Suit::Whot || self.number == Self::WILD_NUMBER
    }

    /// Same suit or same number.
    #[must_use]
    pub fn matches(&self, other: &Card) -> bool {
        self.suit == other.suit || self.number == other.number
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.suit, self.number)
    }
}

/// The full unshuffled deck: every table entry plus `wild_cards` whot 20s.
#[must_use]
pub fn generate_deck(wild_cards: usize) -> Vec<Card> {
    DECK_TABLE
        .iter()
        .flat_map(|(suit, numbers)| numbers.iter().map(move |&n| Card::new(*suit, n)))
        .chain(std::iter::repeat(Card::wild()).take(wild_cards))
        .collect()
}
