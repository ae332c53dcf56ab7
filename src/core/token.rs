//! Token identity, logical positions and dice values.
//!
//! ## Position Layout
//!
//! Positions are counted in the owning color's frame of reference:
//! - `-1`: in base (`Position::BASE`)
//! - `0..=50`: on the shared track, `0` is the color's entry square
//! - `51..=55`: the color's private home stretch
//! - `56`: finished (`Position::FINISHED`)
//!
//! ```
//! use ludo_engine::core::Position;
//!
//! assert!(Position::BASE < Position::START);
//! assert!(Position::new(50).is_on_track());
//! assert!(Position::HOME_ENTRY.is_in_home_stretch());
//! assert_eq!(Position::new(48).advanced_by(5), Some(Position::new(53)));
//! assert_eq!(Position::new(54).advanced_by(3), None);
//! ```

use serde::{Deserialize, Serialize};

use super::color::Color;

/// Tokens owned by each player.
pub const TOKENS_PER_PLAYER: usize = 4;

/// Logical track squares a token walks before its home stretch.
pub const TRACK_LENGTH: i8 = 51;

/// Cells in the private home stretch, not counting the finish.
pub const HOME_STRETCH_LENGTH: i8 = 5;

/// A token's logical position in its own color's frame.
///
/// Ordering follows progress: `BASE < track < home stretch < FINISHED`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub struct Position(i8);

impl Position {
    /// Not yet in play.
    pub const BASE: Position = Position(-1);
    /// The color's entry square.
    pub const START: Position = Position(0);
    /// First home-stretch cell.
    pub const HOME_ENTRY: Position = Position(TRACK_LENGTH);
    /// Course completed.
    pub const FINISHED: Position = Position(TRACK_LENGTH + HOME_STRETCH_LENGTH);

    /// Create a position from its raw value.
    ///
    /// # Panics
    ///
    /// Panics if `raw` is outside `-1..=56`.
    #[must_use]
    pub const fn new(raw: i8) -> Self {
        assert!(
            raw >= Self::BASE.0 && raw <= Self::FINISHED.0,
            "position out of range"
        );
        Self(raw)
    }

    /// Get the raw value.
    #[must_use]
    pub const fn raw(self) -> i8 {
        self.0
    }

    #[must_use]
    pub const fn is_base(self) -> bool {
        self.0 == Self::BASE.0
    }

    #[must_use]
    pub const fn is_finished(self) -> bool {
        self.0 == Self::FINISHED.0
    }

    /// On the shared track (`0..=50`), where captures can happen.
    #[must_use]
    pub const fn is_on_track(self) -> bool {
        self.0 >= 0 && self.0 < TRACK_LENGTH
    }

    /// In the private home stretch (`51..=55`).
    #[must_use]
    pub const fn is_in_home_stretch(self) -> bool {
        self.0 >= Self::HOME_ENTRY.0 && self.0 < Self::FINISHED.0
    }

    /// Offset into the home stretch, `0` being the first cell.
    ///
    /// Returns `None` unless the position is in the home stretch.
    #[must_use]
    pub const fn home_stretch_step(self) -> Option<u8> {
        if self.is_in_home_stretch() {
            Some((self.0 - Self::HOME_ENTRY.0) as u8)
        } else {
            None
        }
    }

    /// Advance an in-play token by `steps`.
    ///
    /// Track overflow past the last track square continues into the home
    /// stretch. Returns `None` for tokens in base or finished, and for
    /// moves that would overshoot the finish.
    #[must_use]
    pub fn advanced_by(self, steps: u8) -> Option<Position> {
        if self.is_base() || self.is_finished() {
            return None;
        }
        let target = i16::from(self.0) + i16::from(steps);
        if target > i16::from(Self::FINISHED.0) {
            return None;
        }
        Some(Position(target as i8))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_base() {
            f.write_str("base")
        } else if self.is_finished() {
            f.write_str("finished")
        } else if let Some(step) = self.home_stretch_step() {
            write!(f, "home+{step}")
        } else {
            write!(f, "track {}", self.0)
        }
    }
}

impl TryFrom<i8> for Position {
    type Error = String;

    fn try_from(raw: i8) -> Result<Self, Self::Error> {
        if (Self::BASE.0..=Self::FINISHED.0).contains(&raw) {
            Ok(Self(raw))
        } else {
            Err(format!("position out of range: {raw}"))
        }
    }
}

impl From<Position> for i8 {
    fn from(position: Position) -> Self {
        position.0
    }
}

/// Explicit token identity: owning color plus slot index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawTokenId")]
pub struct TokenId {
    pub color: Color,
    pub index: u8,
}

#[derive(Deserialize)]
struct RawTokenId {
    color: Color,
    index: u8,
}

impl TryFrom<RawTokenId> for TokenId {
    type Error = String;

    fn try_from(raw: RawTokenId) -> Result<Self, Self::Error> {
        if (raw.index as usize) < TOKENS_PER_PLAYER {
            Ok(Self {
                color: raw.color,
                index: raw.index,
            })
        } else {
            Err(format!("token index out of range: {}", raw.index))
        }
    }
}

impl TokenId {
    /// # Panics
    ///
    /// Panics if `index >= 4`.
    #[must_use]
    pub fn new(color: Color, index: usize) -> Self {
        assert!(index < TOKENS_PER_PLAYER, "token index out of range: {index}");
        Self {
            color,
            index: index as u8,
        }
    }

    /// Slot index as `usize` for array access.
    #[must_use]
    pub const fn slot(self) -> usize {
        self.index as usize
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.color, self.index)
    }
}

/// A single die face, always in `1..=6`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DiceValue(u8);

impl DiceValue {
    /// The value that unlocks base tokens and grants an extra turn.
    pub const SIX: DiceValue = DiceValue(6);

    /// Create a dice value, or `None` if outside `1..=6`.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= 1 && value <= 6 {
            Some(Self(value))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn is_six(self) -> bool {
        self.0 == 6
    }
}

impl TryFrom<u8> for DiceValue {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        DiceValue::new(value).ok_or_else(|| format!("dice value out of range: {value}"))
    }
}

impl From<DiceValue> for u8 {
    fn from(value: DiceValue) -> Self {
        value.0
    }
}

impl std::fmt::Display for DiceValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
