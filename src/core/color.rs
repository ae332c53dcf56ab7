//! Player colors and per-color data storage.
//!
//! ## Color
//!
//! The four seat colors of the board. The set is fixed regardless of how
//! many people are playing; unused colors simply have no player.
//!
//! ## ColorMap
//!
//! Per-color storage backed by a `[T; 4]` for O(1) access.
//! Supports iteration and indexing by `Color`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Number of colors on the board.
pub const COLOR_COUNT: usize = 4;

/// One of the four board colors.
///
/// Declaration order matches the clockwise order of the arms, so
/// `Color::index() * 13` is the color's entry offset on the shared track.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    /// All colors in board order.
    pub const ALL: [Color; COLOR_COUNT] = [Color::Red, Color::Green, Color::Yellow, Color::Blue];

    /// Get the 0-based board index of this color.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Get a color by board index.
    ///
    /// Returns `None` for indices outside `0..4`.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Color> {
        match index {
            0 => Some(Color::Red),
            1 => Some(Color::Green),
            2 => Some(Color::Yellow),
            3 => Some(Color::Blue),
            _ => None,
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Color::Red => "Red",
            Color::Green => "Green",
            Color::Yellow => "Yellow",
            Color::Blue => "Blue",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-color data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use ludo_engine::core::{Color, ColorMap};
///
/// let mut starts: ColorMap<usize> = ColorMap::new(|c| c.index() * 13);
/// assert_eq!(starts[Color::Yellow], 26);
///
/// starts[Color::Blue] = 0;
/// assert_eq!(starts[Color::Blue], 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorMap<T> {
    data: [T; COLOR_COUNT],
}

impl<T> ColorMap<T> {
    /// Create a new ColorMap with values from a factory function.
    pub fn new(factory: impl Fn(Color) -> T) -> Self {
        Self {
            data: Color::ALL.map(factory),
        }
    }

    /// Create a new ColorMap with all entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Create a new ColorMap with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    /// Get a reference to a color's data.
    #[must_use]
    pub fn get(&self, color: Color) -> &T {
        &self.data[color.index()]
    }

    /// Get a mutable reference to a color's data.
    pub fn get_mut(&mut self, color: Color) -> &mut T {
        &mut self.data[color.index()]
    }

    /// Iterate over (Color, &T) pairs in board order.
    pub fn iter(&self) -> impl Iterator<Item = (Color, &T)> {
        Color::ALL.into_iter().zip(self.data.iter())
    }
}

impl<T> Index<Color> for ColorMap<T> {
    type Output = T;

    fn index(&self, color: Color) -> &Self::Output {
        self.get(color)
    }
}

impl<T> IndexMut<Color> for ColorMap<T> {
    fn index_mut(&mut self, color: Color) -> &mut Self::Output {
        self.get_mut(color)
    }
}
