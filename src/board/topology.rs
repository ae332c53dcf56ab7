//! Precomputed board layout.
//!
//! ## Layout
//!
//! - 52 absolute track cells, numbered clockwise from Red's entry square
//! - Entry offsets spaced 13 cells apart: Red 0, Green 13, Yellow 26, Blue 39
//! - Safe cells: every entry cell plus the cell 8 steps into each arm
//!
//! ```
//! use ludo_engine::board::{AbsoluteCell, BoardTopology, Cell};
//! use ludo_engine::core::{Color, Position};
//!
//! let board = BoardTopology::global();
//!
//! // Green's logical 0 is absolute 13; Blue's logical 20 wraps to 7.
//! assert_eq!(board.absolute_cell(Color::Green, Position::START), Some(AbsoluteCell::new(13)));
//! assert_eq!(board.absolute_cell(Color::Blue, Position::new(20)), Some(AbsoluteCell::new(7)));
//!
//! // Home stretch cells are private and always safe.
//! assert!(matches!(board.cell(Color::Red, Position::new(52)), Some(Cell::HomeStretch { .. })));
//! assert!(board.is_safe(Color::Red, Position::new(52)));
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::core::{Color, ColorMap, Position, TRACK_LENGTH};

/// Cells on the shared circular track.
pub const BOARD_CELLS: usize = 52;

/// Distance between consecutive colors' entry cells.
pub const ARM_SPACING: usize = 13;

/// Absolute indices of the safe cells.
pub const SAFE_CELLS: [u8; 8] = [0, 8, 13, 21, 26, 34, 39, 47];

static CLASSIC: Lazy<BoardTopology> = Lazy::new(BoardTopology::classic);

/// A physical cell on the shared track, independent of color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct AbsoluteCell(u8);

impl AbsoluteCell {
    /// # Panics
    ///
    /// Panics if `index >= 52`.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        assert!((index as usize) < BOARD_CELLS, "absolute cell out of range");
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<u8> for AbsoluteCell {
    type Error = String;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        if (index as usize) < BOARD_CELLS {
            Ok(Self(index))
        } else {
            Err(format!("absolute cell out of range: {index}"))
        }
    }
}

impl From<AbsoluteCell> for u8 {
    fn from(cell: AbsoluteCell) -> Self {
        cell.0
    }
}

impl std::fmt::Display for AbsoluteCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cell({})", self.0)
    }
}

/// Where a token in play physically stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Shared track; contested by all colors.
    Track(AbsoluteCell),
    /// Private home stretch, `step` in `0..5`.
    HomeStretch { color: Color, step: u8 },
    /// The color's finish.
    Finish(Color),
}

/// Immutable board layout shared by every game.
#[derive(Clone, Debug)]
pub struct BoardTopology {
    entry: ColorMap<AbsoluteCell>,
    /// `routes[color][p]` is the absolute cell of logical track position `p`.
    routes: ColorMap<[AbsoluteCell; TRACK_LENGTH as usize]>,
    safe: [bool; BOARD_CELLS],
}

impl BoardTopology {
    /// Build the standard four-arm layout.
    #[must_use]
    pub fn classic() -> Self {
        let entry = ColorMap::new(|color| AbsoluteCell((color.index() * ARM_SPACING) as u8));

        let routes = ColorMap::new(|color| {
            let start = entry[color].index();
            std::array::from_fn(|p| AbsoluteCell(((start + p) % BOARD_CELLS) as u8))
        });

        let mut safe = [false; BOARD_CELLS];
        for &cell in &SAFE_CELLS {
            safe[cell as usize] = true;
        }

        Self {
            entry,
            routes,
            safe,
        }
    }

    /// The process-wide classic board.
    #[must_use]
    pub fn global() -> &'static BoardTopology {
        &CLASSIC
    }

    /// A color's entry square.
    #[must_use]
    pub fn entry_cell(&self, color: Color) -> AbsoluteCell {
        self.entry[color]
    }

    /// Resolve a logical position to its physical cell.
    ///
    /// Returns `None` for tokens in base.
    #[must_use]
    pub fn cell(&self, color: Color, position: Position) -> Option<Cell> {
        if position.is_base() {
            None
        } else if position.is_finished() {
            Some(Cell::Finish(color))
        } else if let Some(step) = position.home_stretch_step() {
            Some(Cell::HomeStretch { color, step })
        } else {
            Some(Cell::Track(self.routes[color][position.raw() as usize]))
        }
    }

    /// Resolve a logical position to its shared-track cell.
    ///
    /// Returns `None` unless the position is on the track.
    #[must_use]
    pub fn absolute_cell(&self, color: Color, position: Position) -> Option<AbsoluteCell> {
        match self.cell(color, position) {
            Some(Cell::Track(cell)) => Some(cell),
            _ => None,
        }
    }

    /// Whether an absolute cell is protected from capture.
    #[must_use]
    pub fn is_safe_cell(&self, cell: AbsoluteCell) -> bool {
        self.safe[cell.index()]
    }

    /// Whether a token of `color` at `position` is protected from capture.
    ///
    /// Off-track positions (base, home stretch, finish) are always safe:
    /// opponents cannot reach them.
    #[must_use]
    pub fn is_safe(&self, color: Color, position: Position) -> bool {
        self.absolute_cell(color, position)
            .map_or(true, |cell| self.is_safe_cell(cell))
    }

    /// All safe cells in track order.
    pub fn safe_cells(&self) -> impl Iterator<Item = AbsoluteCell> + '_ {
        (0..BOARD_CELLS as u8)
            .map(AbsoluteCell)
            .filter(|&cell| self.is_safe_cell(cell))
    }
}

impl Default for BoardTopology {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_cell_serde_rejects_out_of_range() {
        assert!(serde_json::from_str::<AbsoluteCell>("52").is_err());
        assert!(serde_json::from_str::<AbsoluteCell>("200").is_err());

        let cell: AbsoluteCell = serde_json::from_str("51").unwrap();
        assert_eq!(cell, AbsoluteCell::new(51));
        assert_eq!(serde_json::to_string(&cell).unwrap(), "51");
        assert!(!BoardTopology::global().is_safe_cell(cell));
    }

    #[test]
    fn test_entry_offsets() {
        let board = BoardTopology::classic();
        assert_eq!(board.entry_cell(Color::Red), AbsoluteCell::new(0));
        assert_eq!(board.entry_cell(Color::Green), AbsoluteCell::new(13));
        assert_eq!(board.entry_cell(Color::Yellow), AbsoluteCell::new(26));
        assert_eq!(board.entry_cell(Color::Blue), AbsoluteCell::new(39));
    }

    #[test]
    fn test_route_rotation() {
        let board = BoardTopology::classic();
        for color in Color::ALL {
            for p in 0..TRACK_LENGTH {
                let expected = (color.index() * ARM_SPACING + p as usize) % BOARD_CELLS;
                assert_eq!(
                    board.absolute_cell(color, Position::new(p)),
                    Some(AbsoluteCell::new(expected as u8))
                );
            }
        }
    }

    #[test]
    fn test_last_track_square_precedes_entry() {
        // Each color stops one cell short of its own entry before turning home.
        let board = BoardTopology::classic();
        assert_eq!(board.absolute_cell(Color::Red, Position::new(50)), Some(AbsoluteCell::new(50)));
        assert_eq!(board.absolute_cell(Color::Green, Position::new(50)), Some(AbsoluteCell::new(11)));
    }

    #[test]
    fn test_off_track_cells() {
        let board = BoardTopology::classic();
        assert_eq!(board.cell(Color::Red, Position::BASE), None);
        assert_eq!(
            board.cell(Color::Yellow, Position::HOME_ENTRY),
            Some(Cell::HomeStretch { color: Color::Yellow, step: 0 })
        );
        assert_eq!(board.cell(Color::Blue, Position::FINISHED), Some(Cell::Finish(Color::Blue)));
        assert_eq!(board.absolute_cell(Color::Blue, Position::new(55)), None);
    }

    #[test]
    fn test_safe_cells() {
        let board = BoardTopology::classic();
        let safe: Vec<_> = board.safe_cells().map(AbsoluteCell::index).collect();
        assert_eq!(safe, vec![0, 8, 13, 21, 26, 34, 39, 47]);

        for color in Color::ALL {
            assert!(board.is_safe(color, Position::START));
            assert!(board.is_safe(color, Position::new(8)));
            assert!(!board.is_safe(color, Position::new(1)));
        }
    }

    #[test]
    fn test_home_stretch_always_safe() {
        let board = BoardTopology::classic();
        for color in Color::ALL {
            for p in Position::HOME_ENTRY.raw()..=Position::FINISHED.raw() {
                assert!(board.is_safe(color, Position::new(p)));
            }
        }
    }

    #[test]
    fn test_global_is_classic() {
        let global = BoardTopology::global();
        assert_eq!(global.entry_cell(Color::Blue), BoardTopology::classic().entry_cell(Color::Blue));
    }
}
