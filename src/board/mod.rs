//! Board topology: where logical positions land on the physical board.
//!
//! The board is pure data computed once per process. Each color walks the
//! same 52-cell circular track from its own entry offset, then turns into a
//! private home stretch no opponent can reach. A fixed set of track cells is
//! safe from capture.

pub mod topology;

pub use topology::{AbsoluteCell, BoardTopology, Cell, ARM_SPACING, BOARD_CELLS, SAFE_CELLS};
