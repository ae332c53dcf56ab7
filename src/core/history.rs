//! Move history.
//!
//! Every applied move is appended to `GameState::history` as a
//! `MoveRecord`. Used for:
//! - Replay/debugging
//! - Move logs in the presentation layer
//! - Checking monotonicity in tests

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::token::{DiceValue, Position, TokenId};

/// One applied move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// The token that moved.
    pub token: TokenId,

    /// Dice value used.
    pub dice: DiceValue,

    pub from: Position,
    pub to: Position,

    /// Opponent tokens sent back to base by this move.
    pub captured: SmallVec<[TokenId; 4]>,

    /// Turn number when the move was made.
    pub turn: u32,

    /// Sequence number over the whole game (for ordering).
    pub sequence: u32,
}

impl MoveRecord {
    /// Distance travelled, or `None` for a move out of base.
    #[must_use]
    pub fn steps(&self) -> Option<u8> {
        if self.from.is_base() {
            None
        } else {
            Some((self.to.raw() - self.from.raw()) as u8)
        }
    }
}
