//! Game event types.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::AbsoluteCell;
use crate::core::{Color, DiceValue, Position, TokenId};

/// Why the active color keeps the turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtraTurnReason {
    RolledSix,
    Capture,
    TokenHome,
}

/// Something that happened during a transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameEvent {
    /// The active color rolled; `legal` lists movable token slots.
    DiceRolled {
        color: Color,
        value: DiceValue,
        legal: SmallVec<[u8; 4]>,
    },

    /// The roll left nothing to move.
    NoLegalMoves { color: Color, value: DiceValue },

    TokenMoved {
        token: TokenId,
        from: Position,
        to: Position,
    },

    /// `token` was sent back to base by `by` on `cell`.
    TokenCaptured {
        token: TokenId,
        by: TokenId,
        cell: AbsoluteCell,
    },

    /// A token reached the finish.
    TokenHome { token: TokenId },

    ExtraTurn { color: Color, reason: ExtraTurnReason },

    TurnPassed { from: Color, to: Color },

    Victory { color: Color },
}

impl GameEvent {
    /// The color this event concerns most directly.
    #[must_use]
    pub fn color(&self) -> Color {
        match self {
            GameEvent::DiceRolled { color, .. }
            | GameEvent::NoLegalMoves { color, .. }
            | GameEvent::ExtraTurn { color, .. }
            | GameEvent::Victory { color } => *color,
            GameEvent::TokenMoved { token, .. }
            | GameEvent::TokenCaptured { token, .. }
            | GameEvent::TokenHome { token } => token.color,
            GameEvent::TurnPassed { from, .. } => *from,
        }
    }

    /// Check if this is a capture notification.
    #[must_use]
    pub fn is_capture(&self) -> bool {
        matches!(self, GameEvent::TokenCaptured { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_color() {
        let capture = GameEvent::TokenCaptured {
            token: TokenId::new(Color::Blue, 2),
            by: TokenId::new(Color::Red, 0),
            cell: AbsoluteCell::new(5),
        };
        assert_eq!(capture.color(), Color::Blue);
        assert!(capture.is_capture());

        let passed = GameEvent::TurnPassed {
            from: Color::Green,
            to: Color::Yellow,
        };
        assert_eq!(passed.color(), Color::Green);
        assert!(!passed.is_capture());
    }

    #[test]
    fn test_event_serialization_is_tagged() {
        let event = GameEvent::ExtraTurn {
            color: Color::Red,
            reason: ExtraTurnReason::RolledSix,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"], "extra_turn");
        assert_eq!(json["reason"], "rolled_six");

        let back: GameEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }
}
