//! Error types.
//!
//! The rule system is closed, so the taxonomy is small:
//! - `CreateGameError`: a table that cannot be played
//! - `RejectedInput`: an operation attempted in the wrong phase or with an
//!   illegal argument; state is left unchanged
//! - `ConfigError`: configuration that failed to parse or validate
//! - `SnapshotError`: a deserialized `GameState` that is not self-consistent

use thiserror::Error;

use super::color::Color;
use super::state::Phase;
use super::token::TokenId;

/// Reasons a game cannot be created.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CreateGameError {
    #[error("a game needs 2 to 4 players, got {count}")]
    PlayerCount { count: usize },

    #[error("color {color} is assigned to more than one player")]
    DuplicateColor { color: Color },
}

/// An engine operation that was ignored because its preconditions failed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RejectedInput {
    #[error("the game is over")]
    GameOver,

    #[error("not waiting for a dice roll")]
    NotAwaitingRoll,

    #[error("not waiting for a token selection")]
    NotAwaitingSelection,

    #[error("token index {index} is out of range")]
    NoSuchToken { index: usize },

    #[error("{token} cannot move this turn")]
    IllegalToken { token: TokenId },

    #[error("no auto-resolve intent is pending")]
    NoPendingIntent,

    #[error("intent ticket {ticket} is stale")]
    StaleIntent { ticket: u64 },
}

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] CreateGameError),
}

/// Reasons a deserialized game snapshot is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error(transparent)]
    Table(#[from] CreateGameError),

    #[error("active seat {seat} is out of range for {players} players")]
    ActiveSeat { seat: usize, players: usize },

    #[error("{color} is marked {marked} but has {finished} tokens finished")]
    Outcome {
        color: Color,
        marked: &'static str,
        finished: usize,
    },

    #[error("{count} players are marked as winners")]
    Winners { count: usize },

    #[error("recorded winner {recorded:?} does not match the board")]
    Winner { recorded: Option<Color> },

    #[error("phase {phase:?} is inconsistent with the pending roll and legal tokens")]
    Phase { phase: Phase },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            CreateGameError::PlayerCount { count: 5 }.to_string(),
            "a game needs 2 to 4 players, got 5"
        );
        assert_eq!(
            RejectedInput::IllegalToken {
                token: TokenId::new(Color::Green, 1)
            }
            .to_string(),
            "Green#1 cannot move this turn"
        );
    }
}
