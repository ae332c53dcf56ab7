//! Core types: colors, tokens, dice, state, history, configuration, errors.
//!
//! Everything here is plain data. Rules live in `rules`, the session object
//! in `engine`.

pub mod color;
pub mod token;
pub mod rng;
pub mod config;
pub mod error;
pub mod history;
pub mod state;

pub use color::{Color, ColorMap, COLOR_COUNT};
pub use token::{DiceValue, Position, TokenId, HOME_STRETCH_LENGTH, TOKENS_PER_PLAYER, TRACK_LENGTH};
pub use rng::{DiceSource, GameRng, GameRngState, ScriptedDice};
pub use config::{GameConfig, PlayerConfig, RulesConfig, StackingRule, MAX_PLAYERS, MIN_PLAYERS};
pub use error::{ConfigError, CreateGameError, RejectedInput, SnapshotError};
pub use history::MoveRecord;
pub use state::{GameState, Outcome, Phase, Player};
