//! # ludo-engine
//!
//! Rules engine for four-color Ludo: token movement, capture, safe squares,
//! turn rotation and win detection.
//!
//! ## Design Principles
//!
//! 1. **State as a value**: `GameState` is passed into and returned from pure
//!    transition functions. A session object holds the only mutable copy.
//!
//! 2. **Explicit identity**: tokens are `(color, index)` pairs everywhere,
//!    never bare indices.
//!
//! 3. **No hidden timers**: auto-pass and auto-select are emitted as
//!    cancellable intents; pacing belongs to the presentation layer.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) snapshots via `im-rs`; a move
//!   replaces only the player it touched.
//!
//! - **Pluggable dice**: `DiceSource` with a seeded ChaCha8 implementation
//!   and a scripted one for tests.
//!
//! ## Modules
//!
//! - `core`: colors, positions, tokens, dice, state, history, config, errors
//! - `board`: precomputed board topology and safe cells
//! - `rules`: legality, capture and the turn state machine
//! - `events`: notifications and auto-resolve intents
//! - `engine`: `TurnEngine`, one running game session

pub mod core;
pub mod board;
pub mod rules;
pub mod events;
pub mod engine;

// Re-export commonly used types
pub use crate::core::{
    Color, ColorMap,
    Position, TokenId, DiceValue,
    DiceSource, GameRng, GameRngState, ScriptedDice,
    GameConfig, PlayerConfig, RulesConfig, StackingRule,
    ConfigError, CreateGameError, RejectedInput, SnapshotError,
    MoveRecord,
    GameState, Outcome, Phase, Player,
};

pub use crate::board::{AbsoluteCell, BoardTopology, Cell};

pub use crate::rules::{MoveOutcome, Transition};

pub use crate::events::{ExtraTurnReason, GameEvent, Intent, PendingIntent};

pub use crate::engine::{Step, TurnEngine};
