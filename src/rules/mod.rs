//! Ludo rules as pure functions over `GameState` values.
//!
//! - `movement`: destinations and the legal-token set for a roll
//! - `capture`: which opponent tokens an arriving token sends home
//! - `transition`: the state machine steps (`roll`, `select`, `resolve`),
//!   plus `reconcile` for resuming a snapshot under given rules
//!
//! Transitions never mutate their input: they return a new state plus the
//! events produced. `engine::TurnEngine` holds the only mutable reference.

pub mod movement;
pub mod capture;
pub mod transition;

pub use movement::{destination, is_legal, legal_tokens};
pub use capture::{captures_for, would_capture};
pub use transition::{
    create_game, intent_for, reconcile, resolve, roll, select, MoveOutcome, Transition,
};
