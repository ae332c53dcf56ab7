//! Game session: the stateful wrapper around the pure rules.
//!
//! `TurnEngine` owns one game's current `GameState`, its dice source and
//! the pending auto-resolve intent. Presentation layers talk only to this
//! type: they roll, select tokens, hand back intent tickets, and read
//! snapshots.

pub mod turn;

pub use turn::{Step, TurnEngine};
