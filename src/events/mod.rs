//! Notifications and intents emitted by the engine.
//!
//! Every transition returns the events it produced, in order, for the
//! presentation layer to display. Auto-resolutions (passing after an
//! unplayable roll, selecting a forced move) are not performed on a timer
//! inside the engine; they are issued as `Intent`s that the presentation
//! applies after its own display delay.

pub mod event;
pub mod intent;

pub use event::{ExtraTurnReason, GameEvent};
pub use intent::{Intent, PendingIntent};
