//! Cancellable auto-resolutions.
//!
//! An intent is issued with a ticket. The presentation waits for the
//! suggested delay and then hands the ticket back; if anything changed the
//! state in the meantime the ticket is stale and the call is rejected.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{Color, TokenId};

/// What the engine will do if the presentation lets the delay elapse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Intent {
    /// Unplayable non-6 roll: the turn passes to the next color.
    AutoPass { color: Color },
    /// Unplayable 6: the same color rolls again.
    AutoReroll { color: Color },
    /// Exactly one token can move: move it.
    AutoSelect { token: TokenId },
}

/// An intent together with its cancellation ticket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingIntent {
    pub ticket: u64,
    pub intent: Intent,
    /// Suggested display delay before resolving.
    pub delay: Duration,
}
