//! Game configuration types.
//!
//! Sessions are configured at creation by providing:
//! - `PlayerConfig`: who plays which color, in turn order
//! - `RulesConfig`: rule variants and auto-resolve pacing
//! - `GameConfig`: combines both
//!
//! All configuration is plain serde data so front-ends can ship it as JSON.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::color::Color;
use super::error::{ConfigError, CreateGameError};

/// Smallest supported table.
pub const MIN_PLAYERS: usize = 2;

/// Largest supported table (one player per color).
pub const MAX_PLAYERS: usize = 4;

/// One seat at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub color: Color,

    /// Display name. Blank names are replaced by `"Player N"`.
    #[serde(default)]
    pub name: String,
}

impl PlayerConfig {
    pub fn new(color: Color, name: impl Into<String>) -> Self {
        Self {
            color,
            name: name.into(),
        }
    }
}

/// Whether a player may stack several of their own tokens on one track cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StackingRule {
    /// Any number of own tokens may share a cell, including the entry square.
    #[default]
    Unlimited,
    /// Traditional blocking: a move may not end on a track cell already
    /// holding one of the mover's own tokens.
    NoOwnStacking,
}

/// Rule variants and pacing hints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub stacking: StackingRule,

    /// Issue an auto-select intent when exactly one token can move.
    pub auto_select_forced_move: bool,

    /// Suggested display delay before an intent is applied, in milliseconds.
    pub auto_resolve_delay_ms: u64,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            stacking: StackingRule::Unlimited,
            auto_select_forced_move: true,
            auto_resolve_delay_ms: 1000,
        }
    }
}

impl RulesConfig {
    /// Parse from JSON. Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn with_stacking(mut self, stacking: StackingRule) -> Self {
        self.stacking = stacking;
        self
    }

    #[must_use]
    pub fn with_auto_select(mut self, enabled: bool) -> Self {
        self.auto_select_forced_move = enabled;
        self
    }

    /// Set the suggested delay. Saturates at `u64::MAX` milliseconds.
    #[must_use]
    pub fn with_auto_resolve_delay(mut self, delay: Duration) -> Self {
        self.auto_resolve_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Suggested delay before applying an intent.
    #[must_use]
    pub fn auto_resolve_delay(&self) -> Duration {
        Duration::from_millis(self.auto_resolve_delay_ms)
    }
}

/// Complete configuration for one game session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seats in fixed turn order.
    pub players: Vec<PlayerConfig>,

    #[serde(default)]
    pub rules: RulesConfig,
}

impl GameConfig {
    pub fn new(players: Vec<PlayerConfig>) -> Self {
        Self {
            players,
            rules: RulesConfig::default(),
        }
    }

    /// Seats for the given colors with default names, in the given order.
    pub fn for_colors(colors: &[Color]) -> Self {
        Self::new(
            colors
                .iter()
                .map(|&color| PlayerConfig::new(color, ""))
                .collect(),
        )
    }

    #[must_use]
    pub fn with_rules(mut self, rules: RulesConfig) -> Self {
        self.rules = rules;
        self
    }

    /// Parse from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check player count and color uniqueness.
    pub fn validate(&self) -> Result<(), CreateGameError> {
        validate_players(&self.players)
    }
}

/// Check that a seat list forms a playable table.
pub fn validate_players(players: &[PlayerConfig]) -> Result<(), CreateGameError> {
    let count = players.len();
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
        return Err(CreateGameError::PlayerCount { count });
    }

    let mut seen = [false; 4];
    for player in players {
        let slot = &mut seen[player.color.index()];
        if *slot {
            return Err(CreateGameError::DuplicateColor {
                color: player.color,
            });
        }
        *slot = true;
    }

    Ok(())
}
