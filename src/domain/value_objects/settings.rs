//! Runtime settings value object
//!
//! Loaded once at startup and afterwards changed only through
//! [`SettingsUpdate`]. Every renderer and bar-link call receives it by
//! reference instead of reading ambient state.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{Archetype, BarTable, Universe};

/// Per-(universe, archetype) replacement of the compiled bar table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarOverride {
    pub universe: Universe,
    pub archetype: Archetype,
    pub table: BarTable,
}

/// All runtime settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoshSettings {
    /// Sheet variant in use for the whole campaign
    pub universe: Universe,
    /// Whisper menus to the character instead of broadcasting them
    pub whisper: bool,
    /// Log every chat payload sent
    pub logging: bool,
    #[serde(default)]
    pub bar_overrides: Vec<BarOverride>,
}

impl CoshSettings {
    /// Load from environment variables, using defaults for missing values
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            universe: env_or("COSH_UNIVERSE", defaults.universe),
            whisper: env_or("COSH_WHISPER", defaults.whisper),
            logging: env_or("COSH_LOGGING", defaults.logging),
            bar_overrides: bar_overrides_from_env("COSH_BAR_OVERRIDES"),
        }
    }

    pub fn bar_override(&self, universe: Universe, archetype: Archetype) -> Option<&BarTable> {
        self.bar_overrides
            .iter()
            .find(|o| o.universe == universe && o.archetype == archetype)
            .map(|o| &o.table)
    }

    pub fn apply(&mut self, update: &SettingsUpdate) {
        match update {
            SettingsUpdate::SetUniverse { universe } => self.universe = *universe,
            SettingsUpdate::ToggleWhisper => self.whisper = !self.whisper,
            SettingsUpdate::ToggleLogging => self.logging = !self.logging,
        }
    }
}

/// The only ways settings change after startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SettingsUpdate {
    SetUniverse { universe: Universe },
    ToggleWhisper,
    ToggleLogging,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn bar_overrides_from_env(key: &str) -> Vec<BarOverride> {
    let Ok(raw) = std::env::var(key) else {
        return Vec::new();
    };
    match serde_json::from_str(&raw) {
        Ok(overrides) => overrides,
        Err(e) => {
            warn!(error = %e, "Ignoring malformed {}", key);
            Vec::new()
        }
    }
}
