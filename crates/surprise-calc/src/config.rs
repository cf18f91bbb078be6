//! Calculator configuration
//!
//! Capacities, the storage key and the presentational delays. Defaults match
//! the shipped widget; hosts may override them from JSON.

use serde::{Deserialize, Serialize};

/// Configuration for [`CalculatorApp`](crate::app::CalculatorApp)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Maximum number of history entries kept
    pub history_capacity: usize,
    /// Storage key holding the serialized history
    pub storage_key: String,
    /// Number of raw keystrokes remembered by the easter-egg detector
    pub keystroke_buffer_len: usize,
    /// Delay before a freshly shown popup gets its enter-active state (ms)
    pub popup_enter_delay_ms: u64,
    /// Delay between starting the game close transition and hiding it (ms)
    pub game_close_delay_ms: u64,
    /// Delay between easter-egg messages (ms)
    pub easter_egg_step_ms: u64,
    /// Delay between the last easter-egg message and the reset (ms)
    pub easter_egg_reset_ms: u64,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            history_capacity: 10,
            storage_key: "calculatorHistory".to_string(),
            keystroke_buffer_len: 10,
            popup_enter_delay_ms: 10,
            game_close_delay_ms: 300,
            easter_egg_step_ms: 2000,
            easter_egg_reset_ms: 2000,
        }
    }
}

impl CalculatorConfig {
    /// Create a config with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) JSON config; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Set the history capacity
    #[must_use]
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Set the storage key
    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Set the keystroke buffer length
    #[must_use]
    pub fn with_keystroke_buffer_len(mut self, len: usize) -> Self {
        self.keystroke_buffer_len = len;
        self
    }

    /// Set the popup enter delay
    #[must_use]
    pub fn with_popup_enter_delay_ms(mut self, ms: u64) -> Self {
        self.popup_enter_delay_ms = ms;
        self
    }

    /// Set the game close delay
    #[must_use]
    pub fn with_game_close_delay_ms(mut self, ms: u64) -> Self {
        self.game_close_delay_ms = ms;
        self
    }

    /// Set both easter-egg delays
    #[must_use]
    pub fn with_easter_egg_timing(mut self, step_ms: u64, reset_ms: u64) -> Self {
        self.easter_egg_step_ms = step_ms;
        self.easter_egg_reset_ms = reset_ms;
        self
    }
}
