//! Game options: explicit overrides of the player-count policy table.

use crate::rules;
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Overrides for the rules derived from player count.
///
/// `None` means "use the policy for the current number of seats".
///
/// ```
/// use seat_exchange::SeatOptions;
///
/// let options = SeatOptions::default().with_win_streak_length(4);
/// assert_eq!(*options.win_streak_length(), Some(4));
/// assert_eq!(*options.x_count(), None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(strip_option, prefix = "with_")]
#[serde(default)]
pub struct SeatOptions {
    /// Number of X numbers per round.
    x_count: Option<usize>,

    /// Streak length that ends the game.
    win_streak_length: Option<usize>,
}

impl SeatOptions {
    /// Loads options from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading options from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read options file: {}", e)))?;

        let options = Self::from_toml_str(&content)?;
        info!(x_count = ?options.x_count, win_streak_length = ?options.win_streak_length, "Options loaded");
        Ok(options)
    }

    /// Parses options from a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::new(format!("Failed to parse options: {}", e)))
    }

    /// Effective X count for `seats` players, never more than `seats`.
    pub fn x_count_for(&self, seats: usize) -> usize {
        self.x_count.unwrap_or_else(|| rules::x_count(seats)).min(seats)
    }

    /// Effective winning streak length for `seats` players.
    pub fn win_streak_length_for(&self, seats: usize) -> usize {
        self.win_streak_length
            .unwrap_or_else(|| rules::win_streak_length(seats))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
