//! Viewer settings and the settings-change reducer.
//!
//! Settings are a small bag of optional fields. Every mutation goes through
//! [`Settings::apply`] with a [`SettingsCommand`]; each command sets or
//! clears exactly one field, so the host can persist the struct wholesale
//! and replay commands without caring which field changed. Persistence
//! itself (local storage, config file) is the host's concern.

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;

use serde::{Deserialize, Serialize};

/// Explicit colour theme choice. Absent means "follow the system".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

/// User-tunable viewer settings.
///
/// Cleared flags serialize as absent keys rather than `false`, matching the
/// sparse-field convention used for persisted state elsewhere.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Explicit theme override; `None` follows the system preference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    /// The system reported a dark-mode preference.
    #[serde(skip_serializing_if = "is_false")]
    pub prefers_dark: bool,
    /// Show catalog listings as lists instead of grids.
    #[serde(skip_serializing_if = "is_false")]
    pub list_mode: bool,
    /// Denser listing layout.
    #[serde(skip_serializing_if = "is_false")]
    pub cozy_mode: bool,
    /// Prefer room-level navigation even when sub-room links exist.
    #[serde(skip_serializing_if = "is_false")]
    pub hide_subrooms: bool,
    /// Companion-process port override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

/// A single settings mutation. Each variant touches exactly one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsCommand {
    /// Advance the theme override: unset → light → dark → unset.
    CycleTheme,
    /// Record (or clear, with `false`) the system dark-mode preference.
    SetPrefersDark(bool),
    /// Flip list layout on or off.
    ToggleListMode,
    /// Flip the dense layout on or off.
    ToggleCozyMode,
    /// Flip sub-room link suppression on or off.
    ToggleHideSubrooms,
    /// Set or clear the companion-process port override.
    SetPort(Option<u16>),
}

impl Settings {
    /// Apply one command, returning the updated settings.
    #[must_use]
    pub fn apply(mut self, command: SettingsCommand) -> Self {
        match command {
            SettingsCommand::CycleTheme => {
                self.theme = match self.theme {
                    None => Some(Theme::Light),
                    Some(Theme::Light) => Some(Theme::Dark),
                    Some(Theme::Dark) => None,
                };
            }
            SettingsCommand::SetPrefersDark(value) => self.prefers_dark = value,
            SettingsCommand::ToggleListMode => self.list_mode = !self.list_mode,
            SettingsCommand::ToggleCozyMode => self.cozy_mode = !self.cozy_mode,
            SettingsCommand::ToggleHideSubrooms => self.hide_subrooms = !self.hide_subrooms,
            SettingsCommand::SetPort(port) => self.port = port,
        }
        self
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}
