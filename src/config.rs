//! Configuration files for the two tools.
//!
//! Both tools read JSON.  `deskset-shortcuts` takes its file as the first
//! command-line argument; `deskset-launch` takes an optional path and
//! otherwise tries `$XDG_CONFIG_HOME/deskset/launch.json` before falling
//! back to compiled-in defaults.
//!
//! # Shortcuts file
//!
//! ```json
//! {
//!   "builtin_shortcuts": [
//!     { "name": "volume-up", "binding": "<Super>F12" }
//!   ],
//!   "custom_shortcuts": [
//!     {
//!       "name": "flameshot",
//!       "command": "/usr/bin/flameshot gui",
//!       "binding": "Print",
//!       "builtin_replaced": "screenshot"
//!     }
//!   ]
//! }
//! ```
//!
//! # Launch file
//!
//! ```json
//! {
//!   "programs": [
//!     { "command": "firefox", "title": "Mozilla Firefox", "desktop": 0 },
//!     { "command": ["code", "--new-window"], "title": "Visual Studio Code", "desktop": 1 }
//!   ],
//!   "wait_timeout_secs": 10,
//!   "poll_interval_ms": 1000,
//!   "settle_secs": 5
//! }
//! ```

use crate::model::{BuiltinShortcut, CustomShortcut, LaunchCommand, Program};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
    serde_json::from_str(&contents)
        .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))
}

/// Input of `deskset-shortcuts`: the keybindings to apply.
///
/// Both lists default to empty, so a file declaring only one kind of
/// shortcut is valid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortcutsConfig {
    /// Builtin media-key reassignments.
    pub builtin_shortcuts: Vec<BuiltinShortcut>,
    /// Custom command bindings.
    pub custom_shortcuts: Vec<CustomShortcut>,
}

impl ShortcutsConfig {
    /// Load a shortcuts config from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        load_json(path)
    }
}

/// Input of `deskset-launch`: the session programs and timing knobs.
///
/// Every field is optional — a minimal `{}` file is valid and falls back to
/// the compiled-in program list and timings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchConfig {
    /// Programs to start and place, in launch order.
    pub programs: Vec<Program>,
    /// How many once-per-interval polls to wait for a window title.
    pub wait_timeout_secs: u64,
    /// Pause between window-list polls, in milliseconds.
    pub poll_interval_ms: u64,
    /// Countdown after the launch pass, before windows are arranged.
    pub settle_secs: u64,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            programs: default_programs(),
            wait_timeout_secs: 10,
            poll_interval_ms: 1000,
            settle_secs: 5,
        }
    }
}

impl LaunchConfig {
    /// Load a launch config from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        load_json(path)
    }
}

/// The session used when no launch config file exists.
fn default_programs() -> Vec<Program> {
    vec![
        Program {
            command: LaunchCommand::Shell("firefox".into()),
            title: "Mozilla Firefox".into(),
            desktop: 0,
        },
        Program {
            command: LaunchCommand::Shell("code".into()),
            title: "Visual Studio Code".into(),
            desktop: 1,
        },
        Program {
            command: LaunchCommand::Shell("telegram-desktop".into()),
            title: "Telegram".into(),
            desktop: 2,
        },
        Program {
            command: LaunchCommand::Shell("spotify".into()),
            title: "Spotify".into(),
            desktop: 3,
        },
    ]
}
