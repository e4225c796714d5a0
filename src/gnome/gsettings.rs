//! [`SettingsStore`] implementation backed by the `gsettings` CLI.
//!
//! Every call runs one short-lived `gsettings` child process.  That is slow
//! compared to talking to dconf directly, but it needs no session bus
//! bindings and behaves exactly like the commands a user would type.

use crate::traits::SettingsStore;

use log::debug;
use std::process::Command;

/// Settings store backed by the `gsettings` tool.
///
/// Stateless; construct once and share freely.
pub struct GsettingsStore;

/// Errors that can occur when driving `gsettings`.
#[derive(Debug, thiserror::Error)]
#[error("gsettings error: {0}")]
pub struct GsettingsError(String);

impl Default for GsettingsStore {
    fn default() -> Self {
        Self
    }
}

impl GsettingsStore {
    /// Create a new handle.
    ///
    /// Nothing runs eagerly; each method call spawns one short-lived
    /// `gsettings` process.
    pub fn new() -> Self {
        Self
    }
}

/// Run `gsettings` with the given arguments and return its stdout with the
/// trailing newline removed.
fn run_gsettings(args: &[&str]) -> Result<String, GsettingsError> {
    debug!("gsettings {}", args.join(" "));
    let output = Command::new("gsettings")
        .args(args)
        .output()
        .map_err(|e| GsettingsError(format!("could not run gsettings: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(GsettingsError(format!(
            "gsettings {} failed: {}",
            args.join(" "),
            stderr.trim()
        )));
    }

    let stdout = String::from_utf8(output.stdout)
        .map_err(|e| GsettingsError(format!("gsettings printed invalid utf-8: {}", e)))?;
    Ok(stdout.trim_end().to_string())
}

//  SettingsStore implementation 

impl SettingsStore for GsettingsStore {
    type Error = GsettingsError;

    fn get(&self, schema: &str, key: &str) -> Result<String, Self::Error> {
        run_gsettings(&["get", schema, key])
    }

    fn set(&self, schema: &str, key: &str, value: &str) -> Result<(), Self::Error> {
        run_gsettings(&["set", schema, key, value]).map(|_| ())
    }
}
