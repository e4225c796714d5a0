//! [`WindowManager`] implementation backed by the `wmctrl` CLI.
//!
//! `wmctrl` speaks EWMH, so this backend works on any compliant window
//! manager, not just GNOME Shell.  Like the settings backend it runs one
//! short-lived child process per call.

use crate::model::WindowInfo;
use crate::traits::WindowManager;

use log::debug;
use std::process::Command;

/// Window manager backed by the `wmctrl` tool.
pub struct WmctrlWm;

/// Errors that can occur when driving `wmctrl`.
#[derive(Debug, thiserror::Error)]
#[error("wmctrl error: {0}")]
pub struct WmctrlError(String);

impl Default for WmctrlWm {
    fn default() -> Self {
        Self
    }
}

impl WmctrlWm {
    /// Create a new handle.
    ///
    /// Nothing runs eagerly; each method call spawns one short-lived
    /// `wmctrl` process.
    pub fn new() -> Self {
        Self
    }
}

/// Run `wmctrl` with the given arguments and return its stdout.
fn run_wmctrl(args: &[&str]) -> Result<String, WmctrlError> {
    debug!("wmctrl {}", args.join(" "));
    let output = Command::new("wmctrl")
        .args(args)
        .output()
        .map_err(|e| WmctrlError(format!("could not run wmctrl: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(WmctrlError(format!(
            "wmctrl {} failed: {}",
            args.join(" "),
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Parse one `wmctrl -l` line: `<id> <desktop> <host> <title…>`.
///
/// The desktop column is `-1` for sticky windows (docks, panels).  Lines
/// that do not fit the shape are skipped rather than treated as fatal, the
/// listing degrades gracefully when a window has an odd title.
fn parse_window_line(line: &str) -> Option<WindowInfo> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 3 {
        return None;
    }
    let desktop: i32 = fields[1].parse().ok()?;
    let title = if fields.len() > 3 {
        fields[3..].join(" ")
    } else {
        String::new()
    };
    Some(WindowInfo {
        id: fields[0].to_string(),
        desktop,
        title,
    })
}

//  WindowManager implementation 

impl WindowManager for WmctrlWm {
    type Error = WmctrlError;

    fn list_windows(&self) -> Result<Vec<WindowInfo>, Self::Error> {
        let listing = run_wmctrl(&["-l"])?;
        Ok(listing.lines().filter_map(parse_window_line).collect())
    }

    fn move_to_desktop(&self, title: &str, desktop: u32) -> Result<(), Self::Error> {
        run_wmctrl(&["-r", title, "-t", &desktop.to_string()]).map(|_| ())
    }

    fn activate(&self, title: &str) -> Result<(), Self::Error> {
        run_wmctrl(&["-a", title]).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_regular_line() {
        let info =
            parse_window_line("0x03400003  1 desk Mozilla Firefox — Private Browsing").unwrap();
        assert_eq!(info.id, "0x03400003");
        assert_eq!(info.desktop, 1);
        assert_eq!(info.title, "Mozilla Firefox — Private Browsing");
    }

    #[test]
    fn parse_sticky_window() {
        let info = parse_window_line("0x01000007 -1 desk xfce4-panel").unwrap();
        assert_eq!(info.desktop, -1);
        assert_eq!(info.title, "xfce4-panel");
    }

    #[test]
    fn parse_line_without_title() {
        let info = parse_window_line("0x02a00001  0 desk").unwrap();
        assert_eq!(info.title, "");
    }

    #[test]
    fn parse_skips_malformed_lines() {
        assert!(parse_window_line("").is_none());
        assert!(parse_window_line("0x01 notanumber host Title").is_none());
        assert!(parse_window_line("lonely").is_none());
    }
}
