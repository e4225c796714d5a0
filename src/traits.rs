//! Core traits that decouple the tools from the external commands they
//! drive.
//!
//! Every concrete backend (the `gsettings` CLI, `wmctrl`, a plain process
//! spawn, a test recorder, …) implements one of these traits.  The
//! orchestrators — [`ShortcutApplier`](crate::shortcuts::ShortcutApplier)
//! and [`SessionLauncher`](crate::launcher::SessionLauncher) — only depend
//! on these abstractions, so tests substitute recorders and never touch the
//! real desktop.

use crate::model::{LaunchCommand, WindowInfo};

/// Abstraction over the per-user settings store.
///
/// An implementation might shell out to `gsettings`, or it might be an
/// in-memory map used in tests.
///
/// # Contract
///
/// * `schema` is either a plain schema id
///   (`org.gnome.settings-daemon.plugins.media-keys`) or a relocatable
///   schema with an instance path appended as `<schema>:<path>`.
/// * [`get`](SettingsStore::get) returns the value in the store's printed
///   form (GVariant literal, e.g. `'flameshot'` or `@as []`); callers parse.
/// * [`set`](SettingsStore::set) receives the value in the same printed
///   form, or a bare string for string-typed keys.
pub trait SettingsStore {
    /// The error type produced by this store.
    type Error: std::error::Error + Send + 'static;

    /// Read the value of `key` under `schema`.
    fn get(&self, schema: &str, key: &str) -> Result<String, Self::Error>;

    /// Write `value` to `key` under `schema`.
    fn set(&self, schema: &str, key: &str, value: &str) -> Result<(), Self::Error>;
}

/// Abstraction over a window manager that can list windows and move them
/// between virtual desktops.
///
/// An implementation might drive `wmctrl`, or it might be a no-op stub used
/// in tests.
pub trait WindowManager {
    /// The error type produced by this window manager.
    type Error: std::error::Error + Send + 'static;

    /// Return a snapshot of the currently open windows.
    fn list_windows(&self) -> Result<Vec<WindowInfo>, Self::Error>;

    /// Move the first window whose title contains `title` to `desktop`.
    ///
    /// Issued blindly: if no window matches, the outcome is whatever the
    /// backend does for an unknown window (typically nothing).
    fn move_to_desktop(&self, title: &str, desktop: u32) -> Result<(), Self::Error>;

    /// Raise the first window whose title contains `title` and switch to
    /// its desktop.
    fn activate(&self, title: &str) -> Result<(), Self::Error>;
}

/// A way of starting programs.
///
/// # Contract
///
/// * The child is started detached: the spawner never waits on it and its
///   stdio is discarded.
/// * A successful return means the process was started, not that the
///   program is up — callers poll the window manager for readiness.
pub trait ProcessSpawner {
    /// The error type produced by this spawner.
    type Error: std::error::Error + Send + 'static;

    /// Start `command` detached from the calling process.
    fn spawn(&self, command: &LaunchCommand) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    //  Mock SettingsStore 

    /// A test double that records every write made to it.
    #[derive(Debug, Default)]
    struct MockStore {
        writes: RefCell<Vec<(String, String, String)>>,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("mock store error")]
    struct MockStoreError;

    impl SettingsStore for MockStore {
        type Error = MockStoreError;

        fn get(&self, _schema: &str, _key: &str) -> Result<String, MockStoreError> {
            Ok("@as []".into())
        }

        fn set(&self, schema: &str, key: &str, value: &str) -> Result<(), MockStoreError> {
            self.writes
                .borrow_mut()
                .push((schema.into(), key.into(), value.into()));
            Ok(())
        }
    }

    #[test]
    fn mock_store_records_writes() {
        let store = MockStore::default();
        store.set("org.example", "some-key", "[]").unwrap();
        let writes = store.writes.borrow();
        assert_eq!(writes.len(), 1);
        assert_eq!(
            writes[0],
            ("org.example".into(), "some-key".into(), "[]".into())
        );
    }

    //  Mock WindowManager 

    /// A test double with a fixed window list.
    struct MockWm {
        windows: Vec<WindowInfo>,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("mock wm error")]
    struct MockWmError;

    impl WindowManager for MockWm {
        type Error = MockWmError;

        fn list_windows(&self) -> Result<Vec<WindowInfo>, MockWmError> {
            Ok(self.windows.clone())
        }

        fn move_to_desktop(&self, _title: &str, _desktop: u32) -> Result<(), MockWmError> {
            Ok(())
        }

        fn activate(&self, _title: &str) -> Result<(), MockWmError> {
            Ok(())
        }
    }

    #[test]
    fn mock_wm_lists_windows() {
        let wm = MockWm {
            windows: vec![WindowInfo {
                id: "0x1".into(),
                desktop: 0,
                title: "Terminal".into(),
            }],
        };
        let windows = wm.list_windows().unwrap();
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].title, "Terminal");
    }
}
