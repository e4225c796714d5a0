//! Types and helpers used throughout deskset.
//!
//! This module defines the vocabulary both tools share: shortcut entries as
//! they appear in the config file ([`BuiltinShortcut`], [`CustomShortcut`]),
//! the slot bookkeeping the configurator derives from the settings store
//! ([`ExistingSlot`], [`SlotPlan`]), and the launcher's program descriptors
//! ([`Program`], [`LaunchCommand`]) plus the window snapshot returned by a
//! [`WindowManager`](crate::traits::WindowManager).
//!
//! # GNOME media-keys layout
//!
//! Keybindings live under the `org.gnome.settings-daemon.plugins.media-keys`
//! schema.  Builtin shortcuts are ordinary keys of that schema, each holding
//! an array of key combos.  Custom shortcuts live in *slots*: relocatable
//! instances of the `…media-keys.custom-keybinding` schema, addressed as
//! `<schema>:<path>` where the path follows
//! `/org/gnome/settings-daemon/plugins/media-keys/custom-keybindings/customN/`.
//! The `custom-keybindings` key of the main schema lists the active slot
//! paths; a slot is only honored once its path appears there.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Schema holding builtin media-key bindings and the custom slot list.
pub const MEDIA_KEYS_SCHEMA: &str = "org.gnome.settings-daemon.plugins.media-keys";

/// Relocatable schema for one custom-keybinding slot.
pub const CUSTOM_KEYBINDING_SCHEMA: &str =
    "org.gnome.settings-daemon.plugins.media-keys.custom-keybinding";

/// Key of [`MEDIA_KEYS_SCHEMA`] listing the active slot paths.
pub const CUSTOM_KEYBINDINGS_KEY: &str = "custom-keybindings";

/// Common prefix of every custom-keybinding slot path.
const SLOT_PATH_PREFIX: &str =
    "/org/gnome/settings-daemon/plugins/media-keys/custom-keybindings/custom";

/// Build the dconf path of the custom-keybinding slot with the given index.
pub fn slot_path(index: usize) -> String {
    format!("{}{}/", SLOT_PATH_PREFIX, index)
}

/// Extract the slot index from a custom-keybinding path.
///
/// Returns `None` for paths that do not follow the `…/customN/` scheme.
pub fn slot_index(path: &str) -> Option<usize> {
    let rest = path.strip_prefix(SLOT_PATH_PREFIX)?;
    let digits = rest.strip_suffix('/')?;
    digits.parse().ok()
}

/// Address a slot's relocatable schema: `<schema>:<path>`.
///
/// This is the form `gsettings` expects when reading or writing keys of a
/// relocatable schema instance.
pub fn custom_schema_at(path: &str) -> String {
    format!("{}:{}", CUSTOM_KEYBINDING_SCHEMA, path)
}

//  Shortcut entries 

/// Reassignment of a system-predefined shortcut.
///
/// `name` must be a key of the media-keys schema (e.g. `screenshot`,
/// `volume-up`); the tool performs no validation of its own, an unknown
/// name surfaces as a store-level failure only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuiltinShortcut {
    /// Media-keys schema key identifying the builtin.
    pub name: String,
    /// Key combo to assign (e.g. `<Super>Print`).
    pub binding: String,
}

/// A user-defined shortcut that runs an arbitrary command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomShortcut {
    /// Display label, also the dedup key against existing slots.
    pub name: String,
    /// Command line the shortcut executes.
    pub command: String,
    /// Key combo to bind (e.g. `Print`).
    pub binding: String,
    /// Builtin shortcut to clear before binding, so the combo is free.
    #[serde(default)]
    pub builtin_replaced: Option<String>,
}

/// A custom-keybinding slot already present in the store at start time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingSlot {
    /// Full dconf path of the slot (`…/customN/`).
    pub path: String,
    /// Index `N` parsed from the path.
    pub index: usize,
    /// Value of the slot's `name` key.
    pub name: String,
}

/// One requested custom shortcut resolved to a concrete slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotPlan {
    /// The shortcut to write.
    pub shortcut: CustomShortcut,
    /// Slot index the shortcut will occupy.
    pub index: usize,
    /// Whether the slot must be created (path appended to the store's list)
    /// or an existing same-name slot is edited in place.
    pub is_new: bool,
}

/// Merge requested custom shortcuts against the slots already in the store.
///
/// A requested shortcut whose `name` matches an existing slot reuses that
/// slot's index (edit, not create) — re-running the tool with the same input
/// therefore yields the same final state.  Every other shortcut is assigned
/// a fresh index, allocated strictly above the highest index present at
/// start time so gapped slot numbering (say `custom0` and `custom5`) can
/// never collide.
///
/// Plans come back in request order.
pub fn plan_slots(existing: &[ExistingSlot], requested: &[CustomShortcut]) -> Vec<SlotPlan> {
    let mut next_index = existing.iter().map(|s| s.index + 1).max().unwrap_or(0);

    requested
        .iter()
        .map(|shortcut| {
            if let Some(slot) = existing.iter().find(|s| s.name == shortcut.name) {
                SlotPlan {
                    shortcut: shortcut.clone(),
                    index: slot.index,
                    is_new: false,
                }
            } else {
                let index = next_index;
                next_index += 1;
                SlotPlan {
                    shortcut: shortcut.clone(),
                    index,
                    is_new: true,
                }
            }
        })
        .collect()
}

//  Launcher vocabulary 

/// How a program is started: a shell command line or an explicit argv.
///
/// On the wire this is either a JSON string (run through `sh -c`) or an
/// array of strings (executed directly, no shell parsing).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchCommand {
    /// A command line handed to `sh -c`.
    Shell(String),
    /// Program and arguments, executed without a shell.
    Argv(Vec<String>),
}

impl fmt::Display for LaunchCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaunchCommand::Shell(cmd) => write!(f, "{}", cmd),
            LaunchCommand::Argv(argv) => write!(f, "{}", argv.join(" ")),
        }
    }
}

impl Serialize for LaunchCommand {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            LaunchCommand::Shell(cmd) => serializer.serialize_str(cmd),
            LaunchCommand::Argv(argv) => argv.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for LaunchCommand {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Visitor;
        struct V;
        impl<'de> Visitor<'de> for V {
            type Value = LaunchCommand;
            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "command string or argv array")
            }
            fn visit_str<E>(self, s: &str) -> Result<LaunchCommand, E>
            where
                E: DeError,
            {
                if s.trim().is_empty() {
                    return Err(DeError::custom("command must not be empty"));
                }
                Ok(LaunchCommand::Shell(s.to_string()))
            }
            fn visit_seq<A>(self, mut seq: A) -> Result<LaunchCommand, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut argv = Vec::new();
                while let Some(arg) = seq.next_element::<String>()? {
                    argv.push(arg);
                }
                if argv.is_empty() {
                    return Err(DeError::custom("command argv must not be empty"));
                }
                Ok(LaunchCommand::Argv(argv))
            }
        }
        deserializer.deserialize_any(V)
    }
}

/// One program the launcher starts and places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    /// How to start the program.
    pub command: LaunchCommand,
    /// Substring expected in the program's window title once it is up.
    pub title: String,
    /// Virtual desktop (0-based) the window is moved to.
    pub desktop: u32,
}

/// Snapshot of one open window, as reported by the window manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    /// Window manager id (e.g. `0x04000003`).
    pub id: String,
    /// Desktop the window is currently on; `-1` means sticky.
    pub desktop: i32,
    /// Human-readable title.
    pub title: String,
}
