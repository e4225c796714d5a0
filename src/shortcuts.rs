//! Keybinding application logic, independent of any concrete settings store.
//!
//! # Architecture
//!
//! [`ShortcutApplier`] turns a [`ShortcutsConfig`] into a series of reads
//! and writes against the media-keys schema:
//!
//! 1. read the active custom slot list and each listed slot's `name` key,
//! 2. plan one slot per requested custom shortcut ([`plan_slots`]), reusing
//!    slots whose stored name matches and placing new ones past the highest
//!    existing index,
//! 3. write each planned slot, registering new paths in the slot list and
//!    clearing any builtin binding the shortcut replaces,
//! 4. reassign the requested builtin bindings.
//!
//! Custom shortcuts are applied before builtin reassignments so a keysym
//! freed in step 3 can be taken over in the same run.  Because slots are
//! matched by name, re-running with the same config rewrites the same slots
//! instead of allocating fresh ones.
//!
//! Builtin names are passed through as keys of the media-keys schema.
//! GSettings rejects unknown keys, which the applier logs and tolerates, so
//! a config written for a newer GNOME release still applies the rest.

use crate::config::ShortcutsConfig;
use crate::gnome::gvariant;
use crate::model::{
    custom_schema_at, plan_slots, slot_index, slot_path, BuiltinShortcut, CustomShortcut,
    ExistingSlot, SlotPlan, CUSTOM_KEYBINDINGS_KEY, MEDIA_KEYS_SCHEMA,
};
use crate::traits::SettingsStore;

use log::{debug, info, warn};

/// Errors the applier can produce.
#[derive(Debug, thiserror::Error)]
pub enum ApplyError {
    /// The settings store failed on a read or a required write.
    #[error("settings store error: {0}")]
    Store(String),

    /// The store returned a value the applier cannot make sense of.
    #[error("unexpected stored value: {0}")]
    BadValue(String),
}

/// Applies a shortcut configuration to a settings store.
pub struct ShortcutApplier<S: SettingsStore> {
    store: S,
}

impl<S: SettingsStore> ShortcutApplier<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Apply a full configuration: custom shortcuts first, then builtin
    /// reassignments.
    pub fn apply(&self, config: &ShortcutsConfig) -> Result<(), ApplyError> {
        self.apply_custom(&config.custom_shortcuts)?;
        self.apply_builtin(&config.builtin_shortcuts)?;
        Ok(())
    }

    /// Point builtin media-keys actions at new bindings.
    ///
    /// A rejected name is logged and skipped; the remaining shortcuts still
    /// apply.
    pub fn apply_builtin(&self, shortcuts: &[BuiltinShortcut]) -> Result<(), ApplyError> {
        for shortcut in shortcuts {
            let value = gvariant::format_string_array(&[shortcut.binding.as_str()]);
            match self.store.set(MEDIA_KEYS_SCHEMA, &shortcut.name, &value) {
                Ok(()) => info!("builtin {} now bound to {}", shortcut.name, shortcut.binding),
                Err(e) => warn!("could not reassign builtin {}: {}", shortcut.name, e),
            }
        }
        Ok(())
    }

    /// Merge custom shortcuts into the store's keybinding slots.
    pub fn apply_custom(&self, shortcuts: &[CustomShortcut]) -> Result<(), ApplyError> {
        if shortcuts.is_empty() {
            return Ok(());
        }
        let existing = self.read_existing_slots()?;
        debug!("found {} existing custom slot(s)", existing.len());
        for plan in plan_slots(&existing, shortcuts) {
            self.apply_plan(&plan)?;
        }
        Ok(())
    }

    /// Read the slot list and resolve each slot's stored name.
    ///
    /// Paths that do not follow the `customN` naming are left alone: they
    /// still occupy their list entry but are never matched or renumbered.
    fn read_existing_slots(&self) -> Result<Vec<ExistingSlot>, ApplyError> {
        let mut slots = Vec::new();
        for path in self.read_slot_paths()? {
            let index = match slot_index(&path) {
                Some(index) => index,
                None => {
                    warn!("ignoring foreign keybinding path {}", path);
                    continue;
                }
            };
            let raw = self
                .store
                .get(&custom_schema_at(&path), "name")
                .map_err(|e| ApplyError::Store(e.to_string()))?;
            slots.push(ExistingSlot {
                name: gvariant::unquote(&raw),
                path,
                index,
            });
        }
        Ok(slots)
    }

    fn read_slot_paths(&self) -> Result<Vec<String>, ApplyError> {
        let raw = self
            .store
            .get(MEDIA_KEYS_SCHEMA, CUSTOM_KEYBINDINGS_KEY)
            .map_err(|e| ApplyError::Store(e.to_string()))?;
        gvariant::parse_string_array(&raw).map_err(|e| ApplyError::BadValue(e.to_string()))
    }

    fn apply_plan(&self, plan: &SlotPlan) -> Result<(), ApplyError> {
        let shortcut = &plan.shortcut;
        if let Some(builtin) = &shortcut.builtin_replaced {
            match self.store.set(MEDIA_KEYS_SCHEMA, builtin, "[]") {
                Ok(()) => info!("cleared builtin {} for {}", builtin, shortcut.name),
                Err(e) => warn!("could not clear builtin {}: {}", builtin, e),
            }
        }

        let path = slot_path(plan.index);
        if plan.is_new {
            self.register_slot(&path)?;
        }

        let schema = custom_schema_at(&path);
        self.store
            .set(&schema, "name", &shortcut.name)
            .map_err(|e| ApplyError::Store(e.to_string()))?;
        self.store
            .set(&schema, "binding", &shortcut.binding)
            .map_err(|e| ApplyError::Store(e.to_string()))?;
        self.store
            .set(&schema, "command", &shortcut.command)
            .map_err(|e| ApplyError::Store(e.to_string()))?;
        info!(
            "custom {} bound to {} (slot custom{})",
            shortcut.name, shortcut.binding, plan.index
        );
        Ok(())
    }

    /// Append a freshly planned path to the slot list.
    ///
    /// The list is re-read immediately before the write to keep the
    /// read-modify-write window small.  Concurrent writers can still lose
    /// an update; a one-shot setup tool accepts that.
    fn register_slot(&self, path: &str) -> Result<(), ApplyError> {
        let mut paths = self.read_slot_paths()?;
        paths.push(path.to_string());
        let value = gvariant::format_string_array(&paths);
        self.store
            .set(MEDIA_KEYS_SCHEMA, CUSTOM_KEYBINDINGS_KEY, &value)
            .map_err(|e| ApplyError::Store(e.to_string()))?;
        debug!("registered slot path {}", path);
        Ok(())
    }
}
