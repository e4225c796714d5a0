//! GNOME-specific implementations.
//!
//! This module provides the concrete backend for the
//! [`SettingsStore`](crate::traits::SettingsStore) trait, powered by the
//! `gsettings` command-line tool, plus the [`gvariant`] helpers for the
//! value literals that tool prints and accepts.
//!
//! Nothing outside this module should run `gsettings` directly.

pub mod gsettings;
pub mod gvariant;
