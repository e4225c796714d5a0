//! **deskset** — declarative GNOME session setup.
//!
//! Two small tools share this crate.  `deskset-shortcuts` applies a
//! declarative keybinding config (builtin reassignments plus custom command
//! bindings) to the media-keys settings schema.  `deskset-launch` starts a
//! list of programs and spreads their windows across virtual desktops once
//! they appear.
//!
//! # Architecture
//!
//! The crate is organised around three seams:
//!
//! * [`traits::SettingsStore`] — abstracts the settings database so the
//!   keybinding merge logic is not coupled to the `gsettings` tool.
//! * [`traits::WindowManager`] — abstracts window listing and placement so
//!   the launch orchestration is not coupled to `wmctrl`.
//! * [`traits::ProcessSpawner`] — abstracts starting detached programs so
//!   launch runs can be replayed against a recorder in tests.
//!
//! Concrete implementations live in [`gnome`] (the `gsettings` tool),
//! [`wm`] (the `wmctrl` tool) and [`spawn`] (`std::process`).

pub mod config;
pub mod gnome;
pub mod launcher;
pub mod model;
pub mod shortcuts;
pub mod spawn;
pub mod traits;
pub mod wm;
