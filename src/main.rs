//! Entry point for **deskset-shortcuts**.
//!
//! Reads the keybinding config named on the command line and applies it to
//! the media-keys settings schema through `gsettings`:
//!
//! ```text
//! deskset-shortcuts shortcuts.json
//! ```

use deskset::config::ShortcutsConfig;
use deskset::gnome::gsettings::GsettingsStore;
use deskset::shortcuts::ShortcutApplier;
use log::{error, info};
use std::path::PathBuf;

fn main() {
    env_logger::init();

    let path = match std::env::args_os().nth(1) {
        Some(arg) => PathBuf::from(arg),
        None => {
            eprintln!("usage: deskset-shortcuts <shortcuts.json>");
            std::process::exit(2);
        }
    };

    let config = match ShortcutsConfig::load(&path) {
        Ok(config) => config,
        Err(e) => {
            error!("could not read {}: {}", path.display(), e);
            std::process::exit(1);
        }
    };

    info!(
        "applying {} builtin and {} custom shortcut(s)",
        config.builtin_shortcuts.len(),
        config.custom_shortcuts.len()
    );

    let applier = ShortcutApplier::new(GsettingsStore::new());
    if let Err(e) = applier.apply(&config) {
        error!("{}", e);
        std::process::exit(1);
    }
    info!("all shortcuts applied");
}
