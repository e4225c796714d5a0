//! Entry point for **deskset-launch**.
//!
//! Starts the configured programs and spreads their windows across virtual
//! desktops once they appear.  The program list comes from the path given
//! as the first argument, or from `$XDG_CONFIG_HOME/deskset/launch.json`,
//! falling back to a compiled-in default list.

use deskset::config::LaunchConfig;
use deskset::launcher::SessionLauncher;
use deskset::spawn::ShellSpawner;
use deskset::wm::wmctrl::WmctrlWm;
use log::{error, info};
use std::path::PathBuf;

/// Resolve the config directory (`$XDG_CONFIG_HOME/deskset`).
fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    PathBuf::from(base).join("deskset")
}

/// Try to load `$XDG_CONFIG_HOME/deskset/launch.json`, falling back to the
/// compiled-in program list.
fn load_default_config() -> LaunchConfig {
    let path = config_dir().join("launch.json");
    match LaunchConfig::load(&path) {
        Ok(config) => {
            info!("loaded launch config from {}", path.display());
            config
        }
        Err(e) => {
            info!("no launch config ({}), using the default program list", e);
            LaunchConfig::default()
        }
    }
}

fn main() {
    env_logger::init();

    // An explicitly named config must load; only the implicit path falls
    // back to the defaults.
    let config = match std::env::args_os().nth(1) {
        Some(arg) => {
            let path = PathBuf::from(arg);
            match LaunchConfig::load(&path) {
                Ok(config) => config,
                Err(e) => {
                    error!("could not read {}: {}", path.display(), e);
                    std::process::exit(1);
                }
            }
        }
        None => load_default_config(),
    };

    info!("launching {} program(s)", config.programs.len());

    let launcher = SessionLauncher::new(WmctrlWm::new(), ShellSpawner::new(), config);
    if let Err(e) = launcher.run() {
        error!("{}", e);
        std::process::exit(1);
    }
}
