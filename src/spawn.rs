//! [`ProcessSpawner`] implementation that starts detached session children.

use crate::model::LaunchCommand;
use crate::traits::ProcessSpawner;

use log::debug;
use std::process::{Command, Stdio};

/// Spawner that starts programs with stdin, stdout and stderr discarded.
///
/// Shell commands run through `sh -c`; argv commands execute the program
/// directly.  The child handle is dropped right after the spawn: the
/// launcher never waits on its children, they belong to the session and
/// outlive it.
pub struct ShellSpawner;

/// Errors that can occur when starting a child process.
#[derive(Debug, thiserror::Error)]
#[error("spawn error: {0}")]
pub struct SpawnError(String);

impl Default for ShellSpawner {
    fn default() -> Self {
        Self
    }
}

impl ShellSpawner {
    /// Create a new handle.
    pub fn new() -> Self {
        Self
    }
}

//  ProcessSpawner implementation 

impl ProcessSpawner for ShellSpawner {
    type Error = SpawnError;

    fn spawn(&self, command: &LaunchCommand) -> Result<(), Self::Error> {
        debug!("spawning {}", command);
        let mut cmd = match command {
            LaunchCommand::Shell(line) => {
                let mut cmd = Command::new("sh");
                cmd.arg("-c").arg(line);
                cmd
            }
            LaunchCommand::Argv(argv) => {
                let (program, args) = argv
                    .split_first()
                    .ok_or_else(|| SpawnError("empty argv".to_string()))?;
                let mut cmd = Command::new(program);
                cmd.args(args);
                cmd
            }
        };
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| SpawnError(format!("could not start {}: {}", command, e)))?;
        Ok(())
    }
}
