//! Session launch orchestration, independent of any concrete window manager
//! or spawner.
//!
//! # Architecture
//!
//! [`SessionLauncher`] drives a fixed program list through two passes:
//!
//! 1. **Launch pass.**  Programs start one at a time, in list order.  After
//!    each spawn the launcher polls the window list until some window title
//!    contains the program's title fragment, or the timeout lapses.  A
//!    timeout is reported and tolerated; startup continues with the next
//!    program.
//! 2. **Settle countdown.**  A short fixed pause so the window manager can
//!    finish mapping late windows.
//! 3. **Arrange pass.**  Each program's window is waited for once more,
//!    then moved to its target desktop.  Move failures are logged and
//!    skipped; every program gets its move attempt no matter what happened
//!    to the ones before it.
//!
//! Finally the first program's window is raised so the session starts
//! facing it, and a banner announces completion.

use crate::config::LaunchConfig;
use crate::traits::{ProcessSpawner, WindowManager};

use log::{debug, info, warn};
use std::io::Write;
use std::thread;
use std::time::Duration;

/// Printed once every window is in place.
const BANNER: &str = r"
    _     _      _       ____   _____  _____
   / \   | |    | |     / ___| | ____||_   _|
  / _ \  | |    | |     \___ \ |  _|    | |
 / ___ \ | |___ | |___   ___) || |___   | |
/_/   \_\|_____||_____|  |____/ |_____|  |_|
";

/// Errors the launcher can produce.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    /// A program could not be started.
    #[error("spawn error: {0}")]
    Spawn(String),

    /// The window manager could not be queried.
    #[error("window manager error: {0}")]
    WindowManager(String),
}

/// Starts a list of programs and arranges their windows across desktops.
pub struct SessionLauncher<W: WindowManager, P: ProcessSpawner> {
    wm: W,
    spawner: P,
    config: LaunchConfig,
}

impl<W: WindowManager, P: ProcessSpawner> SessionLauncher<W, P> {
    pub fn new(wm: W, spawner: P, config: LaunchConfig) -> Self {
        Self {
            wm,
            spawner,
            config,
        }
    }

    /// Run the whole session setup: launch, settle, arrange, raise.
    pub fn run(&self) -> Result<(), LaunchError> {
        if self.config.programs.is_empty() {
            info!("no programs configured, nothing to do");
            return Ok(());
        }
        self.launch_pass()?;
        self.settle();
        self.arrange_pass()?;

        // Leave the first program's window on top so the session starts
        // facing it.
        let first = &self.config.programs[0];
        if let Err(e) = self.wm.activate(&first.title) {
            warn!("could not activate {:?}: {}", first.title, e);
        }
        println!("{}", BANNER);
        Ok(())
    }

    /// Poll the window list until a title contains `title`.
    ///
    /// Polls once per configured interval, at most `wait_timeout_secs`
    /// times.  Returns `Ok(true)` as soon as a window matches and
    /// `Ok(false)` after printing a timeout notice when none ever does.
    pub fn wait_for_window(&self, title: &str) -> Result<bool, LaunchError> {
        let interval = Duration::from_millis(self.config.poll_interval_ms);
        for _ in 0..self.config.wait_timeout_secs {
            let windows = self
                .wm
                .list_windows()
                .map_err(|e| LaunchError::WindowManager(e.to_string()))?;
            if let Some(hit) = windows.iter().find(|w| w.title.contains(title)) {
                debug!("{:?} is up (window {})", title, hit.id);
                return Ok(true);
            }
            thread::sleep(interval);
        }
        println!(
            "No window matching \"{}\" showed up within {}s",
            title, self.config.wait_timeout_secs
        );
        Ok(false)
    }

    fn launch_pass(&self) -> Result<(), LaunchError> {
        for program in &self.config.programs {
            println!("Starting {} ...", program.command);
            self.spawner
                .spawn(&program.command)
                .map_err(|e| LaunchError::Spawn(e.to_string()))?;
            self.wait_for_window(&program.title)?;
        }
        Ok(())
    }

    fn settle(&self) {
        if self.config.settle_secs == 0 {
            return;
        }
        print!("Settling:");
        for remaining in (1..=self.config.settle_secs).rev() {
            print!(" {}", remaining);
            let _ = std::io::stdout().flush();
            thread::sleep(Duration::from_secs(1));
        }
        println!();
    }

    fn arrange_pass(&self) -> Result<(), LaunchError> {
        let pause = Duration::from_millis(self.config.poll_interval_ms);
        for program in &self.config.programs {
            // The launch pass may have timed out on this one; check again
            // in case the window showed up late.
            self.wait_for_window(&program.title)?;
            thread::sleep(pause);
            match self.wm.move_to_desktop(&program.title, program.desktop) {
                Ok(()) => println!(
                    "Moved \"{}\" to desktop {}",
                    program.title, program.desktop
                ),
                Err(e) => warn!(
                    "could not move {:?} to desktop {}: {}",
                    program.title, program.desktop, e
                ),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LaunchCommand, Program, WindowInfo};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// One observable call against either seam, in call order.
    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Spawn(String),
        List,
        Move(String, u32),
        Activate(String),
    }

    type Log = Rc<RefCell<Vec<Event>>>;

    #[derive(Debug, thiserror::Error)]
    #[error("mock failure")]
    struct MockError;

    /// Window manager double.  `windows` becomes visible once
    /// `appear_after` list calls have gone by.
    struct RecorderWm {
        log: Log,
        windows: Vec<WindowInfo>,
        appear_after: usize,
        fail_moves: bool,
        fail_lists: bool,
        lists_seen: RefCell<usize>,
    }

    impl RecorderWm {
        fn new(log: &Log, windows: Vec<WindowInfo>) -> Self {
            Self {
                log: Rc::clone(log),
                windows,
                appear_after: 0,
                fail_moves: false,
                fail_lists: false,
                lists_seen: RefCell::new(0),
            }
        }
    }

    impl WindowManager for RecorderWm {
        type Error = MockError;

        fn list_windows(&self) -> Result<Vec<WindowInfo>, MockError> {
            self.log.borrow_mut().push(Event::List);
            if self.fail_lists {
                return Err(MockError);
            }
            let mut seen = self.lists_seen.borrow_mut();
            *seen += 1;
            if *seen > self.appear_after {
                Ok(self.windows.clone())
            } else {
                Ok(Vec::new())
            }
        }

        fn move_to_desktop(&self, title: &str, desktop: u32) -> Result<(), MockError> {
            self.log
                .borrow_mut()
                .push(Event::Move(title.to_string(), desktop));
            if self.fail_moves {
                Err(MockError)
            } else {
                Ok(())
            }
        }

        fn activate(&self, title: &str) -> Result<(), MockError> {
            self.log.borrow_mut().push(Event::Activate(title.to_string()));
            Ok(())
        }
    }

    struct RecorderSpawner {
        log: Log,
        fail_at: Option<usize>,
        spawns_seen: RefCell<usize>,
    }

    impl RecorderSpawner {
        fn new(log: &Log) -> Self {
            Self {
                log: Rc::clone(log),
                fail_at: None,
                spawns_seen: RefCell::new(0),
            }
        }
    }

    impl ProcessSpawner for RecorderSpawner {
        type Error = MockError;

        fn spawn(&self, command: &LaunchCommand) -> Result<(), MockError> {
            let mut seen = self.spawns_seen.borrow_mut();
            if self.fail_at == Some(*seen) {
                return Err(MockError);
            }
            *seen += 1;
            self.log.borrow_mut().push(Event::Spawn(command.to_string()));
            Ok(())
        }
    }

    fn window(title: &str) -> WindowInfo {
        WindowInfo {
            id: "0x0".to_string(),
            desktop: 0,
            title: title.to_string(),
        }
    }

    fn program(command: &str, title: &str, desktop: u32) -> Program {
        Program {
            command: LaunchCommand::Shell(command.to_string()),
            title: title.to_string(),
            desktop,
        }
    }

    /// Config with no real sleeping so tests run instantly.
    fn fast_config(programs: Vec<Program>) -> LaunchConfig {
        LaunchConfig {
            programs,
            wait_timeout_secs: 3,
            poll_interval_ms: 0,
            settle_secs: 0,
        }
    }

    fn spawned(log: &Log) -> Vec<String> {
        log.borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Spawn(command) => Some(command.clone()),
                _ => None,
            })
            .collect()
    }

    fn moves(log: &Log) -> Vec<(String, u32)> {
        log.borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Move(title, desktop) => Some((title.clone(), *desktop)),
                _ => None,
            })
            .collect()
    }

    fn polls(log: &Log) -> usize {
        log.borrow()
            .iter()
            .filter(|e| matches!(e, Event::List))
            .count()
    }

    #[test]
    fn launches_every_program_in_order() {
        let log = Log::default();
        let wm = RecorderWm::new(&log, vec![window("Firefox"), window("Spotify")]);
        let spawner = RecorderSpawner::new(&log);
        let launcher = SessionLauncher::new(
            wm,
            spawner,
            fast_config(vec![
                program("firefox", "Firefox", 0),
                program("spotify", "Spotify", 3),
            ]),
        );
        launcher.run().unwrap();
        assert_eq!(spawned(&log), vec!["firefox", "spotify"]);
    }

    #[test]
    fn moves_every_program_in_order_even_when_windows_never_appear() {
        let log = Log::default();
        let wm = RecorderWm::new(&log, Vec::new());
        let spawner = RecorderSpawner::new(&log);
        let launcher = SessionLauncher::new(
            wm,
            spawner,
            fast_config(vec![
                program("a", "Window A", 1),
                program("b", "Window B", 2),
                program("c", "Window C", 0),
            ]),
        );
        launcher.run().unwrap();
        assert_eq!(
            moves(&log),
            vec![
                ("Window A".to_string(), 1),
                ("Window B".to_string(), 2),
                ("Window C".to_string(), 0),
            ]
        );
    }

    #[test]
    fn spawns_and_waits_interleave_in_list_order() {
        let log = Log::default();
        let wm = RecorderWm::new(&log, vec![window("A"), window("B")]);
        let spawner = RecorderSpawner::new(&log);
        let launcher = SessionLauncher::new(
            wm,
            spawner,
            fast_config(vec![program("a", "A", 1), program("b", "B", 2)]),
        );
        launcher.run().unwrap();
        let events = log.borrow().clone();
        assert_eq!(
            events,
            vec![
                Event::Spawn("a".to_string()),
                Event::List,
                Event::Spawn("b".to_string()),
                Event::List,
                Event::List,
                Event::Move("A".to_string(), 1),
                Event::List,
                Event::Move("B".to_string(), 2),
                Event::Activate("A".to_string()),
            ]
        );
    }

    #[test]
    fn wait_returns_as_soon_as_the_window_shows_up() {
        let log = Log::default();
        let mut wm = RecorderWm::new(&log, vec![window("Telegram")]);
        wm.appear_after = 2;
        let launcher =
            SessionLauncher::new(wm, RecorderSpawner::new(&log), fast_config(Vec::new()));
        assert!(launcher.wait_for_window("Telegram").unwrap());
        assert_eq!(polls(&log), 3);
    }

    #[test]
    fn wait_polls_exactly_timeout_times_when_nothing_matches() {
        let log = Log::default();
        let wm = RecorderWm::new(&log, Vec::new());
        let mut config = fast_config(Vec::new());
        config.wait_timeout_secs = 5;
        let launcher = SessionLauncher::new(wm, RecorderSpawner::new(&log), config);
        assert!(!launcher.wait_for_window("Ghost").unwrap());
        assert_eq!(polls(&log), 5);
    }

    #[test]
    fn titles_match_by_substring_case_sensitively() {
        let log = Log::default();
        let wm = RecorderWm::new(&log, vec![window("Mozilla Firefox - Home")]);
        let launcher =
            SessionLauncher::new(wm, RecorderSpawner::new(&log), fast_config(Vec::new()));
        assert!(launcher.wait_for_window("Firefox").unwrap());
        assert!(!launcher.wait_for_window("firefox").unwrap());
    }

    #[test]
    fn spawn_failure_aborts_the_launch_pass() {
        let log = Log::default();
        let wm = RecorderWm::new(&log, Vec::new());
        let mut spawner = RecorderSpawner::new(&log);
        spawner.fail_at = Some(1);
        let launcher = SessionLauncher::new(
            wm,
            spawner,
            fast_config(vec![
                program("a", "A", 0),
                program("b", "B", 1),
                program("c", "C", 2),
            ]),
        );
        let result = launcher.run();
        assert!(matches!(result, Err(LaunchError::Spawn(_))));
        assert_eq!(spawned(&log), vec!["a"]);
        assert!(moves(&log).is_empty());
    }

    #[test]
    fn move_failures_do_not_stop_the_arrange_pass() {
        let log = Log::default();
        let mut wm = RecorderWm::new(&log, vec![window("A"), window("B")]);
        wm.fail_moves = true;
        let launcher = SessionLauncher::new(
            wm,
            RecorderSpawner::new(&log),
            fast_config(vec![program("a", "A", 0), program("b", "B", 1)]),
        );
        launcher.run().unwrap();
        assert_eq!(moves(&log).len(), 2);
    }

    #[test]
    fn first_window_is_activated_last() {
        let log = Log::default();
        let wm = RecorderWm::new(&log, vec![window("A"), window("B")]);
        let launcher = SessionLauncher::new(
            wm,
            RecorderSpawner::new(&log),
            fast_config(vec![program("a", "A", 0), program("b", "B", 1)]),
        );
        launcher.run().unwrap();
        let events = log.borrow();
        assert_eq!(events.last(), Some(&Event::Activate("A".to_string())));
        let activations = events
            .iter()
            .filter(|e| matches!(e, Event::Activate(_)))
            .count();
        assert_eq!(activations, 1);
    }

    #[test]
    fn empty_program_list_is_a_noop() {
        let log = Log::default();
        let launcher = SessionLauncher::new(
            RecorderWm::new(&log, Vec::new()),
            RecorderSpawner::new(&log),
            fast_config(Vec::new()),
        );
        launcher.run().unwrap();
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn window_listing_failures_abort() {
        let log = Log::default();
        let mut wm = RecorderWm::new(&log, Vec::new());
        wm.fail_lists = true;
        let launcher = SessionLauncher::new(
            wm,
            RecorderSpawner::new(&log),
            fast_config(vec![program("a", "A", 0)]),
        );
        assert!(matches!(
            launcher.run(),
            Err(LaunchError::WindowManager(_))
        ));
    }
}
