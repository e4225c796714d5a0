//! Window-manager control implementations.
//!
//! This module provides the concrete backend for the
//! [`WindowManager`](crate::traits::WindowManager) trait, powered by the
//! `wmctrl` command-line tool.
//!
//! Nothing outside this module should run `wmctrl` directly.

pub mod wmctrl;
