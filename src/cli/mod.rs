//! Command-line interface for geo-altnames.
//!
//! This module provides the commands that run a localization pass, replay a
//! failure log, and inspect the effective configuration.

mod commands;

pub use commands::{Cli, Commands, run_command};
