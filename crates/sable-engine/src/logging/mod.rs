//! Logging utilities.
//!
//! Engine code only talks to the `log` facade. This module wires up the
//! `env_logger` backend for binaries and tests that want console output.

mod init;

pub use init::{init_logging, LoggingConfig};
