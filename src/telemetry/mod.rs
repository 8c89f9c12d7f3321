//! Telemetry for ledge itself.
//!
//! Library internals emit `tracing` events (gate flips, appends, clears,
//! fatals). This module only provides subscriber setup for hosts.

mod logging;

pub use logging::{init_logging, LogConfig, LogError, LogFormat};
