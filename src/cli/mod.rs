// Copyright 2024-2026 Ledge Contributors
// SPDX-License-Identifier: Apache-2.0

//! CLI module for the `ledge` binary.
//!
//! ## Usage
//!
//! ```bash
//! ledge demo              # Walk through the API (default)
//! ledge demo --no-fatal   # Same, without the final [PANIC]
//! ledge config show       # Effective LEDGE_* configuration
//! ledge config defaults   # Documented defaults
//! ```

pub mod config_cmd;
pub mod demo_cmd;

pub use demo_cmd::{run_demo, DemoOptions};
