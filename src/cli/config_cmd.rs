// Copyright 2024-2026 Ledge Contributors
// SPDX-License-Identifier: Apache-2.0

//! Config CLI subcommands: show, defaults.
//!
//! Both read `LEDGE_*` environment variables directly; nothing is persisted.

use std::io::{self, Write};

use crate::config::{self, EffectiveConfig, LedgeConfig};

/// Print effective config as key-value pairs to stdout.
pub fn run_show() {
    let cfg = config::load().effective_config();
    let _ = write_config(&mut io::stdout().lock(), &cfg);
}

/// Print default config values (no env overrides) to stdout.
pub fn run_defaults() {
    let cfg = LedgeConfig::default().effective_config();
    let _ = write_config(&mut io::stdout().lock(), &cfg);
}

fn write_config(out: &mut impl Write, cfg: &EffectiveConfig) -> io::Result<()> {
    writeln!(out, "LEDGE_GLOBAL_DEBUG={}", cfg.global_debug)?;
    writeln!(out, "LEDGE_GLOBAL_STATS={}", cfg.global_stats)?;
    writeln!(out, "LEDGE_DEBUG={}", cfg.debug)?;
    writeln!(out, "LEDGE_STATS={}", cfg.stats)?;
    writeln!(out, "LEDGE_COLOR={}", cfg.color)?;
    writeln!(out, "LEDGE_TIMESTAMPS={}", cfg.timestamps)?;
    writeln!(out, "LEDGE_LOG={}", cfg.log_level)?;
    writeln!(out, "LEDGE_LOG_FORMAT={}", cfg.log_format)?;
    Ok(())
}
