//! Configuration loading from environment variables.
//!
//! All values are loaded from `LEDGE_*` environment variables with sensible
//! defaults. Invalid values fall back to defaults without crashing.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |---|---|---|
//! | `LEDGE_GLOBAL_DEBUG` | true | Initial process-wide debug gate |
//! | `LEDGE_GLOBAL_STATS` | true | Initial process-wide stats gate |
//! | `LEDGE_DEBUG` | false | Initial debug gate of new instances |
//! | `LEDGE_STATS` | false | Initial stats gate of new instances |
//! | `LEDGE_COLOR` | true | ANSI colors on tag prefixes (`NO_COLOR` turns the default off) |
//! | `LEDGE_TIMESTAMPS` | true | Microsecond timestamp in front of every line |
//! | `LEDGE_LOG` | info | `tracing` filter used by the `ledge` binary |
//! | `LEDGE_LOG_FORMAT` | pretty | `json` or `pretty` |

use crate::format::LineStyle;
use crate::telemetry::{LogConfig, LogFormat};

/// Effective configuration summary, printed by `ledge config show`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveConfig {
    pub global_debug: bool,
    pub global_stats: bool,
    pub debug: bool,
    pub stats: bool,
    pub color: bool,
    pub timestamps: bool,
    pub log_level: String,
    pub log_format: &'static str,
}

/// All configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct LedgeConfig {
    pub global_debug: bool,
    pub global_stats: bool,
    pub debug: bool,
    pub stats: bool,
    pub style: LineStyle,
    pub log: LogConfig,
}

impl Default for LedgeConfig {
    fn default() -> Self {
        Self {
            global_debug: true,
            global_stats: true,
            debug: false,
            stats: false,
            style: LineStyle::default(),
            log: LogConfig::default(),
        }
    }
}

/// Parse a boolean flag. Accepts 1/0, true/false, yes/no, on/off.
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse a `bool` env var, returning `default` on missing or invalid.
fn parse_bool(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(val) => parse_flag(&val).unwrap_or(default),
        Err(_) => default,
    }
}

/// Load line style from environment.
fn load_style() -> LineStyle {
    let color_default = std::env::var_os("NO_COLOR").is_none();
    LineStyle {
        color: parse_bool("LEDGE_COLOR", color_default),
        timestamps: parse_bool("LEDGE_TIMESTAMPS", true),
    }
}

/// Load logging configuration from environment.
fn load_log_config() -> LogConfig {
    let level = std::env::var("LEDGE_LOG")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| "info".to_string());
    let format = match std::env::var("LEDGE_LOG_FORMAT") {
        Ok(val) if val.eq_ignore_ascii_case("json") => LogFormat::Json,
        _ => LogFormat::Pretty,
    };
    LogConfig {
        format,
        level,
        output_path: None,
    }
}

/// Load all configuration from environment variables.
///
/// Missing or invalid values fall back to the defaults without panicking.
pub fn load() -> LedgeConfig {
    LedgeConfig {
        global_debug: parse_bool("LEDGE_GLOBAL_DEBUG", true),
        global_stats: parse_bool("LEDGE_GLOBAL_STATS", true),
        debug: parse_bool("LEDGE_DEBUG", false),
        stats: parse_bool("LEDGE_STATS", false),
        style: load_style(),
        log: load_log_config(),
    }
}

impl LedgeConfig {
    /// Return a printable summary of all effective values.
    pub fn effective_config(&self) -> EffectiveConfig {
        EffectiveConfig {
            global_debug: self.global_debug,
            global_stats: self.global_stats,
            debug: self.debug,
            stats: self.stats,
            color: self.style.color,
            timestamps: self.style.timestamps,
            log_level: self.log.level.clone(),
            log_format: match self.log.format {
                LogFormat::Json => "json",
                LogFormat::Pretty => "pretty",
            },
        }
    }
}
