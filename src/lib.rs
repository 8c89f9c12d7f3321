//! Ledge
//!
//! In-process instrumentation: wrap units of work, measure how long they take,
//! keep the measurements under a tag and summarize them later. Output of every
//! kind is gated by two switches (`debug`, `stats`) that exist per instance and
//! process-wide; an action happens only when both are on.
//!
//! # Components
//!
//! - [`ToggleRegistry`] / instance gates: lock-free atomics.
//! - [`Recorder`]: tag → samples (milliseconds) behind one reader/writer lock.
//! - [`stats`]: count, mean, median, nearest-rank percentile, min, max,
//!   population variance over a snapshot.
//! - Timing primitives on [`Ledge`]: `time`, `record`, their `_above`
//!   variants, `record_and_print` and `record_if_new_max`.
//!
//! # Defaults
//!
//! Global gates start enabled, instance gates start disabled, so a fresh
//! [`Ledge`] is silent until `debug_on()` / `stats_on()` is called on it. Both
//! defaults can be overridden with `LEDGE_*` environment variables, see
//! [`config`].
//!
//! # Fatal errors
//!
//! [`Ledge::fatal`] and [`Ledge::check`] print a `[PANIC]` line and unwind with
//! a [`Fatal`] payload. Nothing after them runs.

pub mod clock;
pub mod config;
pub mod error;
pub mod format;
mod harness;
mod ledge;
pub mod recorder;
mod report;
pub mod sink;
pub mod stats;
pub mod telemetry;
pub mod toggle;

pub mod cli;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{Fatal, SampleError, StatsError};
pub use format::{Label, LineStyle};
pub use ledge::{Ledge, LedgeBuilder};
pub use recorder::{Millis, Recorder};
pub use sink::{MemorySink, Sink, StdSink, Stream, TracingSink};
pub use stats::Summary;
pub use toggle::ToggleRegistry;

/// Emit a formatted line to the normal output stream.
///
/// `ledge_print!(ledge, "loaded {} rows", n)`
#[macro_export]
macro_rules! ledge_print {
    ($ledge:expr, $($arg:tt)+) => {
        $ledge.print(::std::format_args!($($arg)+))
    };
}

/// Emit a formatted line to the diagnostic stream, ungated.
#[macro_export]
macro_rules! ledge_always {
    ($ledge:expr, $($arg:tt)+) => {
        $ledge.always(::std::format_args!($($arg)+))
    };
}

/// Emit a formatted `[DEBUG]` line if both debug gates are on.
#[macro_export]
macro_rules! ledge_debug {
    ($ledge:expr, $($arg:tt)+) => {
        $ledge.debug(::std::format_args!($($arg)+))
    };
}

/// Emit a formatted `[PANIC]` line and unwind.
#[macro_export]
macro_rules! ledge_fatal {
    ($ledge:expr, $($arg:tt)+) => {
        $ledge.fatal(::std::format_args!($($arg)+))
    };
}

/// Unwrap a `Result`, or go fatal with the formatted message and the error.
///
/// `let file = ledge_check!(ledge, File::open(path), "opening {}", path.display());`
#[macro_export]
macro_rules! ledge_check {
    ($ledge:expr, $result:expr, $($arg:tt)+) => {
        $ledge.check($result, ::std::format_args!($($arg)+))
    };
}
