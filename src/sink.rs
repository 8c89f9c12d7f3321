//! Destinations for emitted lines.

use std::fmt::Debug;
use std::io::Write;

use parking_lot::Mutex;

/// Which stream a line belongs to.
///
/// Measurement, statistics, debug and fatal lines use [`Stream::Err`]. Plain
/// informational lines use [`Stream::Out`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    Out,
    Err,
}

/// Accepts one fully rendered line per call.
pub trait Sink: Debug + Send + Sync {
    fn emit(&self, stream: Stream, line: &str);
}

/// Writes to the process stdout / stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdSink;

impl Sink for StdSink {
    fn emit(&self, stream: Stream, line: &str) {
        // Write errors (closed pipe) are dropped.
        let _ = match stream {
            Stream::Out => writeln!(std::io::stdout().lock(), "{line}"),
            Stream::Err => writeln!(std::io::stderr().lock(), "{line}"),
        };
    }
}

/// Keeps every line in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<(Stream, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured lines, oldest first.
    pub fn lines(&self) -> Vec<(Stream, String)> {
        self.lines.lock().clone()
    }

    /// Captured lines of one stream, oldest first.
    pub fn stream(&self, stream: Stream) -> Vec<String> {
        self.lines
            .lock()
            .iter()
            .filter(|(s, _)| *s == stream)
            .map(|(_, line)| line.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    /// Drop everything captured so far and return it.
    pub fn take(&self) -> Vec<(Stream, String)> {
        std::mem::take(&mut *self.lines.lock())
    }
}

impl Sink for MemorySink {
    fn emit(&self, stream: Stream, line: &str) {
        self.lines.lock().push((stream, line.to_string()));
    }
}

/// Forwards lines as `tracing` events under the `ledge::sink` target.
///
/// Useful when the host already ships its logs through a subscriber. Pair it
/// with [`crate::format::LineStyle::plain`], the subscriber adds its own
/// timestamps.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl Sink for TracingSink {
    fn emit(&self, stream: Stream, line: &str) {
        match stream {
            Stream::Out => tracing::info!(target: "ledge::sink", "{line}"),
            Stream::Err => tracing::warn!(target: "ledge::sink", "{line}"),
        }
    }
}
