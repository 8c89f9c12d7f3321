//! Error types for ledge.
//!
//! Recoverable failures are plain `thiserror` enums. Unrecoverable ones unwind
//! with a [`Fatal`] payload, see [`crate::Ledge::fatal`].

use std::fmt;

use thiserror::Error;

/// A sample that cannot be stored in a [`crate::Recorder`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SampleError {
    #[error("Sample is not a finite number: {0}")]
    NotFinite(f64),
    #[error("Sample is negative: {0}")]
    Negative(f64),
}

/// Errors from the statistics functions.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum StatsError {
    #[error("Statistics requested over empty input")]
    EmptyInput,
    #[error("Percentile out of range [0, 100]: {0}")]
    PercentileOutOfRange(f64),
}

/// Panic payload raised by [`crate::Ledge::fatal`] and [`crate::Ledge::check`].
///
/// Recover it with `std::panic::catch_unwind` followed by
/// `payload.downcast_ref::<Fatal>()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fatal {
    message: String,
}

impl Fatal {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The formatted diagnostic, without label or color.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Fatal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fatal: {}", self.message)
    }
}

impl std::error::Error for Fatal {}
