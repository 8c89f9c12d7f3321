//! Thread-safe, tag-keyed storage of elapsed-time samples.
//!
//! One reader/writer lock guards the whole map. Mutations hold the write lock
//! only for the push or reset; snapshots copy a single tag's samples under the
//! read lock so that sorting and aggregation run without holding it.
//!
//! Sequences grow without bound until they are cleared. Callers that record on
//! a hot path for the lifetime of the process should clear tags periodically.

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::RwLock;
use tracing::trace;

use crate::error::SampleError;

/// A finite, non-negative duration in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Millis(f64);

impl Millis {
    /// Validate a raw millisecond value.
    pub fn new(value: f64) -> Result<Self, SampleError> {
        if !value.is_finite() {
            return Err(SampleError::NotFinite(value));
        }
        if value < 0.0 {
            return Err(SampleError::Negative(value));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl From<Duration> for Millis {
    fn from(d: Duration) -> Self {
        Self(d.as_nanos() as f64 / 1_000_000.0)
    }
}

impl TryFrom<f64> for Millis {
    type Error = SampleError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Samples of one tag plus the running maximum used by `append_if_new_max`.
#[derive(Debug, Default)]
struct Series {
    samples: Vec<f64>,
    max: Option<f64>,
}

impl Series {
    fn push(&mut self, value: f64) {
        self.samples.push(value);
        if self.max.map_or(true, |m| value > m) {
            self.max = Some(value);
        }
    }

    fn reset(&mut self) {
        self.samples.clear();
        self.max = None;
    }
}

/// Tag-keyed sample store shared by concurrent callers.
#[derive(Debug)]
pub struct Recorder {
    records: RwLock<HashMap<String, Series>>,
}

impl Recorder {
    /// Create a new empty recorder.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Append a sample at the end of the tag's sequence.
    pub fn append(&self, tag: &str, sample: Millis) {
        let mut records = self.records.write();
        series_mut(&mut records, tag).push(sample.get());
        trace!(tag, sample_ms = sample.get(), "sample appended");
    }

    /// Append only if `sample > threshold`. Returns whether it was stored.
    pub fn append_if_above(&self, tag: &str, sample: Millis, threshold: Millis) -> bool {
        if sample.get() <= threshold.get() {
            return false;
        }
        self.append(tag, sample);
        true
    }

    /// Always append; return whether the sample exceeds every earlier sample
    /// of the tag.
    ///
    /// Ties are not a new maximum. The first sample of an empty sequence is.
    pub fn append_if_new_max(&self, tag: &str, sample: Millis) -> bool {
        let value = sample.get();
        let mut records = self.records.write();
        let series = series_mut(&mut records, tag);
        let is_new_max = series.max.map_or(true, |m| value > m);
        series.push(value);
        trace!(tag, sample_ms = value, is_new_max, "sample appended");
        is_new_max
    }

    /// Reset the tag's sequence to empty. The tag stays known.
    pub fn clear(&self, tag: &str) {
        let mut records = self.records.write();
        series_mut(&mut records, tag).reset();
        trace!(tag, "samples cleared");
    }

    /// Reset every known tag to empty.
    pub fn clear_all(&self) {
        let mut records = self.records.write();
        records.values_mut().for_each(Series::reset);
        trace!(tags = records.len(), "all samples cleared");
    }

    /// Copy of the tag's samples in recording order. Unknown tags yield an
    /// empty vector.
    pub fn snapshot(&self, tag: &str) -> Vec<f64> {
        self.records
            .read()
            .get(tag)
            .map(|series| series.samples.clone())
            .unwrap_or_default()
    }

    /// Whether the tag was ever recorded or cleared.
    pub fn contains(&self, tag: &str) -> bool {
        self.records.read().contains_key(tag)
    }

    /// Number of samples stored for the tag.
    pub fn len(&self, tag: &str) -> usize {
        self.records.read().get(tag).map_or(0, |s| s.samples.len())
    }

    /// All known tags, sorted.
    pub fn tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self.records.read().keys().cloned().collect();
        tags.sort();
        tags
    }
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new()
    }
}

fn series_mut<'a>(records: &'a mut HashMap<String, Series>, tag: &str) -> &'a mut Series {
    records.entry(tag.to_string()).or_default()
}
