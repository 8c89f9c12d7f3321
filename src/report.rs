//! Gated statistics accessors.
//!
//! Each accessor snapshots one tag, computes outside the lock, emits one
//! `[<tag> <KIND>] <value>` line and returns the value. With the stats gates
//! off they do nothing and return `None`. A tag without samples produces no
//! output either, except for [`count`](Ledge::count), which reports 0.
//!
//! The statistics functions only fail on empty input or an out-of-range
//! percentile. Empty input is filtered out here, so any failure that still
//! reaches an accessor is treated as fatal.

use crate::error::StatsError;
use crate::format::Highlight;
use crate::ledge::Ledge;
use crate::sink::Stream;
use crate::stats::{self, Summary};

/// Percentile reported by [`Ledge::stats`].
const SUMMARY_PERCENTILE: f64 = 99.0;

impl Ledge {
    fn emit_stat(&self, tag: &str, kind: &str, value: &str) {
        let body = format!("{} {}", self.style().tag(Highlight::Stat, tag, kind), value);
        self.emit(Stream::Err, &body);
    }

    fn aggregate(
        &self,
        tag: &str,
        kind: &str,
        compute: impl FnOnce(&[f64]) -> Result<f64, StatsError>,
    ) -> Option<f64> {
        if !self.stats_enabled() {
            return None;
        }
        let samples = self.recorder().snapshot(tag);
        if samples.is_empty() {
            return None;
        }
        let value = match compute(&samples) {
            Ok(value) => value,
            Err(e) => self.fatal(format_args!("{kind} of {tag}: {e}")),
        };
        self.emit_stat(tag, kind, &format!("{value:.6}"));
        Some(value)
    }

    /// Number of samples stored under `tag`.
    pub fn count(&self, tag: &str) -> Option<usize> {
        if !self.stats_enabled() {
            return None;
        }
        let n = stats::count(&self.recorder().snapshot(tag));
        self.emit_stat(tag, "COUNT", &n.to_string());
        Some(n)
    }

    pub fn mean(&self, tag: &str) -> Option<f64> {
        self.aggregate(tag, "MEAN", stats::mean)
    }

    pub fn median(&self, tag: &str) -> Option<f64> {
        self.aggregate(tag, "MEDIAN", stats::median)
    }

    /// Nearest-rank percentile, `p` in `[0, 100]`. Any other `p` is fatal.
    pub fn percentile(&self, tag: &str, p: f64) -> Option<f64> {
        let kind = format!("PERC-{p}");
        self.aggregate(tag, &kind, |samples| stats::percentile(samples, p))
    }

    pub fn min(&self, tag: &str) -> Option<f64> {
        self.aggregate(tag, "MIN", stats::min)
    }

    pub fn max(&self, tag: &str) -> Option<f64> {
        self.aggregate(tag, "MAX", stats::max)
    }

    /// Population variance.
    pub fn variance(&self, tag: &str) -> Option<f64> {
        self.aggregate(tag, "VARIANCE", stats::variance)
    }

    /// Emit count, min, median, p99, max, mean and variance from one snapshot.
    ///
    /// A tag without samples only reports its count of 0.
    pub fn stats(&self, tag: &str) -> Option<Summary> {
        if !self.stats_enabled() {
            return None;
        }
        let samples = self.recorder().snapshot(tag);
        let Some(summary) = Summary::from_samples(&samples) else {
            self.emit_stat(tag, "COUNT", "0");
            return None;
        };

        self.emit_stat(tag, "COUNT", &summary.count.to_string());
        let perc = format!("PERC-{SUMMARY_PERCENTILE}");
        for (kind, value) in [
            ("MIN", summary.min),
            ("MEDIAN", summary.median),
            (perc.as_str(), summary.p99),
            ("MAX", summary.max),
            ("MEAN", summary.mean),
            ("VARIANCE", summary.variance),
        ] {
            self.emit_stat(tag, kind, &format!("{value:.6}"));
        }
        Some(summary)
    }

    /// [`stats`](Self::stats) for every known tag, in tag order.
    pub fn stats_all(&self) -> Vec<(String, Option<Summary>)> {
        if !self.stats_enabled() {
            return Vec::new();
        }
        self.tags()
            .into_iter()
            .map(|tag| {
                let summary = self.stats(&tag);
                (tag, summary)
            })
            .collect()
    }
}
