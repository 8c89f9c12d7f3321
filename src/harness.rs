//! Timing primitives.
//!
//! Every primitive runs `work` exactly once on the calling thread and returns
//! its result, whatever the gates say. The gates only decide whether the
//! elapsed time is stored and/or printed. That decision is taken once, before
//! `work` starts; flipping a gate while `work` runs does not affect the call.
//!
//! | Primitive | Stores | Prints |
//! |---|---|---|
//! | [`time`](Ledge::time) | no | always |
//! | [`time_above`](Ledge::time_above) | no | if elapsed > threshold |
//! | [`record`](Ledge::record) | always | no |
//! | [`record_above`](Ledge::record_above) | if elapsed > threshold | no |
//! | [`record_and_print`](Ledge::record_and_print) | always | always |
//! | [`record_and_print_above`](Ledge::record_and_print_above) | if elapsed > threshold | if elapsed > threshold |
//! | [`record_if_new_max`](Ledge::record_if_new_max) | always | if new maximum |
//! | [`record_if_new_max_above`](Ledge::record_if_new_max_above) | if elapsed > threshold | if new maximum |

use std::time::Duration;

use crate::format::Highlight;
use crate::ledge::Ledge;
use crate::recorder::Millis;
use crate::sink::Stream;

impl Ledge {
    fn measure<T>(&self, work: impl FnOnce() -> T) -> (T, Duration) {
        let clock = self.clock();
        let start = clock.now();
        let out = work();
        (out, clock.now().saturating_duration_since(start))
    }

    fn emit_elapsed(&self, tag: &str, kind: &str, elapsed: Duration) {
        let body = format!(
            "{} {:?}",
            self.style().tag(Highlight::Measure, tag, kind),
            elapsed
        );
        self.emit(Stream::Err, &body);
    }

    /// Run `work` and print how long it took.
    pub fn time<T>(&self, tag: &str, work: impl FnOnce() -> T) -> T {
        let gated = self.stats_enabled();
        let (out, elapsed) = self.measure(work);
        if gated {
            self.emit_elapsed(tag, "MEASURE", elapsed);
        }
        out
    }

    /// Run `work` and print how long it took if that exceeds `threshold`.
    pub fn time_above<T>(&self, tag: &str, threshold: Duration, work: impl FnOnce() -> T) -> T {
        let gated = self.stats_enabled();
        let (out, elapsed) = self.measure(work);
        if gated && elapsed > threshold {
            self.emit_elapsed(tag, "MEASURE", elapsed);
        }
        out
    }

    /// Run `work` and store the elapsed time under `tag`.
    pub fn record<T>(&self, tag: &str, work: impl FnOnce() -> T) -> T {
        let gated = self.stats_enabled();
        let (out, elapsed) = self.measure(work);
        if gated {
            self.recorder().append(tag, Millis::from(elapsed));
        }
        out
    }

    /// Run `work` and store the elapsed time if it exceeds `threshold`.
    pub fn record_above<T>(&self, tag: &str, threshold: Duration, work: impl FnOnce() -> T) -> T {
        let gated = self.stats_enabled();
        let (out, elapsed) = self.measure(work);
        if gated {
            self.recorder()
                .append_if_above(tag, Millis::from(elapsed), Millis::from(threshold));
        }
        out
    }

    /// Run `work`, store and print the elapsed time.
    pub fn record_and_print<T>(&self, tag: &str, work: impl FnOnce() -> T) -> T {
        let gated = self.stats_enabled();
        let (out, elapsed) = self.measure(work);
        if gated {
            self.recorder().append(tag, Millis::from(elapsed));
            self.emit_elapsed(tag, "RECORD", elapsed);
        }
        out
    }

    /// Run `work`; store and print the elapsed time if it exceeds `threshold`.
    pub fn record_and_print_above<T>(
        &self,
        tag: &str,
        threshold: Duration,
        work: impl FnOnce() -> T,
    ) -> T {
        let gated = self.stats_enabled();
        let (out, elapsed) = self.measure(work);
        if gated
            && self
                .recorder()
                .append_if_above(tag, Millis::from(elapsed), Millis::from(threshold))
        {
            self.emit_elapsed(tag, "RECORD", elapsed);
        }
        out
    }

    /// Run `work` and store the elapsed time; print it only when it beats
    /// every earlier sample of `tag`.
    pub fn record_if_new_max<T>(&self, tag: &str, work: impl FnOnce() -> T) -> T {
        let gated = self.stats_enabled();
        let (out, elapsed) = self.measure(work);
        if gated && self.recorder().append_if_new_max(tag, Millis::from(elapsed)) {
            self.emit_elapsed(tag, "NEW MAX", elapsed);
        }
        out
    }

    /// Like [`record_if_new_max`](Self::record_if_new_max), but samples at or
    /// below `threshold` are neither stored nor compared.
    pub fn record_if_new_max_above<T>(
        &self,
        tag: &str,
        threshold: Duration,
        work: impl FnOnce() -> T,
    ) -> T {
        let gated = self.stats_enabled();
        let (out, elapsed) = self.measure(work);
        if gated
            && elapsed > threshold
            && self.recorder().append_if_new_max(tag, Millis::from(elapsed))
        {
            self.emit_elapsed(tag, "NEW MAX", elapsed);
        }
        out
    }
}
