// Copyright 2024-2026 Ledge Contributors
// SPDX-License-Identifier: Apache-2.0

//! `ledge demo`: a guided tour of the public API.
//!
//! Sleeps stand in for real work. Their lengths are multiplied by
//! [`DemoOptions::scale`], so tests can run the tour with zero-length work.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use rand::Rng;

use crate::{ledge_debug, ledge_fatal, ledge_print, Ledge};

/// Knobs for the tour.
#[derive(Debug, Clone)]
pub struct DemoOptions {
    /// Multiplier applied to every simulated work duration.
    pub scale: f64,
    /// Randomize work durations by up to ±10%.
    pub jitter: bool,
    /// Threads used by the concurrent section.
    pub threads: usize,
    /// Records per thread in the concurrent section.
    pub records_per_thread: usize,
    /// End with a `[PANIC]`, like a real fatal error would.
    pub fatal: bool,
}

impl Default for DemoOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            jitter: true,
            threads: num_cpus::get().clamp(2, 8),
            records_per_thread: 25,
            fatal: true,
        }
    }
}

impl DemoOptions {
    /// Parse `--no-fatal`, `--fast` and `--threads N` from CLI arguments.
    /// Unknown arguments are ignored.
    pub fn from_args(args: &[String]) -> Self {
        let mut opts = Self::default();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--no-fatal" => opts.fatal = false,
                "--fast" => opts.scale = 0.1,
                "--threads" => {
                    if let Some(n) = iter.next().and_then(|v| v.parse::<usize>().ok()) {
                        opts.threads = n.max(1);
                    }
                }
                _ => {}
            }
        }
        opts
    }

    fn pause(&self, millis: f64) {
        let factor = if self.jitter {
            rand::thread_rng().gen_range(0.9..1.1)
        } else {
            1.0
        };
        let ms = millis * self.scale * factor;
        if ms > 0.0 {
            thread::sleep(Duration::from_secs_f64(ms / 1000.0));
        }
    }
}

/// Run the tour on `ledge`. Global gates are flipped on `ledge.registry()`.
pub fn run_demo(ledge: Arc<Ledge>, opts: &DemoOptions) {
    let registry = Arc::clone(ledge.registry());

    // Printing is never gated.
    ledge_print!(ledge, "Test {}", 1);

    // Debug is off by default.
    ledge_debug!(ledge, "Don't show me {}", 1);
    ledge.debug_on();
    ledge_debug!(ledge, "Show me {}", 1);
    registry.debug_off();
    ledge_debug!(ledge, "Don't show me {}", 2);
    registry.debug_on();
    ledge_debug!(ledge, "Show me {}", 2);

    // Stats are off by default too: nothing is stored or printed.
    ledge.record("tag1", || {});
    ledge.count("tag1");

    ledge.stats_on();
    ledge.time("one-off", || opts.pause(13.0));
    ledge.time_above("dont-show", Duration::from_millis(13), || opts.pause(10.0));
    ledge.time_above("show", Duration::from_millis(13), || opts.pause(15.0));

    ledge_print!(ledge, "Should see 100 samples:");
    for _ in 0..100 {
        ledge.record("tag1", || opts.pause(10.0));
    }
    ledge.count("tag1");
    ledge.mean("tag1");
    ledge.median("tag1");
    ledge.percentile("tag1", 75.0);
    ledge.min("tag1");
    ledge.max("tag1");
    ledge.variance("tag1");

    ledge.clear_records("tag1");
    ledge_print!(ledge, "Should see 50 samples:");
    for _ in 0..50 {
        ledge.record("tag1", || opts.pause(2.0));
    }
    ledge.stats("tag1");

    ledge.clear_records("tag1");
    ledge_print!(ledge, "Should see just a count of 0:");
    ledge.stats("tag1");

    ledge_print!(ledge, "New maxima as they happen:");
    for i in 1..=10 {
        ledge.record_if_new_max("spiky", || opts.pause(f64::from(i % 4 + 1)));
    }

    ledge_print!(
        ledge,
        "{} threads x {} records:",
        opts.threads,
        opts.records_per_thread
    );
    let handles: Vec<_> = (0..opts.threads)
        .map(|_| {
            let ledge = Arc::clone(&ledge);
            let opts = opts.clone();
            thread::spawn(move || {
                for _ in 0..opts.records_per_thread {
                    ledge.record("parallel", || opts.pause(1.0));
                }
            })
        })
        .collect();
    for handle in handles {
        if handle.join().is_err() {
            ledge_fatal!(ledge, "recording thread panicked");
        }
    }
    ledge.stats("parallel");

    // Global stats off: nothing recorded, nothing printed.
    ledge_print!(ledge, "Should see nothing:");
    registry.stats_off();
    for _ in 0..50 {
        ledge.record("tag1", || opts.pause(2.0));
    }
    ledge.stats("tag1");

    if opts.fatal {
        ledge_fatal!(ledge, "PANICKING {:.1}", 0.5);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LineStyle, MemorySink, Stream, ToggleRegistry};

    fn quick() -> DemoOptions {
        DemoOptions {
            scale: 0.0,
            jitter: false,
            threads: 3,
            records_per_thread: 7,
            fatal: false,
        }
    }

    #[test]
    fn test_from_args() {
        let args: Vec<String> = ["--no-fatal", "--threads", "4", "--bogus"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let opts = DemoOptions::from_args(&args);
        assert!(!opts.fatal);
        assert_eq!(opts.threads, 4);
        assert_eq!(opts.scale, 1.0);
    }

    #[test]
    fn test_demo_runs_to_completion() {
        let sink = Arc::new(MemorySink::new());
        let registry = Arc::new(ToggleRegistry::new());
        let ledge = Arc::new(
            Ledge::builder(["juicebox", "A"])
                .registry(registry.clone())
                .sink(sink.clone())
                .style(LineStyle::plain())
                .debug(false)
                .stats(false)
                .build(),
        );

        run_demo(Arc::clone(&ledge), &quick());

        assert!(!registry.stats_enabled());
        assert_eq!(ledge.sample_count("parallel"), 21);
        assert_eq!(ledge.sample_count("spiky"), 10);
        assert_eq!(ledge.sample_count("tag1"), 0);

        let err = sink.stream(Stream::Err);
        assert!(err.contains(&"[juicebox A] [DEBUG] Show me 1".to_string()));
        assert!(err.contains(&"[juicebox A] [DEBUG] Show me 2".to_string()));
        assert!(!err.iter().any(|l| l.contains("Don't show me")));
        assert!(err.contains(&"[juicebox A] [tag1 COUNT] 100".to_string()));
        assert!(err.contains(&"[juicebox A] [tag1 COUNT] 50".to_string()));
        assert!(err.contains(&"[juicebox A] [parallel COUNT] 21".to_string()));

        let out = sink.stream(Stream::Out);
        assert_eq!(out.first().map(String::as_str), Some("[juicebox A] Test 1"));
    }
}
