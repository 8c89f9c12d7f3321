//! Enable/disable gates for debug output and statistics.
//!
//! Every gated action checks two gates: the one owned by the [`crate::Ledge`]
//! instance and the one in the [`ToggleRegistry`] it was built with. The action
//! proceeds only when both are enabled.
//!
//! Gates are plain atomics. Writes use `Release` and reads use `Acquire`, so a
//! flip is visible to any thread that reads the gate afterwards without further
//! locking.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use tracing::debug;

use crate::config;

static PROCESS_REGISTRY: OnceLock<Arc<ToggleRegistry>> = OnceLock::new();

/// A pair of debug/stats gates.
#[derive(Debug)]
pub struct Toggles {
    debug: AtomicBool,
    stats: AtomicBool,
}

impl Toggles {
    pub fn new(debug: bool, stats: bool) -> Self {
        Self {
            debug: AtomicBool::new(debug),
            stats: AtomicBool::new(stats),
        }
    }

    pub fn set_debug(&self, enabled: bool) {
        self.debug.store(enabled, Ordering::Release);
    }

    pub fn set_stats(&self, enabled: bool) {
        self.stats.store(enabled, Ordering::Release);
    }

    pub fn debug(&self) -> bool {
        self.debug.load(Ordering::Acquire)
    }

    pub fn stats(&self) -> bool {
        self.stats.load(Ordering::Acquire)
    }
}

/// Process-wide gates shared by every instance built with the same registry.
///
/// Defaults: both gates enabled. Instances start with their own gates disabled,
/// so nothing is printed or recorded until an instance opts in.
#[derive(Debug)]
pub struct ToggleRegistry {
    gates: Toggles,
}

impl ToggleRegistry {
    /// Create a registry with both gates enabled.
    pub fn new() -> Self {
        Self::with_defaults(true, true)
    }

    /// Create a registry with explicit initial gate states.
    pub fn with_defaults(debug: bool, stats: bool) -> Self {
        Self {
            gates: Toggles::new(debug, stats),
        }
    }

    /// The registry shared by instances that were not given one explicitly.
    ///
    /// Created on first use from `LEDGE_GLOBAL_DEBUG` / `LEDGE_GLOBAL_STATS`.
    pub fn process() -> Arc<ToggleRegistry> {
        PROCESS_REGISTRY
            .get_or_init(|| {
                let cfg = config::load();
                Arc::new(Self::with_defaults(cfg.global_debug, cfg.global_stats))
            })
            .clone()
    }

    pub fn debug_on(&self) {
        debug!(gate = "debug", scope = "global", "gate enabled");
        self.gates.set_debug(true);
    }

    pub fn debug_off(&self) {
        debug!(gate = "debug", scope = "global", "gate disabled");
        self.gates.set_debug(false);
    }

    pub fn stats_on(&self) {
        debug!(gate = "stats", scope = "global", "gate enabled");
        self.gates.set_stats(true);
    }

    pub fn stats_off(&self) {
        debug!(gate = "stats", scope = "global", "gate disabled");
        self.gates.set_stats(false);
    }

    pub fn debug_enabled(&self) -> bool {
        self.gates.debug()
    }

    pub fn stats_enabled(&self) -> bool {
        self.gates.stats()
    }
}

impl Default for ToggleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
