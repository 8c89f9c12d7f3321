//! The instrumentation handle: label, gates, recorder and output.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, error};

use crate::clock::{Clock, SystemClock};
use crate::config;
use crate::error::Fatal;
use crate::format::{Highlight, Label, LineStyle};
use crate::recorder::Recorder;
use crate::sink::{Sink, StdSink, Stream};
use crate::stats::Summary;
use crate::toggle::{ToggleRegistry, Toggles};

/// A labelled instrumentation handle.
///
/// Shares its global gates through a [`ToggleRegistry`] and owns its own
/// debug/stats gates and [`Recorder`]. `Ledge` is `Send + Sync`; wrap it in an
/// `Arc` to record from several threads.
///
/// ```ignore
/// let ledge = Ledge::new(["juicebox", "A"]);
/// ledge.stats_on();
/// ledge.record("load", || load_config());
/// ledge.stats("load");
/// ```
#[derive(Debug)]
pub struct Ledge {
    label: Label,
    recorder: Recorder,
    toggles: Toggles,
    registry: Arc<ToggleRegistry>,
    sink: Arc<dyn Sink>,
    clock: Arc<dyn Clock>,
    style: LineStyle,
}

/// Builder for [`Ledge`]. Anything left unset comes from the environment
/// (see [`crate::config`]) or the process-wide defaults.
#[derive(Debug, Default)]
pub struct LedgeBuilder {
    components: Vec<String>,
    registry: Option<Arc<ToggleRegistry>>,
    sink: Option<Arc<dyn Sink>>,
    clock: Option<Arc<dyn Clock>>,
    style: Option<LineStyle>,
    debug: Option<bool>,
    stats: Option<bool>,
}

impl LedgeBuilder {
    pub fn new<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            components: components
                .into_iter()
                .map(|c| c.as_ref().to_string())
                .collect(),
            ..Self::default()
        }
    }

    /// Global gates to observe. Defaults to [`ToggleRegistry::process`].
    pub fn registry(mut self, registry: Arc<ToggleRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Where lines go. Defaults to [`StdSink`].
    pub fn sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Time source for measurements. Defaults to [`SystemClock`].
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn style(mut self, style: LineStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Initial state of the instance debug gate.
    pub fn debug(mut self, enabled: bool) -> Self {
        self.debug = Some(enabled);
        self
    }

    /// Initial state of the instance stats gate.
    pub fn stats(mut self, enabled: bool) -> Self {
        self.stats = Some(enabled);
        self
    }

    pub fn build(self) -> Ledge {
        let cfg = config::load();
        Ledge {
            label: Label::new(&self.components),
            recorder: Recorder::new(),
            toggles: Toggles::new(
                self.debug.unwrap_or(cfg.debug),
                self.stats.unwrap_or(cfg.stats),
            ),
            registry: self.registry.unwrap_or_else(ToggleRegistry::process),
            sink: self.sink.unwrap_or_else(|| Arc::new(StdSink)),
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            style: self.style.unwrap_or(cfg.style),
        }
    }
}

impl Ledge {
    /// Build a ledge labelled with `components`, everything else default.
    pub fn new<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        LedgeBuilder::new(components).build()
    }

    pub fn builder<I, S>(components: I) -> LedgeBuilder
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        LedgeBuilder::new(components)
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn recorder(&self) -> &Recorder {
        &self.recorder
    }

    pub fn registry(&self) -> &Arc<ToggleRegistry> {
        &self.registry
    }

    pub(crate) fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub(crate) fn style(&self) -> &LineStyle {
        &self.style
    }

    // -- gates --

    pub fn debug_on(&self) {
        debug!(label = self.label.as_str(), gate = "debug", "gate enabled");
        self.toggles.set_debug(true);
    }

    pub fn debug_off(&self) {
        debug!(label = self.label.as_str(), gate = "debug", "gate disabled");
        self.toggles.set_debug(false);
    }

    pub fn stats_on(&self) {
        debug!(label = self.label.as_str(), gate = "stats", "gate enabled");
        self.toggles.set_stats(true);
    }

    pub fn stats_off(&self) {
        debug!(label = self.label.as_str(), gate = "stats", "gate disabled");
        self.toggles.set_stats(false);
    }

    /// Instance debug gate AND global debug gate.
    pub fn debug_enabled(&self) -> bool {
        self.toggles.debug() && self.registry.debug_enabled()
    }

    /// Instance stats gate AND global stats gate.
    pub fn stats_enabled(&self) -> bool {
        self.toggles.stats() && self.registry.stats_enabled()
    }

    // -- output --

    pub(crate) fn emit(&self, stream: Stream, body: &str) {
        self.sink.emit(stream, &self.style.render(&self.label, body));
    }

    /// Emit to the normal output stream, ungated.
    pub fn print(&self, args: fmt::Arguments<'_>) {
        self.emit(Stream::Out, &args.to_string());
    }

    /// Emit to the diagnostic stream, ungated.
    pub fn always(&self, args: fmt::Arguments<'_>) {
        self.emit(Stream::Err, &args.to_string());
    }

    /// Emit a `[DEBUG]` line if both debug gates are enabled.
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        if !self.debug_enabled() {
            return;
        }
        let body = format!("{} {}", self.style.paint(Highlight::Debug, "[DEBUG]"), args);
        self.emit(Stream::Err, &body);
    }

    /// Emit a `[PANIC]` line and unwind with a [`Fatal`] payload.
    pub fn fatal(&self, args: fmt::Arguments<'_>) -> ! {
        let message = args.to_string();
        error!(label = self.label.as_str(), %message, "fatal");
        let body = format!("{} {}", self.style.paint(Highlight::Panic, "[PANIC]"), message);
        self.emit(Stream::Err, &body);
        std::panic::panic_any(Fatal::new(message))
    }

    /// Unwrap `result`, or go [`fatal`](Self::fatal) with `"<args>: <error>"`.
    pub fn check<T, E: fmt::Display>(&self, result: Result<T, E>, args: fmt::Arguments<'_>) -> T {
        match result {
            Ok(value) => value,
            Err(e) => self.fatal(format_args!("{args}: {e}")),
        }
    }

    // -- recorded data, ungated --

    /// Reset a tag's samples. The tag stays known.
    pub fn clear_records(&self, tag: &str) {
        self.recorder.clear(tag);
    }

    pub fn clear_all_records(&self) {
        self.recorder.clear_all();
    }

    /// Number of stored samples, regardless of gates.
    pub fn sample_count(&self, tag: &str) -> usize {
        self.recorder.len(tag)
    }

    /// Summary of a tag's samples, regardless of gates. Emits nothing.
    pub fn summary(&self, tag: &str) -> Option<Summary> {
        Summary::from_samples(&self.recorder.snapshot(tag))
    }

    /// All tags recorded or cleared on this instance, sorted.
    pub fn tags(&self) -> Vec<String> {
        self.recorder.tags()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use std::panic::{self, AssertUnwindSafe};

    fn quiet(registry: Arc<ToggleRegistry>) -> (Ledge, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let ledge = Ledge::builder(["unit"])
            .registry(registry)
            .sink(sink.clone())
            .style(LineStyle::plain())
            .debug(false)
            .stats(false)
            .build();
        (ledge, sink)
    }

    #[test]
    fn print_goes_to_out_and_always_to_err() {
        let (ledge, sink) = quiet(Arc::new(ToggleRegistry::new()));
        ledge.print(format_args!("Test {}", 1));
        ledge.always(format_args!("x={:.1}", 0.26));
        assert_eq!(sink.stream(Stream::Out), vec!["[unit] Test 1"]);
        assert_eq!(sink.stream(Stream::Err), vec!["[unit] x=0.3"]);
    }

    #[test]
    fn debug_needs_both_gates() {
        let registry = Arc::new(ToggleRegistry::new());
        let (ledge, sink) = quiet(registry.clone());

        ledge.debug(format_args!("hidden"));
        ledge.debug_on();
        ledge.debug(format_args!("shown {}", 1));
        registry.debug_off();
        ledge.debug(format_args!("hidden"));
        registry.debug_on();
        ledge.debug(format_args!("shown {}", 2));

        assert_eq!(
            sink.stream(Stream::Err),
            vec!["[unit] [DEBUG] shown 1", "[unit] [DEBUG] shown 2"]
        );
    }

    #[test]
    fn debug_never_touches_recorder() {
        let (ledge, _sink) = quiet(Arc::new(ToggleRegistry::new()));
        ledge.debug_on();
        ledge.debug(format_args!("noise"));
        assert!(ledge.tags().is_empty());
    }

    #[test]
    fn fatal_emits_then_unwinds() {
        let (ledge, sink) = quiet(Arc::new(ToggleRegistry::new()));
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            ledge.fatal(format_args!("PANICKING {:.1}", 0.5));
        }));
        let payload = result.unwrap_err();
        let fatal = payload.downcast_ref::<Fatal>().unwrap();
        assert_eq!(fatal.message(), "PANICKING 0.5");
        assert_eq!(sink.stream(Stream::Err), vec!["[unit] [PANIC] PANICKING 0.5"]);
    }

    #[test]
    fn check_passes_ok_through() {
        let (ledge, sink) = quiet(Arc::new(ToggleRegistry::new()));
        let value = ledge.check(Ok::<_, String>(7), format_args!("unused"));
        assert_eq!(value, 7);
        assert!(sink.is_empty());
    }

    #[test]
    fn check_turns_err_into_fatal() {
        let (ledge, _sink) = quiet(Arc::new(ToggleRegistry::new()));
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            ledge.check(Err::<(), _>("no such file"), format_args!("opening {}", "a.txt"))
        }));
        let payload = result.unwrap_err();
        let fatal = payload.downcast_ref::<Fatal>().unwrap();
        assert_eq!(fatal.message(), "opening a.txt: no such file");
    }

    #[test]
    fn empty_components_have_no_prefix() {
        let sink = Arc::new(MemorySink::new());
        let ledge = Ledge::builder(Vec::<&str>::new())
            .registry(Arc::new(ToggleRegistry::new()))
            .sink(sink.clone())
            .style(LineStyle::plain())
            .build();
        ledge.always(format_args!("bare"));
        assert_eq!(sink.stream(Stream::Err), vec!["bare"]);
    }
}
