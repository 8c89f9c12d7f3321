//! Timing primitive tests with a manual clock.

use std::sync::Arc;
use std::time::Duration;

use ledge::{Ledge, LineStyle, ManualClock, MemorySink, Stream, ToggleRegistry};

struct Fixture {
    ledge: Ledge,
    clock: ManualClock,
    sink: Arc<MemorySink>,
}

fn fixture() -> Fixture {
    let clock = ManualClock::new();
    let sink = Arc::new(MemorySink::new());
    let ledge = Ledge::builder(["svc"])
        .registry(Arc::new(ToggleRegistry::new()))
        .clock(Arc::new(clock.clone()))
        .sink(sink.clone())
        .style(LineStyle::plain())
        .stats(true)
        .build();
    Fixture { ledge, clock, sink }
}

#[test]
fn record_above_stores_strictly_slower_work() {
    let f = fixture();
    let threshold = Duration::from_millis(10);

    f.ledge
        .record_above("t", threshold, || f.clock.advance(Duration::from_millis(9)));
    f.ledge.record_above("t", threshold, || f.clock.advance(threshold));
    assert_eq!(f.ledge.sample_count("t"), 0);

    f.ledge.record_above("t", threshold, || {
        f.clock.advance(threshold + Duration::from_nanos(1000))
    });
    assert_eq!(f.ledge.recorder().snapshot("t"), vec![10.001]);
    assert!(f.sink.is_empty());
}

#[test]
fn record_stores_elapsed_milliseconds() {
    let f = fixture();
    for ms in [5, 15, 10] {
        f.ledge
            .record("t", || f.clock.advance(Duration::from_millis(ms)));
    }
    assert_eq!(f.ledge.recorder().snapshot("t"), vec![5.0, 15.0, 10.0]);
    assert_eq!(f.ledge.mean("t"), Some(10.0));
}

#[test]
fn primitives_return_work_output() {
    let f = fixture();
    let threshold = Duration::from_millis(1);
    assert_eq!(f.ledge.time("a", || 1), 1);
    assert_eq!(f.ledge.time_above("a", threshold, || 2), 2);
    assert_eq!(f.ledge.record("a", || 3), 3);
    assert_eq!(f.ledge.record_above("a", threshold, || 4), 4);
    assert_eq!(f.ledge.record_and_print("a", || 5), 5);
    assert_eq!(f.ledge.record_and_print_above("a", threshold, || 6), 6);
    assert_eq!(f.ledge.record_if_new_max("a", || 7), 7);
    assert_eq!(f.ledge.record_if_new_max_above("a", threshold, || 8), 8);
}

#[test]
fn work_runs_exactly_once_in_every_gate_state() {
    let f = fixture();
    let mut runs = 0;
    f.ledge.record("t", || runs += 1);
    f.ledge.stats_off();
    f.ledge.record("t", || runs += 1);
    f.ledge.time("t", || runs += 1);
    f.ledge.record_if_new_max("t", || runs += 1);
    assert_eq!(runs, 4);
    assert_eq!(f.ledge.sample_count("t"), 1);
}

#[test]
fn clear_then_record_again() {
    let f = fixture();
    f.ledge
        .record("t", || f.clock.advance(Duration::from_millis(1)));
    f.ledge.clear_records("t");
    assert_eq!(f.ledge.count("t"), Some(0));

    f.ledge
        .record("t", || f.clock.advance(Duration::from_millis(2)));
    assert_eq!(f.ledge.count("t"), Some(1));
    assert_eq!(f.ledge.max("t"), Some(2.0));
}

#[test]
fn new_max_after_clear_starts_over() {
    let f = fixture();
    f.ledge
        .record_if_new_max("t", || f.clock.advance(Duration::from_millis(50)));
    f.ledge.clear_records("t");
    f.ledge
        .record_if_new_max("t", || f.clock.advance(Duration::from_millis(5)));
    assert_eq!(
        f.sink.stream(Stream::Err),
        vec!["[svc] [t NEW MAX] 50ms", "[svc] [t NEW MAX] 5ms"]
    );
}

#[test]
fn measurement_lines_go_to_diagnostic_stream() {
    let f = fixture();
    f.ledge
        .time("t", || f.clock.advance(Duration::from_millis(3)));
    assert!(f.sink.stream(Stream::Out).is_empty());
    assert_eq!(f.sink.stream(Stream::Err).len(), 1);
}
