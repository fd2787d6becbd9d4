//! Per-call instrumentation for the graph algorithms.
//!
//! Every algorithm takes a `&mut impl Metrics` and reports into it: one timed
//! span around the whole call plus named operation counters. The recorder is
//! owned by the caller, so two calls never share counters and tests can assert
//! exact operation counts.
//!
//! Counter names used by the algorithms:
//!
//! | Algorithm        | Counters |
//! |------------------|----------|
//! | Tarjan SCC       | `dfs_visits`, `edges_explored`, `stack_pops` |
//! | Condensation     | `edges_scanned`, `condensed_edges` |
//! | Kahn sort        | `edges_scanned`, `queue_pushes`, `queue_pops`, `in_degree_updates` |
//! | DAG path solvers | `relaxations`, `distance_updates` |

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::time::{Duration, Instant};

use serde::Serialize;
use serde_json::json;

/// Instrumentation sink passed into each algorithm call.
pub trait Metrics {
    /// Mark the start of the timed span.
    fn start_timing(&mut self);

    /// Mark the end of the timed span.
    fn stop_timing(&mut self);

    /// Add one to the named counter.
    fn increment(&mut self, counter: &'static str);

    /// Snapshot of the elapsed time and all counters.
    fn report(&self) -> MetricsReport;
}

/// Discards everything. Used where a call must not pollute the caller's
/// counters (the path solvers' internal topological sort).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMetrics;

impl Metrics for NoopMetrics {
    fn start_timing(&mut self) {}

    fn stop_timing(&mut self) {}

    fn increment(&mut self, _counter: &'static str) {}

    fn report(&self) -> MetricsReport {
        MetricsReport::default()
    }
}

/// Wall-clock timer plus named counters for one algorithm call.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    started: Option<Instant>,
    elapsed: Duration,
    counters: BTreeMap<&'static str, u64>,
}

impl Recorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of `name`, zero when never incremented.
    #[must_use]
    pub fn counter(&self, name: &str) -> u64 {
        self.counters.get(name).copied().unwrap_or(0)
    }

    /// Duration of the last completed span.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Clear the timer and every counter.
    pub fn reset(&mut self) {
        self.started = None;
        self.elapsed = Duration::ZERO;
        self.counters.clear();
    }
}

impl Metrics for Recorder {
    fn start_timing(&mut self) {
        self.started = Some(Instant::now());
    }

    fn stop_timing(&mut self) {
        if let Some(started) = self.started.take() {
            self.elapsed = started.elapsed();
        }
    }

    fn increment(&mut self, counter: &'static str) {
        *self.counters.entry(counter).or_insert(0) += 1;
    }

    fn report(&self) -> MetricsReport {
        MetricsReport {
            elapsed: self.elapsed,
            counters: self
                .counters
                .iter()
                .map(|(name, value)| ((*name).to_string(), *value))
                .collect(),
        }
    }
}

/// Summary produced by [`Metrics::report`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricsReport {
    /// Time spent inside the instrumented call.
    #[serde(rename = "elapsed_us", serialize_with = "serialize_micros")]
    pub elapsed: Duration,
    /// Counter values, sorted by name.
    pub counters: BTreeMap<String, u64>,
}

impl MetricsReport {
    /// Returns true when nothing was counted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    /// Render the report as JSON.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "elapsed_us": self.elapsed.as_micros(),
            "counters": self.counters,
        })
    }

    /// Render the report as a small block for terminal output.
    #[must_use]
    pub fn display_table(&self) -> String {
        let mut out = format!("Execution time: {}\n", format_duration(self.elapsed));
        if !self.counters.is_empty() {
            out.push_str("Operation counters:\n");
            for (name, value) in &self.counters {
                let _ = writeln!(out, "  {name:<20} {value:>10}");
            }
        }
        out
    }
}

fn serialize_micros<S: serde::Serializer>(value: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u128(value.as_micros())
}

/// Human-readable duration: `µs` below a millisecond, `ms` below a second.
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let micros = duration.as_micros();

    if micros >= 1_000_000 {
        let secs = micros / 1_000_000;
        let millis = (micros % 1_000_000) / 1_000;
        format!("{secs}.{millis:03}s")
    } else if micros >= 1_000 {
        let millis = micros / 1_000;
        let rem = micros % 1_000;
        format!("{millis}.{rem:03}ms")
    } else {
        format!("{micros}µs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate_per_name() {
        let mut rec = Recorder::new();
        rec.increment("relaxations");
        rec.increment("relaxations");
        rec.increment("distance_updates");

        assert_eq!(rec.counter("relaxations"), 2);
        assert_eq!(rec.counter("distance_updates"), 1);
        assert_eq!(rec.counter("missing"), 0);
    }

    #[test]
    fn stop_without_start_keeps_zero() {
        let mut rec = Recorder::new();
        rec.stop_timing();
        assert_eq!(rec.elapsed(), Duration::ZERO);
    }

    #[test]
    fn reset_clears_everything() {
        let mut rec = Recorder::new();
        rec.start_timing();
        rec.increment("queue_pops");
        rec.stop_timing();
        rec.reset();

        assert_eq!(rec.counter("queue_pops"), 0);
        assert_eq!(rec.elapsed(), Duration::ZERO);
        assert!(rec.report().is_empty());
    }

    #[test]
    fn noop_reports_nothing() {
        let mut noop = NoopMetrics;
        noop.start_timing();
        noop.increment("dfs_visits");
        noop.stop_timing();
        assert!(noop.report().is_empty());
    }

    #[test]
    fn display_table_and_json_have_expected_fields() {
        let mut rec = Recorder::new();
        rec.increment("stack_pops");
        let report = rec.report();

        let table = report.display_table();
        assert!(table.contains("Execution time"));
        assert!(table.contains("stack_pops"));

        let json = report.to_json();
        assert_eq!(json["counters"]["stack_pops"], serde_json::Value::from(1));
        assert!(json.get("elapsed_us").is_some());
    }

    #[test]
    fn format_duration_picks_unit() {
        assert_eq!(format_duration(Duration::from_micros(12)), "12µs");
        assert_eq!(format_duration(Duration::from_micros(1_500)), "1.500ms");
        assert_eq!(format_duration(Duration::from_micros(2_003_000)), "2.003s");
    }
}
