//! Optional wall-time accounting per named operation.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

const OPERATION_COL_WIDTH: usize = 75;
const CALLS_COL_WIDTH: usize = 10;
const TOTAL_TIME_COL_WIDTH: usize = 15;
const AVG_TIME_COL_WIDTH: usize = 15;

#[derive(Debug, Clone, Default)]
struct OperationStats {
    total: Duration,
    calls: u64,
}

#[derive(Default)]
struct Entries {
    /// Operation names in first-recorded order
    order: Vec<String>,
    stats: HashMap<String, OperationStats>,
}

/// Thread-safe recorder shared by all branches. A disabled recorder ignores everything.
pub struct Benchmark {
    enabled: bool,
    entries: Mutex<Entries>,
}

impl Benchmark {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            entries: Mutex::new(Entries::default()),
        }
    }

    /// Add the time elapsed since `started` to `operation`
    pub fn record(&self, operation: &str, started: Instant) {
        if self.enabled {
            self.record_duration(operation, started.elapsed());
        }
    }

    pub fn record_duration(&self, operation: &str, elapsed: Duration) {
        if !self.enabled {
            return;
        }

        let mut entries = self.entries.lock();
        if !entries.stats.contains_key(operation) {
            entries.order.push(operation.to_string());
        }
        let stats = entries.stats.entry(operation.to_string()).or_default();
        stats.total += elapsed;
        stats.calls += 1;
    }

    /// Render the report table, or `None` when disabled or nothing was recorded
    pub fn report(&self) -> Option<String> {
        if !self.enabled {
            return None;
        }

        let entries = self.entries.lock();
        if entries.order.is_empty() {
            return None;
        }

        let line = horizontal_line();
        let mut out = String::new();
        let _ = writeln!(out, "\n=== Benchmark Report ===");
        let _ = writeln!(out, "{line}");
        let header = format_row("Operation", "Calls", "Total Time(ms)", "Avg Time(ms)");
        let _ = writeln!(out, "{header}");
        let _ = writeln!(out, "{line}");

        for name in &entries.order {
            let Some(stats) = entries.stats.get(name) else {
                continue;
            };
            let total_ms = stats.total.as_millis();
            let avg_ms = stats.total.as_secs_f64() * 1000.0 / stats.calls as f64;
            let row = format_row(
                name,
                &stats.calls.to_string(),
                &total_ms.to_string(),
                &format!("{avg_ms:.2}"),
            );
            let _ = writeln!(out, "{row}");
        }

        let _ = writeln!(out, "{line}");
        Some(out)
    }
}

fn horizontal_line() -> String {
    format!(
        "+{}+{}+{}+{}+",
        "-".repeat(OPERATION_COL_WIDTH),
        "-".repeat(CALLS_COL_WIDTH),
        "-".repeat(TOTAL_TIME_COL_WIDTH),
        "-".repeat(AVG_TIME_COL_WIDTH)
    )
}

fn format_row(operation: &str, calls: &str, total: &str, avg: &str) -> String {
    format!(
        "| {:<ow$}| {:>cw$}| {:>tw$}| {:>aw$}|",
        operation,
        calls,
        total,
        avg,
        ow = OPERATION_COL_WIDTH - 1,
        cw = CALLS_COL_WIDTH - 1,
        tw = TOTAL_TIME_COL_WIDTH - 1,
        aw = AVG_TIME_COL_WIDTH - 1,
    )
}
