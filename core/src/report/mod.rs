//! Markdown and JSON export of benchmark results.

use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::perf::RunOutcome;
use crate::perf::alloc::AllocStats;
use crate::strategy::StrategyKind;

#[cfg(test)]
mod report_test;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyMetrics {
    pub strategy: String,
    pub title: String,
    pub complexity: String,
    pub scale: usize,
    pub mean_ns: f64,
    pub median_ns: f64,
    pub std_dev_ns: f64,
    pub allocated_bytes: u64,
    pub allocations: u64,
    pub peak_bytes: u64,
}

/// Timing estimates for one criterion case.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimeStats {
    pub mean_ns: f64,
    pub median_ns: f64,
    pub std_dev_ns: f64,
}

impl StrategyMetrics {
    pub fn new(kind: StrategyKind, scale: usize, time: TimeStats, alloc: AllocStats) -> Self {
        Self {
            strategy: kind.key().to_string(),
            title: kind.title().to_string(),
            complexity: kind.complexity().to_string(),
            scale,
            mean_ns: time.mean_ns,
            median_ns: time.median_ns,
            std_dev_ns: time.std_dev_ns,
            allocated_bytes: alloc.allocated_bytes,
            allocations: alloc.allocations,
            peak_bytes: alloc.peak_bytes,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RunRecord {
    pub generated_at: String,
    pub git_rev: Option<String>,
    pub metrics: Vec<StrategyMetrics>,
}

impl RunRecord {
    pub fn new(timestamp: DateTime<Utc>, metrics: Vec<StrategyMetrics>) -> Self {
        let git_rev = std::env::var("GITHUB_SHA")
            .ok()
            .map(|sha| sha.chars().take(8).collect::<String>());
        Self {
            generated_at: timestamp.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            git_rev,
            metrics,
        }
    }
}

pub fn format_duration_ns(ns: f64) -> String {
    if ns >= 1_000_000_000.0 {
        format!("{:.3} s", ns / 1_000_000_000.0)
    } else if ns >= 1_000_000.0 {
        format!("{:.3} ms", ns / 1_000_000.0)
    } else if ns >= 1_000.0 {
        format!("{:.3} μs", ns / 1_000.0)
    } else {
        format!("{:.2} ns", ns)
    }
}

pub fn format_bytes(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    let b = bytes as f64;
    if b >= KB * KB {
        format!("{:.2} MB", b / (KB * KB))
    } else if b >= KB {
        format!("{:.2} KB", b / KB)
    } else {
        format!("{} B", bytes)
    }
}

/// Renders one table covering every scale. Rows are grouped by scale and keep
/// their input order inside a group; the first row of each group is the
/// baseline for the ratio column.
pub fn render_markdown(metrics: &[StrategyMetrics]) -> String {
    let mut rows: Vec<&StrategyMetrics> = metrics.iter().collect();
    rows.sort_by_key(|m| m.scale);

    let mut out = String::new();
    out.push_str("| Scale | Strategy | Complexity | Mean | Median | StdDev | Ratio | Allocated | Allocations | Peak |\n");
    out.push_str("|------:|----------|------------|-----:|-------:|-------:|------:|----------:|------------:|-----:|\n");

    let mut baseline: Option<&StrategyMetrics> = None;
    for row in rows {
        if baseline.is_none_or(|b| b.scale != row.scale) {
            baseline = Some(row);
        }
        let ratio = match baseline {
            Some(b) if b.mean_ns > 0.0 => format!("{:.2}", row.mean_ns / b.mean_ns),
            _ => "-".to_string(),
        };
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} | {} | {} | {} | {} | {} | {} |",
            row.scale,
            row.strategy,
            row.complexity,
            format_duration_ns(row.mean_ns),
            format_duration_ns(row.median_ns),
            format_duration_ns(row.std_dev_ns),
            ratio,
            format_bytes(row.allocated_bytes),
            row.allocations,
            format_bytes(row.peak_bytes),
        );
    }
    out
}

/// Compact table for single-shot runs of the standalone harness.
pub fn render_outcomes(outcomes: &[RunOutcome]) -> String {
    let mut out = String::new();
    out.push_str("| Strategy | Complexity | Scale | Rows | Elapsed |\n");
    out.push_str("|----------|------------|------:|-----:|--------:|\n");
    for outcome in outcomes {
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} | {} |",
            outcome.strategy.key(),
            outcome.strategy.complexity(),
            outcome.scale,
            outcome.rows,
            format_duration_ns(outcome.elapsed.as_nanos() as f64),
        );
    }
    out
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), value).with_context(|| format!("write {}", path.display()))
}

pub fn write_markdown(path: &Path, record: &RunRecord) -> Result<()> {
    let mut doc = String::new();
    doc.push_str("# Join strategy benchmark\n\n");
    let _ = writeln!(doc, "Generated at {}", record.generated_at);
    if let Some(rev) = &record.git_rev {
        let _ = writeln!(doc, "Revision {}", rev);
    }
    doc.push('\n');
    doc.push_str(&render_markdown(&record.metrics));
    fs::write(path, doc.as_bytes()).with_context(|| format!("write {}", path.display()))
}

#[derive(Deserialize)]
struct EstimateFile {
    mean: EstimateEntry,
    median: EstimateEntry,
    std_dev: EstimateEntry,
}

#[derive(Deserialize)]
struct EstimateEntry {
    point_estimate: f64,
}

/// Reads `<criterion_dir>/<case>/new/estimates.json` as written by criterion.
pub fn load_time_stats(criterion_dir: &Path, case: &str) -> Result<TimeStats> {
    let estimate_path = criterion_dir.join(case).join("new").join("estimates.json");
    let data = fs::read_to_string(&estimate_path).with_context(|| format!("read {}", estimate_path.display()))?;
    let estimates: EstimateFile =
        serde_json::from_str(&data).with_context(|| format!("parse {}", estimate_path.display()))?;
    Ok(TimeStats {
        mean_ns: estimates.mean.point_estimate,
        median_ns: estimates.median.point_estimate,
        std_dev_ns: estimates.std_dev.point_estimate,
    })
}
