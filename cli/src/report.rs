use anyhow::{Context, Result};
use csma_core::{RunStats, SweepSeries};
use std::fs;
use std::path::{Path, PathBuf};

pub const CSV_HEADER: &str = "N,L,R0,M,T,Util,Idle,Collisions";

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

/// Body of the statistics file for one run.
pub fn render_output(stats: &RunStats) -> String {
    [
        format!("Channel utilization (in percentage) {}", round3(stats.utilization_pct())),
        format!("Channel idle fraction (in percentage) {}", round3(stats.idle_pct())),
        format!("Total number of collisions {}", stats.counters.collision_events),
        format!(
            "Variance in number of successful transmissions (across all nodes) {}",
            round3(stats.success_variance())
        ),
        format!(
            "Variance in number of collisions (across all nodes) {}",
            round3(stats.failure_variance())
        ),
    ]
    .iter()
    .map(|line| format!("{line}\n"))
    .collect()
}

pub fn write_output(path: &Path, stats: &RunStats) -> Result<()> {
    fs::write(path, render_output(stats))
        .with_context(|| format!("failed to write statistics to {}", path.display()))
}

pub fn write_json(path: &Path, stats: &RunStats) -> Result<()> {
    let json = serde_json::to_string_pretty(stats)?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}

pub fn render_csv(series: &SweepSeries) -> String {
    let mut out = format!("{}\n", CSV_HEADER);
    for p in &series.points {
        out.push_str(&format!(
            "{},{},{},{},{},{},{},{}\n",
            p.stations,
            series.spec.packet_len,
            series.spec.initial_window,
            series.max_retry,
            series.duration,
            p.summary.utilization_pct,
            p.summary.idle_pct,
            p.summary.collision_events
        ));
    }
    out
}

/// Writes `<dir>/<series>.csv`, creating `dir` if needed.
pub fn write_csv(dir: &Path, series: &SweepSeries) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join(format!("{}.csv", series.spec.kind));
    fs::write(&path, render_csv(series))
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}
