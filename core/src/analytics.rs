use crate::station::Station;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-tick classification counts gathered by the driver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickCounters {
    pub ticks: u64,
    pub utilization_ticks: u64,
    pub idle_ticks: u64,
    pub collision_events: u64,
}

/// Everything a statistics sink needs from one completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    pub counters: TickCounters,
    pub successes: Vec<u64>,
    pub failures: Vec<u64>,
    pub drops: Vec<u64>,
    pub elapsed: Duration,
}

impl RunStats {
    pub fn collect(counters: TickCounters, stations: &[Station], elapsed: Duration) -> Self {
        Self {
            counters,
            successes: stations.iter().map(|s| s.total_success).collect(),
            failures: stations.iter().map(|s| s.total_fail).collect(),
            drops: stations.iter().map(|s| s.total_drop).collect(),
            elapsed,
        }
    }

    pub fn utilization_pct(&self) -> f64 {
        percent(self.counters.utilization_ticks, self.counters.ticks)
    }

    pub fn idle_pct(&self) -> f64 {
        percent(self.counters.idle_ticks, self.counters.ticks)
    }

    pub fn total_success(&self) -> u64 {
        self.successes.iter().sum()
    }

    pub fn total_fail(&self) -> u64 {
        self.failures.iter().sum()
    }

    pub fn total_dropped(&self) -> u64 {
        self.drops.iter().sum()
    }

    pub fn success_variance(&self) -> f64 {
        variance(&self.successes)
    }

    pub fn failure_variance(&self) -> f64 {
        variance(&self.failures)
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            utilization_pct: self.utilization_pct(),
            idle_pct: self.idle_pct(),
            collision_events: self.counters.collision_events,
            dropped: self.total_dropped(),
            success_variance: self.success_variance(),
            failure_variance: self.failure_variance(),
        }
    }
}

/// The derived statistics tuple reported per run and per sweep point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub utilization_pct: f64,
    pub idle_pct: f64,
    pub collision_events: u64,
    pub dropped: u64,
    pub success_variance: f64,
    pub failure_variance: f64,
}

fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

/// Population variance.
pub fn variance(values: &[u64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().map(|&v| v as f64).sum::<f64>() / n;
    values
        .iter()
        .map(|&v| {
            let d = v as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n
}
