use crate::analytics::RunSummary;
use crate::backoff::SeededBackoff;
use crate::config::SweepConfig;
use crate::engine::Simulation;
use crate::error::Result;
use crate::traits::BackoffSource;
use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which parameter a series holds away from the study defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeriesKind {
    Default,
    InitialWindow(u32),
    PacketLength(u64),
}

impl fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesKind::Default => write!(f, "default"),
            SeriesKind::InitialWindow(r0) => write!(f, "R_{}", r0),
            SeriesKind::PacketLength(l) => write!(f, "L_{}", l),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesSpec {
    pub kind: SeriesKind,
    pub packet_len: u64,
    pub initial_window: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub stations: u32,
    pub summary: RunSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepSeries {
    pub spec: SeriesSpec,
    pub max_retry: u32,
    pub duration: u64,
    pub points: Vec<SweepPoint>,
}

/// Sweeps station count over a grid of (packet length, initial window) series.
pub struct SweepRunner {
    pub config: SweepConfig,
    pub seed: u64,
}

impl SweepRunner {
    pub fn new(config: SweepConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, seed })
    }

    /// The default series, then one per initial window, then one per packet length.
    pub fn series(&self) -> Vec<SeriesSpec> {
        let c = &self.config;
        let mut out = vec![SeriesSpec {
            kind: SeriesKind::Default,
            packet_len: c.packet_len,
            initial_window: c.initial_window,
        }];
        out.extend(c.initial_windows.iter().map(|&r0| SeriesSpec {
            kind: SeriesKind::InitialWindow(r0),
            packet_len: c.packet_len,
            initial_window: r0,
        }));
        out.extend(c.packet_lens.iter().map(|&l| SeriesSpec {
            kind: SeriesKind::PacketLength(l),
            packet_len: l,
            initial_window: c.initial_window,
        }));
        out
    }

    /// Independent stream for the series at `index`.
    pub fn series_seed(&self, index: usize) -> u64 {
        self.seed ^ (index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
    }

    /// Runs one series on a single network, resizing between points.
    /// Lifetime counters are cleared per point so each point stands alone.
    pub fn run_series<B: BackoffSource>(&self, spec: SeriesSpec, source: B) -> Result<SweepSeries> {
        let c = &self.config;
        let base = c.base_config(spec.packet_len, spec.initial_window);
        let mut sim = Simulation::new(&base, source)?;

        let mut points = Vec::with_capacity((c.max_stations - c.min_stations + 1) as usize);
        for n in c.min_stations..=c.max_stations {
            info!(
                "Simulating Network: N={}, L={}, R0={}, M={}",
                n, spec.packet_len, spec.initial_window, c.max_retry
            );
            sim.network.resize(n);
            sim.network.clear_counters();
            let stats = sim.run();
            points.push(SweepPoint {
                stations: n,
                summary: stats.summary(),
            });
        }

        Ok(SweepSeries {
            spec,
            max_retry: c.max_retry,
            duration: c.duration,
            points,
        })
    }

    /// Runs every series, in parallel across series.
    pub fn run_all(&self) -> Result<Vec<SweepSeries>> {
        self.series()
            .into_par_iter()
            .enumerate()
            .map(|(i, spec)| self.run_series(spec, SeededBackoff::seeded(self.series_seed(i))))
            .collect()
    }
}
