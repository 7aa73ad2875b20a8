#![allow(dead_code)]

use csma_core::*;

pub fn config(stations: u32, packet_len: u64, ranges: &[u32], max_retry: u32, duration: u64) -> SimConfig {
    SimConfig {
        stations,
        packet_len,
        ranges: ranges.to_vec(),
        max_retry,
        duration,
    }
}

pub struct TestHarness<B = ScriptedBackoff> {
    pub sim: Simulation<B>,
}

impl TestHarness {
    /// Backoff draws replay `script` in order; initial seeding consumes one
    /// value per station, lowest id first.
    pub fn scripted(cfg: SimConfig, script: &[u32]) -> Self {
        let source = ScriptedBackoff::new(script.iter().copied());
        Self {
            sim: Simulation::new(&cfg, source).expect("valid test config"),
        }
    }

    pub fn requested_windows(&self) -> &[u32] {
        self.sim.network.source().requested()
    }
}

impl TestHarness<SeededBackoff> {
    pub fn new_with_seed(cfg: SimConfig, seed: u64) -> Self {
        Self {
            sim: Simulation::seeded(&cfg, seed).expect("valid test config"),
        }
    }
}

impl<B: BackoffSource> TestHarness<B> {
    pub fn net(&self) -> &Network<B> {
        &self.sim.network
    }

    pub fn step(&mut self) -> TickOutcome {
        self.sim.step()
    }

    pub fn run_for(&mut self, ticks: u64) -> RunStats {
        self.sim.run_for(ticks)
    }

    pub fn backoffs(&self) -> Vec<Option<u32>> {
        self.sim.network.stations.iter().map(|s| s.backoff).collect()
    }

    pub fn collisions(&self) -> Vec<u32> {
        self.sim.network.stations.iter().map(|s| s.collisions).collect()
    }

    pub fn total_fail(&self) -> Vec<u64> {
        self.sim.network.stations.iter().map(|s| s.total_fail).collect()
    }

    pub fn total_success(&self) -> Vec<u64> {
        self.sim.network.stations.iter().map(|s| s.total_success).collect()
    }
}
