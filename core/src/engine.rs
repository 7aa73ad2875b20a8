use crate::analytics::{RunStats, TickCounters};
use crate::backoff::SeededBackoff;
use crate::config::SimConfig;
use crate::error::Result;
use crate::network::Network;
use crate::traits::{BackoffSource, StationId};
use log::{debug, trace};
use std::time::Instant;

/// How the driver classified a tick before advancing the clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Idle,
    Transmit(StationId),
    Collision(Vec<StationId>),
    Busy,
}

/// Runs a `Network` tick by tick and keeps the channel accounting.
pub struct Simulation<B> {
    pub network: Network<B>,
    pub counters: TickCounters,
    pub duration: u64,
}

impl Simulation<SeededBackoff> {
    pub fn seeded(config: &SimConfig, seed: u64) -> Result<Self> {
        Self::new(config, SeededBackoff::seeded(seed))
    }
}

impl<B: BackoffSource> Simulation<B> {
    pub fn new(config: &SimConfig, source: B) -> Result<Self> {
        Ok(Self {
            network: Network::new(config, source)?,
            counters: TickCounters::default(),
            duration: config.duration,
        })
    }

    /// Classifies the current tick, applies it, then advances the clock.
    pub fn step(&mut self) -> TickOutcome {
        trace!("{}", self.network.status());
        self.counters.ticks += 1;

        let outcome = if self.network.busy {
            self.counters.utilization_ticks += 1;
            TickOutcome::Busy
        } else {
            let ready = self.network.get_tx_nodes();
            match ready.as_slice() {
                [] => {
                    self.counters.idle_ticks += 1;
                    TickOutcome::Idle
                }
                [id] => {
                    self.counters.utilization_ticks += 1;
                    self.network.transmit(*id);
                    TickOutcome::Transmit(*id)
                }
                _ => {
                    self.counters.collision_events += 1;
                    self.network.handle_collision(&ready);
                    TickOutcome::Collision(ready)
                }
            }
        };

        self.network.tick();
        outcome
    }

    pub fn reset_stats(&mut self) {
        self.counters = TickCounters::default();
    }

    /// Runs the configured tick budget.
    pub fn run(&mut self) -> RunStats {
        self.run_for(self.duration)
    }

    /// Runs `ticks` ticks from the current state and reports on them.
    /// Station totals are lifetime counters and include earlier runs unless
    /// the network was cleared in between.
    pub fn run_for(&mut self, ticks: u64) -> RunStats {
        self.reset_stats();
        debug!(
            "running {} stations for {} ticks (L={}, M={}, R={:?})",
            self.network.len(),
            ticks,
            self.network.pkt_len,
            self.network.max_retry,
            self.network.ranges
        );

        let start = Instant::now();
        for _ in 0..ticks {
            self.step();
        }
        let stats = RunStats::collect(self.counters, &self.network.stations, start.elapsed());

        debug!(
            "finished at tick {}: {} busy, {} idle, {} collisions",
            self.network.clock,
            self.counters.utilization_ticks,
            self.counters.idle_ticks,
            self.counters.collision_events
        );
        stats
    }
}
