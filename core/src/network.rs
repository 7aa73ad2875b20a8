use crate::backoff::window_for;
use crate::config::SimConfig;
use crate::error::Result;
use crate::station::Station;
use crate::traits::{BackoffSource, StationId};
use log::trace;
use std::fmt;

/// The shared channel and every station contending for it.
///
/// Structural parameters (`ranges`, `max_retry`, `pkt_len`) survive
/// [`Network::reset`]; clock, channel flags and backoffs do not.
pub struct Network<B> {
    pub clock: u64,
    pub busy: bool,
    /// Set on the tick a collision is resolved, consumed by that tick's advance.
    pub collision: bool,
    pub active_node: Option<StationId>,
    pub tx_end: u64,
    pub ranges: Vec<u32>,
    pub max_retry: u32,
    pub pkt_len: u64,
    pub stations: Vec<Station>,
    source: B,
}

impl<B: BackoffSource> Network<B> {
    pub fn new(config: &SimConfig, source: B) -> Result<Self> {
        config.validate()?;
        let mut network = Self {
            clock: 0,
            busy: false,
            collision: false,
            active_node: None,
            tx_end: 0,
            ranges: config.ranges.clone(),
            max_retry: config.max_retry,
            pkt_len: config.packet_len,
            stations: (0..config.stations).map(Station::new).collect(),
            source,
        };
        network.reseed_all();
        Ok(network)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn station(&self, id: StationId) -> &Station {
        &self.stations[id as usize]
    }

    pub fn source(&self) -> &B {
        &self.source
    }

    /// Back to tick 0 with an idle channel and freshly drawn backoffs.
    /// Lifetime counters are kept; see [`Network::clear_counters`].
    pub fn reset(&mut self) {
        self.clock = 0;
        self.busy = false;
        self.collision = false;
        self.active_node = None;
        self.tx_end = 0;
        for station in &mut self.stations {
            station.collisions = 0;
        }
        self.reseed_all();
    }

    /// Truncates or extends the station list, then resets. New stations
    /// continue the id sequence.
    pub fn resize(&mut self, size: u32) {
        let current = self.stations.len() as u32;
        if size < current {
            self.stations.truncate(size as usize);
        } else {
            self.stations.extend((current..size).map(Station::new));
        }
        self.reset();
    }

    pub fn clear_counters(&mut self) {
        for station in &mut self.stations {
            station.clear_counters();
        }
    }

    /// Advances the clock by one tick and applies the channel state for it.
    pub fn tick(&mut self) {
        self.clock += 1;

        if self.collision {
            self.collision = false;
            return;
        }

        if !self.busy {
            for station in &mut self.stations {
                station.count_down();
            }
        } else if self.clock == self.tx_end {
            let id = self
                .active_node
                .take()
                .expect("busy channel without an active station");
            self.busy = false;
            let first = self.ranges[0];
            let station = &mut self.stations[id as usize];
            station.record_success();
            station.set_backoff(first, &mut self.source);
            trace!("tick {}: station {} delivered", self.clock, id);
        }
    }

    /// Stations whose backoff has reached zero, in id order. The station
    /// holding the channel is transmitting, not ready.
    pub fn get_tx_nodes(&self) -> Vec<StationId> {
        self.stations
            .iter()
            .filter(|s| s.is_ready() && self.active_node != Some(s.id))
            .map(|s| s.id)
            .collect()
    }

    pub fn transmit(&mut self, id: StationId) {
        assert!(!self.busy, "transmit on a busy channel");
        assert!(!self.collision, "transmit during a collision tick");
        assert!((id as usize) < self.stations.len(), "unknown station {id}");
        self.busy = true;
        self.active_node = Some(id);
        self.tx_end = self
            .clock
            .checked_add(self.pkt_len)
            .expect("transmission end overflows the tick clock");
    }

    /// Resolves a collision among `ready`: every participant either backs
    /// off with a wider window or, at `max_retry` failures, drops the packet.
    pub fn handle_collision(&mut self, ready: &[StationId]) {
        assert!(
            ready.len() >= 2,
            "collision needs at least two stations, got {}",
            ready.len()
        );
        assert!(!self.busy, "collision on a busy channel");
        self.collision = true;

        for &id in ready {
            let station = &mut self.stations[id as usize];
            station.record_collision();
            if station.collisions >= self.max_retry {
                trace!(
                    "tick {}: station {} dropped packet after {} attempts",
                    self.clock,
                    id,
                    station.collisions
                );
                station.drop_packet();
                station.set_backoff(self.ranges[0], &mut self.source);
            } else {
                let window = window_for(&self.ranges, station.collisions as usize);
                station.set_backoff(window, &mut self.source);
            }
        }
    }

    pub fn status(&self) -> ChannelStatus {
        ChannelStatus {
            clock: self.clock,
            active: self.active_node,
            ready: self.get_tx_nodes(),
        }
    }

    fn reseed_all(&mut self) {
        let first = self.ranges[0];
        for station in &mut self.stations {
            station.set_backoff(first, &mut self.source);
        }
    }
}

/// One-line snapshot of the channel, as printed in per-tick traces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelStatus {
    pub clock: u64,
    pub active: Option<StationId>,
    pub ready: Vec<StationId>,
}

impl fmt::Display for ChannelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let active = self
            .active
            .map_or_else(|| "None".to_string(), |id| id.to_string());
        let ready = if self.ready.is_empty() {
            "None".to_string()
        } else {
            self.ready
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        };
        write!(
            f,
            "{:<15} {:<20} Ready to TX: {}",
            format!("Tick: {}", self.clock),
            format!("Active node: {}", active),
            ready
        )
    }
}
