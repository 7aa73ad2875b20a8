use crate::traits::{BackoffSource, StationId};
use serde::{Deserialize, Serialize};

/// Contention state of a single station on the shared channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,
    /// Ticks left before the next attempt. `None` only between a drop and the reseed.
    pub backoff: Option<u32>,
    /// Failed attempts for the packet currently staged.
    pub collisions: u32,
    pub total_success: u64,
    pub total_fail: u64,
    pub total_drop: u64,
}

impl Station {
    pub fn new(id: StationId) -> Self {
        Self {
            id,
            backoff: None,
            collisions: 0,
            total_success: 0,
            total_fail: 0,
            total_drop: 0,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.backoff == Some(0)
    }

    /// Abandon the staged packet. The caller reseeds the backoff straight after.
    pub fn drop_packet(&mut self) {
        self.total_drop += 1;
        self.collisions = 0;
        self.backoff = None;
    }

    pub fn set_backoff<B: BackoffSource>(&mut self, window: u32, source: &mut B) {
        self.backoff = Some(source.draw(window));
    }

    /// One idle slot elapsed. A ready station stays ready.
    pub fn count_down(&mut self) {
        if let Some(b) = self.backoff.as_mut() {
            *b = b.saturating_sub(1);
        }
    }

    pub fn record_success(&mut self) {
        self.total_success += 1;
        self.collisions = 0;
    }

    pub fn record_collision(&mut self) {
        self.collisions += 1;
        self.total_fail += 1;
    }

    pub fn clear_counters(&mut self) {
        self.collisions = 0;
        self.total_success = 0;
        self.total_fail = 0;
        self.total_drop = 0;
    }
}
