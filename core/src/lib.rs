pub mod analytics;
pub mod backoff;
pub mod config;
pub mod engine;
pub mod error;
pub mod network;
pub mod station;
pub mod sweep;
pub mod traits;

pub use analytics::{variance, RunStats, RunSummary, TickCounters};
pub use backoff::{doubling_windows, window_for, ScriptedBackoff, SeededBackoff, UniformBackoff};
pub use config::{SimConfig, SweepConfig};
pub use engine::{Simulation, TickOutcome};
pub use error::{ConfigError, Result};
pub use network::{ChannelStatus, Network};
pub use station::Station;
pub use sweep::{SeriesKind, SeriesSpec, SweepPoint, SweepRunner, SweepSeries};
pub use traits::{BackoffSource, StationId};

/// Doubling steps in the window tables used by the sweep study.
pub const DEFAULT_WINDOW_LEVELS: u32 = 7;

/// Largest doubling-step count; `2^31` is the widest multiplier a `u32` window holds.
pub const MAX_WINDOW_LEVELS: u32 = 32;
