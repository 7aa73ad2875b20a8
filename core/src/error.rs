use std::path::PathBuf;
use thiserror::Error;

/// Rejected simulation parameters. Raised before any `Network` exists.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read parameter file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("missing parameter `{0}`")]
    Missing(&'static str),

    #[error("parameter `{name}` has non-integer value `{value}`")]
    Malformed { name: String, value: String },

    #[error("unknown parameter `{0}`")]
    Unknown(String),

    #[error("parameter `{name}` expects a single value, got {count}")]
    NotScalar { name: String, count: usize },

    #[error("backoff window table `R` is empty")]
    EmptyRanges,

    #[error("parameter `{0}` must be positive")]
    NotPositive(&'static str),

    #[error("window table of {0} doubling steps exceeds the limit of {max}", max = crate::MAX_WINDOW_LEVELS)]
    TooManyLevels(u32),

    #[error("packet length {packet_len} plus run length {duration} overflows the tick clock")]
    ClockOverflow { packet_len: u64, duration: u64 },

    #[error("invalid JSON parameters: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
