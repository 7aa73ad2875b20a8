use crate::backoff::doubling_windows;
use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Parameters of a single run: N, L, R, M and T.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    pub stations: u32,
    pub packet_len: u64,
    pub ranges: Vec<u32>,
    pub max_retry: u32,
    pub duration: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            stations: 5,
            packet_len: 20,
            ranges: doubling_windows(8, crate::DEFAULT_WINDOW_LEVELS),
            max_retry: 6,
            duration: 50_000,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<()> {
        if self.stations == 0 {
            return Err(ConfigError::NotPositive("N"));
        }
        if self.packet_len == 0 {
            return Err(ConfigError::NotPositive("L"));
        }
        if self.ranges.is_empty() {
            return Err(ConfigError::EmptyRanges);
        }
        if self.max_retry == 0 {
            return Err(ConfigError::NotPositive("M"));
        }
        if self.duration == 0 {
            return Err(ConfigError::NotPositive("T"));
        }
        // A transmission starts before tick T and ends at clock + L.
        if self.packet_len > u64::MAX - self.duration {
            return Err(ConfigError::ClockOverflow {
                packet_len: self.packet_len,
                duration: self.duration,
            });
        }
        Ok(())
    }

    /// Reads a parameter file. `.json` files are parsed as JSON, anything
    /// else as the line format understood by [`SimConfig::parse_params`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json(&text)
        } else {
            Self::parse_params(&text)
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses `NAME v1 [v2 ...]` lines, e.g.
    ///
    /// ```text
    /// N 25
    /// L 20
    /// R 8 16 32 64 128 256 512
    /// M 6
    /// T 50000
    /// ```
    pub fn parse_params(text: &str) -> Result<Self> {
        let mut params: HashMap<String, Vec<u64>> = HashMap::new();
        for line in text.lines() {
            let mut fields = line.split_whitespace();
            let Some(name) = fields.next() else { continue };
            if !matches!(name, "N" | "L" | "R" | "M" | "T") {
                return Err(ConfigError::Unknown(name.to_string()));
            }
            let values = fields
                .map(|v| {
                    v.parse::<u64>().map_err(|_| ConfigError::Malformed {
                        name: name.to_string(),
                        value: v.to_string(),
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            params.insert(name.to_string(), values);
        }

        let scalar = |name: &'static str| -> Result<u64> {
            let values = params.get(name).ok_or(ConfigError::Missing(name))?;
            match values.as_slice() {
                [v] => Ok(*v),
                _ => Err(ConfigError::NotScalar {
                    name: name.to_string(),
                    count: values.len(),
                }),
            }
        };
        let narrow = |name: &'static str, v: u64| -> Result<u32> {
            u32::try_from(v).map_err(|_| ConfigError::Malformed {
                name: name.to_string(),
                value: v.to_string(),
            })
        };

        let ranges = params
            .get("R")
            .ok_or(ConfigError::Missing("R"))?
            .iter()
            .map(|&v| narrow("R", v))
            .collect::<Result<Vec<_>>>()?;

        let config = Self {
            stations: narrow("N", scalar("N")?)?,
            packet_len: scalar("L")?,
            ranges,
            max_retry: narrow("M", scalar("M")?)?,
            duration: scalar("T")?,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Grid explored by the sweep study.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepConfig {
    pub packet_len: u64,
    pub initial_window: u32,
    pub max_retry: u32,
    pub duration: u64,
    pub min_stations: u32,
    pub max_stations: u32,
    /// Number of doubling steps in each generated window table.
    pub window_levels: u32,
    pub initial_windows: Vec<u32>,
    pub packet_lens: Vec<u64>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            packet_len: 20,
            initial_window: 8,
            max_retry: 6,
            duration: 50_000,
            min_stations: 5,
            max_stations: 500,
            window_levels: crate::DEFAULT_WINDOW_LEVELS,
            initial_windows: vec![1, 2, 4, 8, 16],
            packet_lens: vec![20, 40, 60, 80, 100],
        }
    }
}

impl SweepConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_stations == 0 || self.max_stations < self.min_stations {
            return Err(ConfigError::NotPositive("N"));
        }
        if self.window_levels == 0 {
            return Err(ConfigError::EmptyRanges);
        }
        if self.window_levels > crate::MAX_WINDOW_LEVELS {
            return Err(ConfigError::TooManyLevels(self.window_levels));
        }
        self.base_config(self.packet_len, self.initial_window).validate()?;
        for &l in &self.packet_lens {
            self.base_config(l, self.initial_window).validate()?;
        }
        Ok(())
    }

    /// Run parameters for one series, starting at the smallest station count.
    pub fn base_config(&self, packet_len: u64, initial_window: u32) -> SimConfig {
        SimConfig {
            stations: self.min_stations,
            packet_len,
            ranges: doubling_windows(initial_window, self.window_levels),
            max_retry: self.max_retry,
            duration: self.duration,
        }
    }
}
