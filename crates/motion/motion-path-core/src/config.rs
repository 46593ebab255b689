//! Core configuration for motion-path-core.

use serde::{Deserialize, Serialize};

use crate::data::EasingMode;
use crate::error::{PathError, PathResult};

/// Limits and defaults shared by every path the host creates.
/// Loading from disk is the host's job; this type only parses and validates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum positions (and, separately, rotations) per path.
    pub max_points_per_path: usize,
    /// Upper clamp for the per-segment sample count.
    pub max_interval: i32,
    /// Interval used by `create` when none is given.
    pub default_interval: i32,
    /// Easing assigned to newly created paths.
    pub default_easing: EasingMode,
    /// Rate of the external tick driver; converts delay seconds into frames.
    pub ticks_per_second: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_points_per_path: 1000,
            max_interval: 300,
            default_interval: 60,
            default_easing: EasingMode::Bezier,
            ticks_per_second: 60,
        }
    }
}

impl Config {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json_str(s: &str) -> PathResult<Self> {
        let cfg: Config = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> PathResult<()> {
        if self.max_points_per_path == 0 {
            return Err(invalid("max_points_per_path must be > 0"));
        }
        if self.max_interval < 1 {
            return Err(invalid("max_interval must be >= 1"));
        }
        if self.ticks_per_second < 1 {
            return Err(invalid("ticks_per_second must be >= 1"));
        }
        Ok(())
    }

    /// Clamp a requested interval into `[1, max_interval]`.
    #[inline]
    pub fn clamp_interval(&self, interval: i32) -> i32 {
        interval.clamp(1, self.max_interval.max(1))
    }
}

fn invalid(reason: &str) -> PathError {
    PathError::InvalidConfig {
        reason: reason.to_string(),
    }
}
