//! Core configuration for tweenline-core.

use serde::{Deserialize, Serialize};

/// Configuration for engine sizing and timing defaults.
/// Keep this minimal; expand as needed without breaking API.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Number of instances the pool is pre-filled with.
    pub pool_size: usize,
    /// Released instances beyond this count are dropped instead of pooled.
    pub pool_cap: usize,
    /// Duration used by `to` when the caller passes none, in milliseconds.
    pub default_duration_ms: f64,
    /// Nominal frame interval. A pending delay-before shorter than this is
    /// snapped to zero so variable frame deltas cannot stall it forever.
    pub frame_interval_ms: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pool_size: 10,
            pool_cap: 64,
            default_duration_ms: 500.0,
            frame_interval_ms: 16.0,
        }
    }
}
