//! Configuration for the pathfinding engine.

/// Configuration parameters for shortest-path search.
#[derive(Debug, Clone)]
pub struct PathConfig {
    /// Distance used for an edge whose distance is missing or zero (km).
    pub default_distance_km: f64,

    /// Duration used for an edge whose duration is missing or zero (minutes).
    pub default_duration_minutes: u32,

    /// Yield to the async runtime after this many queue pops, so a
    /// cancelled or timed-out request stops promptly on large graphs.
    pub yield_every: usize,
}

impl PathConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        default_distance_km: f64,
        default_duration_minutes: u32,
        yield_every: usize,
    ) -> Self {
        Self {
            default_distance_km,
            default_duration_minutes,
            yield_every,
        }
    }
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            default_distance_km: 1.0,
            default_duration_minutes: 10,
            yield_every: 256,
        }
    }
}
