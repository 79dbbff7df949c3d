//! Run configuration: weighting mode, paint weight, pacing and algorithm.

use std::time::Duration;

use pathviz_core::clamp_weight;
use pathviz_paths::Algorithm;

/// Slowest allowed step delay, in milliseconds.
pub const MAX_SPEED_MS: u64 = 200;
/// Fastest allowed step delay, in milliseconds.
pub const MIN_SPEED_MS: u64 = 10;
/// Pause after clearing the previous visualization.
pub const SETTLE_DELAY: Duration = Duration::from_millis(50);

/// User-tunable settings for a run.
///
/// Setters clamp their inputs, so a `RunConfig` built through them is
/// always valid. The fields stay public for literal construction; call
/// [`normalized`](Self::normalized) on such values before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RunConfig {
    /// Whether cell weights count as traversal costs.
    pub weighted: bool,
    /// Weight painted onto cells by weight-drawing edits, in `[1, 10]`.
    pub weight_value: i32,
    /// Delay per visitation step, in milliseconds.
    pub speed_ms: u64,
    /// The search strategy to run.
    pub algorithm: Algorithm,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            weighted: false,
            weight_value: 5,
            speed_ms: 50,
            algorithm: Algorithm::Bfs,
        }
    }
}

impl RunConfig {
    /// Switch the weighting mode. The algorithm follows the mode: Dijkstra
    /// when weighted, BFS otherwise.
    pub fn set_weighted(&mut self, weighted: bool) {
        self.weighted = weighted;
        self.algorithm = Algorithm::default_for(weighted);
    }

    /// Set the paint weight, clamped to `[1, 10]`.
    pub fn set_weight_value(&mut self, w: i32) {
        self.weight_value = clamp_weight(w);
    }

    /// Set the step delay, clamped to `[MIN_SPEED_MS, MAX_SPEED_MS]`.
    pub fn set_speed_ms(&mut self, ms: u64) {
        self.speed_ms = ms.clamp(MIN_SPEED_MS, MAX_SPEED_MS);
    }

    /// Select an algorithm. Compatibility with the weighting mode is
    /// checked when a run starts, not here.
    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithm = algorithm;
    }

    /// A copy with every field clamped into range.
    pub fn normalized(mut self) -> Self {
        self.set_weight_value(self.weight_value);
        self.set_speed_ms(self.speed_ms);
        self
    }

    /// Pause after each visitation event.
    pub fn visit_delay(&self) -> Duration {
        Duration::from_millis(self.speed_ms)
    }

    /// Pause after each path event: one and a half visitation steps.
    pub fn path_delay(&self) -> Duration {
        Duration::from_millis(self.speed_ms * 3 / 2)
    }
}
