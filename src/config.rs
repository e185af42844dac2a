//! # Engine Configuration
//!
//! Centralises the construction-time constants with sensible defaults that
//! callers may override: the resample resolution, the
//! geometric and final candidate-list sizes, the endpoint pre-filter
//! radius, the DTW band width, and the gesture-capture debounce constants.
//!
//! ## Usage
//!
//! ```rust
//! use swipe_input_engine::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! assert_eq!(config.resample_n, 64);
//!
//! let custom = EngineConfig::new()
//!     .with_geometric_top_n(20)
//!     .with_final_top_n(5);
//! ```

use serde::{Deserialize, Serialize};

/// Tunable constants for template generation, resampling and decoding.
///
/// All fields carry reasonable defaults; callers may override any subset
/// via the builder methods below.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of equidistant points every resampled path (template or
    /// gesture) is reduced to.
    pub resample_n: usize,
    /// Size of the running top-K maintained during DTW matching, and the
    /// feedback source for the prune threshold.
    pub geometric_top_n: usize,
    /// Number of candidates returned from `decode` after reranking.
    pub final_top_n: usize,
    /// Radius (in normalised [0,1]^2 units) used to find characters whose
    /// key centre lies near a gesture's first/last sampled point.
    pub endpoint_radius: f32,
    /// Sakoe-Chiba band half-width used by the banded DTW comparison.
    pub band_width: usize,
    /// Target sampling interval in seconds (1/60s, i.e. 60Hz).
    pub sample_interval: f32,
    /// Minimum normalised distance between consecutive accepted capture
    /// samples.
    pub min_sample_distance: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            resample_n: 64,
            geometric_top_n: 50,
            final_top_n: 3,
            endpoint_radius: 0.12,
            band_width: 10,
            sample_interval: 1.0 / 60.0,
            min_sample_distance: 0.005,
        }
    }
}

impl EngineConfig {
    /// Creates a new configuration with the default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the resample target point count (`RESAMPLE_N`).
    pub fn with_resample_n(mut self, n: usize) -> Self {
        self.resample_n = n;
        self
    }

    /// Sets the geometric top-K size (`GEOMETRIC_TOP_N`).
    pub fn with_geometric_top_n(mut self, n: usize) -> Self {
        self.geometric_top_n = n;
        self
    }

    /// Sets the final candidate-list size (`FINAL_TOP_N`).
    pub fn with_final_top_n(mut self, n: usize) -> Self {
        self.final_top_n = n;
        self
    }

    /// Sets the endpoint pre-filter radius (`ENDPOINT_RADIUS`).
    pub fn with_endpoint_radius(mut self, r: f32) -> Self {
        self.endpoint_radius = r;
        self
    }

    /// Sets the DTW Sakoe-Chiba band half-width (`BAND_WIDTH`).
    pub fn with_band_width(mut self, w: usize) -> Self {
        self.band_width = w;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = EngineConfig::default();
        assert_eq!(config.resample_n, 64);
        assert_eq!(config.geometric_top_n, 50);
        assert_eq!(config.final_top_n, 3);
        assert!((config.endpoint_radius - 0.12).abs() < 1e-6);
        assert_eq!(config.band_width, 10);
    }

    #[test]
    fn builder_overrides_apply() {
        let config = EngineConfig::new()
            .with_geometric_top_n(1)
            .with_final_top_n(1);
        assert_eq!(config.geometric_top_n, 1);
        assert_eq!(config.final_top_n, 1);
    }
}
