use serde::{Deserialize, Serialize};

/// Parameters of the object-counting pipeline.
///
/// Every numeric constant the pipeline uses lives here so tests can vary
/// parameters without touching pipeline code. The defaults are the canonical
/// values; the structs are plain immutable data and safe to share.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountingConfig {
    /// Side length of the adaptive-threshold window, in pixels. Must be odd.
    pub threshold_window: u32,
    /// Constant subtracted from the local Gaussian-weighted mean.
    pub threshold_constant: i16,
    /// L∞ radius of the closing structuring element (2 means a 5×5 square).
    pub closing_radius: u8,
    /// Circle-detection parameter set.
    pub circles: CircleConfig,
    /// The two cheap estimators are considered in agreement when their
    /// counts differ by less than this; a difference of at least this much
    /// triggers the watershed separator.
    pub count_tolerance: u32,
}

impl Default for CountingConfig {
    fn default() -> Self {
        Self {
            threshold_window: 15,
            threshold_constant: 2,
            closing_radius: 2,
            circles: CircleConfig::default(),
            count_tolerance: 3,
        }
    }
}

/// Parameters of the Hough circle search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircleConfig {
    /// Sigma of the Gaussian blur applied before edge detection.
    pub blur_sigma: f32,
    /// Upper Canny threshold; the lower threshold is half of this.
    pub edge_threshold: f32,
    /// Minimum votes for a center candidate, and minimum edge support for
    /// its best-fitting radius.
    pub accumulator_threshold: u32,
    /// Minimum distance between accepted circle centers, in pixels.
    pub min_center_distance: u32,
    /// Smallest circle radius considered, in pixels.
    pub min_radius: u32,
    /// Largest circle radius considered, in pixels.
    pub max_radius: u32,
}

impl Default for CircleConfig {
    fn default() -> Self {
        Self {
            blur_sigma: 1.5,
            edge_threshold: 50.0,
            accumulator_threshold: 30,
            min_center_distance: 30,
            min_radius: 10,
            max_radius: 100,
        }
    }
}

/// Parameters of the empty-space pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmptySpaceConfig {
    /// Side length of the adaptive-threshold window, in pixels. Must be odd.
    pub threshold_window: u32,
    /// Constant subtracted from the local Gaussian-weighted mean.
    pub threshold_constant: i16,
    /// L∞ radius of the closing that merges nearby occupied regions
    /// (7 means a 15×15 square).
    pub closing_radius: u8,
}

impl Default for EmptySpaceConfig {
    fn default() -> Self {
        Self {
            threshold_window: 25,
            threshold_constant: 15,
            closing_radius: 7,
        }
    }
}
