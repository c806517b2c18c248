use crate::consts;
use serde::{Deserialize, Serialize};

/// Tunable parameters for path processing and scoring.
///
/// All fields default to the constants in [`crate::consts`]; override via
/// [`crate::engine::GlideEngine::configure`]. Partial JSON configs
/// deserialize against the defaults.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Target path length after resampling.
    pub resample_count: usize,

    /// Dedup threshold in dp.
    pub min_point_distance: f32,

    /// Sakoe-Chiba half-width as a fraction of the resample count.
    pub dtw_bandwidth_ratio: f32,

    /// Base frequency weight (alpha) before adaptive scaling.
    pub frequency_weight: f32,

    /// Hard cap on the number of dictionary entries scored per gesture.
    pub max_candidates_evaluated: usize,

    /// +/- tolerance on the key-transition word length estimate.
    pub length_filter_tolerance: f32,

    /// Floor applied to max-DTW normalization in the single-candidate case.
    pub max_dtw_floor: f32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            resample_count: consts::RESAMPLE_COUNT,
            min_point_distance: consts::MIN_POINT_DISTANCE_DP,
            dtw_bandwidth_ratio: consts::DTW_BANDWIDTH_RATIO,
            frequency_weight: consts::FREQUENCY_WEIGHT,
            max_candidates_evaluated: consts::MAX_MAX_CANDIDATES,
            length_filter_tolerance: consts::LENGTH_FILTER_TOLERANCE,
            max_dtw_floor: consts::MAX_DTW_FLOOR,
        }
    }
}
