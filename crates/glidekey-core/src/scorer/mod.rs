mod dtw;

pub use dtw::dtw_distance;

use crate::config::ScoringConfig;
use crate::core_types::NormPath;

/// Blend a DTW distance and a dictionary frequency into a confidence value
/// in [0, 1]; `alpha` is the frequency weight.
///
/// `max_dtw` and `max_frequency` set the normalization scales; a zero scale
/// pins the respective normalized term to its worst (DTW) or neutral
/// (frequency) value.
pub fn blend_confidence(
    dtw: f32,
    max_dtw: f32,
    frequency: u32,
    max_frequency: u32,
    alpha: f32,
) -> f32 {
    let norm_dtw = if max_dtw > 0.0 && dtw < f32::INFINITY {
        (dtw / max_dtw).min(1.0)
    } else {
        1.0
    };

    let norm_freq = if max_frequency > 0 {
        (frequency as f32 / max_frequency as f32).min(1.0)
    } else {
        0.0
    };

    let final_score = (1.0 - alpha) * norm_dtw + alpha * (1.0 - norm_freq);
    1.0 - final_score.clamp(0.0, 1.0)
}

/// Shape-distance and confidence computations, parameterized by
/// [`ScoringConfig`].
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    config: ScoringConfig,
}

impl Scorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn configure(&mut self, config: ScoringConfig) {
        self.config = config;
    }

    /// Band-constrained DTW with the configured bandwidth ratio.
    pub fn dtw_distance(&self, gesture: &NormPath, ideal: &NormPath) -> f32 {
        dtw::dtw_distance(gesture, ideal, self.config.dtw_bandwidth_ratio)
    }

    /// Confidence using the configured base frequency weight.
    pub fn confidence(&self, dtw: f32, max_dtw: f32, frequency: u32, max_frequency: u32) -> f32 {
        blend_confidence(
            dtw,
            max_dtw,
            frequency,
            max_frequency,
            self.config.frequency_weight,
        )
    }
}
