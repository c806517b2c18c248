use crate::consts::RESAMPLE_COUNT;
use serde::{Deserialize, Serialize};

/// A single raw touch point from the keyboard input.
///
/// Coordinates are in density-independent pixels (dp) relative to the
/// top-left corner of the keyboard view. Timestamps are milliseconds,
/// monotonic, conventionally starting at 0 for the first point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub x: f32,
    pub y: f32,
    pub timestamp_ms: i64,
}

impl TouchPoint {
    pub fn new(x: f32, y: f32, timestamp_ms: i64) -> Self {
        Self { x, y, timestamp_ms }
    }

    pub fn distance_to(&self, other: &TouchPoint) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A point after path processing: coordinates in [0, 1] after bounding-box
/// normalization, time linearly mapped to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormPoint {
    pub x: f32,
    pub y: f32,
    pub t: f32,
}

impl NormPoint {
    pub fn new(x: f32, y: f32, t: f32) -> Self {
        Self { x, y, t }
    }

    /// 2-D Euclidean distance on (x, y); time is not part of the metric.
    pub fn distance_to(&self, other: &NormPoint) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A normalized gesture path, the input to the scorer.
///
/// After [`crate::path::PathProcessor::normalize`] the path holds exactly
/// [`RESAMPLE_COUNT`] points in a [0, 1] bounding box with preserved aspect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormPath {
    pub points: Vec<NormPoint>,

    /// width / height of the bounding box before normalization
    /// (1.0 when the height is degenerate).
    pub aspect_ratio: f32,

    /// Arc length of the path in dp before normalization.
    pub total_arc_len: f32,

    /// Index into the layout's key array for the key nearest to the first
    /// raw touch point, or -1 if unassigned.
    pub start_key: i32,

    /// Index for the key nearest to the last raw touch point, or -1.
    pub end_key: i32,
}

impl NormPath {
    pub fn invalid() -> Self {
        Self {
            points: Vec::new(),
            aspect_ratio: 1.0,
            total_arc_len: 0.0,
            start_key: -1,
            end_key: -1,
        }
    }

    /// A path is valid exactly when it carries the full resample count.
    pub fn is_valid(&self) -> bool {
        self.points.len() == RESAMPLE_COUNT
    }
}

/// A word candidate produced by the recognition pipeline.
///
/// Candidates are returned sorted by confidence descending (best first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordCandidate {
    /// UTF-8 word as stored in the dictionary.
    pub word: String,

    /// Confidence in [0, 1]; 1.0 is the best possible match.
    pub confidence: f32,

    /// Bitmask of `SOURCE_*` flags; the core only emits
    /// [`crate::consts::SOURCE_MAIN_DICT`].
    pub source_flags: u32,

    /// Raw per-point DTW distance, kept for debugging and tuning.
    pub dtw_score: f32,

    /// Dictionary frequency normalized against the dictionary maximum.
    pub frequency_score: f32,
}
