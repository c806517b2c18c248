use crate::consts::{MIN_POINT_DISTANCE_DP, RESAMPLE_COUNT};
use crate::core_types::{NormPath, NormPoint, TouchPoint};
use crate::geometry::KeyboardLayout;
use itertools::Itertools;

/// Total arc length of a polyline in dp.
pub fn arc_length(points: &[TouchPoint]) -> f32 {
    points
        .iter()
        .tuple_windows()
        .map(|(a, b)| a.distance_to(b))
        .sum()
}

/// Resample a polyline to exactly `count` equidistant points along its arc
/// length ($1 Unistroke scheme, Wobbrock et al. 2007).
///
/// Each interpolated point is inserted back into the working polyline so the
/// residual of the split segment carries into the next step; skipping that
/// insert makes the output drift systematically toward the path end.
/// Timestamps are linearly interpolated from the segment endpoints.
pub fn resample(points: &[TouchPoint], count: usize) -> Vec<TouchPoint> {
    if points.len() < 2 || count < 2 {
        return points.to_vec();
    }

    let total_len = arc_length(points);
    if total_len < 1e-6 {
        return vec![points[0]; count];
    }

    let interval = total_len / (count - 1) as f32;
    let mut result = Vec::with_capacity(count);
    result.push(points[0]);

    let mut pts = points.to_vec();
    let mut accumulated = 0.0f32;
    let mut i = 1;

    while i < pts.len() && result.len() < count - 1 {
        let dx = pts[i].x - pts[i - 1].x;
        let dy = pts[i].y - pts[i - 1].y;
        let d = (dx * dx + dy * dy).sqrt();

        if accumulated + d >= interval {
            let t = (interval - accumulated) / d;
            let new_point = TouchPoint {
                x: pts[i - 1].x + t * dx,
                y: pts[i - 1].y + t * dy,
                timestamp_ms: pts[i - 1].timestamp_ms
                    + (t * (pts[i].timestamp_ms - pts[i - 1].timestamp_ms) as f32) as i64,
            };
            result.push(new_point);
            pts.insert(i, new_point);
            accumulated = 0.0;
            i += 1;
        } else {
            accumulated += d;
            i += 1;
        }
    }

    // Floating-point drift can leave the output a point or two short.
    let last = pts[pts.len() - 1];
    while result.len() < count {
        result.push(last);
    }
    result.truncate(count);
    result
}

/// Map resampled points into the unit bounding box, same scale on both axes
/// so aspect is preserved, and linearly normalize timestamps.
pub fn normalize_bounding_box(points: &[TouchPoint], total_arc_len: f32) -> NormPath {
    if points.is_empty() {
        return NormPath::invalid();
    }

    let mut min_x = points[0].x;
    let mut max_x = points[0].x;
    let mut min_y = points[0].y;
    let mut max_y = points[0].y;
    for p in points {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }

    let width = max_x - min_x;
    let height = max_y - min_y;

    // Near-point path: nothing to scale, pin everything to the center.
    if width < 1e-3 && height < 1e-3 {
        return NormPath {
            points: vec![NormPoint::new(0.5, 0.5, 0.5); points.len()],
            aspect_ratio: 1.0,
            total_arc_len,
            start_key: -1,
            end_key: -1,
        };
    }

    let scale = width.max(height);
    let aspect_ratio = if height > 1e-3 { width / height } else { 1.0 };

    let first_ts = points[0].timestamp_ms;
    let last_ts = points[points.len() - 1].timestamp_ms;
    let ts_range = (last_ts - first_ts) as f32;

    let normalized = points
        .iter()
        .map(|p| {
            let t = if ts_range > 0.0 {
                (p.timestamp_ms - first_ts) as f32 / ts_range
            } else {
                0.5
            };
            NormPoint::new((p.x - min_x) / scale, (p.y - min_y) / scale, t)
        })
        .collect();

    NormPath {
        points: normalized,
        aspect_ratio,
        total_arc_len,
        start_key: -1,
        end_key: -1,
    }
}

/// Converts raw touch sequences into normalized, fixed-length paths:
/// dedup, then equidistant resample, then bounding-box normalization.
#[derive(Debug, Clone)]
pub struct PathProcessor {
    min_point_distance: f32,
    resample_count: usize,
}

impl Default for PathProcessor {
    fn default() -> Self {
        Self {
            min_point_distance: MIN_POINT_DISTANCE_DP,
            resample_count: RESAMPLE_COUNT,
        }
    }
}

impl PathProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_min_point_distance(&mut self, distance_dp: f32) {
        self.min_point_distance = distance_dp;
    }

    /// Counts below 2 are ignored.
    pub fn set_resample_count(&mut self, count: usize) {
        if count >= 2 {
            self.resample_count = count;
        }
    }

    /// Drop interior points closer than the dedup threshold to the last
    /// kept point. The first and last points always survive.
    pub fn deduplicate(&self, points: &[TouchPoint]) -> Vec<TouchPoint> {
        if points.len() <= 2 {
            return points.to_vec();
        }

        let mut result = Vec::with_capacity(points.len());
        result.push(points[0]);

        for cur in &points[1..points.len() - 1] {
            let last = result[result.len() - 1];
            if last.distance_to(cur) >= self.min_point_distance {
                result.push(*cur);
            }
        }

        result.push(points[points.len() - 1]);
        result
    }

    /// Run the full pipeline. Returns an invalid path when fewer than two
    /// points survive deduplication.
    ///
    /// Start/end key indices are taken from the raw endpoints, not the
    /// resampled ones, so endpoints cannot drift through resampling.
    pub fn normalize(&self, raw: &[TouchPoint], layout: &KeyboardLayout) -> NormPath {
        if raw.len() < 2 {
            return NormPath::invalid();
        }

        let deduped = self.deduplicate(raw);
        if deduped.len() < 2 {
            return NormPath::invalid();
        }

        let total_arc_len = arc_length(&deduped);
        let resampled = resample(&deduped, self.resample_count);
        let mut path = normalize_bounding_box(&resampled, total_arc_len);

        path.start_key = layout.nearest_character_key(raw[0].x, raw[0].y);
        path.end_key = layout.nearest_character_key(raw[raw.len() - 1].x, raw[raw.len() - 1].y);

        path
    }
}
