use crate::config::ScoringConfig;
use crate::consts::{MAX_MAX_CANDIDATES, MIN_GESTURE_POINTS, SOURCE_MAIN_DICT};
use crate::core_types::{TouchPoint, WordCandidate};
use crate::dictionary::{DictEntry, Dictionary};
use crate::error::{ErrorCallback, ErrorInfo, GlideError};
use crate::geometry::KeyboardLayout;
use crate::ideal::IdealPathGenerator;
use crate::path::PathProcessor;
use crate::scorer::{blend_confidence, Scorer};
use std::cmp::Ordering;
use std::path::Path;
use tracing::{debug, info, warn};

/// Estimate word length by counting distinct key transitions along the raw
/// path: snap every raw point to its nearest character key and count the
/// changes.
///
/// This replaces an arc-length-over-key-pitch heuristic that overestimated
/// zigzag words ("hello" came out around 17 characters instead of 5) and
/// filtered them away; transition counting is invariant to zigzag density.
pub fn estimate_word_length(layout: &KeyboardLayout, points: &[TouchPoint]) -> f32 {
    if points.len() < 2 {
        return 1.0;
    }

    let mut prev_key = -1i32;
    let mut transitions = 0u32;
    for p in points {
        let key = layout.nearest_character_key(p.x, p.y);
        if key >= 0 && key != prev_key {
            transitions += 1;
            prev_key = key;
        }
    }
    (transitions as f32).max(1.0)
}

fn ascii_letter(code_point: i32) -> u8 {
    match u8::try_from(code_point) {
        Ok(b) if b.is_ascii_lowercase() => b,
        Ok(b) if b.is_ascii_uppercase() => b.to_ascii_lowercase(),
        _ => 0,
    }
}

struct ScoredEntry<'a> {
    entry: &'a DictEntry,
    dtw: f32,
}

/// Recognition facade owning the full pipeline: path processing, reference
/// path generation, scoring, and candidate ranking.
///
/// The engine is single-threaded by contract; it performs no internal
/// concurrency and is stateless across `recognize` calls. One logical
/// caller owns an engine at a time.
#[derive(Default)]
pub struct GlideEngine {
    path_processor: PathProcessor,
    ideal_paths: IdealPathGenerator,
    scorer: Scorer,
    dictionary: Option<Dictionary>,
    layout: Option<KeyboardLayout>,
    config: ScoringConfig,
    error_callback: Option<ErrorCallback>,
    last_error: Option<ErrorInfo>,
    initialized: bool,
}

impl GlideEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initialize with a layout and a dictionary file on disk.
    pub fn init<P: AsRef<Path>>(&mut self, layout: KeyboardLayout, dict_path: P) -> bool {
        if !layout.is_valid() {
            self.report_error(GlideError::LayoutInvalid(
                "no character keys or non-positive dimensions".to_string(),
            ));
            return false;
        }
        match Dictionary::load(dict_path) {
            Ok(dict) => {
                self.install(layout, dict);
                true
            }
            Err(err) => {
                self.report_error(err);
                false
            }
        }
    }

    /// Initialize with a layout and an in-memory dictionary buffer.
    pub fn init_from_bytes(&mut self, layout: KeyboardLayout, dict_data: &[u8]) -> bool {
        if !layout.is_valid() {
            self.report_error(GlideError::LayoutInvalid(
                "no character keys or non-positive dimensions".to_string(),
            ));
            return false;
        }
        match Dictionary::from_bytes(dict_data) {
            Ok(dict) => {
                self.install(layout, dict);
                true
            }
            Err(err) => {
                self.report_error(err);
                false
            }
        }
    }

    fn install(&mut self, layout: KeyboardLayout, dict: Dictionary) {
        info!(
            "engine initialized: {} entries ({}), layout '{}' with {} keys",
            dict.len(),
            dict.header().language_tag,
            layout.language_tag,
            layout.keys.len()
        );
        self.ideal_paths.set_layout(layout.clone());
        self.layout = Some(layout);
        self.dictionary = Some(dict);
        self.apply_config();
        self.initialized = true;
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Swap the keyboard layout. Clears the reference-path cache; the
    /// dictionary is kept. Returns false if uninitialized or the layout is
    /// invalid.
    pub fn update_layout(&mut self, layout: KeyboardLayout) -> bool {
        if !self.initialized {
            return false;
        }
        if !layout.is_valid() {
            self.report_error(GlideError::LayoutInvalid(
                "no character keys or non-positive dimensions".to_string(),
            ));
            return false;
        }
        self.ideal_paths.set_layout(layout.clone());
        self.layout = Some(layout);
        true
    }

    /// Replace the scoring configuration; takes effect on the next
    /// `recognize`.
    pub fn configure(&mut self, config: ScoringConfig) {
        self.config = config;
        self.apply_config();
    }

    fn apply_config(&mut self) {
        self.scorer.configure(self.config);
        self.path_processor
            .set_min_point_distance(self.config.min_point_distance);
        self.path_processor
            .set_resample_count(self.config.resample_count);
    }

    /// Release the dictionary and cached paths.
    pub fn shutdown(&mut self) {
        self.dictionary = None;
        self.ideal_paths.clear_cache();
        self.initialized = false;
    }

    pub fn last_error(&self) -> Option<&ErrorInfo> {
        self.last_error.as_ref()
    }

    /// Register a callback invoked synchronously whenever an error is
    /// recorded. The callback must not re-enter the engine.
    pub fn set_error_callback(&mut self, callback: ErrorCallback) {
        self.error_callback = Some(callback);
    }

    fn report_error(&mut self, err: GlideError) {
        let info = ErrorInfo::from(&err);
        warn!("engine error {}: {}", info.code, info.message);
        if let Some(cb) = &self.error_callback {
            cb(&info);
        }
        self.last_error = Some(info);
    }

    /// Convert a completed gesture into ranked word candidates.
    ///
    /// Never fails loudly: validation problems record a last-error and
    /// return an empty list. `max_candidates` is clamped to
    /// [1, [`MAX_MAX_CANDIDATES`]].
    pub fn recognize(&mut self, raw: &[TouchPoint], max_candidates: usize) -> Vec<WordCandidate> {
        if !self.initialized {
            self.report_error(GlideError::EngineNotInitialized);
            return Vec::new();
        }
        let max_candidates = max_candidates.clamp(1, MAX_MAX_CANDIDATES);
        if raw.len() < MIN_GESTURE_POINTS {
            self.report_error(GlideError::PathTooShort);
            return Vec::new();
        }

        let normalized = match self.layout.as_ref() {
            Some(layout) => self.path_processor.normalize(raw, layout),
            None => {
                self.report_error(GlideError::EngineNotInitialized);
                return Vec::new();
            }
        };
        if !normalized.is_valid() {
            self.report_error(GlideError::PathTooShort);
            return Vec::new();
        }

        let (Some(layout), Some(dict)) = (self.layout.as_ref(), self.dictionary.as_ref()) else {
            return Vec::new();
        };

        // Start and end characters gate the candidate scan; only ASCII
        // letters qualify.
        let mut start_char = 0u8;
        let mut end_char = 0u8;
        let key_count = layout.keys.len() as i32;
        if (0..key_count).contains(&normalized.start_key)
            && (0..key_count).contains(&normalized.end_key)
        {
            start_char = ascii_letter(layout.keys[normalized.start_key as usize].code_point);
            end_char = ascii_letter(layout.keys[normalized.end_key as usize].code_point);
        }
        let has_start_end = start_char != 0 && end_char != 0;

        debug!(
            "pipeline: start='{}' end='{}' raw_points={}",
            start_char as char, end_char as char,
            raw.len()
        );

        // Three-tier candidate cascade.
        let mut tier: Vec<&DictEntry> = if has_start_end {
            dict.starts_and_ends_with(start_char, end_char)
        } else {
            Vec::new()
        };
        if tier.is_empty() && start_char != 0 {
            tier = dict.starts_with(start_char);
        }
        if tier.is_empty() {
            tier = dict.entries().iter().collect();
        }

        // Length filter on the key-transition estimate. An emptied list
        // falls back to the unfiltered tier so length alone never zeroes
        // the result.
        let estimated_len = estimate_word_length(layout, raw);
        let tolerance = self.config.length_filter_tolerance;
        let mut filtered: Vec<&DictEntry> = tier
            .iter()
            .copied()
            .filter(|e| (e.word.len() as f32 - estimated_len).abs() <= tolerance)
            .collect();

        debug!(
            "pipeline: est_len={:.1} tier={} after_len_filter={} tol={:.1}",
            estimated_len,
            tier.len(),
            filtered.len(),
            tolerance
        );

        if filtered.is_empty() {
            filtered = tier;
        }

        let cap = self.config.max_candidates_evaluated.max(1);
        if filtered.len() > cap {
            filtered.truncate(cap);
        }

        // Score each survivor against its reference path; entries whose
        // reference path cannot be generated are skipped, not errors.
        let mut scored: Vec<ScoredEntry> = Vec::with_capacity(filtered.len());
        for entry in filtered {
            let ideal = self.ideal_paths.ideal_path(&entry.word);
            if !ideal.is_valid() {
                continue;
            }
            let dtw = self.scorer.dtw_distance(&normalized, &ideal);
            scored.push(ScoredEntry { entry, dtw });
        }

        if scored.is_empty() {
            return Vec::new();
        }

        // Normalization scale for DTW. With a cohort, the actual maximum is
        // the right scale and the tiny floor only guards division by zero.
        // A lone candidate would normalize to 1.0 by construction, so it
        // gets the absolute floor instead.
        let mut raw_max_dtw = 0.0f32;
        let mut raw_min_dtw = f32::MAX;
        for s in &scored {
            if s.dtw < f32::INFINITY {
                raw_max_dtw = raw_max_dtw.max(s.dtw);
                raw_min_dtw = raw_min_dtw.min(s.dtw);
            }
        }
        let max_dtw = if scored.len() <= 1 {
            raw_max_dtw.max(self.config.max_dtw_floor)
        } else {
            raw_max_dtw.max(0.01)
        };

        // Adaptive frequency weight: when shape scores are compressed,
        // frequency would dominate the ranking, so alpha shrinks with the
        // raw DTW spread (floored at a tenth of its base value).
        let raw_range = if raw_min_dtw < f32::MAX {
            raw_max_dtw - raw_min_dtw
        } else {
            0.0
        };
        let mut alpha = self.config.frequency_weight;
        if scored.len() > 1 && raw_range < 0.5 {
            alpha *= (raw_range / 0.5).max(0.1);
        }

        debug!(
            "pipeline: scored={} min_dtw={:.4} max_dtw={:.4} raw_range={:.4} alpha_eff={:.3}",
            scored.len(),
            raw_min_dtw,
            max_dtw,
            raw_range,
            alpha
        );

        let max_freq = dict.max_frequency();
        let mut results: Vec<WordCandidate> = scored
            .iter()
            .map(|s| WordCandidate {
                word: s.entry.word.clone(),
                confidence: blend_confidence(s.dtw, max_dtw, s.entry.frequency, max_freq, alpha),
                source_flags: SOURCE_MAIN_DICT,
                dtw_score: s.dtw,
                frequency_score: if max_freq > 0 {
                    s.entry.frequency as f32 / max_freq as f32
                } else {
                    0.0
                },
            })
            .collect();

        results.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
        });
        results.truncate(max_candidates);
        results
    }
}
