use crate::consts::RESAMPLE_COUNT;
use crate::core_types::{NormPath, TouchPoint};
use crate::geometry::KeyboardLayout;
use crate::path::{arc_length, normalize_bounding_box, resample};
use std::collections::HashMap;

/// Synthetic time spacing between vertices so the time normalization of a
/// generated path is well-defined.
const SYNTH_MS_PER_CHAR: i64 = 100;

/// Builds the reference path for a word: the polyline through its character
/// key centers, resampled and normalized exactly like a user gesture.
///
/// Generated paths are cached by lowercased word; the cache is tied to the
/// layout identity and cleared whenever the layout changes.
#[derive(Default)]
pub struct IdealPathGenerator {
    layout: Option<KeyboardLayout>,
    cache: HashMap<String, NormPath>,
}

impl IdealPathGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a layout. Key centers define every generated path, so the
    /// cache is invalidated wholesale.
    pub fn set_layout(&mut self, layout: KeyboardLayout) {
        self.layout = Some(layout);
        self.cache.clear();
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Warm the cache for a batch of words.
    pub fn pregenerate<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            self.ideal_path(word.as_ref());
        }
    }

    /// The normalized reference path for `word`, generated on first use.
    /// Invalid (empty) when no layout is set or fewer than two distinct
    /// key vertices remain.
    pub fn ideal_path(&mut self, word: &str) -> NormPath {
        let Some(layout) = &self.layout else {
            return NormPath::invalid();
        };

        let key = word.to_ascii_lowercase();
        if let Some(cached) = self.cache.get(&key) {
            return cached.clone();
        }

        let path = generate(layout, &key);
        self.cache.insert(key, path.clone());
        path
    }
}

fn generate(layout: &KeyboardLayout, word: &str) -> NormPath {
    let mut vertices: Vec<TouchPoint> = Vec::with_capacity(word.len());
    let mut prev_key = -1i32;
    let mut first_key = -1i32;
    let mut last_key = -1i32;
    let mut char_idx = 0i64;

    for ch in word.chars() {
        let key_idx = layout.find_by_code_point(ch as i32);
        if key_idx < 0 {
            continue;
        }
        if first_key < 0 {
            first_key = key_idx;
        }
        last_key = key_idx;

        // Repeated letters collapse to a single vertex; a swipe cannot
        // express the repetition.
        if key_idx == prev_key {
            continue;
        }

        let key = &layout.keys[key_idx as usize];
        vertices.push(TouchPoint::new(
            key.center_x,
            key.center_y,
            char_idx * SYNTH_MS_PER_CHAR,
        ));
        prev_key = key_idx;
        char_idx += 1;
    }

    if vertices.len() < 2 {
        return NormPath::invalid();
    }

    let total_arc_len = arc_length(&vertices);
    let resampled = resample(&vertices, RESAMPLE_COUNT);
    let mut path = normalize_bounding_box(&resampled, total_arc_len);
    path.start_key = first_key;
    path.end_key = last_key;
    path
}
