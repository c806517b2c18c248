use crate::error::{GkResult, GlideError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A single key on the soft keyboard.
///
/// Positions and sizes are in density-independent pixels (dp) relative to
/// the keyboard's top-left corner, as populated by the host adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Key {
    /// Display label ("a", "shift", "123"); debugging only.
    #[serde(default)]
    pub label: String,

    /// Unicode code point of the key's primary character, or -1 for
    /// non-character keys (shift, backspace, space). Only keys with a
    /// code point >= 0 participate in gesture recognition.
    pub code_point: i32,

    pub center_x: f32,
    pub center_y: f32,

    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub height: f32,
}

impl Key {
    pub fn new(
        label: &str,
        code_point: i32,
        center_x: f32,
        center_y: f32,
        width: f32,
        height: f32,
    ) -> Self {
        Self {
            label: label.to_string(),
            code_point,
            center_x,
            center_y,
            width,
            height,
        }
    }

    pub fn is_character_key(&self) -> bool {
        self.code_point >= 0
    }
}

fn lower_ascii_cp(cp: i32) -> i32 {
    if (cp >= 'A' as i32) && (cp <= 'Z' as i32) {
        cp - 'A' as i32 + 'a' as i32
    } else {
        cp
    }
}

/// Complete keyboard layout descriptor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeyboardLayout {
    /// BCP 47 language tag ("en-US", "de-DE").
    #[serde(default)]
    pub language_tag: String,

    /// All keys, including non-character keys.
    pub keys: Vec<Key>,

    pub layout_width: f32,
    pub layout_height: f32,
}

impl KeyboardLayout {
    /// Index of the character key whose center is nearest to (x, y),
    /// or -1 if the layout has no character keys.
    pub fn nearest_character_key(&self, x: f32, y: f32) -> i32 {
        let mut best_index = -1i32;
        let mut best_dist = f32::MAX;

        for (i, key) in self.keys.iter().enumerate() {
            if !key.is_character_key() {
                continue;
            }
            let dx = key.center_x - x;
            let dy = key.center_y - y;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist < best_dist {
                best_dist = dist;
                best_index = i as i32;
            }
        }

        best_index
    }

    /// Index of the key carrying the given code point, matching ASCII
    /// letters case-insensitively. Returns -1 when absent.
    pub fn find_by_code_point(&self, code_point: i32) -> i32 {
        let search = lower_ascii_cp(code_point);
        for (i, key) in self.keys.iter().enumerate() {
            if lower_ascii_cp(key.code_point) == search {
                return i as i32;
            }
        }
        -1
    }

    /// A layout is usable when it has positive dimensions and at least one
    /// character key.
    pub fn is_valid(&self) -> bool {
        if self.keys.is_empty() {
            return false;
        }
        if self.layout_width <= 0.0 || self.layout_height <= 0.0 {
            return false;
        }
        self.keys.iter().any(Key::is_character_key)
    }
}

/// IO extension for layouts delivered as JSON files.
pub trait LayoutLoader: Sized {
    fn load_from_file<P: AsRef<Path>>(path: P) -> GkResult<Self>;
}

impl LayoutLoader for KeyboardLayout {
    fn load_from_file<P: AsRef<Path>>(path: P) -> GkResult<Self> {
        let content = fs::read_to_string(&path)
            .map_err(|e| GlideError::LayoutInvalid(format!("cannot read layout file: {e}")))?;

        let layout: KeyboardLayout = serde_json::from_str(&content)
            .map_err(|e| GlideError::LayoutInvalid(format!("cannot parse layout JSON: {e}")))?;

        if !layout.is_valid() {
            return Err(GlideError::LayoutInvalid(
                "layout has no character keys or non-positive dimensions".to_string(),
            ));
        }
        Ok(layout)
    }
}
