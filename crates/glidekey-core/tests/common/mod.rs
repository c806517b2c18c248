#![allow(dead_code)]

use glidekey_core::dictionary::{self, DictEntry};
use glidekey_core::{Key, KeyboardLayout, TouchPoint};

/// QWERTY layout for testing: 320x160 dp, 26 character keys, 32 dp key
/// pitch, rows at y = 26 / 80 / 134.
pub fn qwerty_layout() -> KeyboardLayout {
    let defs: &[(char, f32, f32)] = &[
        // Row 1: Q W E R T Y U I O P
        ('q', 16.0, 26.0),
        ('w', 48.0, 26.0),
        ('e', 80.0, 26.0),
        ('r', 112.0, 26.0),
        ('t', 144.0, 26.0),
        ('y', 176.0, 26.0),
        ('u', 208.0, 26.0),
        ('i', 240.0, 26.0),
        ('o', 272.0, 26.0),
        ('p', 304.0, 26.0),
        // Row 2: A S D F G H J K L
        ('a', 32.0, 80.0),
        ('s', 64.0, 80.0),
        ('d', 96.0, 80.0),
        ('f', 128.0, 80.0),
        ('g', 160.0, 80.0),
        ('h', 192.0, 80.0),
        ('j', 224.0, 80.0),
        ('k', 256.0, 80.0),
        ('l', 288.0, 80.0),
        // Row 3: Z X C V B N M
        ('z', 64.0, 134.0),
        ('x', 96.0, 134.0),
        ('c', 128.0, 134.0),
        ('v', 160.0, 134.0),
        ('b', 192.0, 134.0),
        ('n', 224.0, 134.0),
        ('m', 256.0, 134.0),
    ];

    let keys = defs
        .iter()
        .map(|&(label, cx, cy)| Key::new(&label.to_string(), label as i32, cx, cy, 32.0, 52.0))
        .collect();

    KeyboardLayout {
        language_tag: "en-US".to_string(),
        keys,
        layout_width: 320.0,
        layout_height: 160.0,
    }
}

/// Straight-line gesture through the key centers of `word`, sampled at
/// `points_per_segment` points per segment, timestamps 10 ms apart.
pub fn path_for_word(
    layout: &KeyboardLayout,
    word: &str,
    points_per_segment: usize,
) -> Vec<TouchPoint> {
    let mut centers: Vec<(f32, f32)> = Vec::new();
    for ch in word.chars() {
        let idx = layout.find_by_code_point(ch as i32);
        if idx >= 0 {
            let key = &layout.keys[idx as usize];
            centers.push((key.center_x, key.center_y));
        }
    }
    if centers.is_empty() {
        return Vec::new();
    }

    let mut points = Vec::new();
    let mut ts = 0i64;
    for pair in centers.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        for j in 0..points_per_segment {
            let t = j as f32 / points_per_segment as f32;
            points.push(TouchPoint::new(x0 + (x1 - x0) * t, y0 + (y1 - y0) * t, ts));
            ts += 10;
        }
    }
    let (lx, ly) = centers[centers.len() - 1];
    points.push(TouchPoint::new(lx, ly, ts));
    points
}

/// Horizontal straight-line gesture from x0 to x1 at height y.
pub fn line(x0: f32, x1: f32, y: f32, n_points: usize) -> Vec<TouchPoint> {
    (0..n_points)
        .map(|i| {
            let t = i as f32 / (n_points - 1) as f32;
            TouchPoint::new(x0 + (x1 - x0) * t, y, i as i64 * 10)
        })
        .collect()
}

/// Reproducible jitter via a small LCG, so noisy-gesture tests are
/// deterministic without a rand dependency.
pub fn add_noise(points: &mut [TouchPoint], stddev_x: f32, stddev_y: f32, seed: u32) {
    let mut state = seed;
    let mut next = move || {
        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        (state as f32 / u32::MAX as f32) * 2.0 - 1.0
    };
    for p in points.iter_mut() {
        p.x += next() * stddev_x;
        p.y += next() * stddev_y;
    }
}

/// The reference test dictionary used by the end-to-end scenarios.
pub fn test_dict_words() -> Vec<DictEntry> {
    [
        ("the", 1_000_000u32),
        ("and", 800_000),
        ("hello", 50_000),
        ("world", 40_000),
        ("help", 30_000),
        ("hero", 20_000),
        ("go", 200_000),
        ("do", 180_000),
        ("a", 900_000),
    ]
    .iter()
    .map(|&(w, f)| DictEntry::new(w, f))
    .collect()
}

pub fn test_dict_bytes() -> Vec<u8> {
    dictionary::encode("en", &test_dict_words()).expect("test dictionary encodes")
}

pub fn dict_bytes(words: &[(&str, u32)]) -> Vec<u8> {
    let entries: Vec<DictEntry> = words.iter().map(|&(w, f)| DictEntry::new(w, f)).collect();
    dictionary::encode("en", &entries).expect("test dictionary encodes")
}
