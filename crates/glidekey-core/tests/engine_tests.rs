use glidekey_core::engine::estimate_word_length;
use glidekey_core::{GlideEngine, TouchPoint};
use std::cell::RefCell;
use std::rc::Rc;

mod common;
use common::{add_noise, dict_bytes, path_for_word, qwerty_layout, test_dict_bytes};

fn ready_engine() -> GlideEngine {
    let mut engine = GlideEngine::new();
    assert!(engine.init_from_bytes(qwerty_layout(), &test_dict_bytes()));
    engine
}

#[test]
fn init_with_valid_dictionary() {
    let engine = ready_engine();
    assert!(engine.is_initialized());
}

#[test]
fn init_with_missing_file_fails() {
    let mut engine = GlideEngine::new();
    assert!(!engine.init(qwerty_layout(), "/nonexistent/path/words.glide"));
    assert!(!engine.is_initialized());
    assert_eq!(engine.last_error().unwrap().code, 1);
}

#[test]
fn init_with_invalid_layout_fails() {
    let mut engine = GlideEngine::new();
    let mut layout = qwerty_layout();
    layout.keys.clear();
    assert!(!engine.init_from_bytes(layout, &test_dict_bytes()));
    assert_eq!(engine.last_error().unwrap().code, 4);
}

#[test]
fn clean_hello_gesture_ranks_hello_first() {
    let layout = qwerty_layout();
    let mut engine = ready_engine();

    let candidates = engine.recognize(&path_for_word(&layout, "hello", 8), 5);
    assert!(!candidates.is_empty());
    assert_eq!(candidates[0].word, "hello");
}

#[test]
fn clean_the_gesture_is_recognized() {
    let layout = qwerty_layout();
    let mut engine = ready_engine();

    let candidates = engine.recognize(&path_for_word(&layout, "the", 8), 5);
    let the = candidates.iter().find(|c| c.word == "the");
    assert!(the.is_some(), "'the' missing from top 5");
    assert!(the.unwrap().confidence > 0.0);
}

#[test]
fn single_candidate_confidence_has_a_floor() {
    // Only "hero" starts with h and ends with o here, so it is scored
    // alone. The absolute max-DTW floor keeps its confidence meaningful
    // instead of normalizing its own distance to 1.
    let layout = qwerty_layout();
    let mut engine = GlideEngine::new();
    let bytes = dict_bytes(&[("hero", 20_000), ("the", 1_000_000), ("world", 40_000)]);
    assert!(engine.init_from_bytes(layout.clone(), &bytes));

    let candidates = engine.recognize(&path_for_word(&layout, "hero", 8), 5);
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].word, "hero");
    assert!(
        candidates[0].confidence > 0.3,
        "confidence too low: {}",
        candidates[0].confidence
    );
}

#[test]
fn start_end_filter_gates_high_frequency_distractor() {
    // "the" outweighs "world" 25:1 in frequency, but a w..d gesture never
    // lets it into the candidate set.
    let layout = qwerty_layout();
    let mut engine = ready_engine();

    let candidates = engine.recognize(&path_for_word(&layout, "world", 8), 5);
    assert!(!candidates.is_empty());
    assert_eq!(candidates[0].word, "world");
    assert!(candidates.iter().all(|c| c.word != "the"));
}

#[test]
fn transition_count_estimates_sparse_path_length() {
    // Sampling only the key centers: h -> e -> l -> l -> o visits four
    // distinct keys, far from the ~17 an arc-length heuristic yields for
    // the same zigzag.
    let layout = qwerty_layout();
    let sparse = path_for_word(&layout, "hello", 1);
    let estimate = estimate_word_length(&layout, &sparse);
    assert!(
        (3.0..=7.0).contains(&estimate),
        "estimate out of range: {estimate}"
    );
}

#[test]
fn dense_zigzag_gesture_still_recognized() {
    // A densely sampled "hello" sweeps over many in-between keys, inflating
    // the transition estimate; the unfiltered-tier fallback must keep the
    // word alive.
    let layout = qwerty_layout();
    let mut engine = ready_engine();

    let candidates = engine.recognize(&path_for_word(&layout, "hello", 8), 5);
    assert!(candidates.iter().any(|c| c.word == "hello"));
}

#[test]
fn noisy_gesture_still_yields_candidates() {
    let layout = qwerty_layout();
    let mut engine = ready_engine();

    let mut raw = path_for_word(&layout, "hello", 8);
    add_noise(&mut raw, 5.0, 5.0, 42);
    let candidates = engine.recognize(&raw, 8);
    assert!(!candidates.is_empty());
    assert!(candidates.iter().any(|c| c.word == "hello"));
}

#[test]
fn candidates_are_sorted_by_confidence() {
    let layout = qwerty_layout();
    let mut engine = GlideEngine::new();
    let bytes = dict_bytes(&[
        ("hello", 50_000),
        ("hero", 20_000),
        ("halo", 15_000),
        ("hippo", 9_000),
        ("ho", 120_000),
    ]);
    assert!(engine.init_from_bytes(layout.clone(), &bytes));

    let candidates = engine.recognize(&path_for_word(&layout, "hello", 8), 8);
    assert!(candidates.len() >= 2);
    for pair in candidates.windows(2) {
        assert!(
            pair[0].confidence >= pair[1].confidence,
            "not sorted: {} < {}",
            pair[0].confidence,
            pair[1].confidence
        );
    }
}

#[test]
fn max_candidates_is_respected_and_clamped() {
    let layout = qwerty_layout();
    let mut engine = ready_engine();
    let raw = path_for_word(&layout, "hello", 8);

    let one = engine.recognize(&raw, 1);
    assert_eq!(one.len(), 1);

    // Zero clamps up to one.
    let zero = engine.recognize(&raw, 0);
    assert_eq!(zero.len(), 1);

    // Oversized requests clamp to the hard cap without error.
    let many = engine.recognize(&raw, 1000);
    assert!(many.len() <= glidekey_core::consts::MAX_MAX_CANDIDATES);
}

#[test]
fn recognize_before_init_fails_quietly() {
    let layout = qwerty_layout();
    let mut engine = GlideEngine::new();

    let candidates = engine.recognize(&path_for_word(&layout, "hello", 8), 8);
    assert!(candidates.is_empty());
    assert_eq!(engine.last_error().unwrap().code, 6);
}

#[test]
fn short_path_fails_quietly() {
    let mut engine = ready_engine();

    assert!(engine.recognize(&[], 8).is_empty());
    assert_eq!(engine.last_error().unwrap().code, 5);

    let single = [TouchPoint::new(32.0, 80.0, 0)];
    assert!(engine.recognize(&single, 8).is_empty());
    assert_eq!(engine.last_error().unwrap().code, 5);
}

#[test]
fn corrupt_dictionary_blocks_recognition() {
    let layout = qwerty_layout();
    let mut bytes = test_dict_bytes();
    bytes[0..4].copy_from_slice(&0xDEAD_BEEFu32.to_le_bytes());

    let mut engine = GlideEngine::new();
    assert!(!engine.init_from_bytes(layout.clone(), &bytes));
    assert_eq!(engine.last_error().unwrap().code, 2);

    let candidates = engine.recognize(&path_for_word(&layout, "hello", 8), 8);
    assert!(candidates.is_empty());
    assert_eq!(engine.last_error().unwrap().code, 6);
}

#[test]
fn update_layout_swaps_geometry() {
    let layout = qwerty_layout();
    let mut engine = ready_engine();

    let before = engine.recognize(&path_for_word(&layout, "hello", 8), 5);
    assert!(!before.is_empty());

    // Swap the h and j key positions; recognition must keep working
    // against the regenerated reference paths.
    let mut modified = qwerty_layout();
    let h = modified.find_by_code_point('h' as i32) as usize;
    let j = modified.find_by_code_point('j' as i32) as usize;
    modified.keys[h].center_x = 224.0;
    modified.keys[j].center_x = 192.0;
    assert!(engine.update_layout(modified));

    let after = engine.recognize(&path_for_word(&layout, "hello", 8), 5);
    assert!(!after.is_empty());
}

#[test]
fn update_layout_rejects_invalid_layout() {
    let mut engine = ready_engine();

    let mut broken = qwerty_layout();
    broken.layout_width = 0.0;
    assert!(!engine.update_layout(broken));
    assert_eq!(engine.last_error().unwrap().code, 4);

    // The previous layout stays active.
    let layout = qwerty_layout();
    let candidates = engine.recognize(&path_for_word(&layout, "hello", 8), 5);
    assert!(!candidates.is_empty());
}

#[test]
fn update_layout_before_init_fails() {
    let mut engine = GlideEngine::new();
    assert!(!engine.update_layout(qwerty_layout()));
}

#[test]
fn shutdown_resets_engine() {
    let layout = qwerty_layout();
    let mut engine = ready_engine();
    engine.shutdown();

    assert!(!engine.is_initialized());
    let candidates = engine.recognize(&path_for_word(&layout, "hello", 8), 8);
    assert!(candidates.is_empty());
    assert_eq!(engine.last_error().unwrap().code, 6);
}

#[test]
fn error_callback_fires_synchronously() {
    let seen: Rc<RefCell<Vec<i32>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    let mut engine = GlideEngine::new();
    engine.set_error_callback(Box::new(move |info| {
        sink.borrow_mut().push(info.code);
    }));

    let candidates = engine.recognize(&[], 8);
    assert!(candidates.is_empty());
    assert_eq!(seen.borrow().as_slice(), &[6]);
}

#[test]
fn candidate_metadata_is_populated() {
    let layout = qwerty_layout();
    let mut engine = ready_engine();

    let candidates = engine.recognize(&path_for_word(&layout, "hello", 8), 5);
    let top = &candidates[0];
    assert_eq!(top.source_flags, glidekey_core::consts::SOURCE_MAIN_DICT);
    assert!(top.dtw_score.is_finite());
    assert!((0.0..=1.0).contains(&top.frequency_score));
    assert!((0.0..=1.0).contains(&top.confidence));
}
