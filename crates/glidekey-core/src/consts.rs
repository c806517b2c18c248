/// Number of points after resampling. All normalized paths have exactly
/// this many points.
pub const RESAMPLE_COUNT: usize = 64;

/// Minimum Euclidean distance (in dp) between consecutive points to keep
/// during deduplication.
pub const MIN_POINT_DISTANCE_DP: f32 = 2.0;

/// Minimum number of raw points for a valid gesture.
pub const MIN_GESTURE_POINTS: usize = 2;

/// Maximum number of raw input points the host contract allows per gesture.
pub const MAX_GESTURE_POINTS: usize = 10_000;

/// Sakoe-Chiba band width as a fraction of [`RESAMPLE_COUNT`].
pub const DTW_BANDWIDTH_RATIO: f32 = 0.10;

/// Weight of dictionary frequency in the final score (alpha), in [0, 1].
/// `final = (1 - alpha) * dtw_score + alpha * freq_score`
pub const FREQUENCY_WEIGHT: f32 = 0.30;

/// Default maximum candidates returned by `recognize`.
pub const DEFAULT_MAX_CANDIDATES: usize = 8;

/// Hard upper limit for the `max_candidates` parameter.
pub const MAX_MAX_CANDIDATES: usize = 20;

/// Word length estimate tolerance (+/-) used for candidate filtering.
pub const LENGTH_FILTER_TOLERANCE: f32 = 3.0;

/// Floor for max-DTW normalization in the single-candidate case. A lone
/// candidate would otherwise always normalize to 1.0 and receive near-zero
/// confidence. A good gesture match typically lands around 0.2-0.5, a poor
/// one around 2-4.
pub const MAX_DTW_FLOOR: f32 = 3.0;

/// Magic bytes for dictionary files: ASCII "GLID" read little-endian.
pub const DICT_MAGIC: u32 = 0x474C_4944;

/// Current dictionary format version.
pub const DICT_VERSION: u16 = 1;

/// Fixed size of the dictionary file header in bytes.
pub const DICT_HEADER_SIZE: usize = 32;

/// Maximum allowed word length in UTF-8 bytes.
pub const MAX_WORD_LENGTH: usize = 64;

/// Candidate came from the main dictionary.
pub const SOURCE_MAIN_DICT: u32 = 0x01;
/// Reserved: candidate from a user dictionary.
pub const SOURCE_USER_DICT: u32 = 0x02;
/// Reserved: candidate from prefix completion.
pub const SOURCE_COMPLETION: u32 = 0x04;

/// Dictionary entry flag: word is a proper noun.
pub const DICT_FLAG_PROPER_NOUN: u8 = 0x01;
/// Dictionary entry flag: word is profanity.
pub const DICT_FLAG_PROFANITY: u8 = 0x02;
