use crate::consts::{
    DICT_FLAG_PROFANITY, DICT_FLAG_PROPER_NOUN, DICT_HEADER_SIZE, DICT_MAGIC, DICT_VERSION,
    MAX_WORD_LENGTH,
};
use crate::error::{GkResult, GlideError};
use std::fs;
use std::path::Path;

/// Parsed dictionary file header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DictHeader {
    pub magic: u32,
    pub version: u16,
    pub flags: u16,
    pub entry_count: u32,
    pub language_tag: String,
}

/// One dictionary word with its frequency and flags.
#[derive(Debug, Clone, PartialEq)]
pub struct DictEntry {
    pub word: String,
    /// Unsigned relative frequency; higher means more common.
    pub frequency: u32,
    pub flags: u8,
}

impl DictEntry {
    pub fn new(word: &str, frequency: u32) -> Self {
        Self {
            word: word.to_string(),
            frequency,
            flags: 0,
        }
    }

    pub fn is_proper_noun(&self) -> bool {
        self.flags & DICT_FLAG_PROPER_NOUN != 0
    }

    pub fn is_profanity(&self) -> bool {
        self.flags & DICT_FLAG_PROFANITY != 0
    }
}

fn read_u16_le(buf: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([buf[offset], buf[offset + 1]])
}

fn read_u32_le(buf: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        buf[offset],
        buf[offset + 1],
        buf[offset + 2],
        buf[offset + 3],
    ])
}

/// An ordered word list parsed from the binary dictionary format.
///
/// All multi-byte integers in the format are little-endian. Query matching
/// is ASCII-case-insensitive on the relevant bytes and runs as a linear
/// scan; entry counts stay small enough that no index is warranted.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    header: DictHeader,
    entries: Vec<DictEntry>,
    max_frequency: u32,
}

impl Dictionary {
    /// Parse a dictionary from an in-memory byte buffer.
    pub fn from_bytes(data: &[u8]) -> GkResult<Self> {
        if data.len() < DICT_HEADER_SIZE {
            return Err(GlideError::DictCorrupt(
                "file too small for header".to_string(),
            ));
        }

        let mut header = DictHeader {
            magic: read_u32_le(data, 0),
            version: read_u16_le(data, 4),
            flags: read_u16_le(data, 6),
            entry_count: read_u32_le(data, 8),
            language_tag: String::new(),
        };

        let lang_len = read_u16_le(data, 12) as usize;
        if lang_len > 0 && 14 + lang_len <= DICT_HEADER_SIZE {
            header.language_tag = String::from_utf8_lossy(&data[14..14 + lang_len]).into_owned();
        }

        if header.magic != DICT_MAGIC {
            return Err(GlideError::DictCorrupt("invalid magic bytes".to_string()));
        }
        if header.version != DICT_VERSION {
            return Err(GlideError::DictVersionMismatch(header.version));
        }

        let mut entries = Vec::with_capacity(header.entry_count as usize);
        let mut max_frequency = 0u32;
        let mut pos = DICT_HEADER_SIZE;

        for i in 0..header.entry_count {
            if pos + 1 > data.len() {
                return Err(GlideError::DictCorrupt(format!(
                    "unexpected end of data at entry {i}"
                )));
            }

            let word_len = data[pos] as usize;
            pos += 1;
            if word_len > MAX_WORD_LENGTH {
                return Err(GlideError::DictCorrupt(
                    "word length exceeds maximum".to_string(),
                ));
            }
            if pos + word_len + 4 + 1 > data.len() {
                return Err(GlideError::DictCorrupt(format!(
                    "truncated entry at index {i}"
                )));
            }

            let word = String::from_utf8_lossy(&data[pos..pos + word_len]).into_owned();
            pos += word_len;
            let frequency = read_u32_le(data, pos);
            pos += 4;
            let flags = data[pos];
            pos += 1;

            max_frequency = max_frequency.max(frequency);
            entries.push(DictEntry {
                word,
                frequency,
                flags,
            });
        }

        Ok(Self {
            header,
            entries,
            max_frequency,
        })
    }

    /// Load and parse a dictionary file from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> GkResult<Self> {
        let data = fs::read(&path).map_err(|e| {
            GlideError::DictNotFound(format!("cannot open {}: {e}", path.as_ref().display()))
        })?;
        Self::from_bytes(&data)
    }

    pub fn header(&self) -> &DictHeader {
        &self.header
    }

    pub fn entries(&self) -> &[DictEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_frequency(&self) -> u32 {
        self.max_frequency
    }

    /// Entries whose first byte matches `start`, ASCII-case-insensitively.
    pub fn starts_with(&self, start: u8) -> Vec<&DictEntry> {
        let s = start.to_ascii_lowercase();
        self.entries
            .iter()
            .filter(|e| {
                e.word
                    .as_bytes()
                    .first()
                    .is_some_and(|b| b.to_ascii_lowercase() == s)
            })
            .collect()
    }

    /// Entries matching both the first and last byte, ASCII-case-insensitively.
    pub fn starts_and_ends_with(&self, start: u8, end: u8) -> Vec<&DictEntry> {
        let s = start.to_ascii_lowercase();
        let e = end.to_ascii_lowercase();
        self.entries
            .iter()
            .filter(|entry| {
                let bytes = entry.word.as_bytes();
                match (bytes.first(), bytes.last()) {
                    (Some(first), Some(last)) => {
                        first.to_ascii_lowercase() == s && last.to_ascii_lowercase() == e
                    }
                    _ => false,
                }
            })
            .collect()
    }

    /// Whole-word lookup, ASCII-case-insensitive.
    pub fn lookup(&self, word: &str) -> Option<&DictEntry> {
        if word.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|e| e.word.eq_ignore_ascii_case(word))
    }
}

/// Serialize entries into the binary dictionary format.
///
/// The header `flags` field is always written as zero. Fails when the
/// language tag does not fit the header or a word exceeds
/// [`MAX_WORD_LENGTH`] bytes.
pub fn encode(language_tag: &str, entries: &[DictEntry]) -> GkResult<Vec<u8>> {
    let lang = language_tag.as_bytes();
    if 14 + lang.len() > DICT_HEADER_SIZE {
        return Err(GlideError::DictCorrupt(
            "language tag does not fit header".to_string(),
        ));
    }

    let mut buf = vec![0u8; DICT_HEADER_SIZE];
    buf[0..4].copy_from_slice(&DICT_MAGIC.to_le_bytes());
    buf[4..6].copy_from_slice(&DICT_VERSION.to_le_bytes());
    buf[8..12].copy_from_slice(&(entries.len() as u32).to_le_bytes());
    buf[12..14].copy_from_slice(&(lang.len() as u16).to_le_bytes());
    buf[14..14 + lang.len()].copy_from_slice(lang);

    for entry in entries {
        let word = entry.word.as_bytes();
        if word.len() > MAX_WORD_LENGTH {
            return Err(GlideError::DictCorrupt(
                "word length exceeds maximum".to_string(),
            ));
        }
        buf.push(word.len() as u8);
        buf.extend_from_slice(word);
        buf.extend_from_slice(&entry.frequency.to_le_bytes());
        buf.push(entry.flags);
    }

    Ok(buf)
}
