pub mod config;
pub mod consts;
pub mod core_types;
pub mod dictionary;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod ideal;
pub mod path;
pub mod scorer;

pub use config::ScoringConfig;
pub use core_types::{NormPath, NormPoint, TouchPoint, WordCandidate};
pub use dictionary::{DictEntry, Dictionary};
pub use engine::GlideEngine;
pub use error::{ErrorInfo, GkResult, GlideError};
pub use geometry::{Key, KeyboardLayout};
