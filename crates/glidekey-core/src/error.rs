use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GlideError {
    #[error("dictionary not found: {0}")]
    DictNotFound(String),

    #[error("dictionary corrupt: {0}")]
    DictCorrupt(String),

    #[error("unsupported dictionary version: {0}")]
    DictVersionMismatch(u16),

    #[error("keyboard layout invalid: {0}")]
    LayoutInvalid(String),

    #[error("gesture path too short")]
    PathTooShort,

    #[error("engine not initialized")]
    EngineNotInitialized,

    #[error("out of memory")]
    OutOfMemory,
}

impl GlideError {
    /// Stable numeric code, kept for foreign-binding compatibility.
    pub fn code(&self) -> i32 {
        match self {
            GlideError::DictNotFound(_) => 1,
            GlideError::DictCorrupt(_) => 2,
            GlideError::DictVersionMismatch(_) => 3,
            GlideError::LayoutInvalid(_) => 4,
            GlideError::PathTooShort => 5,
            GlideError::EngineNotInitialized => 6,
            GlideError::OutOfMemory => 7,
        }
    }
}

/// Snapshot of the most recent error, exposed via
/// [`crate::engine::GlideEngine::last_error`] and the error callback.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorInfo {
    pub code: i32,
    pub message: String,
}

impl From<&GlideError> for ErrorInfo {
    fn from(err: &GlideError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

/// Error callback, invoked synchronously on the thread that hit the error.
/// The callback must not re-enter the engine.
pub type ErrorCallback = Box<dyn Fn(&ErrorInfo)>;

pub type GkResult<T> = Result<T, GlideError>;
