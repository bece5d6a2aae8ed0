//! Error types for the Classboard engine.

use thiserror::Error;

/// Validation errors raised by the engine's helpers.
///
/// Reducers never fail; these errors only come from the caller-side checks
/// (grade range, attendance parsing, image names).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("grade must be between 0 and 12, got {0}")]
    GradeOutOfRange(i64),

    #[error("unknown attendance status: {0}")]
    UnknownAttendStatus(String),

    #[error("unsupported image file '{0}': allowed extensions are jpg, jpeg, png, gif, webp, bmp")]
    UnsupportedImage(String),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
