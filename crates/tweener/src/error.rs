//! Tween error types

use thiserror::Error;

/// Tween-related errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenError {
    /// A tween was constructed with a zero duration
    #[error("Tween duration must be non-zero")]
    InvalidDuration,

    /// A stop was requested for a tween that is not registered
    #[error("Tween is not registered with this scheduler")]
    TweenNotFound,
}

/// Result type for tween operations
pub type Result<T> = std::result::Result<T, TweenError>;
