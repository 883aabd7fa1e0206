//! Error types for molsift.
//!
//! Errors carry a status-like [`ErrorCode`] plus a human readable message.
//! Codes split into two families: caller bugs (`InvalidScore`,
//! `InvalidCapacity`, `SamplerClosed`) that surface at the offending call,
//! and per-item collaborator failures (`LoadError`, `ScoreUnavailable`)
//! that drivers record and skip.

use std::fmt;
use thiserror::Error;

/// Error codes for molsift operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// A score was NaN or otherwise not comparable.
    InvalidScore,
    /// A capacity was negative or too large.
    InvalidCapacity,
    /// The scoring oracle could not load a candidate.
    LoadError,
    /// The scoring oracle could not score a candidate.
    ScoreUnavailable,
    /// The sampler was closed before the offer.
    SamplerClosed,
    /// An output already exists and overwriting was not requested.
    AlreadyExists,
    /// A configuration value could not be parsed.
    InvalidConfig,
    /// Underlying I/O failure.
    Io,
}

impl ErrorCode {
    /// Whether a driver may skip the offending candidate and keep streaming.
    pub fn is_skippable(self) -> bool {
        matches!(self, ErrorCode::LoadError | ErrorCode::ScoreUnavailable)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::InvalidScore => write!(f, "INVALID_SCORE"),
            ErrorCode::InvalidCapacity => write!(f, "INVALID_CAPACITY"),
            ErrorCode::LoadError => write!(f, "LOAD_ERROR"),
            ErrorCode::ScoreUnavailable => write!(f, "SCORE_UNAVAILABLE"),
            ErrorCode::SamplerClosed => write!(f, "SAMPLER_CLOSED"),
            ErrorCode::AlreadyExists => write!(f, "ALREADY_EXISTS"),
            ErrorCode::InvalidConfig => write!(f, "INVALID_CONFIG"),
            ErrorCode::Io => write!(f, "IO"),
        }
    }
}

/// Main error type for molsift operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct SiftError {
    code: ErrorCode,
    message: String,
}

impl SiftError {
    /// Create a new error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Get the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    // Convenience constructors

    /// Create an invalid score error.
    pub fn invalid_score(score: f64) -> Self {
        Self::new(ErrorCode::InvalidScore, format!("score {score} is not comparable"))
    }

    /// Create an invalid capacity error.
    pub fn invalid_capacity(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidCapacity, msg)
    }

    /// Create a load error.
    pub fn load(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::LoadError, msg)
    }

    /// Create a score unavailable error.
    pub fn score_unavailable(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ScoreUnavailable, msg)
    }

    /// Create a sampler closed error.
    pub fn sampler_closed() -> Self {
        Self::new(ErrorCode::SamplerClosed, "offer on a closed sampler")
    }

    /// Create an already exists error.
    pub fn already_exists(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::AlreadyExists, msg)
    }

    /// Create an invalid config error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidConfig, msg)
    }
}

impl From<std::io::Error> for SiftError {
    fn from(err: std::io::Error) -> Self {
        Self::new(ErrorCode::Io, err.to_string())
    }
}

impl From<serde_json::Error> for SiftError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_config(err.to_string())
    }
}

/// Result type alias for molsift operations.
pub type Result<T> = std::result::Result<T, SiftError>;

/// Convert a signed capacity into `usize`, rejecting negatives.
pub(crate) fn checked_capacity<N>(capacity: N) -> Result<usize>
where
    N: TryInto<usize> + Copy + fmt::Display,
{
    capacity
        .try_into()
        .map_err(|_| SiftError::invalid_capacity(format!("capacity {capacity} must be >= 0")))
}
