//! Error types for path generation, playback and encoding.

use serde::{Deserialize, Serialize};

/// Every failure the core can report.
///
/// Math-layer kinds signal a violated precondition and are not meant to be
/// recovered from; edit, playback and codec kinds are surfaced to the command
/// layer as a failed response.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PathError {
    /// Zero pivot during tridiagonal elimination
    #[error("Degenerate tridiagonal system: zero pivot at row {row}")]
    DegenerateSystem { row: usize },

    /// Non-finite clamped boundary slope
    #[error("Invalid boundary slope: {slope}")]
    InvalidBoundary { slope: f32 },

    /// Spline evaluated before a fit completed
    #[error("Spline must be fitted before it can be evaluated")]
    NotFitted,

    /// Query abscissa smaller than the previous one
    #[error("Query values must be sorted: {value} follows {previous}")]
    UnsortedQuery { value: f32, previous: f32 },

    /// Boundary tangent too short to normalize
    #[error("Tangent vector is too small to be normalized (magnitude {magnitude})")]
    DegenerateTangent { magnitude: f32 },

    /// Resampling needs at least two output samples
    #[error("At least 2 output samples are required, got {requested}")]
    InsufficientSamples { requested: usize },

    /// Curve evaluation needs more control values
    #[error("At least {required} control points are required, got {actual}")]
    InsufficientControlPoints { required: usize, actual: usize },

    /// Knot abscissas must be strictly increasing
    #[error("Knots must be strictly increasing (index {index})")]
    NonIncreasingKnots { index: usize },

    /// Parallel sequences disagree in length or dimension
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The easing mode needs more control points than are present
    #[error("{easing} easing needs at least 2 {sequence}, got {actual}")]
    EmptyControlSet {
        easing: String,
        sequence: String,
        actual: usize,
    },

    /// Playback requested before any track was generated
    #[error("Path not generated yet")]
    NotGenerated,

    /// No positions to teleport to
    #[error("No points are specified")]
    NoControlPoints,

    /// Control point sequence is full
    #[error("Point limit reached ({max} points)")]
    PointLimitReached { max: usize },

    /// Removal index outside the sequence
    #[error("Index {index} is out of range for {len} points")]
    IndexOutOfRange { index: i64, len: usize },

    /// Blob shorter than the fixed header
    #[error("Truncated path data: {len} bytes (minimum {min})")]
    TruncatedData { len: usize, min: usize },

    /// Blob body could not be parsed
    #[error("Malformed path data: {reason}")]
    MalformedData { reason: String },

    /// Configuration rejected
    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },
}

impl PathError {
    /// Check if this is a recoverable error
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::EmptyControlSet { .. }
                | Self::NotGenerated
                | Self::NoControlPoints
                | Self::PointLimitReached { .. }
                | Self::IndexOutOfRange { .. }
                | Self::TruncatedData { .. }
                | Self::MalformedData { .. }
                | Self::InvalidConfig { .. }
        )
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::DegenerateSystem { .. }
            | Self::InvalidBoundary { .. }
            | Self::NotFitted
            | Self::UnsortedQuery { .. }
            | Self::DegenerateTangent { .. }
            | Self::InsufficientSamples { .. }
            | Self::InsufficientControlPoints { .. }
            | Self::NonIncreasingKnots { .. }
            | Self::DimensionMismatch { .. } => "math",
            Self::EmptyControlSet { .. } => "generation",
            Self::NotGenerated | Self::NoControlPoints => "playback",
            Self::PointLimitReached { .. } | Self::IndexOutOfRange { .. } => "edit",
            Self::TruncatedData { .. } | Self::MalformedData { .. } => "codec",
            Self::InvalidConfig { .. } => "config",
        }
    }
}

impl From<std::io::Error> for PathError {
    fn from(err: std::io::Error) -> Self {
        Self::MalformedData {
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for PathError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidConfig {
            reason: err.to_string(),
        }
    }
}

pub type PathResult<T> = Result<T, PathError>;
