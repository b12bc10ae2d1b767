//! Error types for legacy keyframe-set decoding

/// Every failure aborts the whole decode call; no partial output is returned.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LegacyError {
    /// Malformed token structure, premature end of input, or a failing reader
    #[error("token stream error at line {line}, column {column}: {reason}")]
    StreamSyntax {
        line: usize,
        column: usize,
        reason: String,
    },

    /// A field held a value of the wrong kind
    #[error("malformed value for '{field}': {reason}")]
    MalformedValue { field: &'static str, reason: String },

    /// The generic decoder failed on a region delegated to it
    #[error("delegate decoder failed for '{field}': {reason}")]
    DelegateDecode { field: &'static str, reason: String },
}

impl LegacyError {
    /// Name of the field that triggered the error, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::StreamSyntax { .. } => None,
            Self::MalformedValue { field, .. } | Self::DelegateDecode { field, .. } => Some(*field),
        }
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::StreamSyntax { .. } => "stream",
            Self::MalformedValue { .. } => "value",
            Self::DelegateDecode { .. } => "delegate",
        }
    }
}
