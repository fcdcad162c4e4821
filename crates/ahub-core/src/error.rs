//! # Error Types
//!
//! Errors raised while constructing or decoding core values. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations and
//! carry the offending input so callers can report it verbatim.

use thiserror::Error;

use crate::status::Code;

/// Errors from constructing or decoding foundational types.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The instance name violates the naming rules.
    #[error("invalid instance name {name:?}: {reason}")]
    InvalidInstanceName {
        /// The rejected instance name.
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The digest hash or size is malformed.
    #[error("invalid digest {hash:?} (size {size_bytes}): {reason}")]
    InvalidDigest {
        /// The rejected hash string.
        hash: String,
        /// The declared size in bytes.
        size_bytes: i64,
        /// Why it was rejected.
        reason: String,
    },

    /// A directory tree could not be encoded or decoded.
    #[error("malformed tree: {0}")]
    MalformedTree(#[from] serde_json::Error),
}

impl CoreError {
    /// Status code reported to callers for this error.
    pub fn code(&self) -> Code {
        match self {
            Self::InvalidInstanceName { .. } | Self::InvalidDigest { .. } => Code::InvalidArgument,
            Self::MalformedTree(_) => Code::InvalidArgument,
        }
    }
}
