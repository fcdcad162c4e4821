//! # CAS Error Types
//!
//! `CasError` is what a store implementation reports. `CheckError` is what
//! a completeness check reports: it wraps store failures with the operation
//! and digest that were in flight, and keeps leaf misses, Tree misses and
//! interruptions apart so callers can branch on the cause.

use std::fmt;

use ahub_core::{Code, CoreError, Digest, DigestSet};
use thiserror::Error;

use crate::context::Interrupted;

/// Errors reported by a content-addressable store.
#[derive(Error, Debug, Clone)]
pub enum CasError {
    /// The store holds no object for the digest.
    #[error("blob {digest} not found")]
    NotFound { digest: Digest },

    /// The object is larger than the caller is willing to read.
    #[error("blob {digest} is {size_bytes} bytes in size, while a maximum of {limit_bytes} bytes is permitted")]
    TooLarge {
        digest: Digest,
        size_bytes: u64,
        limit_bytes: usize,
    },

    /// Any other failure, with the status the backend reported.
    #[error("storage backend failure ({code}): {message}")]
    Backend { code: Code, message: String },
}

impl CasError {
    /// A backend failure with the given status.
    pub fn backend(code: Code, message: impl Into<String>) -> Self {
        Self::Backend {
            code,
            message: message.into(),
        }
    }

    pub fn code(&self) -> Code {
        match self {
            Self::NotFound { .. } => Code::NotFound,
            Self::TooLarge { .. } => Code::InvalidArgument,
            Self::Backend { code, .. } => *code,
        }
    }
}

/// Result type for store operations.
pub type CasResult<T> = Result<T, CasError>;

/// The store operation that was in progress when a backend failure
/// occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    Get,
    FindMissing,
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("Get"),
            Self::FindMissing => f.write_str("FindMissing"),
        }
    }
}

/// One or more digests were confirmed absent from the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("referenced content is not present in the content addressable storage: {missing}")]
pub struct CompletenessError {
    pub missing: DigestSet,
}

/// Errors from checking that referenced content is present.
#[derive(Error, Debug)]
pub enum CheckError {
    /// Leaf digests are missing.
    #[error(transparent)]
    Incomplete(#[from] CompletenessError),

    /// The Tree object for a directory is absent or exceeds the size bound.
    #[error("referenced directory tree {digest} is not present in the content addressable storage: {source}")]
    TreeUnavailable {
        digest: Digest,
        #[source]
        source: CasError,
    },

    /// The Tree object exists but cannot be decoded.
    #[error("referenced directory tree {digest} is malformed: {source}")]
    MalformedTree {
        digest: Digest,
        #[source]
        source: CoreError,
    },

    /// The store failed while serving a read or existence query.
    #[error("{operation} failed for {digest} (batch of {batch_len}): {source}")]
    Backend {
        operation: StoreOperation,
        digest: Digest,
        batch_len: usize,
        #[source]
        source: CasError,
    },

    /// A digest handed to the check is malformed.
    #[error("invalid digest: {0}")]
    InvalidDigest(#[from] CoreError),

    /// The call was cancelled or ran past its deadline.
    #[error(transparent)]
    Interrupted(#[from] Interrupted),
}

impl CheckError {
    pub fn code(&self) -> Code {
        match self {
            Self::Incomplete(_) | Self::TreeUnavailable { .. } => Code::NotFound,
            Self::MalformedTree { source, .. } => source.code(),
            Self::Backend { source, .. } => source.code(),
            Self::InvalidDigest(e) => e.code(),
            Self::Interrupted(i) => i.code(),
        }
    }

    /// Returns true when the referenced content is confirmed absent, as
    /// opposed to the check itself failing.
    pub fn is_content_missing(&self) -> bool {
        matches!(self, Self::Incomplete(_) | Self::TreeUnavailable { .. })
    }

    /// The missing leaf digests, when this is a completeness failure.
    pub fn missing(&self) -> Option<&DigestSet> {
        match self {
            Self::Incomplete(e) => Some(&e.missing),
            _ => None,
        }
    }
}
