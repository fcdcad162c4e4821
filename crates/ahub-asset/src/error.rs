//! # Asset Service Errors
//!
//! Every failure a fetch or push call can produce. Completeness failures
//! keep the operation, the URI the delegate resolved, and the underlying
//! [`CheckError`], so a caller can tell a missing leaf from a missing Tree
//! from a store outage without parsing messages.

use std::fmt;

use ahub_cas::{CheckError, Interrupted};
use ahub_core::{Code, CoreError, FieldViolation, Status};
use thiserror::Error;

/// The service operation a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    FetchBlob,
    FetchDirectory,
    PushBlob,
    PushDirectory,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FetchBlob => "FetchBlob",
            Self::FetchDirectory => "FetchDirectory",
            Self::PushBlob => "PushBlob",
            Self::PushDirectory => "PushDirectory",
        }
    }

    /// Progressive form used in error messages, e.g. "fetching blob".
    pub fn gerund(&self) -> &'static str {
        match self {
            Self::FetchBlob => "fetching blob",
            Self::FetchDirectory => "fetching directory",
            Self::PushBlob => "pushing blob",
            Self::PushDirectory => "pushing directory",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request rejected before reaching the delegate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    pub operation: Operation,
    pub message: String,
    /// One entry per offending field value. Empty for request-level
    /// rejections such as a missing URI list.
    pub violations: Vec<FieldViolation>,
}

/// Errors returned by fetchers and pushers.
#[derive(Error, Debug)]
pub enum AssetError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The delegate resolved the asset but the content it references is
    /// not fully present, or could not be checked.
    #[error("failed completeness check whilst {} {uri}: {source}", .operation.gerund())]
    Completeness {
        operation: Operation,
        uri: String,
        #[source]
        source: CheckError,
    },

    /// The request names an invalid instance.
    #[error("invalid instance name: {0}")]
    InvalidInstance(#[from] CoreError),

    #[error(transparent)]
    Interrupted(#[from] Interrupted),

    /// A collaborator failure, passed through with its status intact.
    #[error("{0}")]
    Status(Status),
}

impl AssetError {
    /// A collaborator failure with the given code.
    pub fn status(code: Code, message: impl Into<String>) -> Self {
        Self::Status(Status::new(code, message))
    }

    pub fn code(&self) -> Code {
        match self {
            Self::Validation(_) | Self::InvalidInstance(_) => Code::InvalidArgument,
            Self::Completeness { source, .. } => source.code(),
            Self::Interrupted(i) => i.code(),
            Self::Status(s) => s.code,
        }
    }

    /// The status a transport layer would send for this error.
    pub fn to_status(&self) -> Status {
        Status::new(self.code(), self.to_string())
    }

    /// The completeness cause, if this is a completeness failure.
    pub fn check_error(&self) -> Option<&CheckError> {
        match self {
            Self::Completeness { source, .. } => Some(source),
            _ => None,
        }
    }

    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            Self::Validation(v) => &v.violations,
            _ => &[],
        }
    }
}

impl From<Status> for AssetError {
    fn from(status: Status) -> Self {
        Self::Status(status)
    }
}
