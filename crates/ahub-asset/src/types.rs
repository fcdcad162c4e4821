//! # Request and Response Types
//!
//! The fetch and push messages exchanged with a resolver. Responses carry a
//! [`Status`] of their own: a resolver may answer a call successfully while
//! reporting that it could not resolve the asset.

use ahub_core::{Qualifier, RemoteDigest, Status};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request to resolve one of `uris` to a blob.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FetchBlobRequest {
    pub instance_name: String,
    pub uris: Vec<String>,
    #[serde(default)]
    pub qualifiers: Vec<Qualifier>,
    /// Reject cached content older than this.
    #[serde(default)]
    pub oldest_content_accepted: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FetchBlobResponse {
    pub status: Status,
    /// The URI the blob was resolved from.
    pub uri: String,
    /// Qualifiers the resolver applied.
    #[serde(default)]
    pub qualifiers: Vec<Qualifier>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    pub blob_digest: RemoteDigest,
}

/// Request to resolve one of `uris` to a directory tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FetchDirectoryRequest {
    pub instance_name: String,
    pub uris: Vec<String>,
    #[serde(default)]
    pub qualifiers: Vec<Qualifier>,
    #[serde(default)]
    pub oldest_content_accepted: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FetchDirectoryResponse {
    pub status: Status,
    pub uri: String,
    #[serde(default)]
    pub qualifiers: Vec<Qualifier>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    pub root_directory_digest: RemoteDigest,
}

/// Request to associate `uris` with a blob already in the CAS.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PushBlobRequest {
    pub instance_name: String,
    pub uris: Vec<String>,
    #[serde(default)]
    pub qualifiers: Vec<Qualifier>,
    #[serde(default)]
    pub expire_at: Option<DateTime<Utc>>,
    pub blob_digest: RemoteDigest,
    #[serde(default)]
    pub references_blobs: Vec<RemoteDigest>,
    #[serde(default)]
    pub references_directories: Vec<RemoteDigest>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushBlobResponse {}

/// Request to associate `uris` with a directory already in the CAS.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PushDirectoryRequest {
    pub instance_name: String,
    pub uris: Vec<String>,
    #[serde(default)]
    pub qualifiers: Vec<Qualifier>,
    #[serde(default)]
    pub expire_at: Option<DateTime<Utc>>,
    pub root_directory_digest: RemoteDigest,
    #[serde(default)]
    pub references_blobs: Vec<RemoteDigest>,
    #[serde(default)]
    pub references_directories: Vec<RemoteDigest>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushDirectoryResponse {}

/// The fields every fetch and push request shares.
pub trait AssetRequest {
    fn instance_name(&self) -> &str;
    fn uris(&self) -> &[String];
    fn qualifiers(&self) -> &[Qualifier];
}

macro_rules! impl_asset_request {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl AssetRequest for $ty {
                fn instance_name(&self) -> &str {
                    &self.instance_name
                }

                fn uris(&self) -> &[String] {
                    &self.uris
                }

                fn qualifiers(&self) -> &[Qualifier] {
                    &self.qualifiers
                }
            }
        )+
    };
}

impl_asset_request!(
    FetchBlobRequest,
    FetchDirectoryRequest,
    PushBlobRequest,
    PushDirectoryRequest,
);
