//! # Fetch Service
//!
//! [`Fetcher`] resolves URIs to content already in the CAS. The service is
//! built as a chain of fetchers, each wrapping the next:
//!
//! ```text
//! ValidatingFetcher -> CompletenessCheckingFetcher -> LoggingFetcher -> resolver
//! ```
//!
//! Every link implements the same trait, so any of them can be left out of
//! the chain (see [`crate::pipeline`]).

use std::sync::Arc;

use ahub_cas::CallContext;
use async_trait::async_trait;

use crate::error::AssetError;
use crate::types::{FetchBlobRequest, FetchBlobResponse, FetchDirectoryRequest, FetchDirectoryResponse};

pub mod completeness;
pub mod logging;
pub mod unimplemented;
pub mod validating;

pub use completeness::CompletenessCheckingFetcher;
pub use logging::LoggingFetcher;
pub use unimplemented::UnimplementedFetcher;
pub use validating::ValidatingFetcher;

/// Resolves asset URIs to CAS digests.
#[async_trait]
pub trait Fetcher: Send + Sync + 'static {
    async fn fetch_blob(
        &self,
        ctx: &CallContext,
        request: &FetchBlobRequest,
    ) -> Result<FetchBlobResponse, AssetError>;

    async fn fetch_directory(
        &self,
        ctx: &CallContext,
        request: &FetchDirectoryRequest,
    ) -> Result<FetchDirectoryResponse, AssetError>;
}

#[async_trait]
impl<T: Fetcher + ?Sized> Fetcher for Arc<T> {
    async fn fetch_blob(
        &self,
        ctx: &CallContext,
        request: &FetchBlobRequest,
    ) -> Result<FetchBlobResponse, AssetError> {
        (**self).fetch_blob(ctx, request).await
    }

    async fn fetch_directory(
        &self,
        ctx: &CallContext,
        request: &FetchDirectoryRequest,
    ) -> Result<FetchDirectoryResponse, AssetError> {
        (**self).fetch_directory(ctx, request).await
    }
}
