//! # Push Service
//!
//! [`Pusher`] records that URIs resolve to content already in the CAS. Push
//! requests are validated and logged but never completeness checked.

use std::sync::Arc;

use ahub_cas::CallContext;
use async_trait::async_trait;

use crate::error::AssetError;
use crate::types::{PushBlobRequest, PushBlobResponse, PushDirectoryRequest, PushDirectoryResponse};

pub mod logging;
pub mod unimplemented;
pub mod validating;

pub use logging::LoggingPusher;
pub use unimplemented::UnimplementedPusher;
pub use validating::ValidatingPusher;

/// Associates asset URIs with CAS digests.
#[async_trait]
pub trait Pusher: Send + Sync + 'static {
    async fn push_blob(
        &self,
        ctx: &CallContext,
        request: &PushBlobRequest,
    ) -> Result<PushBlobResponse, AssetError>;

    async fn push_directory(
        &self,
        ctx: &CallContext,
        request: &PushDirectoryRequest,
    ) -> Result<PushDirectoryResponse, AssetError>;
}

#[async_trait]
impl<T: Pusher + ?Sized> Pusher for Arc<T> {
    async fn push_blob(
        &self,
        ctx: &CallContext,
        request: &PushBlobRequest,
    ) -> Result<PushBlobResponse, AssetError> {
        (**self).push_blob(ctx, request).await
    }

    async fn push_directory(
        &self,
        ctx: &CallContext,
        request: &PushDirectoryRequest,
    ) -> Result<PushDirectoryResponse, AssetError> {
        (**self).push_directory(ctx, request).await
    }
}
