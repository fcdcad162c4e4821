//! A pusher that stores nothing.

use ahub_cas::CallContext;
use ahub_core::Code;
use async_trait::async_trait;

use crate::error::AssetError;
use crate::push::Pusher;
use crate::types::{PushBlobRequest, PushBlobResponse, PushDirectoryRequest, PushDirectoryResponse};

/// Fails every push with `Unimplemented`. Push responses have no status
/// field, so the status travels as the error.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnimplementedPusher;

#[async_trait]
impl Pusher for UnimplementedPusher {
    async fn push_blob(
        &self,
        _ctx: &CallContext,
        _request: &PushBlobRequest,
    ) -> Result<PushBlobResponse, AssetError> {
        Err(AssetError::status(Code::Unimplemented, "PushBlob not implemented"))
    }

    async fn push_directory(
        &self,
        _ctx: &CallContext,
        _request: &PushDirectoryRequest,
    ) -> Result<PushDirectoryResponse, AssetError> {
        Err(AssetError::status(Code::Unimplemented, "PushDirectory not implemented"))
    }
}
