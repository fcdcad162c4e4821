//! Rejects structurally invalid push requests before they reach the
//! backing pusher.

use std::sync::Arc;

use ahub_cas::CallContext;
use ahub_core::QualifierSet;
use async_trait::async_trait;

use crate::error::{AssetError, Operation};
use crate::push::Pusher;
use crate::types::{PushBlobRequest, PushBlobResponse, PushDirectoryRequest, PushDirectoryResponse};
use crate::validation::validate_request;

pub struct ValidatingPusher {
    pusher: Arc<dyn Pusher>,
    supported_qualifiers: QualifierSet,
}

impl ValidatingPusher {
    pub fn new(pusher: Arc<dyn Pusher>, supported_qualifiers: QualifierSet) -> Self {
        Self {
            pusher,
            supported_qualifiers,
        }
    }
}

#[async_trait]
impl Pusher for ValidatingPusher {
    async fn push_blob(
        &self,
        ctx: &CallContext,
        request: &PushBlobRequest,
    ) -> Result<PushBlobResponse, AssetError> {
        validate_request(Operation::PushBlob, request, &self.supported_qualifiers)?;
        self.pusher.push_blob(ctx, request).await
    }

    async fn push_directory(
        &self,
        ctx: &CallContext,
        request: &PushDirectoryRequest,
    ) -> Result<PushDirectoryResponse, AssetError> {
        validate_request(Operation::PushDirectory, request, &self.supported_qualifiers)?;
        self.pusher.push_directory(ctx, request).await
    }
}
