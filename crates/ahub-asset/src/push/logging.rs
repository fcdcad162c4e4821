//! Logs each push request and the status it completed with.

use std::sync::Arc;

use ahub_cas::CallContext;
use ahub_core::Code;
use async_trait::async_trait;

use crate::error::AssetError;
use crate::fetch::logging::outcome_code;
use crate::push::Pusher;
use crate::types::{PushBlobRequest, PushBlobResponse, PushDirectoryRequest, PushDirectoryResponse};

pub struct LoggingPusher {
    pusher: Arc<dyn Pusher>,
}

impl LoggingPusher {
    pub fn new(pusher: Arc<dyn Pusher>) -> Self {
        Self { pusher }
    }
}

#[async_trait]
impl Pusher for LoggingPusher {
    async fn push_blob(
        &self,
        ctx: &CallContext,
        request: &PushBlobRequest,
    ) -> Result<PushBlobResponse, AssetError> {
        tracing::info!(
            instance = %request.instance_name,
            uris = ?request.uris,
            qualifiers = ?request.qualifiers,
            digest = %request.blob_digest,
            "pushing blob"
        );
        let result = self.pusher.push_blob(ctx, request).await;
        let code = outcome_code(&result, |_| Code::Ok);
        tracing::info!(uris = ?request.uris, code = %code, "PushBlob completed");
        result
    }

    async fn push_directory(
        &self,
        ctx: &CallContext,
        request: &PushDirectoryRequest,
    ) -> Result<PushDirectoryResponse, AssetError> {
        tracing::info!(
            instance = %request.instance_name,
            uris = ?request.uris,
            qualifiers = ?request.qualifiers,
            digest = %request.root_directory_digest,
            "pushing directory"
        );
        let result = self.pusher.push_directory(ctx, request).await;
        let code = outcome_code(&result, |_| Code::Ok);
        tracing::info!(uris = ?request.uris, code = %code, "PushDirectory completed");
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::push::UnimplementedPusher;

    #[tokio::test]
    async fn passes_errors_through() {
        let pusher = LoggingPusher::new(Arc::new(UnimplementedPusher));
        let err = pusher
            .push_directory(&CallContext::new(), &PushDirectoryRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.code(), Code::Unimplemented);
    }
}
