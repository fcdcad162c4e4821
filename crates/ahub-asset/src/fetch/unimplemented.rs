//! A fetcher that resolves nothing.

use ahub_cas::CallContext;
use ahub_core::{Code, Status};
use async_trait::async_trait;

use crate::error::AssetError;
use crate::fetch::Fetcher;
use crate::types::{FetchBlobRequest, FetchBlobResponse, FetchDirectoryRequest, FetchDirectoryResponse};

/// Answers every fetch with an `Unimplemented` status in the response.
/// The call itself succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnimplementedFetcher;

#[async_trait]
impl Fetcher for UnimplementedFetcher {
    async fn fetch_blob(
        &self,
        _ctx: &CallContext,
        _request: &FetchBlobRequest,
    ) -> Result<FetchBlobResponse, AssetError> {
        Ok(FetchBlobResponse {
            status: Status::new(Code::Unimplemented, "FetchBlob not implemented"),
            ..Default::default()
        })
    }

    async fn fetch_directory(
        &self,
        _ctx: &CallContext,
        _request: &FetchDirectoryRequest,
    ) -> Result<FetchDirectoryResponse, AssetError> {
        Ok(FetchDirectoryResponse {
            status: Status::new(Code::Unimplemented, "FetchDirectory not implemented"),
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn both_operations_report_unimplemented() {
        let ctx = CallContext::new();
        let blob = UnimplementedFetcher
            .fetch_blob(&ctx, &FetchBlobRequest::default())
            .await
            .unwrap();
        assert_eq!(blob.status, Status::new(Code::Unimplemented, "FetchBlob not implemented"));
        let dir = UnimplementedFetcher
            .fetch_directory(&ctx, &FetchDirectoryRequest::default())
            .await
            .unwrap();
        assert_eq!(dir.status.code, Code::Unimplemented);
        assert_eq!(dir.status.message, "FetchDirectory not implemented");
    }
}
