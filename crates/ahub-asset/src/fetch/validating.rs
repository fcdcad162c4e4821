//! Rejects structurally invalid fetch requests before they reach the
//! resolver.

use std::sync::Arc;

use ahub_cas::CallContext;
use ahub_core::QualifierSet;
use async_trait::async_trait;

use crate::error::{AssetError, Operation};
use crate::fetch::Fetcher;
use crate::types::{FetchBlobRequest, FetchBlobResponse, FetchDirectoryRequest, FetchDirectoryResponse};
use crate::validation::validate_request;

pub struct ValidatingFetcher {
    fetcher: Arc<dyn Fetcher>,
    supported_qualifiers: QualifierSet,
}

impl ValidatingFetcher {
    pub fn new(fetcher: Arc<dyn Fetcher>, supported_qualifiers: QualifierSet) -> Self {
        Self {
            fetcher,
            supported_qualifiers,
        }
    }

    pub fn supported_qualifiers(&self) -> &QualifierSet {
        &self.supported_qualifiers
    }
}

#[async_trait]
impl Fetcher for ValidatingFetcher {
    async fn fetch_blob(
        &self,
        ctx: &CallContext,
        request: &FetchBlobRequest,
    ) -> Result<FetchBlobResponse, AssetError> {
        validate_request(Operation::FetchBlob, request, &self.supported_qualifiers)?;
        self.fetcher.fetch_blob(ctx, request).await
    }

    async fn fetch_directory(
        &self,
        ctx: &CallContext,
        request: &FetchDirectoryRequest,
    ) -> Result<FetchDirectoryResponse, AssetError> {
        validate_request(Operation::FetchDirectory, request, &self.supported_qualifiers)?;
        self.fetcher.fetch_directory(ctx, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::UnimplementedFetcher;
    use ahub_core::{Code, Qualifier};

    fn fetcher() -> ValidatingFetcher {
        ValidatingFetcher::new(
            Arc::new(UnimplementedFetcher),
            QualifierSet::new(["checksum.sri"]),
        )
    }

    #[tokio::test]
    async fn rejects_request_without_uris() {
        let err = fetcher()
            .fetch_directory(&CallContext::new(), &FetchDirectoryRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.code(), Code::InvalidArgument);
        assert_eq!(
            err.to_string(),
            "FetchDirectory does not support requests without any URIs specified."
        );
    }

    #[tokio::test]
    async fn rejects_unsupported_qualifier() {
        let request = FetchBlobRequest {
            uris: vec!["https://example.com/a".into()],
            qualifiers: vec![Qualifier::new("vcs.commit", "abc")],
            ..Default::default()
        };
        let err = fetcher()
            .fetch_blob(&CallContext::new(), &request)
            .await
            .unwrap_err();
        assert_eq!(err.code(), Code::InvalidArgument);
        assert_eq!(err.violations()[0].description, "\"vcs.commit\" not supported");
    }

    #[tokio::test]
    async fn valid_request_reaches_delegate() {
        let request = FetchBlobRequest {
            uris: vec!["https://example.com/a".into()],
            qualifiers: vec![Qualifier::new("checksum.sri", "sha256-abc")],
            ..Default::default()
        };
        let response = fetcher()
            .fetch_blob(&CallContext::new(), &request)
            .await
            .unwrap();
        assert_eq!(response.status.code, Code::Unimplemented);
    }
}
