//! Logs each fetch request and the status it completed with.

use std::sync::Arc;

use ahub_cas::CallContext;
use ahub_core::Code;
use async_trait::async_trait;

use crate::error::AssetError;
use crate::fetch::Fetcher;
use crate::types::{FetchBlobRequest, FetchBlobResponse, FetchDirectoryRequest, FetchDirectoryResponse};

/// Records URIs and qualifiers before delegating, and the resulting code
/// afterwards. Never alters the request or the outcome.
pub struct LoggingFetcher {
    fetcher: Arc<dyn Fetcher>,
}

impl LoggingFetcher {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self { fetcher }
    }
}

/// The code a call completed with: the response status on success, the
/// error's code on failure.
pub(crate) fn outcome_code<T>(result: &Result<T, AssetError>, status: impl Fn(&T) -> Code) -> Code {
    match result {
        Ok(response) => status(response),
        Err(err) => err.code(),
    }
}

#[async_trait]
impl Fetcher for LoggingFetcher {
    async fn fetch_blob(
        &self,
        ctx: &CallContext,
        request: &FetchBlobRequest,
    ) -> Result<FetchBlobResponse, AssetError> {
        tracing::info!(
            instance = %request.instance_name,
            uris = ?request.uris,
            qualifiers = ?request.qualifiers,
            "fetching blob"
        );
        let result = self.fetcher.fetch_blob(ctx, request).await;
        let code = outcome_code(&result, |r| r.status.code);
        tracing::info!(uris = ?request.uris, code = %code, "FetchBlob completed");
        result
    }

    async fn fetch_directory(
        &self,
        ctx: &CallContext,
        request: &FetchDirectoryRequest,
    ) -> Result<FetchDirectoryResponse, AssetError> {
        tracing::info!(
            instance = %request.instance_name,
            uris = ?request.uris,
            qualifiers = ?request.qualifiers,
            "fetching directory"
        );
        let result = self.fetcher.fetch_directory(ctx, request).await;
        let code = outcome_code(&result, |r| r.status.code);
        tracing::info!(uris = ?request.uris, code = %code, "FetchDirectory completed");
        result
    }
}
