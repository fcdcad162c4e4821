//! # Completeness Checking Fetcher
//!
//! Wraps a resolver and refuses to hand back a reference to content that
//! is no longer (or was never) in the CAS.
//!
//! - **Blobs**: the returned blob digest is checked with a single
//!   FindMissing query.
//! - **Directories**: the Tree stored under the returned root digest is
//!   read (bounded by `maximum_message_size_bytes`), and every file digest
//!   in its root and child directories is checked in batches of
//!   `batch_size`. Directory digests are not checked; the Tree vouches for
//!   them.
//!
//! A passing check returns the resolver's response unchanged. A failing
//! one returns [`AssetError::Completeness`] carrying the URI and cause.
//! Resolver failures, and responses whose own status is not OK, are passed
//! through without touching the store.
//!
//! When the check proves content missing, the configured
//! [`IncompletePolicy`] decides whether to surface the failure or ask the
//! resolver again, up to `max_refetches` times.

use std::sync::Arc;

use ahub_cas::tree::{derive_tree_digest, file_digests, get_tree};
use ahub_cas::{CallContext, CheckError, ContentAddressableStorage, FindMissingQueue, FindMissingSummary};
use ahub_core::{InstanceName, RemoteDigest};
use async_trait::async_trait;

use crate::config::CompletenessConfig;
use crate::error::{AssetError, Operation};
use crate::fetch::Fetcher;
use crate::policy::{Incident, IncompletePolicy, PolicyDecision, SurfaceIncomplete};
use crate::types::{FetchBlobRequest, FetchBlobResponse, FetchDirectoryRequest, FetchDirectoryResponse};

pub struct CompletenessCheckingFetcher {
    fetcher: Arc<dyn Fetcher>,
    cas: Arc<dyn ContentAddressableStorage>,
    batch_size: usize,
    maximum_message_size_bytes: usize,
    max_refetches: u32,
    policy: Arc<dyn IncompletePolicy>,
}

impl CompletenessCheckingFetcher {
    /// Check `fetcher`'s answers against `cas`. Failures are surfaced; see
    /// [`with_policy`](Self::with_policy) to change that.
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        cas: Arc<dyn ContentAddressableStorage>,
        batch_size: usize,
        maximum_message_size_bytes: usize,
    ) -> Self {
        Self {
            fetcher,
            cas,
            batch_size: batch_size.max(1),
            maximum_message_size_bytes,
            max_refetches: 0,
            policy: Arc::new(SurfaceIncomplete),
        }
    }

    pub fn from_config(
        fetcher: Arc<dyn Fetcher>,
        cas: Arc<dyn ContentAddressableStorage>,
        config: &CompletenessConfig,
    ) -> Self {
        let mut checker = Self::new(fetcher, cas, config.batch_size, config.maximum_message_size_bytes);
        checker.max_refetches = config.max_refetches;
        checker
    }

    /// Consult `policy` on missing content, allowing at most
    /// `max_refetches` extra resolver calls per request.
    pub fn with_policy(mut self, policy: Arc<dyn IncompletePolicy>, max_refetches: u32) -> Self {
        self.policy = policy;
        self.max_refetches = max_refetches;
        self
    }

    /// Check that a single blob is present.
    pub async fn check_blob(
        &self,
        ctx: &CallContext,
        instance: &InstanceName,
        blob_digest: &RemoteDigest,
    ) -> Result<FindMissingSummary, CheckError> {
        let mut queue = FindMissingQueue::new(ctx, instance.clone(), self.cas.as_ref(), self.batch_size);
        queue.add(blob_digest).await?;
        queue.finalize().await
    }

    /// Check that the Tree under `root_directory_digest` and every file it
    /// lists are present.
    pub async fn check_directory(
        &self,
        ctx: &CallContext,
        instance: &InstanceName,
        root_directory_digest: &RemoteDigest,
    ) -> Result<FindMissingSummary, CheckError> {
        let tree_digest = derive_tree_digest(instance, root_directory_digest)?;
        let tree = get_tree(ctx, self.cas.as_ref(), &tree_digest, self.maximum_message_size_bytes).await?;
        let mut queue = FindMissingQueue::new(ctx, instance.clone(), self.cas.as_ref(), self.batch_size);
        for digest in file_digests(&tree) {
            queue.add(digest).await?;
        }
        queue.finalize().await
    }

    /// Whether to call the resolver again after `error`.
    async fn should_refetch(
        &self,
        ctx: &CallContext,
        operation: Operation,
        instance: &InstanceName,
        uri: &str,
        error: &CheckError,
        attempt: u32,
    ) -> bool {
        if attempt >= self.max_refetches || !error.is_content_missing() {
            return false;
        }
        let incident = Incident {
            operation,
            instance,
            uri,
            error,
            attempt,
        };
        match self.policy.decide(ctx, &incident).await {
            PolicyDecision::Refetch => {
                tracing::warn!(
                    %operation,
                    uri,
                    attempt = attempt + 1,
                    error = %error,
                    "content incomplete, refetching"
                );
                true
            }
            PolicyDecision::Surface => false,
        }
    }
}

/// Wrap a failed check. Interruptions are reported as such rather than as
/// completeness failures.
fn failure(operation: Operation, uri: String, source: CheckError) -> AssetError {
    match source {
        CheckError::Interrupted(interrupted) => AssetError::Interrupted(interrupted),
        source => AssetError::Completeness {
            operation,
            uri,
            source,
        },
    }
}

#[async_trait]
impl Fetcher for CompletenessCheckingFetcher {
    async fn fetch_blob(
        &self,
        ctx: &CallContext,
        request: &FetchBlobRequest,
    ) -> Result<FetchBlobResponse, AssetError> {
        let operation = Operation::FetchBlob;
        let mut attempt = 0;
        loop {
            let response = ctx.run(self.fetcher.fetch_blob(ctx, request)).await??;
            if !response.status.is_ok() {
                return Ok(response);
            }
            let instance = InstanceName::new(&request.instance_name)?;
            match self.check_blob(ctx, &instance, &response.blob_digest).await {
                Ok(summary) => {
                    tracing::debug!(
                        uri = %response.uri,
                        digest = %response.blob_digest,
                        queries = summary.queries,
                        "blob complete"
                    );
                    return Ok(response);
                }
                Err(source) => {
                    if self
                        .should_refetch(ctx, operation, &instance, &response.uri, &source, attempt)
                        .await
                    {
                        attempt += 1;
                        continue;
                    }
                    return Err(failure(operation, response.uri, source));
                }
            }
        }
    }

    async fn fetch_directory(
        &self,
        ctx: &CallContext,
        request: &FetchDirectoryRequest,
    ) -> Result<FetchDirectoryResponse, AssetError> {
        let operation = Operation::FetchDirectory;
        let mut attempt = 0;
        loop {
            let response = ctx.run(self.fetcher.fetch_directory(ctx, request)).await??;
            if !response.status.is_ok() {
                return Ok(response);
            }
            let instance = InstanceName::new(&request.instance_name)?;
            match self
                .check_directory(ctx, &instance, &response.root_directory_digest)
                .await
            {
                Ok(summary) => {
                    tracing::debug!(
                        uri = %response.uri,
                        digest = %response.root_directory_digest,
                        files = summary.checked,
                        queries = summary.queries,
                        "directory complete"
                    );
                    return Ok(response);
                }
                Err(source) => {
                    if self
                        .should_refetch(ctx, operation, &instance, &response.uri, &source, attempt)
                        .await
                    {
                        attempt += 1;
                        continue;
                    }
                    return Err(failure(operation, response.uri, source));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahub_cas::MemoryContentAddressableStorage;
    use ahub_core::{Code, Directory, FileNode, Status, Tree};

    /// Answers every fetch with a fixed response.
    struct FixedFetcher {
        blob: FetchBlobResponse,
        directory: FetchDirectoryResponse,
    }

    #[async_trait]
    impl Fetcher for FixedFetcher {
        async fn fetch_blob(
            &self,
            _ctx: &CallContext,
            _request: &FetchBlobRequest,
        ) -> Result<FetchBlobResponse, AssetError> {
            Ok(self.blob.clone())
        }

        async fn fetch_directory(
            &self,
            _ctx: &CallContext,
            _request: &FetchDirectoryRequest,
        ) -> Result<FetchDirectoryResponse, AssetError> {
            Ok(self.directory.clone())
        }
    }

    fn checker(cas: Arc<MemoryContentAddressableStorage>, blob: RemoteDigest, root: RemoteDigest) -> CompletenessCheckingFetcher {
        let fetcher = FixedFetcher {
            blob: FetchBlobResponse {
                uri: "www.example.com".into(),
                blob_digest: blob,
                ..Default::default()
            },
            directory: FetchDirectoryResponse {
                uri: "www.example.com".into(),
                root_directory_digest: root,
                ..Default::default()
            },
        };
        CompletenessCheckingFetcher::new(Arc::new(fetcher), cas, 5, 16 * 1024 * 1024)
    }

    fn blob_request() -> FetchBlobRequest {
        FetchBlobRequest {
            uris: vec!["www.example.com".into()],
            ..Default::default()
        }
    }

    fn directory_request() -> FetchDirectoryRequest {
        FetchDirectoryRequest {
            uris: vec!["www.example.com".into()],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn present_blob_passes_unchanged() {
        let cas = Arc::new(MemoryContentAddressableStorage::new());
        let digest = cas.put_blob(&InstanceName::default(), b"hello").unwrap();
        let checker = checker(cas, digest.to_remote(), RemoteDigest::default());
        let response = checker
            .fetch_blob(&CallContext::new(), &blob_request())
            .await
            .unwrap();
        assert_eq!(response.blob_digest, digest.to_remote());
        assert_eq!(response.uri, "www.example.com");
    }

    #[tokio::test]
    async fn absent_blob_is_not_found() {
        let cas = Arc::new(MemoryContentAddressableStorage::new());
        let checker = checker(
            cas,
            RemoteDigest::new("eda14e187a768b38eda999457c9cca1e", 6),
            RemoteDigest::default(),
        );
        let err = checker
            .fetch_blob(&CallContext::new(), &blob_request())
            .await
            .unwrap_err();
        assert_eq!(err.code(), Code::NotFound);
        assert!(matches!(
            err,
            AssetError::Completeness {
                operation: Operation::FetchBlob,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn directory_with_all_files_passes() {
        let cas = Arc::new(MemoryContentAddressableStorage::new());
        let instance = InstanceName::default();
        let file = cas.put_blob(&instance, b"file").unwrap();
        let tree = Tree {
            root: Directory {
                files: vec![FileNode {
                    name: "file".into(),
                    digest: file.to_remote(),
                    is_executable: false,
                }],
                ..Default::default()
            },
            children: vec![],
        };
        let root = cas.put_tree(&instance, &tree).unwrap();
        let checker = checker(cas.clone(), RemoteDigest::default(), root.to_remote());
        assert!(checker
            .fetch_directory(&CallContext::new(), &directory_request())
            .await
            .is_ok());

        cas.remove(&file);
        let err = checker
            .fetch_directory(&CallContext::new(), &directory_request())
            .await
            .unwrap_err();
        assert_eq!(err.check_error().and_then(CheckError::missing).map(|m| m.len()), Some(1));
    }

    #[tokio::test]
    async fn non_ok_response_skips_check() {
        let fetcher = FixedFetcher {
            blob: FetchBlobResponse {
                status: Status::new(Code::NotFound, "unknown uri"),
                ..Default::default()
            },
            directory: FetchDirectoryResponse::default(),
        };
        let checker = CompletenessCheckingFetcher::new(
            Arc::new(fetcher),
            Arc::new(MemoryContentAddressableStorage::new()),
            5,
            1024,
        );
        let response = checker
            .fetch_blob(&CallContext::new(), &blob_request())
            .await
            .unwrap();
        assert_eq!(response.status.code, Code::NotFound);
    }

    #[tokio::test]
    async fn invalid_instance_name_is_invalid_argument() {
        let cas = Arc::new(MemoryContentAddressableStorage::new());
        let checker = checker(
            cas,
            RemoteDigest::new("eda14e187a768b38eda999457c9cca1e", 6),
            RemoteDigest::default(),
        );
        let request = FetchBlobRequest {
            instance_name: "a//b".into(),
            ..blob_request()
        };
        let err = checker
            .fetch_blob(&CallContext::new(), &request)
            .await
            .unwrap_err();
        assert!(matches!(err, AssetError::InvalidInstance(_)));
    }

    #[test]
    fn zero_batch_size_is_clamped() {
        let checker = CompletenessCheckingFetcher::new(
            Arc::new(crate::fetch::UnimplementedFetcher),
            Arc::new(MemoryContentAddressableStorage::new()),
            0,
            1024,
        );
        assert_eq!(checker.batch_size, 1);
    }
}
