//! Shared fixtures: a scripted resolver and a store that records every
//! call made against it.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use ahub_asset::{
    AssetError, FetchBlobRequest, FetchBlobResponse, FetchDirectoryRequest,
    FetchDirectoryResponse, Fetcher, Incident, IncompletePolicy, PolicyDecision,
};
use ahub_cas::{CallContext, CasError, CasResult, ContentAddressableStorage, MemoryContentAddressableStorage};
use ahub_core::{
    Code, Digest, DigestSet, Directory, DirectoryNode, FileNode, InstanceName, RemoteDigest,
    Status, Tree,
};
use async_trait::async_trait;
use parking_lot::Mutex;

pub const URI: &str = "www.example.com";
pub const BATCH_SIZE: usize = 5;
pub const MAX_MESSAGE_SIZE: usize = 16 * 1024 * 1024;

pub fn root_digest() -> RemoteDigest {
    RemoteDigest::new(
        "d0d829c4c0ce64787cb1c998a9c29a109f8ed005633132fda4f29982487b04db",
        123,
    )
}

/// A file in the root directory.
pub fn file_a() -> RemoteDigest {
    RemoteDigest::new("eda14e187a768b38eda999457c9cca1e", 6)
}

/// The subdirectory listed by the root.
pub fn subdir() -> RemoteDigest {
    RemoteDigest::new("7a3435d88e819881cbe9d430a340d157", 10)
}

/// A file in the subdirectory.
pub fn file_b() -> RemoteDigest {
    RemoteDigest::new("6c396013ff0ebff6a2a96cdc20a4ba4c", 5)
}

pub fn digest(remote: &RemoteDigest) -> Digest {
    InstanceName::default().new_digest(remote).unwrap()
}

pub fn sample_tree() -> Tree {
    Tree {
        root: Directory {
            files: vec![FileNode {
                name: "a.txt".into(),
                digest: file_a(),
                is_executable: false,
            }],
            directories: vec![DirectoryNode {
                name: "sub".into(),
                digest: subdir(),
            }],
            symlinks: vec![],
        },
        children: vec![Directory {
            files: vec![FileNode {
                name: "b.txt".into(),
                digest: file_b(),
                is_executable: true,
            }],
            ..Default::default()
        }],
    }
}

pub fn blob_request() -> FetchBlobRequest {
    FetchBlobRequest {
        uris: vec![URI.into()],
        ..Default::default()
    }
}

pub fn directory_request() -> FetchDirectoryRequest {
    FetchDirectoryRequest {
        uris: vec![URI.into()],
        ..Default::default()
    }
}

pub fn blob_response(blob_digest: RemoteDigest) -> FetchBlobResponse {
    FetchBlobResponse {
        uri: URI.into(),
        blob_digest,
        ..Default::default()
    }
}

pub fn directory_response(root_directory_digest: RemoteDigest) -> FetchDirectoryResponse {
    FetchDirectoryResponse {
        uri: URI.into(),
        root_directory_digest,
        ..Default::default()
    }
}

/// A resolver that answers from a script. The last scripted answer is
/// repeated once the script runs out.
#[derive(Default)]
pub struct ScriptedFetcher {
    blobs: Mutex<VecDeque<Result<FetchBlobResponse, Status>>>,
    directories: Mutex<VecDeque<Result<FetchDirectoryResponse, Status>>>,
    calls: AtomicUsize,
    cancel_on_fetch: bool,
    delay: Option<Duration>,
}

impl ScriptedFetcher {
    pub fn blobs(answers: impl IntoIterator<Item = Result<FetchBlobResponse, Status>>) -> Self {
        Self {
            blobs: Mutex::new(answers.into_iter().collect()),
            ..Default::default()
        }
    }

    pub fn directories(
        answers: impl IntoIterator<Item = Result<FetchDirectoryResponse, Status>>,
    ) -> Self {
        Self {
            directories: Mutex::new(answers.into_iter().collect()),
            ..Default::default()
        }
    }

    /// Cancel the caller's context while answering.
    pub fn cancelling(mut self) -> Self {
        self.cancel_on_fetch = true;
        self
    }

    /// Take `delay` to answer.
    pub fn slow(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn answer<T: Clone>(
        &self,
        ctx: &CallContext,
        script: &Mutex<VecDeque<Result<T, Status>>>,
    ) -> Result<T, AssetError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.cancel_on_fetch {
            ctx.cancel();
        }
        let next = {
            let mut script = script.lock();
            if script.len() > 1 {
                script.pop_front()
            } else {
                script.front().cloned()
            }
        };
        match next {
            Some(Ok(response)) => Ok(response),
            Some(Err(status)) => Err(AssetError::Status(status)),
            None => Err(AssetError::status(Code::Unimplemented, "nothing scripted")),
        }
    }
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    async fn fetch_blob(
        &self,
        ctx: &CallContext,
        _request: &FetchBlobRequest,
    ) -> Result<FetchBlobResponse, AssetError> {
        self.answer(ctx, &self.blobs).await
    }

    async fn fetch_directory(
        &self,
        ctx: &CallContext,
        _request: &FetchDirectoryRequest,
    ) -> Result<FetchDirectoryResponse, AssetError> {
        self.answer(ctx, &self.directories).await
    }
}

/// An in-memory store that records each `get()` and FindMissing batch.
#[derive(Default)]
pub struct RecordingCas {
    pub store: MemoryContentAddressableStorage,
    gets: Mutex<Vec<Digest>>,
    batches: Mutex<Vec<DigestSet>>,
    fail_find_missing: Option<Code>,
}

impl RecordingCas {
    pub fn failing_find_missing(code: Code) -> Self {
        Self {
            fail_find_missing: Some(code),
            ..Default::default()
        }
    }

    /// Store `tree` under `root` as its Tree object.
    pub fn put_tree_at(&self, root: &RemoteDigest, tree: &Tree) {
        self.store.put(digest(root), tree.encode().unwrap());
    }

    pub fn put_file(&self, file: &RemoteDigest) {
        self.store.put(digest(file), vec![0u8; file.size_bytes as usize]);
    }

    pub fn gets(&self) -> Vec<Digest> {
        self.gets.lock().clone()
    }

    pub fn batches(&self) -> Vec<DigestSet> {
        self.batches.lock().clone()
    }
}

#[async_trait]
impl ContentAddressableStorage for RecordingCas {
    async fn get(&self, digest: &Digest) -> CasResult<Vec<u8>> {
        self.gets.lock().push(digest.clone());
        self.store.get(digest).await
    }

    async fn find_missing(&self, digests: &DigestSet) -> CasResult<DigestSet> {
        self.batches.lock().push(digests.clone());
        if let Some(code) = self.fail_find_missing {
            return Err(CasError::backend(code, "find missing unavailable"));
        }
        self.store.find_missing(digests).await
    }
}

/// Always asks for a refetch and counts how often it was asked.
#[derive(Default)]
pub struct RefetchAlways {
    consulted: AtomicUsize,
}

impl RefetchAlways {
    pub fn consulted(&self) -> usize {
        self.consulted.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IncompletePolicy for RefetchAlways {
    async fn decide(&self, _ctx: &CallContext, _incident: &Incident<'_>) -> PolicyDecision {
        self.consulted.fetch_add(1, Ordering::SeqCst);
        PolicyDecision::Refetch
    }
}
