//! # In-Memory Content-Addressable Storage
//!
//! A process-local store. Objects can be written under a caller-supplied
//! digest (the store does not verify it) or under a SHA-256 digest the
//! store computes itself.
//!
//! ## Tree Objects
//!
//! [`put_tree()`](MemoryContentAddressableStorage::put_tree) keys a Tree by
//! the digest of its encoded root directory, which is the same digest a
//! resolver reports as the root directory digest. Checking a directory
//! therefore reads the Tree under that digest.

use std::collections::HashMap;

use ahub_core::{CoreError, Digest, DigestSet, InstanceName, Tree};
use async_trait::async_trait;
use parking_lot::RwLock;
use sha2::{Digest as _, Sha256};

use crate::error::{CasError, CasResult};
use crate::traits::ContentAddressableStorage;

/// A content-addressable store held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryContentAddressableStorage {
    objects: RwLock<HashMap<Digest, Vec<u8>>>,
}

impl MemoryContentAddressableStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `data` under `digest` without verifying it.
    pub fn put(&self, digest: Digest, data: impl Into<Vec<u8>>) {
        self.objects.write().insert(digest, data.into());
    }

    /// Store `data` under its SHA-256 digest and return that digest.
    pub fn put_blob(&self, instance: &InstanceName, data: &[u8]) -> Result<Digest, CoreError> {
        let digest = sha256_digest(instance, data)?;
        self.put(digest.clone(), data.to_vec());
        Ok(digest)
    }

    /// Store a Tree under the digest of its root directory and return that
    /// digest.
    pub fn put_tree(&self, instance: &InstanceName, tree: &Tree) -> Result<Digest, CoreError> {
        let root = serde_json::to_vec(&tree.root)?;
        let digest = sha256_digest(instance, &root)?;
        self.put(digest.clone(), tree.encode()?);
        Ok(digest)
    }

    /// Drop an object, as an eviction would. Returns true if it existed.
    pub fn remove(&self, digest: &Digest) -> bool {
        self.objects.write().remove(digest).is_some()
    }

    pub fn contains(&self, digest: &Digest) -> bool {
        self.objects.read().contains_key(digest)
    }

    pub fn len(&self) -> usize {
        self.objects.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }
}

#[async_trait]
impl ContentAddressableStorage for MemoryContentAddressableStorage {
    async fn get(&self, digest: &Digest) -> CasResult<Vec<u8>> {
        self.objects
            .read()
            .get(digest)
            .cloned()
            .ok_or_else(|| CasError::NotFound {
                digest: digest.clone(),
            })
    }

    async fn find_missing(&self, digests: &DigestSet) -> CasResult<DigestSet> {
        let objects = self.objects.read();
        let missing: DigestSet = digests
            .iter()
            .filter(|d| !objects.contains_key(*d))
            .cloned()
            .collect();
        tracing::trace!(
            queried = digests.len(),
            missing = missing.len(),
            "memory CAS FindMissing"
        );
        Ok(missing)
    }
}

fn sha256_digest(instance: &InstanceName, data: &[u8]) -> Result<Digest, CoreError> {
    let hash: String = Sha256::digest(data)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect();
    let size = i64::try_from(data.len()).unwrap_or(i64::MAX);
    Digest::new(instance.clone(), &hash, size)
}
