//! ContentAddressableStorage trait definition.

use ahub_core::{Digest, DigestSet};
use async_trait::async_trait;

use crate::error::CasResult;

/// The two store operations the asset hub consumes.
///
/// Implementations must be thread-safe (Send + Sync). Both operations are
/// keyed by instance-qualified digests; an implementation serving several
/// instances must keep them apart.
#[async_trait]
pub trait ContentAddressableStorage: Send + Sync + 'static {
    /// Read the object stored under `digest`.
    ///
    /// Returns `CasError::NotFound` when no such object exists.
    async fn get(&self, digest: &Digest) -> CasResult<Vec<u8>>;

    /// Return the subset of `digests` that the store does not hold.
    async fn find_missing(&self, digests: &DigestSet) -> CasResult<DigestSet>;
}
