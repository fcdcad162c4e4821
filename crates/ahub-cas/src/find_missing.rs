//! # FindMissing Queue
//!
//! Accumulates digests into bounded batches and checks each batch against
//! the store with a single `find_missing()` call. Digests reported absent
//! are merged into an accumulator that [`FindMissingQueue::finalize`] turns
//! into a [`CompletenessError`].
//!
//! ## Invariants
//!
//! - A digest is queried at most once per queue, however often it is added.
//! - A batch is flushed as soon as it holds `batch_size` digests, so N
//!   unique digests cost exactly ⌈N / batch_size⌉ queries.
//! - `finalize()` flushes the trailing partial batch. An empty batch issues
//!   no query.
//! - No query is issued once the call context is cancelled or past its
//!   deadline.
//!
//! A queue belongs to one check and is consumed by `finalize()`.

use ahub_core::{Digest, DigestSet, Directory, InstanceName, RemoteDigest};

use crate::context::CallContext;
use crate::error::{CheckError, CompletenessError, StoreOperation};
use crate::traits::ContentAddressableStorage;

/// Outcome of a successful check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FindMissingSummary {
    /// Unique digests confirmed present.
    pub checked: usize,
    /// `find_missing()` calls issued.
    pub queries: usize,
}

/// Batches existence queries for one completeness check.
pub struct FindMissingQueue<'a> {
    ctx: &'a CallContext,
    cas: &'a dyn ContentAddressableStorage,
    instance: InstanceName,
    batch_size: usize,
    queued: DigestSet,
    pending: DigestSet,
    missing: DigestSet,
    queries: usize,
}

impl<'a> FindMissingQueue<'a> {
    /// Create a queue for digests in `instance`. A `batch_size` of zero is
    /// treated as one.
    pub fn new(
        ctx: &'a CallContext,
        instance: InstanceName,
        cas: &'a dyn ContentAddressableStorage,
        batch_size: usize,
    ) -> Self {
        Self {
            ctx,
            cas,
            instance,
            batch_size: batch_size.max(1),
            queued: DigestSet::new(),
            pending: DigestSet::new(),
            missing: DigestSet::new(),
            queries: 0,
        }
    }

    /// Bind a wire digest to this queue's instance.
    pub fn derive_digest(&self, remote: &RemoteDigest) -> Result<Digest, CheckError> {
        Ok(self.instance.new_digest(remote)?)
    }

    /// Queue a wire digest for checking.
    pub async fn add(&mut self, remote: &RemoteDigest) -> Result<(), CheckError> {
        let digest = self.derive_digest(remote)?;
        self.add_digest(digest).await
    }

    /// Queue a digest for checking, flushing the batch once it is full.
    pub async fn add_digest(&mut self, digest: Digest) -> Result<(), CheckError> {
        if !self.queued.insert(digest.clone()) {
            return Ok(());
        }
        self.pending.insert(digest);
        if self.pending.len() >= self.batch_size {
            self.flush().await?;
        }
        Ok(())
    }

    /// Queue every file of `directory`. Subdirectory digests are not
    /// queued; they are vouched for by the Tree that listed them.
    pub async fn add_directory(&mut self, directory: &Directory) -> Result<(), CheckError> {
        for file in &directory.files {
            self.add(&file.digest).await?;
        }
        Ok(())
    }

    /// Number of `find_missing()` calls issued so far.
    pub fn queries_issued(&self) -> usize {
        self.queries
    }

    /// Flush the trailing batch and report any missing digests.
    pub async fn finalize(mut self) -> Result<FindMissingSummary, CheckError> {
        self.flush().await?;
        if !self.missing.is_empty() {
            tracing::debug!(
                instance = %self.instance,
                missing = self.missing.len(),
                checked = self.queued.len(),
                "completeness check found missing digests"
            );
            return Err(CompletenessError {
                missing: self.missing,
            }
            .into());
        }
        Ok(FindMissingSummary {
            checked: self.queued.len(),
            queries: self.queries,
        })
    }

    async fn flush(&mut self) -> Result<(), CheckError> {
        let Some(first) = self.pending.first().cloned() else {
            return Ok(());
        };
        self.ctx.check()?;
        let batch = self.pending.take();
        self.queries += 1;
        tracing::trace!(
            instance = %self.instance,
            batch_len = batch.len(),
            query = self.queries,
            "issuing FindMissing"
        );
        let missing = self
            .ctx
            .run(self.cas.find_missing(&batch))
            .await?
            .map_err(|source| CheckError::Backend {
                operation: StoreOperation::FindMissing,
                digest: first,
                batch_len: batch.len(),
                source,
            })?;
        self.missing.merge(missing);
        Ok(())
    }
}
