//! # Directory Trees in the CAS
//!
//! A resolved directory is identified by its root directory digest. The
//! store keeps the whole hierarchy as one Tree object whose key is derived
//! from that digest, so checking a directory means reading one Tree and
//! then checking the files it lists.
//!
//! ## Which digests get checked
//!
//! Only file digests. Every directory in the hierarchy is embedded in the
//! Tree object itself, so reading the Tree already proves those
//! directories were written; their digests never go into a FindMissing
//! batch.

use ahub_core::{Digest, InstanceName, RemoteDigest, Tree};

use crate::context::CallContext;
use crate::error::{CasError, CheckError, StoreOperation};
use crate::traits::ContentAddressableStorage;

/// Derive the digest of the Tree object for a root directory.
///
/// Trees are stored under the root directory's own `(hash, size)` in the
/// requesting instance, so the mapping is the identity on the pair. The
/// wire digest is validated on the way through.
pub fn derive_tree_digest(
    instance: &InstanceName,
    root_directory_digest: &RemoteDigest,
) -> Result<Digest, CheckError> {
    Ok(instance.new_digest(root_directory_digest)?)
}

/// Read and decode the Tree stored under `digest`, refusing anything larger
/// than `maximum_message_size_bytes`.
///
/// A Tree that is absent or too large is reported as
/// [`CheckError::TreeUnavailable`]. Other store failures are reported as
/// [`CheckError::Backend`].
pub async fn get_tree(
    ctx: &CallContext,
    cas: &dyn ContentAddressableStorage,
    digest: &Digest,
    maximum_message_size_bytes: usize,
) -> Result<Tree, CheckError> {
    let limit = maximum_message_size_bytes as u64;
    if digest.size_bytes() > limit {
        return Err(CheckError::TreeUnavailable {
            digest: digest.clone(),
            source: CasError::TooLarge {
                digest: digest.clone(),
                size_bytes: digest.size_bytes(),
                limit_bytes: maximum_message_size_bytes,
            },
        });
    }

    let bytes = match ctx.run(cas.get(digest)).await? {
        Ok(bytes) => bytes,
        Err(source @ CasError::NotFound { .. }) | Err(source @ CasError::TooLarge { .. }) => {
            return Err(CheckError::TreeUnavailable {
                digest: digest.clone(),
                source,
            });
        }
        Err(source) => {
            return Err(CheckError::Backend {
                operation: StoreOperation::Get,
                digest: digest.clone(),
                batch_len: 1,
                source,
            });
        }
    };

    if bytes.len() as u64 > limit {
        return Err(CheckError::TreeUnavailable {
            digest: digest.clone(),
            source: CasError::TooLarge {
                digest: digest.clone(),
                size_bytes: bytes.len() as u64,
                limit_bytes: maximum_message_size_bytes,
            },
        });
    }

    Tree::decode(&bytes).map_err(|source| CheckError::MalformedTree {
        digest: digest.clone(),
        source,
    })
}

/// Every file digest in the Tree: the root's files followed by the files of
/// each child directory, in listing order. Subdirectory entries are
/// skipped.
pub fn file_digests(tree: &Tree) -> impl Iterator<Item = &RemoteDigest> {
    tree.directories().flat_map(|d| d.file_digests())
}
