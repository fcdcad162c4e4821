//! # ahub-cas: Content-Addressable Storage Contract
//!
//! The store itself is an external collaborator. This crate defines the
//! two operations the asset hub consumes from it, an in-memory
//! implementation, and the machinery for checking that a set of digests is
//! present:
//!
//! - **`ContentAddressableStorage`**: `get()` and `find_missing()`.
//! - **`MemoryContentAddressableStorage`**: a process-local store.
//! - **`FindMissingQueue`**: batches existence queries and aggregates the
//!   digests reported absent.
//! - **`tree`**: derives a Tree digest from a root directory digest, reads
//!   the Tree with a size bound, and walks its file digests.
//! - **`CallContext`**: per-call cancellation token and deadline honoured at
//!   every store call.
//!
//! ## Crate Policy
//!
//! - Depends only on `ahub-core` internally.
//! - Nothing here is shared between calls; a queue lives for one check.

pub mod context;
pub mod error;
pub mod find_missing;
pub mod memory;
pub mod traits;
pub mod tree;

pub use context::{CallContext, Interrupted};
pub use error::{CasError, CasResult, CheckError, CompletenessError, StoreOperation};
pub use find_missing::{FindMissingQueue, FindMissingSummary};
pub use memory::MemoryContentAddressableStorage;
pub use traits::ContentAddressableStorage;
