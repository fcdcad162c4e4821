//! # ahub-core: Foundational Types for the Asset Hub
//!
//! Value types shared by every other crate in the workspace. Nothing in
//! here performs I/O; the CAS contract and the fetch pipeline live in
//! `ahub-cas` and `ahub-asset`.
//!
//! ## Key Design Principles
//!
//! 1. **Validated newtypes.** `InstanceName` and `Digest` can only be built
//!    through checked constructors, so a malformed hash never reaches a
//!    store call.
//!
//! 2. **Wire digests vs. qualified digests.** `RemoteDigest` is the bare
//!    `(hash, size)` pair that resolvers and directory listings carry.
//!    `Digest` is the same pair bound to an instance name, which is what the
//!    CAS is keyed by. Conversion goes through `InstanceName::new_digest()`.
//!
//! 3. **Deterministic sets.** `DigestSet` and `QualifierSet` are ordered, so
//!    error messages and logs list their members in a stable order.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `ahub-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod digest;
pub mod digest_set;
pub mod directory;
pub mod error;
pub mod instance;
pub mod qualifier;
pub mod status;

// Re-export primary types for ergonomic imports.
pub use digest::{Digest, DigestFunction, RemoteDigest};
pub use digest_set::DigestSet;
pub use directory::{Directory, DirectoryNode, FileNode, SymlinkNode, Tree};
pub use error::CoreError;
pub use instance::InstanceName;
pub use qualifier::{FieldViolation, Qualifier, QualifierSet};
pub use status::{Code, Status};
