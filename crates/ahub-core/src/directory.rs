//! # Directory Model
//!
//! `Directory` lists the files, subdirectories and symlinks of one level of
//! a directory hierarchy. `Tree` bundles a root directory with every
//! directory it transitively references so the whole hierarchy can be
//! fetched from the store as a single object.
//!
//! Trees are stored as JSON documents; `Tree::encode()` and
//! `Tree::decode()` are the only serialization paths.

use serde::{Deserialize, Serialize};

use crate::digest::RemoteDigest;
use crate::error::CoreError;

/// A regular file inside a directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNode {
    pub name: String,
    pub digest: RemoteDigest,
    #[serde(default)]
    pub is_executable: bool,
}

/// A subdirectory reference. The digest names the child `Directory`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryNode {
    pub name: String,
    pub digest: RemoteDigest,
}

/// A symbolic link. Carries no content digest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymlinkNode {
    pub name: String,
    pub target: String,
}

/// One level of a directory hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directory {
    #[serde(default)]
    pub files: Vec<FileNode>,
    #[serde(default)]
    pub directories: Vec<DirectoryNode>,
    #[serde(default)]
    pub symlinks: Vec<SymlinkNode>,
}

impl Directory {
    /// Digests of the regular files at this level, in listing order.
    pub fn file_digests(&self) -> impl Iterator<Item = &RemoteDigest> {
        self.files.iter().map(|f| &f.digest)
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.directories.is_empty() && self.symlinks.is_empty()
    }
}

/// A root directory plus all of its descendants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    pub root: Directory,
    #[serde(default)]
    pub children: Vec<Directory>,
}

impl Tree {
    /// The root followed by every child directory.
    pub fn directories(&self) -> impl Iterator<Item = &Directory> {
        std::iter::once(&self.root).chain(self.children.iter())
    }

    /// Serialize for storage.
    pub fn encode(&self) -> Result<Vec<u8>, CoreError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Deserialize a stored tree.
    pub fn decode(bytes: &[u8]) -> Result<Self, CoreError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
