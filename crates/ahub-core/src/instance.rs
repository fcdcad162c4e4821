//! # Instance Names
//!
//! An instance name partitions a content-addressable store into
//! independent namespaces. Digests are only comparable within the same
//! instance.
//!
//! Names are `/`-separated paths. The empty name is the default instance.
//! Components may not be empty and may not collide with the keywords that
//! remote execution resource names reserve.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::digest::{Digest, RemoteDigest};
use crate::error::CoreError;

/// Path components that have a fixed meaning in resource names.
const RESERVED_COMPONENTS: &[&str] = &[
    "blobs",
    "uploads",
    "actions",
    "actionResults",
    "operations",
    "capabilities",
    "compressed-blobs",
];

/// A validated instance name.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InstanceName(String);

impl InstanceName {
    /// Validate and wrap an instance name.
    pub fn new(name: &str) -> Result<Self, CoreError> {
        if name.is_empty() {
            return Ok(Self::default());
        }
        for component in name.split('/') {
            if component.is_empty() {
                return Err(CoreError::InvalidInstanceName {
                    name: name.to_string(),
                    reason: "contains an empty path component".into(),
                });
            }
            if RESERVED_COMPONENTS.contains(&component) {
                return Err(CoreError::InvalidInstanceName {
                    name: name.to_string(),
                    reason: format!("contains reserved keyword {component:?}"),
                });
            }
        }
        Ok(Self(name.to_string()))
    }

    /// Return the instance name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for the default (empty) instance.
    pub fn is_default(&self) -> bool {
        self.0.is_empty()
    }

    /// Bind a wire digest to this instance, validating its hash and size.
    pub fn new_digest(&self, remote: &RemoteDigest) -> Result<Digest, CoreError> {
        Digest::new(self.clone(), &remote.hash, remote.size_bytes)
    }
}

impl fmt::Display for InstanceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for InstanceName {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<InstanceName> for String {
    fn from(value: InstanceName) -> Self {
        value.0
    }
}
