//! # Content Digests
//!
//! Defines `RemoteDigest`, the `(hash, size)` pair carried on the wire and
//! inside directory listings, and `Digest`, the same pair bound to an
//! `InstanceName` and validated.
//!
//! ## Validation
//!
//! A hash must be lowercase hex whose length identifies one of the
//! supported digest functions. Sizes must be non-negative. The hash itself
//! is never recomputed here; content hashing belongs to whoever writes to
//! the store.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;
use crate::instance::InstanceName;

/// The hash function that produced a digest, inferred from hash length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DigestFunction {
    Md5,
    Sha1,
    Sha256,
    Sha384,
    Sha512,
}

impl DigestFunction {
    /// Identify the digest function from the length of a hex hash.
    pub fn from_hex_len(len: usize) -> Option<Self> {
        match len {
            32 => Some(Self::Md5),
            40 => Some(Self::Sha1),
            64 => Some(Self::Sha256),
            96 => Some(Self::Sha384),
            128 => Some(Self::Sha512),
            _ => None,
        }
    }

    /// Length of a hex-encoded hash for this function.
    pub fn hex_len(&self) -> usize {
        match self {
            Self::Md5 => 32,
            Self::Sha1 => 40,
            Self::Sha256 => 64,
            Self::Sha384 => 96,
            Self::Sha512 => 128,
        }
    }

    /// Returns the algorithm identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
        }
    }
}

impl fmt::Display for DigestFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A digest as it appears on the wire: no instance, no validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RemoteDigest {
    /// Lowercase hex hash of the content.
    pub hash: String,
    /// Size of the content in bytes.
    pub size_bytes: i64,
}

impl RemoteDigest {
    pub fn new(hash: impl Into<String>, size_bytes: i64) -> Self {
        Self {
            hash: hash.into(),
            size_bytes,
        }
    }
}

impl fmt::Display for RemoteDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.hash, self.size_bytes)
    }
}

/// A validated digest bound to an instance name.
///
/// Equality, hashing and ordering are by value over
/// `(instance, hash, size)`, so two digests naming the same content in the
/// same instance collapse into one set entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Digest {
    instance: InstanceName,
    hash: String,
    size_bytes: u64,
}

impl Digest {
    /// Validate a hash and size and bind them to an instance.
    pub fn new(instance: InstanceName, hash: &str, size_bytes: i64) -> Result<Self, CoreError> {
        let invalid = |reason: String| CoreError::InvalidDigest {
            hash: hash.to_string(),
            size_bytes,
            reason,
        };
        if DigestFunction::from_hex_len(hash.len()).is_none() {
            return Err(invalid(format!(
                "hash length {} does not match any supported digest function",
                hash.len()
            )));
        }
        if !hash
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        {
            return Err(invalid("hash must be lowercase hexadecimal".into()));
        }
        let size_bytes =
            u64::try_from(size_bytes).map_err(|_| invalid("size must not be negative".into()))?;
        Ok(Self {
            instance,
            hash: hash.to_string(),
            size_bytes,
        })
    }

    /// The instance this digest belongs to.
    pub fn instance(&self) -> &InstanceName {
        &self.instance
    }

    /// Lowercase hex hash.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Size of the referenced content in bytes.
    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// Digest function inferred from the hash length.
    pub fn function(&self) -> DigestFunction {
        // Length was checked in `new()`.
        DigestFunction::from_hex_len(self.hash.len()).unwrap_or(DigestFunction::Sha256)
    }

    /// Drop the instance, producing the wire form.
    pub fn to_remote(&self) -> RemoteDigest {
        RemoteDigest {
            hash: self.hash.clone(),
            size_bytes: i64::try_from(self.size_bytes).unwrap_or(i64::MAX),
        }
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance.is_default() {
            write!(f, "{}-{}", self.hash, self.size_bytes)
        } else {
            write!(f, "{}-{}-{}", self.hash, self.size_bytes, self.instance)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MD5: &str = "eda14e187a768b38eda999457c9cca1e";
    const SHA256: &str = "d0d829c4c0ce64787cb1c998a9c29a109f8ed005633132fda4f29982487b04db";

    #[test]
    fn infers_function_from_length() {
        let d = Digest::new(InstanceName::default(), MD5, 6).unwrap();
        assert_eq!(d.function(), DigestFunction::Md5);
        let d = Digest::new(InstanceName::default(), SHA256, 123).unwrap();
        assert_eq!(d.function(), DigestFunction::Sha256);
        assert_eq!(DigestFunction::Sha512.hex_len(), 128);
    }

    #[test]
    fn rejects_unknown_length() {
        let err = Digest::new(InstanceName::default(), "abc", 1).unwrap_err();
        assert!(format!("{err}").contains("length 3"));
    }

    #[test]
    fn rejects_uppercase_hex() {
        let upper = MD5.to_uppercase();
        assert!(Digest::new(InstanceName::default(), &upper, 1).is_err());
    }

    #[test]
    fn rejects_negative_size() {
        let err = Digest::new(InstanceName::default(), MD5, -5).unwrap_err();
        assert!(format!("{err}").contains("negative"));
    }

    #[test]
    fn equality_includes_instance() {
        let a = Digest::new(InstanceName::default(), MD5, 6).unwrap();
        let b = Digest::new(InstanceName::new("ci").unwrap(), MD5, 6).unwrap();
        assert_ne!(a, b);
        assert_eq!(a, Digest::new(InstanceName::default(), MD5, 6).unwrap());
    }

    #[test]
    fn display_includes_non_default_instance() {
        let a = Digest::new(InstanceName::default(), MD5, 6).unwrap();
        assert_eq!(a.to_string(), format!("{MD5}-6"));
        let b = Digest::new(InstanceName::new("ci").unwrap(), MD5, 6).unwrap();
        assert_eq!(b.to_string(), format!("{MD5}-6-ci"));
    }

    #[test]
    fn remote_round_trip_through_instance() {
        let remote = RemoteDigest::new(SHA256, 123);
        let instance = InstanceName::new("main").unwrap();
        let digest = instance.new_digest(&remote).unwrap();
        assert_eq!(digest.instance(), &instance);
        assert_eq!(digest.to_remote(), remote);
    }
}
