//! # Digest Sets
//!
//! An ordered collection of unique digests. Insertion is idempotent, and
//! iteration always yields digests in `(instance, hash, size)` order.

use serde::Serialize;
use std::collections::btree_set;
use std::collections::BTreeSet;
use std::fmt;

use crate::digest::Digest;

/// A set of unique digests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DigestSet(BTreeSet<Digest>);

impl DigestSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a digest. Returns `false` if it was already present.
    pub fn insert(&mut self, digest: Digest) -> bool {
        self.0.insert(digest)
    }

    pub fn contains(&self, digest: &Digest) -> bool {
        self.0.contains(digest)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The smallest digest in the set, if any.
    pub fn first(&self) -> Option<&Digest> {
        self.0.iter().next()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, Digest> {
        self.0.iter()
    }

    /// Move every digest of `other` into this set.
    pub fn merge(&mut self, other: DigestSet) {
        self.0.extend(other.0);
    }

    /// Digests present in this set but not in `other`.
    pub fn difference(&self, other: &DigestSet) -> DigestSet {
        Self(self.0.difference(&other.0).cloned().collect())
    }

    /// Digests present in both sets.
    pub fn intersection(&self, other: &DigestSet) -> DigestSet {
        Self(self.0.intersection(&other.0).cloned().collect())
    }

    /// Remove and return every digest, leaving the set empty.
    pub fn take(&mut self) -> DigestSet {
        std::mem::take(self)
    }

    pub fn into_vec(self) -> Vec<Digest> {
        self.0.into_iter().collect()
    }
}

impl FromIterator<Digest> for DigestSet {
    fn from_iter<I: IntoIterator<Item = Digest>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Digest> for DigestSet {
    fn extend<I: IntoIterator<Item = Digest>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for DigestSet {
    type Item = Digest;
    type IntoIter = btree_set::IntoIter<Digest>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a DigestSet {
    type Item = &'a Digest;
    type IntoIter = btree_set::Iter<'a, Digest>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for DigestSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, digest) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{digest}")?;
        }
        f.write_str("]")
    }
}
