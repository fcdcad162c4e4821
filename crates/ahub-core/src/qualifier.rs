//! # Qualifiers
//!
//! A qualifier is a named parameter attached to a fetch or push request
//! (for example `checksum.sri` or `resource_type`). Servers declare which
//! qualifier names they understand; requests carrying any other name are
//! rejected with one `FieldViolation` per unsupported name.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A single request qualifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Qualifier {
    pub name: String,
    pub value: String,
}

impl Qualifier {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// A set of qualifier names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualifierSet(BTreeSet<String>);

impl QualifierSet {
    /// Build a set from a list of names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    /// Collect the names of a request's qualifiers.
    pub fn from_qualifiers(qualifiers: &[Qualifier]) -> Self {
        Self(qualifiers.iter().map(|q| q.name.clone()).collect())
    }

    pub fn add(&mut self, name: impl Into<String>) {
        self.0.insert(name.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Names in `self` that are not in `other` (`self \ other`).
    pub fn difference(&self, other: &QualifierSet) -> QualifierSet {
        Self(self.0.difference(&other.0).cloned().collect())
    }

    /// One violation per name in the set, describing it as unsupported.
    pub fn unsupported_violations(&self) -> Vec<FieldViolation> {
        self.0
            .iter()
            .map(|name| FieldViolation {
                field: "qualifiers.name".to_string(),
                description: format!("\"{name}\" not supported"),
            })
            .collect()
    }
}

/// A single invalid field in a rejected request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub description: String,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.description)
    }
}
