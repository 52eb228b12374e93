//! Pod identity.
//!
//! A pod on a virtual node is identified by its `(namespace, name)` pair.
//! The pair is immutable for the lifetime of a record and unique across
//! the node's registry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing a [`PodKey`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// The string does not contain a `namespace/name` separator.
    #[error("expected `namespace/name`, got {0:?}")]
    MissingSeparator(String),

    /// The namespace half of the key is empty.
    #[error("namespace must not be empty")]
    EmptyNamespace,

    /// The name half of the key is empty.
    #[error("name must not be empty")]
    EmptyName,
}

/// The `(namespace, name)` identity of a pod.
///
/// Displays and parses as `namespace/name`, the form the orchestrator
/// uses to address pods on a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PodKey {
    namespace: String,
    name: String,
}

impl PodKey {
    /// Create a new `PodKey` from a namespace and name.
    #[must_use]
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// The namespace half of the identity.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The name half of the identity.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for PodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

impl FromStr for PodKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (namespace, name) = s
            .split_once('/')
            .ok_or_else(|| KeyError::MissingSeparator(s.to_string()))?;
        if namespace.is_empty() {
            return Err(KeyError::EmptyNamespace);
        }
        if name.is_empty() {
            return Err(KeyError::EmptyName);
        }
        Ok(Self::new(namespace, name))
    }
}

impl TryFrom<String> for PodKey {
    type Error = KeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PodKey> for String {
    fn from(key: PodKey) -> Self {
        key.to_string()
    }
}
