//! Resource identifiers.

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::Error;

/// Identity of a namespaced build resource.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
)]
#[display("{namespace}/{name}")]
pub struct ResourceId {
    #[serde(default)]
    pub namespace: String,
    pub name: String,
}

impl ResourceId {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl std::str::FromStr for ResourceId {
    type Err = Error;

    /// Parses `namespace/name`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((namespace, name))
                if !namespace.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self::new(namespace, name))
            }
            _ => Err(Error::InvalidInput(format!(
                "expected namespace/name, got '{}'",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let id: ResourceId = "ci/backend".parse().unwrap();
        assert_eq!(id, ResourceId::new("ci", "backend"));
        assert_eq!(id.to_string(), "ci/backend");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!("backend".parse::<ResourceId>().is_err());
        assert!("/backend".parse::<ResourceId>().is_err());
        assert!("ci/".parse::<ResourceId>().is_err());
        assert!("ci/a/b".parse::<ResourceId>().is_err());
    }
}
