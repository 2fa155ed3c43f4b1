//! Credential resolution seam.
//!
//! Resolving a secret reference may hit an external store, so failures are
//! typed: callers can tell "no such secret" from "store unreachable" even
//! though the mapper currently degrades both to anonymous access.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{ResourceId, SecretRef};

/// Opaque identifier of a credential usable by a checkout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct CredentialId(String);

impl CredentialId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Credential id for `secret` owned by `owner`: `<namespace>-<secret>`.
    pub fn for_secret(owner: &ResourceId, secret: &SecretRef) -> Self {
        Self(format!("{}-{}", owner.namespace, secret.name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("secret {namespace}/{name} not found")]
    NotFound { namespace: String, name: String },

    #[error("secret {name} has unsupported type {secret_type}")]
    UnsupportedType { name: String, secret_type: String },

    #[error("credential store unavailable: {0}")]
    Unavailable(String),
}

/// Resolves a secret reference into a credential id.
pub trait CredentialBridge {
    fn resolve(
        &self,
        secret: &SecretRef,
        owner: &ResourceId,
    ) -> Result<CredentialId, CredentialError>;
}

/// Applies the naming convention without looking anything up.
#[derive(Debug, Clone, Copy, Default)]
pub struct NamingCredentialBridge;

impl CredentialBridge for NamingCredentialBridge {
    fn resolve(
        &self,
        secret: &SecretRef,
        owner: &ResourceId,
    ) -> Result<CredentialId, CredentialError> {
        Ok(CredentialId::for_secret(owner, secret))
    }
}

impl<T: CredentialBridge + ?Sized> CredentialBridge for &T {
    fn resolve(
        &self,
        secret: &SecretRef,
        owner: &ResourceId,
    ) -> Result<CredentialId, CredentialError> {
        (**self).resolve(secret, owner)
    }
}
