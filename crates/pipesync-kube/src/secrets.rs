//! Credential bridge backed by Kubernetes Secrets.
//!
//! Secrets are loaded once (asynchronously) and resolved from the snapshot,
//! so the mapper's synchronous credential lookup never touches the network.

use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::Secret;
use pipesync_core::{CredentialBridge, CredentialError, CredentialId, ResourceId, SecretRef};
use tracing::debug;

use crate::{BuildResourceStore, KubeResult};

const BASIC_AUTH: &str = "kubernetes.io/basic-auth";
const SSH_AUTH: &str = "kubernetes.io/ssh-auth";
const OPAQUE: &str = "Opaque";

/// Resolves secret references against a snapshot of Secrets.
#[derive(Debug, Default)]
pub struct SecretCredentialBridge {
    secrets: BTreeMap<ResourceId, Secret>,
}

impl SecretCredentialBridge {
    pub fn new(secrets: impl IntoIterator<Item = Secret>) -> Self {
        let secrets = secrets
            .into_iter()
            .filter_map(|secret| {
                let namespace = secret.metadata.namespace.clone()?;
                let name = secret.metadata.name.clone()?;
                Some((ResourceId::new(namespace, name), secret))
            })
            .collect();
        Self { secrets }
    }

    /// Snapshot the secrets of `namespace` from `store`.
    pub async fn load(store: &dyn BuildResourceStore, namespace: &str) -> KubeResult<Self> {
        let secrets = store.secrets(namespace).await?;
        Ok(Self::new(secrets))
    }

    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }
}

impl CredentialBridge for SecretCredentialBridge {
    fn resolve(
        &self,
        secret: &SecretRef,
        owner: &ResourceId,
    ) -> Result<CredentialId, CredentialError> {
        let key = ResourceId::new(owner.namespace.clone(), secret.name.clone());
        let Some(found) = self.secrets.get(&key) else {
            return Err(CredentialError::NotFound {
                namespace: key.namespace,
                name: key.name,
            });
        };

        let secret_type = found.type_.as_deref().unwrap_or(OPAQUE);
        let supported = match secret_type {
            BASIC_AUTH | SSH_AUTH => true,
            OPAQUE => {
                (has_key(found, "username") && has_key(found, "password"))
                    || has_key(found, "ssh-privatekey")
            }
            _ => false,
        };
        if !supported {
            return Err(CredentialError::UnsupportedType {
                name: secret.name.clone(),
                secret_type: secret_type.to_string(),
            });
        }

        let id = CredentialId::for_secret(owner, secret);
        debug!(secret = %key, credential = %id, "Resolved source credentials");
        Ok(id)
    }
}

fn has_key(secret: &Secret, key: &str) -> bool {
    secret.data.as_ref().is_some_and(|d| d.contains_key(key))
        || secret.string_data.as_ref().is_some_and(|d| d.contains_key(key))
}
