//! Cluster adapter for pipesync.
//!
//! Provides:
//! - BuildConfig retrieval from `build.openshift.io/v1`
//! - A credential bridge backed by a snapshot of Kubernetes Secrets

pub mod error;
pub mod secrets;
pub mod store;

pub use error::{KubeError, KubeResult};
pub use secrets::SecretCredentialBridge;
pub use store::{BuildResourceStore, KubeStore, build_resource_from_object};
