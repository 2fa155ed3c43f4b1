//! Cluster adapter errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum KubeError {
    #[error("kubernetes client error: {0}")]
    Client(#[from] kube::Error),

    #[error("object has no {0}")]
    MissingMetadata(&'static str),

    #[error("cannot decode build resource {id}: {source}")]
    Decode {
        id: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type KubeResult<T> = std::result::Result<T, KubeError>;
