//! CLI command implementations.

pub mod map;
pub mod reconcile;

use anyhow::{Context, Result};
use pipesync_config::MapperConfig;
use pipesync_core::{BuildResource, CredentialBridge, NamingCredentialBridge, ResourceId};
use pipesync_kube::{BuildResourceStore, KubeStore, SecretCredentialBridge};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::info;

/// Load mapper options, falling back to defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<MapperConfig> {
    match path {
        Some(path) => pipesync_config::load_mapper_config(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(MapperConfig::default()),
    }
}

pub fn validate_config(path: &Path) -> Result<()> {
    match pipesync_config::load_mapper_config(path) {
        Ok(config) => {
            println!("Configuration is valid");
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
        Err(e) => {
            println!("Configuration error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Read a JSON or YAML document.
fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_yaml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

/// Load a build resource from a file, or from the cluster when `cluster` is
/// set, together with the credential bridge to use for it.
async fn load_resource(
    resource: &str,
    cluster: bool,
) -> Result<(BuildResource, Box<dyn CredentialBridge>)> {
    if !cluster {
        let resource: BuildResource = read_document(Path::new(resource))?;
        return Ok((resource, Box::new(NamingCredentialBridge)));
    }

    let id: ResourceId = resource.parse()?;
    let store = KubeStore::new().await?;
    let resource = store.get(&id).await?;
    let bridge = SecretCredentialBridge::load(&store, &id.namespace).await?;
    info!(resource = %id, secrets = bridge.len(), "Loaded build resource from cluster");
    Ok((resource, Box::new(bridge)))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
