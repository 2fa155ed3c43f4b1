use anyhow::Result;
use pipesync_config::MapperConfig;
use pipesync_core::JobSnapshot;
use pipesync_mapper::PipelineMapper;
use std::path::Path;
use tracing::info;

use super::{load_resource, print_json, read_document};

pub async fn run(config: &MapperConfig, job: &Path, resource: &str, cluster: bool) -> Result<()> {
    let job: JobSnapshot = read_document(job)?;
    let (resource, credentials) = load_resource(resource, cluster).await?;
    let mapper = PipelineMapper::new(config.clone(), credentials.as_ref());

    let result = mapper.reconcile(&job, resource);
    if result.changed {
        info!(resource = %result.resource.id(), "Build resource needs to be persisted");
    }
    print_json(&result)
}
