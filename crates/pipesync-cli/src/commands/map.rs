use anyhow::Result;
use pipesync_config::MapperConfig;
use pipesync_mapper::PipelineMapper;

use super::{load_resource, print_json};

pub async fn run(config: &MapperConfig, resource: &str, cluster: bool) -> Result<()> {
    let (resource, credentials) = load_resource(resource, cluster).await?;
    let mapper = PipelineMapper::new(config.clone(), credentials.as_ref());
    print_json(&mapper.map_to_definition(&resource))
}
