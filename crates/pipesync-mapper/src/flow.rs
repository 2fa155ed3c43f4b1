//! Forward mapping: build resource -> pipeline definition.

use pipesync_config::MapperConfig;
use pipesync_core::{BuildResource, CredentialBridge, PipelineDefinition, PipelineStrategy};
use tracing::{debug, info, warn};

use crate::refs::normalize_path;
use crate::source::build_scm_config;

/// Map a build resource to the pipeline definition its job should carry.
///
/// An inline script always wins over checkout fields. Returns `None` when the
/// resource is not pipeline-typed or has neither an inline script nor a git
/// source.
pub fn map_to_definition<B: CredentialBridge>(
    resource: &BuildResource,
    config: &MapperConfig,
    credentials: &B,
) -> Option<PipelineDefinition> {
    let Some(strategy) = resource.pipeline_strategy(&config.strategy_type) else {
        debug!(resource = %resource.id(), "Not a pipeline build resource, skipping");
        return None;
    };

    info!(resource = %resource.id(), "Mapping build resource to pipeline definition");

    if let Some(script) = strategy.inline_script() {
        return Some(PipelineDefinition::InlineScript {
            body: script.to_string(),
            sandbox: config.sandbox,
        });
    }

    if resource.git_url().is_none() {
        warn!(
            resource = %resource.id(),
            "Build resource has no source repository, cannot map it to a pipeline job"
        );
        return None;
    }

    let script_path = resolve_script_path(resource, strategy, config);
    let scm = build_scm_config(resource, credentials)?;
    debug!(resource = %resource.id(), script_path = %script_path, "Mapped to checkout script");

    Some(PipelineDefinition::ScmScript { scm, script_path })
}

/// Configured script path (or the default), under the context directory if
/// one is set, in normalized form.
pub(crate) fn resolve_script_path(
    resource: &BuildResource,
    strategy: &PipelineStrategy,
    config: &MapperConfig,
) -> String {
    let script_path = strategy
        .script_path()
        .unwrap_or(config.default_script_path.as_str());

    match resource
        .spec
        .source
        .as_ref()
        .and_then(|source| source.context_dir())
    {
        Some(dir) => normalize_path(&format!("{dir}/{script_path}")),
        None => normalize_path(script_path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipesync_core::{BuildStrategy, NamingCredentialBridge, ResourceId, SourceSpec};

    fn pipeline_resource(inline: Option<&str>, path: Option<&str>) -> BuildResource {
        let mut resource = BuildResource::new(ResourceId::new("ci", "backend"));
        resource.spec.strategy = Some(BuildStrategy {
            kind: Some("JenkinsPipeline".to_string()),
            pipeline: Some(PipelineStrategy {
                inline_script: inline.map(str::to_string),
                script_path: path.map(str::to_string),
            }),
        });
        resource
    }

    fn map(resource: &BuildResource) -> Option<PipelineDefinition> {
        map_to_definition(resource, &MapperConfig::default(), &NamingCredentialBridge)
    }

    #[test]
    fn test_non_pipeline_strategy() {
        let mut resource = pipeline_resource(Some("node {}"), None);
        resource.spec.strategy.as_mut().unwrap().kind = Some("Source".to_string());
        assert!(map(&resource).is_none());

        let resource = BuildResource::new(ResourceId::new("ci", "backend"));
        assert!(map(&resource).is_none());
    }

    #[test]
    fn test_inline_script_wins() {
        let mut resource = pipeline_resource(Some("node { echo 'hi' }"), Some("ci/Jenkinsfile"));
        resource
            .source_or_insert()
            .set_git("https://example/repo.git", None);

        assert_eq!(
            map(&resource),
            Some(PipelineDefinition::InlineScript {
                body: "node { echo 'hi' }".to_string(),
                sandbox: true,
            })
        );
    }

    #[test]
    fn test_missing_source() {
        assert!(map(&pipeline_resource(None, None)).is_none());
        assert!(map(&pipeline_resource(Some(""), None)).is_none());
    }

    #[test]
    fn test_default_script_path() {
        let mut resource = pipeline_resource(None, Some(""));
        resource
            .source_or_insert()
            .set_git("https://example/repo.git", Some(String::new()));

        let Some(PipelineDefinition::ScmScript { scm, script_path }) = map(&resource) else {
            panic!("expected scm script");
        };
        assert_eq!(script_path, "Jenkinsfile");
        assert_eq!(scm.primary_url(), Some("https://example/repo.git"));
        assert!(scm.branches.is_empty());
    }

    #[test]
    fn test_context_dir_prefix() {
        let mut resource = pipeline_resource(None, None);
        resource.spec.source = Some(SourceSpec {
            context_dir: Some("app/".to_string()),
            ..Default::default()
        });
        resource
            .source_or_insert()
            .set_git("https://example/repo.git", Some("main".to_string()));

        let def = map(&resource).unwrap();
        assert_eq!(def.script_path(), Some("app/Jenkinsfile"));

        resource.pipeline_strategy_mut("JenkinsPipeline").unwrap().script_path =
            Some("ci//build.groovy".to_string());
        let def = map(&resource).unwrap();
        assert_eq!(def.script_path(), Some("app/ci/build.groovy"));

        resource.source_or_insert().context_dir = Some("./app//sub".to_string());
        resource.pipeline_strategy_mut("JenkinsPipeline").unwrap().script_path =
            Some("./Jenkinsfile".to_string());
        let def = map(&resource).unwrap();
        assert_eq!(def.script_path(), Some("app/sub/Jenkinsfile"));
    }

    #[test]
    fn test_configured_defaults() {
        let mut resource = pipeline_resource(Some("node {}"), None);
        let config = MapperConfig {
            sandbox: false,
            ..Default::default()
        };
        assert_eq!(
            map_to_definition(&resource, &config, &NamingCredentialBridge),
            Some(PipelineDefinition::InlineScript {
                body: "node {}".to_string(),
                sandbox: false,
            })
        );

        resource.pipeline_strategy_mut("JenkinsPipeline").unwrap().inline_script = None;
        resource
            .source_or_insert()
            .set_git("https://example/repo.git", None);
        let config = MapperConfig {
            default_script_path: "pipeline.groovy".to_string(),
            ..Default::default()
        };
        let def = map_to_definition(&resource, &config, &NamingCredentialBridge).unwrap();
        assert_eq!(def.script_path(), Some("pipeline.groovy"));
    }
}
