//! Build resource types.
//!
//! These mirror the `build.openshift.io/v1` BuildConfig shape closely enough
//! that real manifests deserialize directly; fields this crate does not care
//! about are ignored.

use serde::{Deserialize, Serialize};

use crate::ResourceId;

/// A declarative description of a desired pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildResource {
    /// Namespace and name.
    pub metadata: ResourceId,
    #[serde(default)]
    pub spec: BuildSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<BuildStrategy>,
}

/// Where the build's source lives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceSpec {
    /// Source type (e.g. "Git").
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git: Option<GitSource>,
    /// Subdirectory under which the pipeline script is resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_dir: Option<String>,
    /// Reference to stored credentials for the repository.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_secret: Option<SecretRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitSource {
    #[serde(rename = "uri", default)]
    pub url: String,
    /// Branch, tag or commit; absent means the default branch.
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub git_ref: Option<String>,
}

/// Opaque reference to a stored secret.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SecretRef {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildStrategy {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(
        rename = "jenkinsPipelineStrategy",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub pipeline: Option<PipelineStrategy>,
}

/// Pipeline strategy: an inline script, a script path, or neither.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineStrategy {
    #[serde(rename = "jenkinsfile", default, skip_serializing_if = "Option::is_none")]
    pub inline_script: Option<String>,
    #[serde(
        rename = "jenkinsfilePath",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub script_path: Option<String>,
}

impl BuildResource {
    pub fn new(id: ResourceId) -> Self {
        Self {
            metadata: id,
            spec: BuildSpec::default(),
        }
    }

    pub fn id(&self) -> &ResourceId {
        &self.metadata
    }

    /// The pipeline strategy, if the resource's strategy is pipeline-typed.
    ///
    /// A strategy qualifies when it carries a pipeline block and its type is
    /// either unset or equal to `strategy_type` (ignoring case).
    pub fn pipeline_strategy(&self, strategy_type: &str) -> Option<&PipelineStrategy> {
        let strategy = self.spec.strategy.as_ref()?;
        let pipeline = strategy.pipeline.as_ref()?;
        match strategy.kind.as_deref() {
            None => Some(pipeline),
            Some(kind) if kind.eq_ignore_ascii_case(strategy_type) => Some(pipeline),
            Some(_) => None,
        }
    }

    pub fn pipeline_strategy_mut(&mut self, strategy_type: &str) -> Option<&mut PipelineStrategy> {
        self.pipeline_strategy(strategy_type)?;
        self.spec.strategy.as_mut()?.pipeline.as_mut()
    }

    /// The git URL, if one is configured and non-empty.
    pub fn git_url(&self) -> Option<&str> {
        self.spec
            .source
            .as_ref()?
            .git
            .as_ref()
            .map(|git| git.url.as_str())
            .filter(|url| !url.is_empty())
    }

    /// Returns the source, creating an empty one if the resource has none.
    pub fn source_or_insert(&mut self) -> &mut SourceSpec {
        self.spec.source.get_or_insert_with(SourceSpec::default)
    }
}

impl SourceSpec {
    /// Context directory, if set and non-blank.
    pub fn context_dir(&self) -> Option<&str> {
        self.context_dir
            .as_deref()
            .filter(|dir| !dir.trim().is_empty())
    }

    /// Overwrites the git URL and ref, creating the git block if needed.
    pub fn set_git(&mut self, url: impl Into<String>, git_ref: Option<String>) {
        let git = self.git.get_or_insert_with(GitSource::default);
        git.url = url.into();
        git.git_ref = git_ref;
    }
}

impl GitSource {
    /// The ref, treating an empty string like an absent one.
    pub fn effective_ref(&self) -> Option<&str> {
        self.git_ref.as_deref().filter(|r| !r.is_empty())
    }
}

impl PipelineStrategy {
    /// Inline script, if non-empty.
    pub fn inline_script(&self) -> Option<&str> {
        self.inline_script.as_deref().filter(|s| !s.is_empty())
    }

    /// Configured script path, if non-empty.
    pub fn script_path(&self) -> Option<&str> {
        self.script_path.as_deref().filter(|p| !p.is_empty())
    }
}
