//! Pipeline definitions and checkout configurations.

use serde::{Deserialize, Serialize};

/// The runnable form of a pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PipelineDefinition {
    /// Script text carried inline.
    InlineScript {
        body: String,
        /// Whether the script runs in the script sandbox.
        sandbox: bool,
    },
    /// Script fetched from a source-control checkout.
    #[serde(rename_all = "camelCase")]
    ScmScript { scm: ScmConfig, script_path: String },
}

impl PipelineDefinition {
    pub fn script_path(&self) -> Option<&str> {
        match self {
            PipelineDefinition::ScmScript { script_path, .. } => Some(script_path),
            PipelineDefinition::InlineScript { .. } => None,
        }
    }
}

/// Checkout configuration: remotes, branches to build, and extension hooks.
///
/// Only the first remote and the first branch are read or written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScmConfig {
    #[serde(default)]
    pub remotes: Vec<RemoteEndpoint>,
    /// Empty means any/default branch.
    #[serde(default)]
    pub branches: Vec<BranchSpec>,
    /// Passed through untouched.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<serde_json::Value>,
}

impl ScmConfig {
    /// URL of the first remote, if present and non-empty.
    pub fn primary_url(&self) -> Option<&str> {
        self.remotes
            .first()?
            .url
            .as_deref()
            .filter(|url| !url.is_empty())
    }

    /// Name of the first branch spec.
    pub fn first_branch(&self) -> Option<&str> {
        self.branches.first().map(|b| b.name.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteEndpoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refspec: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential_id: Option<String>,
}

impl RemoteEndpoint {
    /// An entry that only carries a credential reference.
    pub fn credential_only(credential_id: impl Into<String>) -> Self {
        Self {
            credential_id: Some(credential_id.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchSpec {
    pub name: String,
}

impl BranchSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_url_skips_empty() {
        let mut scm = ScmConfig::default();
        assert_eq!(scm.primary_url(), None);

        scm.remotes.push(RemoteEndpoint::credential_only("creds"));
        assert_eq!(scm.primary_url(), None);

        scm.remotes[0].url = Some("git@example:repo.git".to_string());
        assert_eq!(scm.primary_url(), Some("git@example:repo.git"));
    }

    #[test]
    fn test_definition_json_shape() {
        let def = PipelineDefinition::ScmScript {
            scm: ScmConfig {
                remotes: vec![RemoteEndpoint {
                    url: Some("https://example/repo.git".to_string()),
                    ..Default::default()
                }],
                branches: vec![BranchSpec::new("main")],
                extensions: vec![],
            },
            script_path: "Jenkinsfile".to_string(),
        };
        let value = serde_json::to_value(&def).unwrap();
        assert_eq!(value["kind"], "scmScript");
        assert_eq!(value["scriptPath"], "Jenkinsfile");
        assert_eq!(value["scm"]["remotes"][0]["url"], "https://example/repo.git");
        assert_eq!(value["scm"]["branches"][0]["name"], "main");
        assert_eq!(def.script_path(), Some("Jenkinsfile"));
    }
}
