//! Pipeline job snapshots and reconcile results.

use serde::{Deserialize, Serialize};

use crate::{BuildResource, PipelineDefinition, ScmConfig};

/// Immutable view of a pipeline job's current state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSnapshot {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<JobDefinition>,
    /// Set on jobs created by multi-branch or organization discovery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<BranchProperty>,
}

impl JobSnapshot {
    pub fn new(name: impl Into<String>, definition: Option<JobDefinition>) -> Self {
        Self {
            name: name.into(),
            definition,
            branch: None,
        }
    }

    pub fn with_branch(mut self, branch: BranchProperty) -> Self {
        self.branch = Some(branch);
        self
    }
}

/// The definition installed on a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum JobDefinition {
    InlineScript {
        body: String,
    },
    #[serde(rename_all = "camelCase")]
    ScmScript {
        scm: JobScm,
        script_path: String,
    },
    /// Any other definition kind; `class` names it for logging.
    Unsupported {
        class: String,
    },
}

impl JobDefinition {
    pub fn kind_name(&self) -> &str {
        match self {
            JobDefinition::InlineScript { .. } => "inlineScript",
            JobDefinition::ScmScript { .. } => "scmScript",
            JobDefinition::Unsupported { class } => class,
        }
    }
}

impl From<PipelineDefinition> for JobDefinition {
    fn from(definition: PipelineDefinition) -> Self {
        match definition {
            PipelineDefinition::InlineScript { body, .. } => JobDefinition::InlineScript { body },
            PipelineDefinition::ScmScript { scm, script_path } => JobDefinition::ScmScript {
                scm: JobScm::Git(scm),
                script_path,
            },
        }
    }
}

/// Source-control configuration attached to a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum JobScm {
    Git(ScmConfig),
    /// A source-control kind this system cannot read.
    Other { class: String },
}

impl JobScm {
    pub fn as_git(&self) -> Option<&ScmConfig> {
        match self {
            JobScm::Git(scm) => Some(scm),
            JobScm::Other { .. } => None,
        }
    }
}

/// A branch discovered by multi-branch or organization scanning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchProperty {
    pub name: String,
    pub scm: JobScm,
}

/// Outcome of a reconcile pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileResult {
    /// Whether the resource must be persisted.
    pub changed: bool,
    pub resource: BuildResource,
    /// The job's checkout configuration with a synthetic credential entry
    /// appended, when the job lacked one for the resource's source secret.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_scm: Option<ScmConfig>,
}

impl ReconcileResult {
    pub fn unchanged(resource: BuildResource) -> Self {
        Self {
            changed: false,
            resource,
            job_scm: None,
        }
    }
}
