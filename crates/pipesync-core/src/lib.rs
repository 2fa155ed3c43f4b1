//! Core data model for pipesync.
//!
//! This crate contains:
//! - Resource identifiers
//! - Build resources (source, strategy)
//! - Pipeline definitions and checkout configurations
//! - Job snapshots as seen by the reconciler
//! - The credential bridge seam

pub mod credential;
pub mod definition;
pub mod error;
pub mod id;
pub mod job;
pub mod resource;

pub use credential::{CredentialBridge, CredentialError, CredentialId, NamingCredentialBridge};
pub use definition::{BranchSpec, PipelineDefinition, RemoteEndpoint, ScmConfig};
pub use error::{Error, Result};
pub use id::ResourceId;
pub use job::{BranchProperty, JobDefinition, JobScm, JobSnapshot, ReconcileResult};
pub use resource::{
    BuildResource, BuildSpec, BuildStrategy, GitSource, PipelineStrategy, SecretRef, SourceSpec,
};

/// Script path used when a resource does not name one.
pub const DEFAULT_SCRIPT_PATH: &str = "Jenkinsfile";

/// Strategy type marking a build resource as pipeline-driven.
pub const PIPELINE_STRATEGY_TYPE: &str = "JenkinsPipeline";

/// Source type stamped on resources synced from a git checkout.
pub const GIT_SOURCE_TYPE: &str = "Git";
