//! Translation between build resources and pipeline jobs.
//!
//! - [`flow`]: build resource -> pipeline definition
//! - [`reconcile`]: edited job -> build resource update
//! - [`source`]: git source <-> checkout configuration
//! - [`refs`]: ref and path normalization
//!
//! Everything here is synchronous and never persists anything; callers hand
//! in a resource and decide what to do with the result.

pub mod flow;
pub mod reconcile;
pub mod refs;
pub mod source;

use pipesync_config::MapperConfig;
use pipesync_core::{BuildResource, CredentialBridge, JobSnapshot, PipelineDefinition, ReconcileResult};

/// Mapper options bundled with a credential bridge.
pub struct PipelineMapper<B> {
    config: MapperConfig,
    credentials: B,
}

impl<B: CredentialBridge> PipelineMapper<B> {
    pub fn new(config: MapperConfig, credentials: B) -> Self {
        Self {
            config,
            credentials,
        }
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// See [`flow::map_to_definition`].
    pub fn map_to_definition(&self, resource: &BuildResource) -> Option<PipelineDefinition> {
        flow::map_to_definition(resource, &self.config, &self.credentials)
    }

    /// See [`reconcile::reconcile`].
    pub fn reconcile(&self, job: &JobSnapshot, resource: BuildResource) -> ReconcileResult {
        reconcile::reconcile(job, resource, &self.config)
    }
}
