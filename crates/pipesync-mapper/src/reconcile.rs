//! Reverse mapping: fold an edited pipeline job back into its build resource.
//!
//! Precedence:
//! - A non-blank inline script on the job replaces the resource's inline script.
//! - Whenever the job carries a git checkout, its URL/ref replace the
//!   resource's git fields, even if only the script path was edited
//!   (unless `sync-remote` is disabled).
//!
//! A change is reported only when a persisted field actually differs.

use pipesync_config::MapperConfig;
use pipesync_core::{
    BranchProperty, BuildResource, JobDefinition, JobScm, JobSnapshot, ReconcileResult,
    RemoteEndpoint, ScmConfig,
};
use tracing::{debug, info, warn};

use crate::flow::resolve_script_path;
use crate::refs::{normalize_path, normalize_ref, relativize_path};
use crate::source::apply_scm_config;

/// Decide whether `resource` must change to match `job`, and apply the change.
pub fn reconcile(
    job: &JobSnapshot,
    resource: BuildResource,
    config: &MapperConfig,
) -> ReconcileResult {
    if resource.pipeline_strategy(&config.strategy_type).is_none() {
        warn!(resource = %resource.id(), "No pipeline strategy on build resource, not updating it");
        return ReconcileResult::unchanged(resource);
    }

    info!(resource = %resource.id(), job = %job.name, "Updating build resource from job");

    match &job.definition {
        Some(JobDefinition::ScmScript { scm, script_path }) => {
            reconcile_scm_script(scm, script_path, resource, config)
        }
        Some(JobDefinition::InlineScript { body }) => reconcile_inline_script(body, resource, config),
        other => {
            let mut resource = resource;
            if let Some(branch) = &job.branch {
                match reconcile_branch(branch, &mut resource, config) {
                    Some(changed) => {
                        return ReconcileResult {
                            changed,
                            resource,
                            job_scm: None,
                        };
                    }
                    None => {
                        debug!(branch = %branch.name, "Discovered branch has no usable git checkout");
                    }
                }
            }
            warn!(
                resource = %resource.id(),
                definition = other.as_ref().map_or("none", |d| d.kind_name()),
                "Cannot update build resource from this job definition"
            );
            ReconcileResult::unchanged(resource)
        }
    }
}

fn reconcile_scm_script(
    scm: &JobScm,
    script_path: &str,
    mut resource: BuildResource,
    config: &MapperConfig,
) -> ReconcileResult {
    let id = resource.id().clone();
    let source = resource.source_or_insert();

    let job_scm = match (scm.as_git(), &source.source_secret) {
        (Some(git), Some(secret)) => with_credential_entry(git, &secret.name),
        _ => None,
    };
    let context_dir = source.context_dir().map(normalize_path);

    let job_path = normalize_path(script_path.trim());
    if job_path.is_empty() {
        return ReconcileResult {
            changed: false,
            resource,
            job_scm,
        };
    }

    let mut path_changed = false;
    let expected = resource
        .pipeline_strategy(&config.strategy_type)
        .map(|strategy| resolve_script_path(&resource, strategy, config));
    if expected.is_some_and(|expected| expected != job_path) {
        let relative = match context_dir.as_deref() {
            Some(dir) => relativize_path(&job_path, dir),
            None => job_path.as_str(),
        };
        if let Some(strategy) = resource.pipeline_strategy_mut(&config.strategy_type) {
            debug!(resource = %id, from = ?strategy.script_path(), to = %relative, "Updating script path");
            strategy.script_path = Some(relative.to_string());
            path_changed = true;
        }
    }

    let mut remote_changed = false;
    if let Some(git) = scm.as_git() {
        if config.sync_remote || !path_changed {
            remote_changed = sync_remote(&mut resource, git, None).unwrap_or(false);
        } else {
            debug!(resource = %id, "Script path changed, leaving git source untouched");
        }
    }

    ReconcileResult {
        changed: path_changed || remote_changed,
        resource,
        job_scm,
    }
}

fn reconcile_inline_script(
    body: &str,
    mut resource: BuildResource,
    config: &MapperConfig,
) -> ReconcileResult {
    let id = resource.id().clone();
    let Some(strategy) = resource.pipeline_strategy_mut(&config.strategy_type) else {
        return ReconcileResult::unchanged(resource);
    };

    if body.trim().is_empty() || strategy.inline_script.as_deref() == Some(body) {
        return ReconcileResult::unchanged(resource);
    }

    debug!(resource = %id, "Updating inline script");
    strategy.inline_script = Some(body.to_string());
    ReconcileResult {
        changed: true,
        resource,
        job_scm: None,
    }
}

/// Returns `None` when the branch has no git checkout with a URL.
fn reconcile_branch(
    branch: &BranchProperty,
    resource: &mut BuildResource,
    config: &MapperConfig,
) -> Option<bool> {
    let git = branch.scm.as_git()?;
    let had_source = resource.spec.source.is_some();
    let changed = sync_remote(resource, git, Some(&branch.name))? || !had_source;
    if changed {
        if let Some(strategy) = resource.pipeline_strategy_mut(&config.strategy_type) {
            if strategy.script_path().is_none() {
                strategy.script_path = Some(config.default_script_path.clone());
            }
        }
    }
    Some(changed)
}

/// Apply the checkout's URL/ref; `Some(true)` when either actually changed,
/// `None` when the checkout has no URL.
///
/// An equivalent ref (`/main` vs `main`) keeps the resource's spelling.
fn sync_remote(
    resource: &mut BuildResource,
    scm: &ScmConfig,
    ref_override: Option<&str>,
) -> Option<bool> {
    let original = resource.spec.source.as_ref().and_then(|s| s.git.clone());
    let before = git_fields(resource);
    if !apply_scm_config(resource, scm, ref_override) {
        return None;
    }
    if before == git_fields(resource) {
        if let Some(source) = resource.spec.source.as_mut() {
            source.git = original;
        }
        return Some(false);
    }
    Some(true)
}

/// URL and normalized ref, with absent, blank and empty refs compared equal.
fn git_fields(resource: &BuildResource) -> Option<(String, String)> {
    let git = resource.spec.source.as_ref()?.git.as_ref()?;
    Some((
        git.url.clone(),
        normalize_ref(git.effective_ref().unwrap_or_default()).to_string(),
    ))
}

/// The checkout with a credential-only remote for `secret` appended, or
/// `None` if an equivalent entry is already present.
fn with_credential_entry(scm: &ScmConfig, secret: &str) -> Option<ScmConfig> {
    let entry = RemoteEndpoint::credential_only(secret);
    if scm.remotes.contains(&entry) {
        return None;
    }
    info!(secret = %secret, "Adding source secret as a remote credential entry");
    let mut scm = scm.clone();
    scm.remotes.push(entry);
    Some(scm)
}
