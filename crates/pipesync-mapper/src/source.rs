//! Conversion between a resource's git source and a checkout configuration.

use pipesync_core::{
    BranchSpec, BuildResource, CredentialBridge, GIT_SOURCE_TYPE, RemoteEndpoint, ScmConfig,
};
use tracing::{debug, warn};

use crate::refs::strip_ref_decorations;

/// Build a checkout configuration from the resource's git source.
///
/// Returns `None` when no git URL is configured. A credential that cannot be
/// resolved is logged and the checkout proceeds anonymously.
pub fn build_scm_config<B: CredentialBridge>(
    resource: &BuildResource,
    credentials: &B,
) -> Option<ScmConfig> {
    let url = resource.git_url()?;
    let source = resource.spec.source.as_ref()?;
    let git_ref = source
        .git
        .as_ref()
        .and_then(|git| git.effective_ref())
        .filter(|r| !r.trim().is_empty())
        .map(str::to_string);

    let credential_id = source.source_secret.as_ref().and_then(|secret| {
        match credentials.resolve(secret, resource.id()) {
            Ok(id) => Some(id.into_inner()),
            Err(e) => {
                warn!(
                    resource = %resource.id(),
                    secret = %secret.name,
                    error = %e,
                    "Failed to resolve source credentials, continuing anonymously"
                );
                None
            }
        }
    });

    let branches = git_ref.as_deref().map(BranchSpec::new).into_iter().collect();

    Some(ScmConfig {
        remotes: vec![RemoteEndpoint {
            url: Some(url.to_string()),
            name: None,
            refspec: git_ref,
            credential_id,
        }],
        branches,
        extensions: Vec::new(),
    })
}

/// Write the checkout's URL and ref back into the resource's git source.
///
/// `ref_override` wins over the checkout's first branch. Returns `true` when
/// a URL was written; it does not check whether the values differ.
pub fn apply_scm_config(
    resource: &mut BuildResource,
    scm: &ScmConfig,
    ref_override: Option<&str>,
) -> bool {
    let source = resource.source_or_insert();
    source.kind = Some(GIT_SOURCE_TYPE.to_string());

    let Some(url) = scm.primary_url() else {
        return false;
    };

    let git_ref = ref_override
        .filter(|r| !r.is_empty())
        .or_else(|| {
            scm.first_branch()
                .map(strip_ref_decorations)
                .filter(|b| !b.is_empty())
        })
        .map(str::to_string);

    debug!(url = %url, git_ref = ?git_ref, "Updating git source from checkout");
    source.set_git(url, git_ref);
    true
}
