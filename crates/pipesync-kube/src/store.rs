//! Build resource retrieval.

use async_trait::async_trait;
use k8s_openapi::api::core::v1::Secret;
use kube::Client;
use kube::api::{Api, ApiResource, DynamicObject, GroupVersionKind, ListParams};
use pipesync_core::{BuildResource, BuildSpec, ResourceId};
use tracing::{debug, info};

use crate::{KubeError, KubeResult};

const BUILD_GROUP: &str = "build.openshift.io";
const BUILD_VERSION: &str = "v1";
const BUILD_KIND: &str = "BuildConfig";

/// Read access to build resources and the secrets they reference.
#[async_trait]
pub trait BuildResourceStore: Send + Sync {
    /// Fetch a build resource by identity.
    async fn get(&self, id: &ResourceId) -> KubeResult<BuildResource>;

    /// List the secrets in a namespace.
    async fn secrets(&self, namespace: &str) -> KubeResult<Vec<Secret>>;
}

/// Cluster-backed store.
pub struct KubeStore {
    client: Client,
    build_configs: ApiResource,
}

impl KubeStore {
    pub async fn new() -> KubeResult<Self> {
        let client = Client::try_default().await?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: Client) -> Self {
        let gvk = GroupVersionKind::gvk(BUILD_GROUP, BUILD_VERSION, BUILD_KIND);
        Self {
            client,
            build_configs: ApiResource::from_gvk(&gvk),
        }
    }
}

#[async_trait]
impl BuildResourceStore for KubeStore {
    async fn get(&self, id: &ResourceId) -> KubeResult<BuildResource> {
        let api: Api<DynamicObject> =
            Api::namespaced_with(self.client.clone(), &id.namespace, &self.build_configs);
        info!(resource = %id, "Fetching build resource");
        let object = api.get(&id.name).await?;
        build_resource_from_object(object)
    }

    async fn secrets(&self, namespace: &str) -> KubeResult<Vec<Secret>> {
        let api: Api<Secret> = Api::namespaced(self.client.clone(), namespace);
        let list = api.list(&ListParams::default()).await?;
        debug!(namespace = %namespace, count = list.items.len(), "Listed secrets");
        Ok(list.items)
    }
}

/// Decode a dynamic BuildConfig object into a build resource.
pub fn build_resource_from_object(object: DynamicObject) -> KubeResult<BuildResource> {
    let name = object
        .metadata
        .name
        .ok_or(KubeError::MissingMetadata("name"))?;
    let namespace = object
        .metadata
        .namespace
        .ok_or(KubeError::MissingMetadata("namespace"))?;
    let id = ResourceId::new(namespace, name);

    let spec = match object.data.get("spec") {
        Some(spec) => {
            serde_json::from_value::<BuildSpec>(spec.clone()).map_err(|source| KubeError::Decode {
                id: id.to_string(),
                source,
            })?
        }
        None => BuildSpec::default(),
    };

    Ok(BuildResource { metadata: id, spec })
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

    fn object(namespace: Option<&str>, data: serde_json::Value) -> DynamicObject {
        let gvk = GroupVersionKind::gvk(BUILD_GROUP, BUILD_VERSION, BUILD_KIND);
        let mut object = DynamicObject::new("backend", &ApiResource::from_gvk(&gvk)).data(data);
        object.metadata = ObjectMeta {
            name: Some("backend".to_string()),
            namespace: namespace.map(str::to_string),
            ..Default::default()
        };
        object
    }

    #[test]
    fn test_decode_build_config() {
        let data = serde_json::json!({
            "spec": {
                "source": {"git": {"uri": "https://example/repo.git"}, "contextDir": "app"},
                "strategy": {
                    "type": "JenkinsPipeline",
                    "jenkinsPipelineStrategy": {"jenkinsfilePath": "Jenkinsfile"}
                }
            }
        });
        let resource = build_resource_from_object(object(Some("ci"), data)).unwrap();
        assert_eq!(resource.id(), &ResourceId::new("ci", "backend"));
        assert_eq!(resource.git_url(), Some("https://example/repo.git"));
        assert!(resource.pipeline_strategy("JenkinsPipeline").is_some());
    }

    #[test]
    fn test_decode_without_spec() {
        let resource =
            build_resource_from_object(object(Some("ci"), serde_json::json!({}))).unwrap();
        assert_eq!(resource.spec, BuildSpec::default());
    }

    #[test]
    fn test_decode_requires_namespace() {
        let err = build_resource_from_object(object(None, serde_json::json!({}))).unwrap_err();
        assert!(matches!(err, KubeError::MissingMetadata("namespace")));
    }

    #[test]
    fn test_decode_rejects_malformed_spec() {
        let data = serde_json::json!({"spec": {"source": {"git": "not-an-object"}}});
        let err = build_resource_from_object(object(Some("ci"), data)).unwrap_err();
        assert!(matches!(err, KubeError::Decode { .. }));
    }
}
