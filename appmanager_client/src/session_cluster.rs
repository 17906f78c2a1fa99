use ::appmanager_common::{
    anyhow::anyhow,
    error::{AppManagerError, Result},
    resource::{ResourceList, SessionCluster, SessionClusterSpec},
    serde_json::{self, Value},
    tracing::debug,
};
use ::reqwest::Method;

use crate::{
    client::{check_not_empty, AppManagerClient, SESSION_CLUSTER_URI},
    wait::wait_resource_state,
};

/// Flink image details of one image tag, as listed in the UI config of the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlinkImageInfo {
    pub flink_version: String,
    /// Registry address, the part of the image repository before the first `/`
    pub registry: String,
    pub repository: String,
    pub pull_policy: String,
    pub tag: String,
}

impl FlinkImageInfo {
    /// Look up `tag` in the `flinkImageTagsAndRepository` catalogue of a UI config document.
    pub fn from_ui_config(config: &[u8], tag: &str) -> Result<Self> {
        let config: Value =
            serde_json::from_slice(config).map_err(AppManagerError::fail_to_resolve_image)?;
        let entry = &config["flinkImageTagsAndRepository"][tag];
        let field = |value: &Value, name: &str| {
            value
                .as_str()
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .ok_or_else(|| {
                    AppManagerError::fail_to_resolve_image(anyhow!(
                        "get nil {} for image tag {}",
                        name,
                        tag
                    ))
                })
        };

        let flink_version = field(&entry["flinkVersion"], "flink version")?;
        let image_repository = field(&entry["image"]["repository"], "repository")?;
        let pull_policy = field(&entry["image"]["pullPolicy"], "pull policy")?;
        let (registry, repository) = image_repository.split_once('/').ok_or_else(|| {
            AppManagerError::fail_to_resolve_image(anyhow!(
                "can not find / in repository {}",
                image_repository
            ))
        })?;

        Ok(Self {
            flink_version,
            registry: registry.to_owned(),
            repository: repository.to_owned(),
            pull_policy,
            tag: tag.to_owned(),
        })
    }

    fn merge_into(self, spec: &mut SessionClusterSpec) {
        spec.flink_version = Some(self.flink_version);
        spec.flink_image_registry = Some(self.registry);
        spec.flink_image_repository = Some(self.repository);
        spec.flink_image_pull_policy = Some(self.pull_policy);
    }
}

fn session_cluster_name(cluster: &SessionCluster) -> Result<&str> {
    cluster
        .name()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| {
            AppManagerError::illegal_argument(anyhow!("session cluster name cannot be empty"))
        })
}

impl AppManagerClient {
    /// Resolve the image details of `tag` from the UI config of the service.
    pub async fn get_flink_image_info(&self, tag: &str) -> Result<FlinkImageInfo> {
        let url = self.ui_config_url();
        let config = self.send_bytes(self.request(Method::GET, &url)).await?;
        let info = FlinkImageInfo::from_ui_config(&config, tag)?;
        debug!("resolved Flink image {:?}", info);
        Ok(info)
    }

    /// Fill the Flink version and image fields of the cluster spec from its image tag.
    async fn merge_image_info(&self, cluster: &mut SessionCluster) -> Result<()> {
        let tag = cluster.flink_image_tag().map(str::to_owned).ok_or_else(|| {
            AppManagerError::illegal_argument(anyhow!("session cluster must set a Flink image tag"))
        })?;
        let info = self.get_flink_image_info(&tag).await?;
        info.merge_into(cluster.spec.get_or_insert_with(Default::default));
        Ok(())
    }

    pub async fn list_session_clusters(&self, namespace: &str) -> Result<Vec<SessionCluster>> {
        let url = self.collection_url(namespace, SESSION_CLUSTER_URI);
        let list: ResourceList<SessionCluster> =
            self.send_json(self.request(Method::GET, &url)).await?;
        Ok(list.items)
    }

    pub async fn get_session_cluster(&self, name: &str, namespace: &str) -> Result<SessionCluster> {
        check_not_empty("session cluster name", name)?;
        let url = self.item_url(namespace, SESSION_CLUSTER_URI, name);
        self.send_json(self.request(Method::GET, &url)).await
    }

    pub async fn create_session_cluster(
        &self,
        mut cluster: SessionCluster,
        namespace: &str,
    ) -> Result<SessionCluster> {
        self.merge_image_info(&mut cluster).await?;
        cluster
            .metadata
            .get_or_insert_with(Default::default)
            .namespace = Some(namespace.to_owned());
        let url = self.collection_url(namespace, SESSION_CLUSTER_URI);
        self.send_json(self.request(Method::POST, &url).json(&cluster))
            .await
    }

    pub async fn create_or_replace_session_cluster(
        &self,
        mut cluster: SessionCluster,
        namespace: &str,
    ) -> Result<SessionCluster> {
        self.merge_image_info(&mut cluster).await?;
        let url = self.item_url(namespace, SESSION_CLUSTER_URI, session_cluster_name(&cluster)?);
        self.send_json(self.request(Method::PUT, &url).json(&cluster))
            .await
    }

    /// Patch the session cluster with the fields set in `cluster`.
    /// Image details are only resolved again when an image tag is set.
    pub async fn update_session_cluster(
        &self,
        mut cluster: SessionCluster,
        namespace: &str,
    ) -> Result<SessionCluster> {
        if cluster.flink_image_tag().is_some() {
            self.merge_image_info(&mut cluster).await?;
        }
        let url = self.item_url(namespace, SESSION_CLUSTER_URI, session_cluster_name(&cluster)?);
        self.send_json(self.request(Method::PATCH, &url).json(&cluster))
            .await
    }

    pub async fn delete_session_cluster(
        &self,
        name: &str,
        namespace: &str,
    ) -> Result<SessionCluster> {
        check_not_empty("session cluster name", name)?;
        let url = self.item_url(namespace, SESSION_CLUSTER_URI, name);
        self.send_json(self.request(Method::DELETE, &url)).await
    }

    pub async fn wait_session_cluster_state(
        &self,
        name: &str,
        state: &str,
        namespace: &str,
    ) -> Result<SessionCluster> {
        wait_resource_state(state, &self.wait_config(), || {
            self.get_session_cluster(name, namespace)
        })
        .await
    }
}
