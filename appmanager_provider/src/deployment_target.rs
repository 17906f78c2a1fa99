use ::appmanager_client::AppManagerClient;
use ::appmanager_common::{
    error::Result,
    resource::DeploymentTarget,
    serde::{Deserialize, Serialize},
    tracing::info,
};

/// Kubernetes namespace used when the definition does not name one.
pub const DEFAULT_K8S_NAMESPACE: &str = "default";

/// Declarative form of a deployment target.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(crate = "appmanager_common::serde")]
pub struct DeploymentTargetModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub namespace: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k8s_namespace: Option<String>,
}

impl DeploymentTargetModel {
    fn k8s_namespace_or_default(&self) -> &str {
        self.k8s_namespace
            .as_deref()
            .filter(|ns| !ns.is_empty())
            .unwrap_or(DEFAULT_K8S_NAMESPACE)
    }
}

impl From<&DeploymentTarget> for DeploymentTargetModel {
    fn from(target: &DeploymentTarget) -> Self {
        let metadata = target.metadata.clone().unwrap_or_default();
        Self {
            id: metadata.id,
            namespace: metadata.namespace.unwrap_or_default(),
            name: metadata.name.unwrap_or_default(),
            k8s_namespace: target.k8s_namespace().map(str::to_owned),
        }
    }
}

pub struct DeploymentTargetResource<'a> {
    client: &'a AppManagerClient,
}

impl<'a> DeploymentTargetResource<'a> {
    pub fn new(client: &'a AppManagerClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, plan: &DeploymentTargetModel) -> Result<DeploymentTargetModel> {
        let target =
            DeploymentTarget::new(&plan.name, &plan.namespace, plan.k8s_namespace_or_default());
        let created = self
            .client
            .create_deployment_target(&target, &plan.namespace)
            .await?;
        info!("deployment target {} created in {}", plan.name, plan.namespace);
        Ok(DeploymentTargetModel::from(&created))
    }

    pub async fn read(&self, state: &DeploymentTargetModel) -> Result<DeploymentTargetModel> {
        let target = self
            .client
            .get_deployment_target(&state.name, &state.namespace)
            .await?;
        Ok(DeploymentTargetModel::from(&target))
    }

    /// The service has no update for deployment targets, so this only refreshes.
    pub async fn update(&self, plan: &DeploymentTargetModel) -> Result<DeploymentTargetModel> {
        self.read(plan).await
    }

    pub async fn delete(&self, state: &DeploymentTargetModel) -> Result<()> {
        self.client
            .delete_deployment_target(&state.name, &state.namespace)
            .await?;
        info!("deployment target {} deleted from {}", state.name, state.namespace);
        Ok(())
    }
}
