//! Declarative Flink AppManager resources.
//!
//! Each resource kind has a model, the shape written in a resource definition file, and a
//! handler that turns create, read, update and delete of the model into calls on
//! [AppManagerClient], waiting for the service to finish asynchronous transitions.

use ::appmanager_client::AppManagerClient;
use ::appmanager_common::{
    error::Result,
    serde::{Deserialize, Serialize},
    tracing::debug,
};

pub mod config;
mod deployment_target;
mod namespace;
mod session_cluster;

pub use deployment_target::{DeploymentTargetModel, DeploymentTargetResource, DEFAULT_K8S_NAMESPACE};
pub use namespace::{NamespaceModel, NamespaceResource};
pub use session_cluster::{
    ResourceModel, SessionClusterModel, SessionClusterResource, DEFAULT_LOGGING_PROFILE,
    DEFAULT_ROOT_LOG_LEVEL,
};

/// Content of a resource definition file, tagged by `kind`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[serde(crate = "appmanager_common::serde")]
pub enum ResourceDefinition {
    Namespace(NamespaceModel),
    DeploymentTarget(DeploymentTargetModel),
    SessionCluster(SessionClusterModel),
}

impl ResourceDefinition {
    /// Create the resource and return it as the service reports it.
    pub async fn apply(&self, client: &AppManagerClient) -> Result<Self> {
        debug!("apply {:?}", self);
        Ok(match self {
            Self::Namespace(model) => {
                Self::Namespace(NamespaceResource::new(client).create(model).await?)
            }
            Self::DeploymentTarget(model) => {
                Self::DeploymentTarget(DeploymentTargetResource::new(client).create(model).await?)
            }
            Self::SessionCluster(model) => {
                Self::SessionCluster(SessionClusterResource::new(client).create(model).await?)
            }
        })
    }

    pub async fn update(&self, client: &AppManagerClient) -> Result<Self> {
        debug!("update {:?}", self);
        Ok(match self {
            Self::Namespace(model) => {
                Self::Namespace(NamespaceResource::new(client).update(model).await?)
            }
            Self::DeploymentTarget(model) => {
                Self::DeploymentTarget(DeploymentTargetResource::new(client).update(model).await?)
            }
            Self::SessionCluster(model) => {
                Self::SessionCluster(SessionClusterResource::new(client).update(model).await?)
            }
        })
    }

    pub async fn read(&self, client: &AppManagerClient) -> Result<Self> {
        Ok(match self {
            Self::Namespace(model) => {
                Self::Namespace(NamespaceResource::new(client).read(model).await?)
            }
            Self::DeploymentTarget(model) => {
                Self::DeploymentTarget(DeploymentTargetResource::new(client).read(model).await?)
            }
            Self::SessionCluster(model) => {
                Self::SessionCluster(SessionClusterResource::new(client).read(model).await?)
            }
        })
    }

    pub async fn destroy(&self, client: &AppManagerClient) -> Result<()> {
        debug!("destroy {:?}", self);
        match self {
            Self::Namespace(model) => NamespaceResource::new(client).delete(model).await,
            Self::DeploymentTarget(model) => {
                DeploymentTargetResource::new(client).delete(model).await
            }
            Self::SessionCluster(model) => SessionClusterResource::new(client).delete(model).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::appmanager_common::serde_json::{from_value, json};

    #[test]
    fn definition_tagged_by_kind() -> ::appmanager_common::anyhow::Result<()> {
        let definition: ResourceDefinition = from_value(json!({
            "kind": "deployment_target",
            "namespace": "etl",
            "name": "dt"
        }))?;
        assert_eq!(
            definition,
            ResourceDefinition::DeploymentTarget(DeploymentTargetModel {
                id: None,
                namespace: "etl".to_owned(),
                name: "dt".to_owned(),
                k8s_namespace: None,
            })
        );
        Ok(())
    }

    #[test]
    fn unknown_kind() {
        let result = from_value::<ResourceDefinition>(json!({ "kind": "deployment", "name": "d" }));
        assert!(result.is_err_and(|e| e.to_string().starts_with("unknown variant `deployment`")));
    }
}
