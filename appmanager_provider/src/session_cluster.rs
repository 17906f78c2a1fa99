use ::std::collections::BTreeMap;

use ::appmanager_client::AppManagerClient;
use ::appmanager_common::{
    error::Result,
    resource::{
        Labels, Logging, ResourceSpec, SessionCluster, SessionClusterMetadata, SessionClusterSpec,
        SessionClusterState, Stateful,
    },
    serde::{Deserialize, Serialize},
    tracing::info,
};

pub const DEFAULT_LOGGING_PROFILE: &str = "default";
pub const DEFAULT_ROOT_LOG_LEVEL: &str = "INFO";

/// Declarative form of a session cluster.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(crate = "appmanager_common::serde")]
pub struct SessionClusterModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub namespace: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_target_name: Option<String>,
    /// Resolved from the image tag by the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flink_version: Option<String>,
    pub flink_image_tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_task_managers: Option<u32>,
    /// Keyed by `jobmanager` or `taskmanager`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub resources: BTreeMap<String, ResourceModel>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub flink_configuration: Labels,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(crate = "appmanager_common::serde")]
pub struct ResourceModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.clone().filter(|v| !v.is_empty())
}

impl SessionClusterModel {
    /// Request body describing this cluster.
    fn to_session_cluster(&self) -> SessionCluster {
        let resources = self
            .resources
            .iter()
            .map(|(name, resource)| {
                (
                    name.clone(),
                    ResourceSpec {
                        cpu: resource.cpu,
                        memory: non_empty(&resource.memory),
                    },
                )
            })
            .collect::<BTreeMap<_, _>>();

        SessionCluster {
            metadata: Some(SessionClusterMetadata {
                name: Some(self.name.clone()),
                namespace: Some(self.namespace.clone()),
                ..Default::default()
            }),
            spec: Some(SessionClusterSpec {
                state: non_empty(&self.state),
                deployment_target_name: non_empty(&self.deployment_target_name),
                flink_image_tag: Some(self.flink_image_tag.clone()).filter(|t| !t.is_empty()),
                number_of_task_managers: self.number_of_task_managers,
                resources: (!resources.is_empty()).then_some(resources),
                flink_configuration: (!self.flink_configuration.is_empty())
                    .then(|| self.flink_configuration.clone()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }
}

impl From<&SessionCluster> for SessionClusterModel {
    fn from(cluster: &SessionCluster) -> Self {
        let metadata = cluster.metadata.clone().unwrap_or_default();
        let spec = cluster.spec.clone().unwrap_or_default();
        let resources = spec
            .resources
            .unwrap_or_default()
            .into_iter()
            .map(|(name, resource)| {
                (
                    name,
                    ResourceModel {
                        cpu: resource.cpu,
                        memory: resource.memory,
                    },
                )
            })
            .collect();

        Self {
            id: metadata.id,
            namespace: metadata.namespace.unwrap_or_default(),
            name: metadata.name.unwrap_or_default(),
            state: cluster.current_state().map(str::to_owned),
            deployment_target_name: spec.deployment_target_name,
            flink_version: spec.flink_version,
            flink_image_tag: spec.flink_image_tag.unwrap_or_default(),
            number_of_task_managers: spec.number_of_task_managers,
            resources,
            flink_configuration: spec.flink_configuration.unwrap_or_default(),
        }
    }
}

pub struct SessionClusterResource<'a> {
    client: &'a AppManagerClient,
}

impl<'a> SessionClusterResource<'a> {
    pub fn new(client: &'a AppManagerClient) -> Self {
        Self { client }
    }

    /// Create or replace the cluster with desired state `RUNNING` and wait until it runs.
    pub async fn run(&self, plan: &SessionClusterModel) -> Result<SessionCluster> {
        let mut cluster = plan.to_session_cluster();
        let spec = cluster.spec.get_or_insert_with(Default::default);
        spec.logging = Some(Logging {
            logging_profile: Some(DEFAULT_LOGGING_PROFILE.to_owned()),
            log4j_loggers: Some(Labels::from([(
                String::new(),
                DEFAULT_ROOT_LOG_LEVEL.to_owned(),
            )])),
            ..Default::default()
        });
        spec.state = Some(SessionClusterState::Running.to_string());

        self.client
            .create_or_replace_session_cluster(cluster, &plan.namespace)
            .await?;
        let running = self
            .client
            .wait_session_cluster_state(
                &plan.name,
                SessionClusterState::Running.as_str(),
                &plan.namespace,
            )
            .await?;
        info!("session cluster {} is running", plan.name);
        Ok(running)
    }

    /// Ask the service to stop the cluster and wait until it is stopped.
    pub async fn stop(&self, name: &str, namespace: &str) -> Result<SessionCluster> {
        let cluster = SessionCluster {
            metadata: Some(SessionClusterMetadata {
                name: Some(name.to_owned()),
                namespace: Some(namespace.to_owned()),
                ..Default::default()
            }),
            spec: Some(SessionClusterSpec {
                state: Some(SessionClusterState::Stopped.to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        self.client.update_session_cluster(cluster, namespace).await?;
        let stopped = self
            .client
            .wait_session_cluster_state(name, SessionClusterState::Stopped.as_str(), namespace)
            .await?;
        info!("session cluster {} is stopped", name);
        Ok(stopped)
    }

    pub async fn create(&self, plan: &SessionClusterModel) -> Result<SessionClusterModel> {
        let cluster = self.run(plan).await?;
        Ok(SessionClusterModel::from(&cluster))
    }

    pub async fn read(&self, state: &SessionClusterModel) -> Result<SessionClusterModel> {
        let cluster = self
            .client
            .get_session_cluster(&state.name, &state.namespace)
            .await?;
        Ok(SessionClusterModel::from(&cluster))
    }

    /// Stop the running cluster, then run it again with the new definition.
    pub async fn update(&self, plan: &SessionClusterModel) -> Result<SessionClusterModel> {
        self.stop(&plan.name, &plan.namespace).await?;
        self.create(plan).await
    }

    pub async fn delete(&self, state: &SessionClusterModel) -> Result<()> {
        self.stop(&state.name, &state.namespace).await?;
        self.client
            .delete_session_cluster(&state.name, &state.namespace)
            .await?;
        info!("session cluster {} deleted", state.name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::appmanager_common::serde_json::{from_value, json, to_value};

    fn model() -> SessionClusterModel {
        SessionClusterModel {
            namespace: "etl".to_owned(),
            name: "sc".to_owned(),
            deployment_target_name: Some("dt".to_owned()),
            flink_image_tag: "1.17.1".to_owned(),
            number_of_task_managers: Some(2),
            resources: BTreeMap::from([(
                "taskmanager".to_owned(),
                ResourceModel {
                    cpu: Some(1.0),
                    memory: Some("2g".to_owned()),
                },
            )]),
            flink_configuration: Labels::from([(
                "taskmanager.numberOfTaskSlots".to_owned(),
                "2".to_owned(),
            )]),
            ..Default::default()
        }
    }

    #[test]
    fn request_body_from_model() -> ::appmanager_common::anyhow::Result<()> {
        assert_eq!(
            to_value(model().to_session_cluster())?,
            json!({
                "metadata": { "name": "sc", "namespace": "etl" },
                "spec": {
                    "deploymentTargetName": "dt",
                    "flinkImageTag": "1.17.1",
                    "numberOfTaskManagers": 2,
                    "resources": { "taskmanager": { "cpu": 1.0, "memory": "2g" } },
                    "flinkConfiguration": { "taskmanager.numberOfTaskSlots": "2" }
                }
            })
        );
        Ok(())
    }

    #[test]
    fn model_from_service_representation() -> ::appmanager_common::anyhow::Result<()> {
        let cluster: SessionCluster = from_value(json!({
            "metadata": { "id": "sc-1", "name": "sc", "namespace": "etl" },
            "spec": {
                "state": "RUNNING",
                "deploymentTargetName": "dt",
                "flinkVersion": "1.17",
                "flinkImageTag": "1.17.1",
                "numberOfTaskManagers": 2,
                "resources": { "taskmanager": { "cpu": 1, "memory": "2g" } },
                "flinkConfiguration": { "taskmanager.numberOfTaskSlots": "2" }
            },
            "status": { "state": "RUNNING" }
        }))?;
        let expected = SessionClusterModel {
            id: Some("sc-1".to_owned()),
            state: Some("RUNNING".to_owned()),
            flink_version: Some("1.17".to_owned()),
            ..model()
        };
        assert_eq!(SessionClusterModel::from(&cluster), expected);
        Ok(())
    }
}
