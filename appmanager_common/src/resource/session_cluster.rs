use ::std::collections::BTreeMap;

use ::serde::{Deserialize, Serialize};

use super::{Failure, Labels, Logging, ResourceSpec, Stateful};

resource_states! {
    /// Lifecycle of a session cluster.
    SessionClusterState {
        Stopped => "STOPPED",
        /// Available for deployments.
        Running => "RUNNING",
        /// Kubernetes resources are being created.
        Starting => "STARTING",
        /// Waiting for resources before updating. Turns back to `RUNNING` when nothing changed.
        PendingUpdate => "PENDING_UPDATE",
        Updating => "UPDATING",
        /// Running jobs are stopped and job manager and task manager pods are dropped.
        Stopping => "STOPPING",
        /// `STARTING` or `UPDATING` failed.
        Failed => "FAILED",
    }
}

/// Long-lived Flink cluster shared by several deployments.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionCluster {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SessionClusterMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<SessionClusterSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<SessionClusterStatus>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionClusterMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Labels>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Labels>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_version: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionClusterSpec {
    /// Desired state, `RUNNING` or `STOPPED`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_target_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flink_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flink_image_registry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flink_image_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flink_image_repository: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flink_image_pull_policy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_task_managers: Option<u32>,
    /// Keyed by `jobmanager` / `taskmanager`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<BTreeMap<String, ResourceSpec>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flink_configuration: Option<Labels>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<Logging>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionClusterStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<Failure>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub running: Option<SessionClusterStatusRunning>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionClusterStatusRunning {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_manager_numbers: Option<u32>,
}

impl SessionCluster {
    pub fn name(&self) -> Option<&str> {
        self.metadata.as_ref()?.name.as_deref()
    }

    /// Image tag requested in the spec, `None` when unset or empty.
    pub fn flink_image_tag(&self) -> Option<&str> {
        self.spec
            .as_ref()?
            .flink_image_tag
            .as_deref()
            .filter(|tag| !tag.is_empty())
    }
}

impl Stateful for SessionCluster {
    const STATES: &'static [&'static str] = SessionClusterState::ALL;

    fn current_state(&self) -> Option<&str> {
        self.status.as_ref()?.state.as_deref()
    }
}
