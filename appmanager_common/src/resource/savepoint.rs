use ::serde::{Deserialize, Serialize};
use ::time::OffsetDateTime;

use super::{Failure, Labels, Stateful};

resource_states! {
    /// Lifecycle of a savepoint.
    SavepointState {
        Started => "STARTED",
        /// Completed successfully and can be restored from.
        Completed => "COMPLETED",
        Failed => "FAILED",
        /// Marked for deletion, can no longer be restored from.
        PendingDeletion => "PENDING_DELETION",
        Deleting => "DELETING",
        /// Deletion failed and can be retried.
        FailedDeletion => "FAILED_DELETION",
    }
}

/// Durable snapshot of job state usable for restore.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Savepoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SavepointMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<SavepointSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<SavepointStatus>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SavepointMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::time::serde::rfc3339::option"
    )]
    pub created_at: Option<OffsetDateTime>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::time::serde::rfc3339::option"
    )]
    pub modified_at: Option<OffsetDateTime>,
    #[serde(rename = "deploymentID", default, skip_serializing_if = "Option::is_none")]
    pub deployment_id: Option<String>,
    #[serde(rename = "jobID", default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    /// `USER_REQUEST`, `SUSPEND`, `COPIED` or `RETAINED_CHECKPOINT`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    /// `UNKNOWN`, `FULL` or `INCREMENTAL`
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub savepoint_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Labels>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_version: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SavepointSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savepoint_location: Option<String>,
    #[serde(rename = "flinkSavepointID", default, skip_serializing_if = "Option::is_none")]
    pub flink_savepoint_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SavepointStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<Failure>,
}

impl Stateful for Savepoint {
    const STATES: &'static [&'static str] = SavepointState::ALL;

    fn current_state(&self) -> Option<&str> {
        self.status.as_ref()?.state.as_deref()
    }
}
