//! Wire models of the resources managed by Flink AppManager.
//!
//! Every field the service may omit is an `Option` and is skipped on serialization when unset,
//! so a partially filled resource can be sent as a PATCH body.
//! State fields stay plain strings: the service is the source of truth for the set of states,
//! and the per kind state lists below are only used to validate wait targets.

use ::std::collections::BTreeMap;

use ::serde::{Deserialize, Serialize};
use ::time::OffsetDateTime;

/// Generates a state enum whose variants map to the wire tokens of a resource kind.
macro_rules! resource_states {
    ($(#[$meta: meta])* $name: ident { $($(#[$variant_meta: meta])* $variant: ident => $token: literal,)+ }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[serde(rename = $token)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [&'static str] = &[$($token),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $token,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::error::AppManagerError;

            fn from_str(s: &str) -> $crate::error::Result<Self> {
                match s {
                    $($token => Ok(Self::$variant),)+
                    other => Err($crate::error::AppManagerError::invalid_state(::anyhow::anyhow!(
                        "`{}` is not a state of {}",
                        other,
                        stringify!($name)
                    ))),
                }
            }
        }
    };
}

mod artifact;
mod deployment;
mod deployment_defaults;
mod deployment_target;
mod job;
mod namespace;
mod savepoint;
mod session_cluster;
mod system_info;

pub use artifact::{Artifact, ArtifactMetadata, ARTIFACT_KIND_JAR};
pub use deployment::{
    Deployment, DeploymentCondition, DeploymentMetadata, DeploymentSpec, DeploymentState,
    DeploymentStatus, DeploymentStatusRunning, DeploymentTemplate, DeploymentTemplateMetadata,
    DeploymentTemplateSpec, RestoreStrategy, UpgradeStrategy,
};
pub use deployment_defaults::{DeploymentDefaults, DeploymentDefaultsMetadata};
pub use deployment_target::{
    DeploymentTarget, DeploymentTargetMetadata, DeploymentTargetSpec, KubernetesTarget,
};
pub use job::{Job, JobMetadata, JobSpec, JobState, JobStatus, JobStatusStarted};
pub use namespace::{Namespace, NamespaceMetadata, NamespaceState, NamespaceStatus};
pub use savepoint::{
    Savepoint, SavepointMetadata, SavepointSpec, SavepointState, SavepointStatus,
};
pub use session_cluster::{
    SessionCluster, SessionClusterMetadata, SessionClusterSpec, SessionClusterState,
    SessionClusterStatus, SessionClusterStatusRunning,
};
pub use system_info::{SystemInformation, SystemInformationStatus};

/// Labels and annotations attached to resource metadata.
pub type Labels = BTreeMap<String, String>;

/// Envelope of every list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceList<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// Why a resource ended up in a failed state.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Failure {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub reason: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::time::serde::rfc3339::option"
    )]
    pub failed_at: Option<OffsetDateTime>,
}

/// CPU and memory of a job manager or task manager.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JarArtifact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jar_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_args: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_dependencies: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flink_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flink_image_registry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flink_image_repository: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flink_image_tag: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Logging {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging_profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log4j2_configuration_template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log4j_loggers: Option<Labels>,
}

/// A resource that reports a state string and knows which states its kind can be in.
pub trait Stateful {
    /// Every state a resource of this kind can report.
    const STATES: &'static [&'static str];

    /// State observed by the service, `None` when the service did not report a status yet.
    fn current_state(&self) -> Option<&str>;

    fn is_valid_state(state: &str) -> bool {
        Self::STATES.contains(&state)
    }
}
