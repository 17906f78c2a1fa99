use ::serde::{Deserialize, Serialize};

use super::Labels;

/// Binding of a namespace to a Kubernetes namespace where Flink clusters are deployed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentTarget {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<DeploymentTargetMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<DeploymentTargetSpec>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentTargetMetadata {
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
    pub annotations: Option<Labels>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Labels>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_version: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentTargetSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubernetes: Option<KubernetesTarget>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct KubernetesTarget {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

impl DeploymentTarget {
    /// Deployment target `name` in `namespace` pointing at the Kubernetes namespace `k8s_namespace`.
    pub fn new(name: &str, namespace: &str, k8s_namespace: &str) -> Self {
        Self {
            metadata: Some(DeploymentTargetMetadata {
                name: Some(name.to_owned()),
                namespace: Some(namespace.to_owned()),
                ..Default::default()
            }),
            spec: Some(DeploymentTargetSpec {
                kubernetes: Some(KubernetesTarget {
                    namespace: Some(k8s_namespace.to_owned()),
                }),
            }),
            ..Default::default()
        }
    }

    pub fn k8s_namespace(&self) -> Option<&str> {
        self.spec
            .as_ref()?
            .kubernetes
            .as_ref()?
            .namespace
            .as_deref()
    }
}
