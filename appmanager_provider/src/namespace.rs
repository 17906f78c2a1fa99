use ::appmanager_client::AppManagerClient;
use ::appmanager_common::{
    error::Result,
    resource::{Namespace, NamespaceState, Stateful},
    serde::{Deserialize, Serialize},
    tracing::info,
};

/// Declarative form of a namespace.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(crate = "appmanager_common::serde")]
pub struct NamespaceModel {
    /// Assigned by the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl From<&Namespace> for NamespaceModel {
    fn from(namespace: &Namespace) -> Self {
        Self {
            id: namespace.id().map(str::to_owned),
            name: namespace.name().unwrap_or_default().to_owned(),
            state: namespace.current_state().map(str::to_owned),
        }
    }
}

pub struct NamespaceResource<'a> {
    client: &'a AppManagerClient,
}

impl<'a> NamespaceResource<'a> {
    pub fn new(client: &'a AppManagerClient) -> Self {
        Self { client }
    }

    /// Create the namespace and wait until it is active.
    pub async fn create(&self, plan: &NamespaceModel) -> Result<NamespaceModel> {
        self.client.create_namespace(&plan.name).await?;
        let namespace = self
            .client
            .wait_namespace_state(&plan.name, NamespaceState::Active.as_str())
            .await?;
        info!("namespace {} is active", plan.name);
        Ok(NamespaceModel::from(&namespace))
    }

    pub async fn read(&self, state: &NamespaceModel) -> Result<NamespaceModel> {
        let namespace = self.client.get_namespace(&state.name).await?;
        Ok(NamespaceModel::from(&namespace))
    }

    /// A namespace has nothing to change besides its name, which is immutable.
    pub async fn update(&self, plan: &NamespaceModel) -> Result<NamespaceModel> {
        self.read(plan).await
    }

    /// Delete the namespace and wait until it is gone.
    pub async fn delete(&self, state: &NamespaceModel) -> Result<()> {
        self.client.delete_namespace_completed(&state.name).await
    }
}
