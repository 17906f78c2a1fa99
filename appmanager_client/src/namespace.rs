use ::appmanager_common::{
    error::Result,
    resource::{Namespace, ResourceList},
    tracing::info,
};
use ::reqwest::Method;

use crate::{
    client::{check_not_empty, AppManagerClient},
    wait::{wait_not_found, wait_resource_state},
};

impl AppManagerClient {
    pub async fn list_namespaces(&self) -> Result<Vec<Namespace>> {
        let url = self.namespaces_url();
        let list: ResourceList<Namespace> = self.send_json(self.request(Method::GET, &url)).await?;
        Ok(list.items)
    }

    pub async fn get_namespace(&self, name: &str) -> Result<Namespace> {
        check_not_empty("namespace name", name)?;
        let url = self.namespace_url(name);
        self.send_json(self.request(Method::GET, &url)).await
    }

    /// Create the namespace `name`. The service starts it in state `INIT`.
    pub async fn create_namespace(&self, name: &str) -> Result<Namespace> {
        check_not_empty("namespace name", name)?;
        let url = self.namespace_url(name);
        self.send_json(self.request(Method::POST, &url)).await
    }

    /// Mark the namespace for deletion. The service removes it asynchronously.
    pub async fn delete_namespace(&self, name: &str) -> Result<Namespace> {
        check_not_empty("namespace name", name)?;
        let url = self.namespace_url(name);
        self.send_json(self.request(Method::DELETE, &url)).await
    }

    pub async fn wait_namespace_state(&self, name: &str, state: &str) -> Result<Namespace> {
        wait_resource_state(state, &self.wait_config(), || self.get_namespace(name)).await
    }

    /// Wait until the namespace can no longer be found.
    pub async fn wait_namespace_deleted(&self, name: &str) -> Result<()> {
        wait_not_found(&self.wait_config(), || self.get_namespace(name)).await
    }

    /// Delete the namespace and wait until it is gone.
    /// A namespace that does not exist counts as deleted.
    pub async fn delete_namespace_completed(&self, name: &str) -> Result<()> {
        match self.delete_namespace(name).await {
            Err(e) if e.is_not_found() => {
                info!("namespace {} does not exist", name);
                return Ok(());
            }
            result => result?,
        };
        self.wait_namespace_deleted(name).await?;
        info!("namespace {} deleted", name);
        Ok(())
    }
}
