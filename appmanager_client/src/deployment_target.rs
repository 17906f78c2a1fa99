use ::appmanager_common::{
    error::Result,
    resource::{DeploymentTarget, ResourceList},
};
use ::reqwest::Method;

use crate::client::{check_not_empty, AppManagerClient, DEPLOYMENT_TARGET_URI};

impl AppManagerClient {
    pub async fn list_deployment_targets(&self, namespace: &str) -> Result<Vec<DeploymentTarget>> {
        let url = self.collection_url(namespace, DEPLOYMENT_TARGET_URI);
        let list: ResourceList<DeploymentTarget> =
            self.send_json(self.request(Method::GET, &url)).await?;
        Ok(list.items)
    }

    pub async fn get_deployment_target(
        &self,
        name: &str,
        namespace: &str,
    ) -> Result<DeploymentTarget> {
        check_not_empty("deployment target name", name)?;
        let url = self.item_url(namespace, DEPLOYMENT_TARGET_URI, name);
        self.send_json(self.request(Method::GET, &url)).await
    }

    pub async fn create_deployment_target(
        &self,
        target: &DeploymentTarget,
        namespace: &str,
    ) -> Result<DeploymentTarget> {
        let url = self.collection_url(namespace, DEPLOYMENT_TARGET_URI);
        self.send_json(self.request(Method::POST, &url).json(target))
            .await
    }

    pub async fn delete_deployment_target(
        &self,
        name: &str,
        namespace: &str,
    ) -> Result<DeploymentTarget> {
        check_not_empty("deployment target name", name)?;
        let url = self.item_url(namespace, DEPLOYMENT_TARGET_URI, name);
        self.send_json(self.request(Method::DELETE, &url)).await
    }
}
