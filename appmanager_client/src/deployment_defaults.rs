use ::appmanager_common::{error::Result, resource::DeploymentDefaults};
use ::reqwest::Method;

use crate::client::{AppManagerClient, DEPLOYMENT_DEFAULTS_URI};

impl AppManagerClient {
    pub async fn get_deployment_defaults(&self, namespace: &str) -> Result<DeploymentDefaults> {
        let url = self.collection_url(namespace, DEPLOYMENT_DEFAULTS_URI);
        self.send_json(self.request(Method::GET, &url)).await
    }

    /// Replace the deployment defaults of `namespace` as a whole.
    pub async fn cover_deployment_defaults(
        &self,
        defaults: &DeploymentDefaults,
        namespace: &str,
    ) -> Result<DeploymentDefaults> {
        let url = self.collection_url(namespace, DEPLOYMENT_DEFAULTS_URI);
        self.send_json(self.request(Method::PUT, &url).json(defaults))
            .await
    }

    /// Merge the set fields of `defaults` into the deployment defaults of `namespace`.
    pub async fn update_deployment_defaults(
        &self,
        defaults: &DeploymentDefaults,
        namespace: &str,
    ) -> Result<DeploymentDefaults> {
        let url = self.collection_url(namespace, DEPLOYMENT_DEFAULTS_URI);
        self.send_json(self.request(Method::PATCH, &url).json(defaults))
            .await
    }
}
