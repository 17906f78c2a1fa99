use ::appmanager_common::{
    error::Result,
    resource::{ResourceList, Savepoint},
};
use ::reqwest::Method;

use crate::client::{check_not_empty, AppManagerClient, SAVEPOINT_URI};

/// Filters of [AppManagerClient::list_savepoints]. Unset filters are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavepointFilter {
    pub deployment_id: Option<String>,
    pub job_id: Option<String>,
    pub restore_strategy: Option<String>,
}

impl SavepointFilter {
    fn query(&self) -> Vec<(&'static str, &str)> {
        [
            ("deploymentId", self.deployment_id.as_deref()),
            ("jobID", self.job_id.as_deref()),
            ("restoreStrategy", self.restore_strategy.as_deref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.filter(|v| !v.is_empty()).map(|v| (key, v)))
        .collect()
    }
}

impl AppManagerClient {
    pub async fn list_savepoints(
        &self,
        filter: &SavepointFilter,
        namespace: &str,
    ) -> Result<Vec<Savepoint>> {
        let url = self.collection_url(namespace, SAVEPOINT_URI);
        let builder = self.request(Method::GET, &url).query(&filter.query());
        let list: ResourceList<Savepoint> = self.send_json(builder).await?;
        Ok(list.items)
    }

    pub async fn get_savepoint(&self, savepoint_id: &str, namespace: &str) -> Result<Savepoint> {
        check_not_empty("savepoint id", savepoint_id)?;
        let url = self.item_url(namespace, SAVEPOINT_URI, savepoint_id);
        self.send_json(self.request(Method::GET, &url)).await
    }

    /// Delete a savepoint, also removing its data from storage when `force` is set.
    pub async fn delete_savepoint(
        &self,
        savepoint_id: &str,
        namespace: &str,
        force: bool,
    ) -> Result<()> {
        check_not_empty("savepoint id", savepoint_id)?;
        let url = self.item_url(namespace, SAVEPOINT_URI, savepoint_id);
        let builder = self
            .request(Method::DELETE, &url)
            .query(&[("force", force)]);
        self.send_empty(builder).await
    }

    pub async fn create_savepoint(
        &self,
        savepoint: &Savepoint,
        namespace: &str,
    ) -> Result<Savepoint> {
        let url = self.collection_url(namespace, SAVEPOINT_URI);
        self.send_json(self.request(Method::POST, &url).json(savepoint))
            .await
    }
}
