use ::appmanager_common::{
    error::Result,
    resource::{Job, ResourceList},
};
use ::reqwest::Method;

use crate::client::{check_not_empty, AppManagerClient, JOB_URI};

impl AppManagerClient {
    pub async fn get_job(&self, job_id: &str, namespace: &str) -> Result<Job> {
        check_not_empty("job id", job_id)?;
        let url = self.item_url(namespace, JOB_URI, job_id);
        self.send_json(self.request(Method::GET, &url)).await
    }

    /// List the jobs of `namespace`, only those of one deployment when `deployment_id` is set.
    pub async fn list_jobs(
        &self,
        deployment_id: Option<&str>,
        namespace: &str,
    ) -> Result<Vec<Job>> {
        let url = self.collection_url(namespace, JOB_URI);
        let mut builder = self.request(Method::GET, &url);
        if let Some(id) = deployment_id.filter(|id| !id.is_empty()) {
            builder = builder.query(&[("deploymentId", id)]);
        }
        let list: ResourceList<Job> = self.send_json(builder).await?;
        Ok(list.items)
    }
}
