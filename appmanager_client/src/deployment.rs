use ::appmanager_common::{
    anyhow::anyhow,
    error::{AppManagerError, Result},
    resource::{Deployment, Labels, ResourceList},
};
use ::reqwest::Method;

use crate::{
    client::{check_not_empty, AppManagerClient, DEPLOYMENT_URI},
    wait::wait_resource_state,
};

/// `{"a": "b", "c": "d"}` => `a=b,c=d`
fn label_selector(labels: &Labels) -> String {
    labels
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join(",")
}

fn deployment_name(deployment: &Deployment) -> Result<&str> {
    deployment
        .name()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| {
            AppManagerError::illegal_argument(anyhow!("deployment name cannot be empty"))
        })
}

impl AppManagerClient {
    /// List the deployments of `namespace` carrying all of `labels`.
    pub async fn list_deployments(
        &self,
        labels: &Labels,
        namespace: &str,
    ) -> Result<Vec<Deployment>> {
        let url = self.collection_url(namespace, DEPLOYMENT_URI);
        let mut builder = self.request(Method::GET, &url);
        if !labels.is_empty() {
            builder = builder.query(&[("labelSelector", label_selector(labels))]);
        }
        let list: ResourceList<Deployment> = self.send_json(builder).await?;
        Ok(list.items)
    }

    /// Get a deployment by name, not by id.
    pub async fn get_deployment(&self, name: &str, namespace: &str) -> Result<Deployment> {
        check_not_empty("deployment name", name)?;
        let url = self.item_url(namespace, DEPLOYMENT_URI, name);
        self.send_json(self.request(Method::GET, &url)).await
    }

    pub async fn delete_deployment(&self, name: &str, namespace: &str) -> Result<Deployment> {
        check_not_empty("deployment name", name)?;
        let url = self.item_url(namespace, DEPLOYMENT_URI, name);
        self.send_json(self.request(Method::DELETE, &url)).await
    }

    pub async fn create_deployment(
        &self,
        mut deployment: Deployment,
        namespace: &str,
    ) -> Result<Deployment> {
        deployment
            .metadata
            .get_or_insert_with(Default::default)
            .namespace = Some(namespace.to_owned());
        let url = self.collection_url(namespace, DEPLOYMENT_URI);
        self.send_json(self.request(Method::POST, &url).json(&deployment))
            .await
    }

    pub async fn create_or_replace_deployment(
        &self,
        deployment: &Deployment,
        namespace: &str,
    ) -> Result<Deployment> {
        let url = self.item_url(namespace, DEPLOYMENT_URI, deployment_name(deployment)?);
        self.send_json(self.request(Method::PUT, &url).json(deployment))
            .await
    }

    /// Patch the deployment with the fields set in `deployment`.
    pub async fn update_deployment(
        &self,
        deployment: &Deployment,
        namespace: &str,
    ) -> Result<Deployment> {
        let url = self.item_url(namespace, DEPLOYMENT_URI, deployment_name(deployment)?);
        self.send_json(self.request(Method::PATCH, &url).json(deployment))
            .await
    }

    pub async fn wait_deployment_state(
        &self,
        name: &str,
        state: &str,
        namespace: &str,
    ) -> Result<Deployment> {
        wait_resource_state(state, &self.wait_config(), || {
            self.get_deployment(name, namespace)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_labels() {
        let labels = Labels::from([
            ("team".to_owned(), "data".to_owned()),
            ("app".to_owned(), "wordcount".to_owned()),
        ]);
        assert_eq!(label_selector(&labels), "app=wordcount,team=data");
        assert_eq!(label_selector(&Labels::new()), "");
    }

    #[test]
    fn unnamed_deployment() {
        let deployment = Deployment::default();
        let result = deployment_name(&deployment);
        assert!(result
            .is_err_and(|e| e.to_string() == "Illegal argument: deployment name cannot be empty"));
    }
}
