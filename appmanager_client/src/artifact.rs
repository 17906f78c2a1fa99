use ::appmanager_common::{
    anyhow::anyhow,
    error::{AppManagerError, Result},
    resource::{Artifact, ResourceList, ARTIFACT_KIND_JAR},
};
use ::reqwest::{
    multipart::{Form, Part},
    Method,
};

use crate::client::{check_not_empty, AppManagerClient, ARTIFACT_URI};

impl AppManagerClient {
    fn artifact_url(&self, namespace: &str, action: &str) -> String {
        format!("{}/{}", self.collection_url(namespace, ARTIFACT_URI), action)
    }

    /// Upload a jar file and return the URI it is stored under.
    pub async fn upload_jar(
        &self,
        filename: &str,
        namespace: &str,
        content: impl Into<Vec<u8>>,
    ) -> Result<String> {
        if !filename.ends_with(ARTIFACT_KIND_JAR) {
            return Err(AppManagerError::illegal_argument(anyhow!(
                "upload jar check: {} is not a jar file",
                filename
            )));
        }
        self.upload(filename, namespace, content.into()).await
    }

    /// Upload any other file, e.g. a properties file. Stored next to the jars.
    pub async fn upload_property_file(
        &self,
        filename: &str,
        namespace: &str,
        content: impl Into<Vec<u8>>,
    ) -> Result<String> {
        self.upload(filename, namespace, content.into()).await
    }

    async fn upload(&self, filename: &str, namespace: &str, content: Vec<u8>) -> Result<String> {
        check_not_empty("filename", filename)?;
        let form = Form::new().part("file", Part::bytes(content).file_name(filename.to_owned()));
        let url = self.artifact_url(namespace, "upload");
        let artifact: Artifact = self
            .send_json(self.raw_request(Method::POST, &url).multipart(form))
            .await?;
        artifact.uri().map(str::to_owned).ok_or_else(|| {
            AppManagerError::fail_to_decode_response(anyhow!(
                "uploaded artifact {} has no uri",
                filename
            ))
        })
    }

    /// Delete a file from the artifact storage. Returns whether the service deleted it.
    pub async fn delete_artifact(&self, filename: &str, namespace: &str) -> Result<bool> {
        check_not_empty("filename", filename)?;
        let url = self.artifact_url(namespace, "delete");
        let builder = self
            .request(Method::DELETE, &url)
            .query(&[("filename", filename)]);
        self.send_json(builder).await
    }

    pub async fn list_artifacts(&self, namespace: &str) -> Result<Vec<Artifact>> {
        let url = self.artifact_url(namespace, "list");
        let list: ResourceList<Artifact> = self.send_json(self.request(Method::GET, &url)).await?;
        Ok(list.items)
    }

    pub async fn create_directory(&self, path: &str, namespace: &str) -> Result<()> {
        let url = self.artifact_url(namespace, "mkdir");
        let builder = self.request(Method::POST, &url).query(&[("path", path)]);
        self.send_empty(builder).await
    }

    pub async fn get_artifact_metadata(&self, filename: &str, namespace: &str) -> Result<Artifact> {
        let url = self.artifact_url(namespace, "getMetadata");
        let builder = self
            .request(Method::GET, &url)
            .query(&[("filename", filename)]);
        self.send_json(builder).await
    }

    /// Raw content of a stored file.
    pub async fn download_artifact(&self, filename: &str, namespace: &str) -> Result<Vec<u8>> {
        let url = self.artifact_url(namespace, "download");
        let builder = self
            .request(Method::GET, &url)
            .query(&[("filename", filename)]);
        self.send_bytes(builder).await
    }
}
