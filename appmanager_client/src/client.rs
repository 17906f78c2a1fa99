use ::std::collections::BTreeMap;

use ::appmanager_common::{
    anyhow::anyhow,
    config::{ClientConfig, WaitConfig},
    error::{AppManagerError, Result},
    serde::{de::DeserializeOwned, Deserialize, Serialize},
    serde_json::{self, Value},
    tracing::debug,
};
use ::reqwest::{header::CONTENT_TYPE, Method, RequestBuilder};

pub(crate) const NAMESPACE_URI: &str = "namespaces";
pub(crate) const DEPLOYMENT_TARGET_URI: &str = "deployment-targets";
pub(crate) const SESSION_CLUSTER_URI: &str = "sessionclusters";
pub(crate) const ARTIFACT_URI: &str = "artifacts";
pub(crate) const DEPLOYMENT_URI: &str = "deployments";
pub(crate) const JOB_URI: &str = "jobs";
pub(crate) const SAVEPOINT_URI: &str = "savepoints";
pub(crate) const DEPLOYMENT_DEFAULTS_URI: &str = "deployment-defaults";

/// Client for the Flink AppManager REST API.
///
/// Cloning is cheap and clones share the connection pool.
#[derive(Debug, Clone)]
pub struct AppManagerClient {
    config: ClientConfig,
    /// `{endpoint}/api/{version}`
    base_url: String,
    client: reqwest::Client,
}

impl AppManagerClient {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Create a client that sends its requests through `client`.
    pub fn with_http_client(config: ClientConfig, client: reqwest::Client) -> Self {
        let base_url = format!(
            "{}/api/{}",
            config.endpoint.trim_end_matches('/'),
            config.api_version
        );
        Self {
            config,
            base_url,
            client,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn wait_config(&self) -> WaitConfig {
        self.config.wait_config()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> &str {
        self.config.endpoint.trim_end_matches('/')
    }

    /// Catalogue of the Flink images known to the service.
    pub(crate) fn ui_config_url(&self) -> String {
        format!("{}/ui/config.json", self.endpoint())
    }

    pub(crate) fn system_info_url(&self) -> String {
        format!("{}/ui/appmanager/status/system-info", self.endpoint())
    }

    pub(crate) fn namespaces_url(&self) -> String {
        format!("{}/{}", self.base_url, NAMESPACE_URI)
    }

    pub(crate) fn namespace_url(&self, namespace: &str) -> String {
        format!("{}/{}/{}", self.base_url, NAMESPACE_URI, namespace)
    }

    /// URL of a collection scoped to `namespace`, e.g. `.../namespaces/default/deployments`
    pub(crate) fn collection_url(&self, namespace: &str, collection: &str) -> String {
        format!("{}/{}", self.namespace_url(namespace), collection)
    }

    pub(crate) fn item_url(&self, namespace: &str, collection: &str, name: &str) -> String {
        format!("{}/{}", self.collection_url(namespace, collection), name)
    }

    /// Start a request that carries a JSON content type.
    pub(crate) fn request(&self, method: Method, url: &str) -> RequestBuilder {
        debug!("{} {}", method, url);
        self.client
            .request(method, url)
            .header(CONTENT_TYPE, "application/json")
    }

    /// Start a request without presetting the content type, for multipart bodies.
    pub(crate) fn raw_request(&self, method: Method, url: &str) -> RequestBuilder {
        debug!("{} {}", method, url);
        self.client.request(method, url)
    }

    /// Send the request and decode the JSON body of a successful response.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T> {
        let body = self.send_bytes(builder).await?;
        serde_json::from_slice(&body).map_err(AppManagerError::fail_to_decode_response)
    }

    /// Send the request and discard the body of a successful response.
    pub(crate) async fn send_empty(&self, builder: RequestBuilder) -> Result<()> {
        self.send_bytes(builder).await?;
        Ok(())
    }

    /// Send the request and return the raw body of a successful response.
    pub(crate) async fn send_bytes(&self, builder: RequestBuilder) -> Result<Vec<u8>> {
        let response = builder
            .send()
            .await
            .map_err(AppManagerError::fail_to_send_request)?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(AppManagerError::fail_to_send_request)?;
        if !status.is_success() {
            debug!("request failed with status {}", status);
            return Err(api_error(status.as_u16(), &body));
        }
        Ok(body.to_vec())
    }
}

/// Error body returned by the service with every non-2xx response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
#[serde(crate = "appmanager_common::serde")]
pub struct ApiException {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<BTreeMap<String, Value>>,
}

impl ApiException {
    /// `"{message}: {exceptionMessage}"` when the context carries an exception message,
    /// otherwise the bare message.
    pub fn error_message(&self) -> String {
        match self
            .context
            .as_ref()
            .and_then(|context| context.get("exceptionMessage"))
        {
            Some(Value::String(exception)) => format!("{}: {}", self.message, exception),
            Some(Value::Null) => format!("{}: ", self.message),
            Some(exception) => format!("{}: {}", self.message, exception),
            None => self.message.clone(),
        }
    }
}

fn api_error(status: u16, body: &[u8]) -> AppManagerError {
    match serde_json::from_slice::<ApiException>(body) {
        Ok(exception) => AppManagerError::api(status, anyhow!(exception.error_message())),
        Err(e) => AppManagerError::api(status, e),
    }
}

/// Reject an empty identifier before any request is sent.
pub(crate) fn check_not_empty(what: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(AppManagerError::illegal_argument(anyhow!(
            "{} cannot be empty",
            what
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::appmanager_common::{error::ErrorType, serde_json::json};

    fn client(endpoint: &str) -> AppManagerClient {
        AppManagerClient::new(ClientConfig::new(endpoint))
    }

    #[test]
    fn build_urls() {
        let client = client("http://appmanager:8080/");
        assert_eq!(client.base_url(), "http://appmanager:8080/api/v1");
        assert_eq!(client.namespaces_url(), "http://appmanager:8080/api/v1/namespaces");
        assert_eq!(
            client.item_url("default", SESSION_CLUSTER_URI, "sc-1"),
            "http://appmanager:8080/api/v1/namespaces/default/sessionclusters/sc-1"
        );
        assert_eq!(
            client.collection_url("default", DEPLOYMENT_TARGET_URI),
            "http://appmanager:8080/api/v1/namespaces/default/deployment-targets"
        );
        assert_eq!(client.ui_config_url(), "http://appmanager:8080/ui/config.json");
        assert_eq!(
            client.system_info_url(),
            "http://appmanager:8080/ui/appmanager/status/system-info"
        );
    }

    #[test]
    fn configured_api_version() {
        let mut config = ClientConfig::new("http://appmanager:8080");
        config.api_version = "v2".to_owned();
        let client = AppManagerClient::new(config);
        assert_eq!(client.namespace_url("ns"), "http://appmanager:8080/api/v2/namespaces/ns");
    }

    #[test]
    fn api_error_with_exception_message() {
        let body = json!({
            "message": "bad request",
            "context": { "exceptionMessage": "name required" }
        });
        let error = api_error(400, body.to_string().as_bytes());
        assert_eq!(error.to_string(), "bad request: name required");
        assert_eq!(error.get_error_type(), ErrorType::Api(400));
    }

    #[test]
    fn api_error_with_null_exception_message() {
        let body = json!({
            "message": "bad",
            "context": { "exceptionMessage": null }
        });
        let error = api_error(400, body.to_string().as_bytes());
        assert_eq!(error.to_string(), "bad: ");
    }

    #[test]
    fn api_error_without_context() {
        let body = json!({ "message": "namespace not found", "statusCode": 404 });
        let error = api_error(404, body.to_string().as_bytes());
        assert_eq!(error.to_string(), "namespace not found");
        assert!(error.is_not_found());
    }

    #[test]
    fn unparsable_error_body() {
        let error = api_error(502, b"<html>Bad Gateway</html>");
        assert_eq!(error.get_error_type(), ErrorType::Api(502));
        assert!(error.source_error().is::<serde_json::Error>());
    }

    #[test]
    fn empty_identifier() {
        let result = check_not_empty("name", "");
        assert!(result.is_err_and(|e| e.to_string() == "Illegal argument: name cannot be empty"));
        assert!(check_not_empty("name", "ns").is_ok());
    }
}
