//! Main WAPI client implementation.

use crate::api::{FixedAddressApi, NetworkApi, ZoneAuthApi};
use crate::config::ConnectorConfig;
use crate::object_manager::ObjectManager;
use ibx_core::{InfobloxError, Result};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// WAPI error class reported when a reference points at nothing
const DATA_NOT_FOUND: &str = "AdmConDataNotFoundError";

/// Infoblox WAPI client
#[derive(Clone)]
pub struct InfobloxClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    base_url: String,
    username: String,
    password: String,
    timeout_secs: u64,
}

impl InfobloxClient {
    /// Create a client from connection settings
    pub fn new(config: ConnectorConfig) -> Result<Self> {
        InfobloxClientBuilder::new(config).build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder(config: ConnectorConfig) -> InfobloxClientBuilder {
        InfobloxClientBuilder::new(config)
    }

    /// Access `network` objects
    #[must_use]
    pub fn networks(&self) -> NetworkApi<'_> {
        NetworkApi::new(self)
    }

    /// Access `fixedaddress` objects
    #[must_use]
    pub fn fixed_addresses(&self) -> FixedAddressApi<'_> {
        FixedAddressApi::new(self)
    }

    /// Access `zone_auth` objects
    #[must_use]
    pub fn zones(&self) -> ZoneAuthApi<'_> {
        ZoneAuthApi::new(self)
    }

    /// Tenant-scoped object manager on top of this client
    #[must_use]
    pub fn object_manager(
        &self,
        cmp_type: impl Into<String>,
        tenant_id: impl Into<String>,
    ) -> ObjectManager {
        ObjectManager::new(self.clone(), cmp_type, tenant_id)
    }

    /// The WAPI base URL requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Perform a GET request with query parameters
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let url = self.build_url(path, params)?;
        debug!(url = %url, "GET request");

        let response = self
            .inner
            .http
            .get(url)
            .basic_auth(&self.inner.username, Some(&self.inner.password))
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        self.handle_response(response).await
    }

    /// Perform a POST request with JSON body
    pub(crate) async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let url = self.build_url(path, params)?;
        debug!(url = %url, "POST request");

        let response = self
            .inner
            .http
            .post(url)
            .basic_auth(&self.inner.username, Some(&self.inner.password))
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        self.handle_response(response).await
    }

    /// Perform a DELETE request, returning the reference of the removed object
    pub(crate) async fn delete(&self, path: &str) -> Result<String> {
        let url = self.build_url(path, &[])?;
        debug!(url = %url, "DELETE request");

        let response = self
            .inner
            .http
            .delete(url)
            .basic_auth(&self.inner.username, Some(&self.inner.password))
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        self.handle_response(response).await
    }

    /// Build a URL below the WAPI base with query parameters
    fn build_url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url> {
        let raw = format!("{}/{}", self.inner.base_url, path.trim_start_matches('/'));
        let mut url =
            Url::parse(&raw).map_err(|e| InfobloxError::InvalidUrl(format!("{raw}: {e}")))?;

        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params.iter());
        }

        Ok(url)
    }

    fn transport_error(&self, err: &reqwest::Error) -> InfobloxError {
        if err.is_timeout() {
            InfobloxError::Timeout(self.inner.timeout_secs)
        } else if err.is_connect() {
            InfobloxError::Connection(err.to_string())
        } else {
            InfobloxError::Http(err.to_string())
        }
    }

    /// Handle a WAPI response that returns JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| InfobloxError::Http(e.to_string()))?;
            serde_json::from_str(&body).map_err(InfobloxError::Json)
        } else {
            self.handle_error(status.as_u16(), response).await
        }
    }

    /// Convert an error response to an InfobloxError
    async fn handle_error<T>(&self, status: u16, response: reqwest::Response) -> Result<T> {
        let body = response.text().await.unwrap_or_default();
        let (class, message) = parse_wapi_error(&body);

        match status {
            401 => Err(InfobloxError::Unauthorized),
            404 => Err(InfobloxError::NotFound { resource: message }),
            400 if class.as_deref().is_some_and(|c| c.starts_with(DATA_NOT_FOUND)) => {
                Err(InfobloxError::NotFound { resource: message })
            }
            _ => {
                warn!(status, message = %message, "WAPI request rejected");
                Err(InfobloxError::Api {
                    code: status,
                    message,
                })
            }
        }
    }
}

/// Pull the error class and readable text out of a WAPI error body
///
/// WAPI answers failures with `{"Error": "<class>: <detail>", "code": ..., "text": ...}`.
fn parse_wapi_error(body: &str) -> (Option<String>, String) {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return (None, body.to_string());
    };

    let class = value
        .get("Error")
        .and_then(serde_json::Value::as_str)
        .map(String::from);
    let message = value
        .get("text")
        .and_then(serde_json::Value::as_str)
        .map(String::from)
        .or_else(|| class.clone())
        .unwrap_or_else(|| body.to_string());

    (class, message)
}

/// Builder for configuring an [`InfobloxClient`]
pub struct InfobloxClientBuilder {
    config: ConnectorConfig,
    base_url: Option<String>,
    user_agent: String,
}

impl InfobloxClientBuilder {
    /// Create a new builder from connection settings
    #[must_use]
    pub fn new(config: ConnectorConfig) -> Self {
        Self {
            config,
            base_url: None,
            user_agent: format!("ibx/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Override the base URL derived from the settings (useful for testing)
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Build the client
    pub fn build(self) -> Result<InfobloxClient> {
        self.config.validate()?;

        let http = HttpClient::builder()
            .timeout(self.config.timeout)
            .user_agent(&self.user_agent)
            .pool_max_idle_per_host(self.config.pool_connections)
            .danger_accept_invalid_certs(!self.config.ssl_verify)
            .build()
            .map_err(|e| InfobloxError::Config(format!("failed to build HTTP client: {e}")))?;

        let base_url = self
            .base_url
            .unwrap_or_else(|| self.config.base_url())
            .trim_end_matches('/')
            .to_string();

        Ok(InfobloxClient {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                username: self.config.username,
                password: self.config.password,
                timeout_secs: self.config.timeout.as_secs(),
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wapi_error_text() {
        let body = r#"{
            "Error": "AdmConDataNotFoundError: Reference not found",
            "code": "Client.Ibap.Data.NotFound",
            "text": "Reference network/abc not found"
        }"#;
        let (class, message) = parse_wapi_error(body);
        assert_eq!(
            class.as_deref(),
            Some("AdmConDataNotFoundError: Reference not found")
        );
        assert_eq!(message, "Reference network/abc not found");
    }

    #[test]
    fn test_parse_wapi_error_plain_body() {
        let (class, message) = parse_wapi_error("Bad Gateway");
        assert!(class.is_none());
        assert_eq!(message, "Bad Gateway");
    }

    #[test]
    fn test_build_url_keeps_reference_path() {
        let client = InfobloxClient::builder(ConnectorConfig::new("gm", "admin", "x"))
            .base_url("https://gm:443/wapi/v2.5/")
            .build()
            .unwrap();

        let url = client
            .build_url(
                "network/ZG5z:10.0.0.0/24/default",
                &[("_return_fields", "network,network_view")],
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            concat!(
                "https://gm/wapi/v2.5/network/ZG5z:10.0.0.0/24/default",
                "?_return_fields=network%2Cnetwork_view"
            )
        );
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let result = InfobloxClient::new(ConnectorConfig::new("", "admin", "x"));
        assert!(matches!(result, Err(InfobloxError::Config(_))));
    }
}
