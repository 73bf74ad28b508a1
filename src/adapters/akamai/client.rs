//! Signed API client
//!
//! [`SignedApiClient`] is the seam the enumeration and export engine depend on.
//! [`EdgeGridClient`] implements it over HTTPS with EdgeGrid signatures; tests
//! substitute an in-memory fake.
//!
//! Failed calls are returned as [`ApiError`] values, never raised: an HTTP error
//! carries the status code, a transport or decoding failure does not.

use super::edgerc::EdgeRc;
use super::signer::EdgeGridSigner;
use crate::config::HttpConfig;
use crate::domain::{ApiError, ApiResult, AwpError, Result};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Method, StatusCode};
use serde_json::Value;
use url::Url;

/// Query parameters in the order they are sent
pub type QueryParams = Vec<(String, String)>;

/// Read access to the remote management API
///
/// # Example
///
/// ```no_run
/// use awp::adapters::akamai::{EdgeGridClient, EdgeRc, SignedApiClient};
/// use awp::config::HttpConfig;
///
/// # async fn example() -> awp::domain::Result<()> {
/// let edgerc = EdgeRc::from_file("~/.edgerc", "default")?;
/// let client = EdgeGridClient::new(&edgerc, &HttpConfig::default(), None)?;
///
/// match client.get("/papi/v1/groups", &[]).await {
///     Ok(groups) => println!("{groups}"),
///     Err(e) => eprintln!("Error: {e} (status {:?})", e.status_code),
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait SignedApiClient: Send + Sync {
    /// Issues a signed GET and returns the decoded JSON body
    async fn get(&self, path: &str, params: &[(String, String)]) -> ApiResult;
}

/// Parses a query string into parameters
///
/// `k=v&k2=v2` becomes pairs; a bare term becomes `search=term`.
pub fn parse_query(query: &str) -> QueryParams {
    if query.contains('=') {
        query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    } else if query.is_empty() {
        Vec::new()
    } else {
        vec![("search".to_string(), query.to_string())]
    }
}

/// EdgeGrid-signed HTTP client
pub struct EdgeGridClient {
    http: Client,
    base_url: Url,
    signer: EdgeGridSigner,
    account_switch_key: Option<String>,
}

impl EdgeGridClient {
    /// Creates a client for the host of an `.edgerc` section
    ///
    /// # Errors
    ///
    /// Returns [`AwpError::Credentials`] for an unusable host and
    /// [`AwpError::Configuration`] if the HTTP client cannot be built.
    pub fn new(
        edgerc: &EdgeRc,
        http_config: &HttpConfig,
        account_switch_key: Option<String>,
    ) -> Result<Self> {
        let base_url = Url::parse(&edgerc.base_url()).map_err(|e| {
            AwpError::Credentials(format!("Invalid host '{}': {}", edgerc.host, e))
        })?;

        let http = ClientBuilder::new()
            .timeout(http_config.timeout())
            .connect_timeout(http_config.connect_timeout())
            .user_agent(concat!("awp/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AwpError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url,
            signer: EdgeGridSigner::new(edgerc, http_config.max_body),
            account_switch_key: account_switch_key.filter(|k| !k.is_empty()),
        })
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Issues a signed POST with a JSON body
    pub async fn post(&self, path: &str, params: &[(String, String)], body: &Value) -> ApiResult {
        self.send(Method::POST, path, params, Some(body)).await
    }

    /// Issues a signed PUT with a JSON body
    pub async fn put(&self, path: &str, params: &[(String, String)], body: &Value) -> ApiResult {
        self.send(Method::PUT, path, params, Some(body)).await
    }

    /// Issues a signed PATCH with a JSON body
    pub async fn patch(&self, path: &str, params: &[(String, String)], body: &Value) -> ApiResult {
        self.send(Method::PATCH, path, params, Some(body)).await
    }

    /// Issues a signed DELETE
    pub async fn delete(&self, path: &str, params: &[(String, String)]) -> ApiResult {
        self.send(Method::DELETE, path, params, None).await
    }

    fn request_url(&self, path: &str, params: &[(String, String)]) -> std::result::Result<Url, ApiError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| ApiError::transport(format!("Invalid request path '{path}': {e}")))?;

        let account_switch_key = self
            .account_switch_key
            .as_deref()
            .map(|key| ("accountSwitchKey", key));
        let overrides_key = account_switch_key.is_some();
        let pairs = params
            .iter()
            .filter(|(k, _)| !overrides_key || k != "accountSwitchKey")
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .chain(account_switch_key);

        {
            let mut query = url.query_pairs_mut();
            for (key, value) in pairs {
                query.append_pair(key, value);
            }
        }
        if url.query() == Some("") {
            url.set_query(None);
        }

        Ok(url)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        params: &[(String, String)],
        body: Option<&Value>,
    ) -> ApiResult {
        let url = self.request_url(path, params)?;
        let body = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(|e| ApiError::transport(format!("Failed to encode request body: {e}")))?;

        let authorization = self
            .signer
            .authorization(&method, &url, body.as_deref())
            .map_err(|e| ApiError::transport(e.to_string()))?;

        tracing::debug!(method = %method, path = %url.path(), "Sending signed request");

        let mut request = self
            .http
            .request(method, url.clone())
            .header("Authorization", authorization);
        if let Some(body) = body {
            request = request
                .header("Content-Type", "application/json")
                .body(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), body = %detail, "Request failed");
            return Err(ApiError::http(status.as_u16(), http_error_message(status, &url)));
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::transport(e.to_string()))?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&bytes).map_err(ApiError::decode)
    }
}

#[async_trait]
impl SignedApiClient for EdgeGridClient {
    async fn get(&self, path: &str, params: &[(String, String)]) -> ApiResult {
        self.send(Method::GET, path, params, None).await
    }
}

fn http_error_message(status: StatusCode, url: &Url) -> String {
    let class = if status.is_client_error() {
        "Client"
    } else {
        "Server"
    };
    format!(
        "{} {} Error: {} for url: {}",
        status.as_u16(),
        class,
        status.canonical_reason().unwrap_or("Unknown"),
        url
    )
}
