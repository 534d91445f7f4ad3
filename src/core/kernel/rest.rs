use crate::core::errors::ExchangeError;
use crate::core::kernel::signer::Signer;
use async_trait::async_trait;
use reqwest::{Client, Method, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{instrument, trace};

/// REST client trait for making HTTP requests
///
/// This trait provides a unified interface for HTTP operations against an
/// exchange API. Implementations handle signing, query assembly and the
/// status/decode pipeline so typed wrappers stay thin.
#[async_trait]
pub trait RestClient: Send + Sync {
    /// Make a GET request with strongly-typed response
    ///
    /// # Arguments
    /// * `endpoint` - The API endpoint path
    /// * `query_params` - Query parameters as key-value pairs, in order
    /// * `authenticated` - Whether to sign the request
    ///
    /// # Returns
    /// The response body deserialized to the specified type
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
        authenticated: bool,
    ) -> Result<T, ExchangeError>;

    /// Make a POST request with strongly-typed response
    ///
    /// # Arguments
    /// * `endpoint` - The API endpoint path
    /// * `body` - Request body as JSON value
    /// * `authenticated` - Whether to sign the request
    ///
    /// # Returns
    /// The response body deserialized to the specified type
    async fn post_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &Value,
        authenticated: bool,
    ) -> Result<T, ExchangeError>;

    /// Make a POST request whose success response carries no body
    ///
    /// Some endpoints acknowledge with HTTP 200 and an empty payload; this
    /// method skips JSON decoding entirely on the success path.
    async fn post_no_content(
        &self,
        endpoint: &str,
        body: &Value,
        authenticated: bool,
    ) -> Result<(), ExchangeError>;
}

/// Configuration for the REST client
#[derive(Clone, Debug)]
pub struct RestClientConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Exchange name for logging and tracing
    pub exchange_name: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string to include in requests
    pub user_agent: String,
}

impl RestClientConfig {
    /// Create a new configuration
    ///
    /// # Arguments
    /// * `base_url` - Base URL for the API
    /// * `exchange_name` - Name of the exchange
    pub fn new(base_url: String, exchange_name: String) -> Self {
        Self {
            base_url,
            exchange_name,
            timeout_seconds: 10,
            user_agent: "bitflyer-connector/0.1".to_string(),
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Set the user agent string
    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }
}

/// Builder for creating REST client instances
pub struct RestClientBuilder {
    config: RestClientConfig,
    signer: Option<Arc<dyn Signer>>,
}

impl RestClientBuilder {
    /// Create a new builder with the given configuration
    pub fn new(config: RestClientConfig) -> Self {
        Self {
            config,
            signer: None,
        }
    }

    /// Set the signer for authenticated requests
    pub fn with_signer(mut self, signer: Arc<dyn Signer>) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Build the REST client
    ///
    /// The base URL must parse as an absolute URI; the per-request deadline
    /// is installed on the underlying HTTP client here.
    pub fn build(self) -> Result<ReqwestRest, ExchangeError> {
        Url::parse(&self.config.base_url).map_err(|e| {
            ExchangeError::ConfigurationError(format!(
                "Invalid base URL '{}': {}",
                self.config.base_url, e
            ))
        })?;

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(self.config.timeout_seconds))
            .user_agent(&self.config.user_agent)
            .build()
            .map_err(|e| {
                ExchangeError::ConfigurationError(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(ReqwestRest {
            client,
            config: self.config,
            signer: self.signer,
        })
    }
}

/// Implementation of `RestClient` using reqwest
#[derive(Clone)]
pub struct ReqwestRest {
    client: Client,
    config: RestClientConfig,
    signer: Option<Arc<dyn Signer>>,
}

impl std::fmt::Debug for ReqwestRest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestRest")
            .field("config", &self.config)
            .field("has_signer", &self.signer.is_some())
            .finish_non_exhaustive()
    }
}

impl ReqwestRest {
    /// Get the current timestamp in Unix seconds
    fn get_timestamp() -> Result<u64, ExchangeError> {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .map_err(|e| ExchangeError::Other(format!("Failed to get timestamp: {}", e)))
    }

    /// Build the full URL for a request path, collapsing redundant separators
    fn build_url(&self, request_path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            request_path.trim_start_matches('/')
        )
    }

    /// Create query string from parameters, preserving their order
    fn create_query_string(params: &[(&str, &str)]) -> String {
        params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }

    fn map_send_error(e: &reqwest::Error) -> ExchangeError {
        if e.is_timeout() {
            ExchangeError::TimeoutError(format!("Request timed out: {}", e))
        } else {
            ExchangeError::NetworkError(format!("Request failed: {}", e))
        }
    }

    /// Read status and body, mapping non-2xx responses to `ApiError`
    #[instrument(skip(self, response), fields(exchange = %self.config.exchange_name, status = %response.status()))]
    async fn handle_response(&self, response: Response) -> Result<String, ExchangeError> {
        let status = response.status();
        let response_text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                ExchangeError::TimeoutError(format!("Timed out reading response body: {}", e))
            } else {
                ExchangeError::NetworkError(format!("Failed to read response body: {}", e))
            }
        })?;

        trace!("Response body: {}", response_text);

        if status.is_success() {
            Ok(response_text)
        } else {
            let message = if response_text.is_empty() {
                status.canonical_reason().unwrap_or("unknown").to_string()
            } else {
                response_text
            };
            Err(ExchangeError::ApiError {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// Make a request and return the raw response body on success
    #[instrument(skip(self, body), fields(exchange = %self.config.exchange_name, method = %method, endpoint = %endpoint))]
    async fn make_request(
        &self,
        method: Method,
        endpoint: &str,
        query_params: &[(&str, &str)],
        body: &[u8],
        authenticated: bool,
    ) -> Result<String, ExchangeError> {
        let query_string = Self::create_query_string(query_params);
        let request_path = if query_string.is_empty() {
            endpoint.to_string()
        } else {
            format!("{}?{}", endpoint, query_string)
        };

        let url = self.build_url(&request_path);
        let mut request = self.client.request(method.clone(), &url);

        if authenticated {
            // The signature covers the exact path the request is sent to,
            // query string included, so signing happens after assembly.
            let signer = self.signer.as_ref().ok_or_else(|| {
                ExchangeError::ConfigurationError(
                    "Authenticated endpoint called without credentials".to_string(),
                )
            })?;
            let timestamp = Self::get_timestamp()?;
            let headers = signer.sign_request(method.as_str(), &request_path, body, timestamp)?;
            for (key, value) in headers {
                request = request.header(&key, &value);
            }
        }

        if !body.is_empty() {
            request = request
                .header("Content-Type", "application/json")
                .body(body.to_vec());
        }

        let response = request
            .send()
            .await
            .map_err(|e| Self::map_send_error(&e))?;

        self.handle_response(response).await
    }
}

#[async_trait]
impl RestClient for ReqwestRest {
    #[instrument(skip(self, query_params), fields(exchange = %self.config.exchange_name, endpoint = %endpoint, param_count = query_params.len()))]
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
        authenticated: bool,
    ) -> Result<T, ExchangeError> {
        let text = self
            .make_request(Method::GET, endpoint, query_params, &[], authenticated)
            .await?;
        serde_json::from_str(&text).map_err(|e| {
            ExchangeError::DeserializationError(format!("Failed to parse JSON response: {}", e))
        })
    }

    #[instrument(skip(self, body), fields(exchange = %self.config.exchange_name, endpoint = %endpoint))]
    async fn post_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &Value,
        authenticated: bool,
    ) -> Result<T, ExchangeError> {
        let body_bytes = serde_json::to_vec(body).map_err(|e| {
            ExchangeError::SerializationError(format!("Failed to serialize request body: {}", e))
        })?;

        let text = self
            .make_request(Method::POST, endpoint, &[], &body_bytes, authenticated)
            .await?;
        serde_json::from_str(&text).map_err(|e| {
            ExchangeError::DeserializationError(format!("Failed to parse JSON response: {}", e))
        })
    }

    #[instrument(skip(self, body), fields(exchange = %self.config.exchange_name, endpoint = %endpoint))]
    async fn post_no_content(
        &self,
        endpoint: &str,
        body: &Value,
        authenticated: bool,
    ) -> Result<(), ExchangeError> {
        let body_bytes = serde_json::to_vec(body).map_err(|e| {
            ExchangeError::SerializationError(format!("Failed to serialize request body: {}", e))
        })?;

        self.make_request(Method::POST, endpoint, &[], &body_bytes, authenticated)
            .await
            .map(|_| ())
    }
}
