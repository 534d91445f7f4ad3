use crate::core::errors::ExchangeError;
use std::collections::HashMap;

/// Result type for signing operations: headers to attach to the request
pub type SignatureResult = Result<HashMap<String, String>, ExchangeError>;

/// Signer trait for request authentication
///
/// Implementations produce the authentication headers for a single request.
/// The `request_path` includes the query string when one is present, since
/// header-based schemes cover the exact path the request is sent to.
pub trait Signer: Send + Sync {
    /// Sign a request and return the headers to attach
    ///
    /// # Arguments
    /// * `method` - HTTP method (GET, POST, etc.)
    /// * `request_path` - API endpoint path including any query string
    /// * `body` - Raw request body bytes (empty for GET)
    /// * `timestamp` - Request timestamp in Unix seconds
    fn sign_request(
        &self,
        method: &str,
        request_path: &str,
        body: &[u8],
        timestamp: u64,
    ) -> SignatureResult;
}
