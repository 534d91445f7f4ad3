use crate::core::errors::ExchangeError;
use crate::core::kernel::signer::{SignatureResult, Signer};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::collections::HashMap;

type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA256 signer for bitFlyer Lightning private endpoints
///
/// The signature material is the concatenation
/// `timestamp + method + request_path + body`, where `request_path` carries
/// the query string when one is present. The hex digest is sent in the
/// `ACCESS-SIGN` header alongside `ACCESS-KEY` and `ACCESS-TIMESTAMP`.
pub struct BitflyerSigner {
    api_key: String,
    secret_key: String,
}

impl BitflyerSigner {
    /// Create a new signer from API credentials
    pub fn new(api_key: String, secret_key: String) -> Self {
        Self {
            api_key,
            secret_key,
        }
    }

    fn compute_signature(
        &self,
        method: &str,
        request_path: &str,
        body: &[u8],
        timestamp: u64,
    ) -> Result<String, ExchangeError> {
        let mut mac = HmacSha256::new_from_slice(self.secret_key.as_bytes())
            .map_err(|e| ExchangeError::AuthError(format!("Invalid secret key: {}", e)))?;

        mac.update(timestamp.to_string().as_bytes());
        mac.update(method.as_bytes());
        mac.update(request_path.as_bytes());
        mac.update(body);
        let result = mac.finalize();

        Ok(hex::encode(result.into_bytes()))
    }
}

impl Signer for BitflyerSigner {
    fn sign_request(
        &self,
        method: &str,
        request_path: &str,
        body: &[u8],
        timestamp: u64,
    ) -> SignatureResult {
        let signature = self.compute_signature(method, request_path, body, timestamp)?;

        let mut headers = HashMap::new();
        headers.insert("ACCESS-KEY".to_string(), self.api_key.clone());
        headers.insert("ACCESS-TIMESTAMP".to_string(), timestamp.to_string());
        headers.insert("ACCESS-SIGN".to_string(), signature);

        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer(secret: &str) -> BitflyerSigner {
        BitflyerSigner::new("test_key".to_string(), secret.to_string())
    }

    #[test]
    fn signature_matches_known_vector() {
        let sig = signer("s3cret")
            .compute_signature("POST", "/v1/me/sendchildorder", b"{}", 1_700_000_000)
            .unwrap();
        assert_eq!(
            sig,
            "bd250b475f15ab2704c640e2fec1a76f4bedb9faa0fc04a85bec25c0eff67ce6"
        );
    }

    #[test]
    fn signature_covers_query_string() {
        let sig = signer("s3cret")
            .compute_signature(
                "GET",
                "/v1/me/getchildorders?product_code=BTC_JPY&count=10",
                b"",
                1_700_000_000,
            )
            .unwrap();
        assert_eq!(
            sig,
            "3497c2235e07c71c883f9e00340ad14f8250603421924eecb4a499419d3c3d3c"
        );
    }

    #[test]
    fn signature_is_sensitive_to_body_bytes() {
        let sig = signer("s3cret")
            .compute_signature("POST", "/v1/me/sendchildorder", b"{ }", 1_700_000_000)
            .unwrap();
        assert_eq!(
            sig,
            "381468a6cbc20e671eaf6806945d474d6ec7b5f85d1f0a7cc0f6f8842a21768e"
        );
    }

    #[test]
    fn signature_is_sensitive_to_secret() {
        let sig = signer("s3cret2")
            .compute_signature("POST", "/v1/me/sendchildorder", b"{}", 1_700_000_000)
            .unwrap();
        assert_eq!(
            sig,
            "755c44fd13afba06cb49a34136aaef702cd41f93ec7d25e9c2713a94f2e50dc2"
        );
    }

    #[test]
    fn get_request_signs_empty_body() {
        let sig = signer("topsecret")
            .compute_signature("GET", "/v1/me/getbalance", b"", 1_699_999_999)
            .unwrap();
        assert_eq!(
            sig,
            "3d7f936fe484589e4c07af4edb8c59c15544542aae3a38d0f309bea2b21038e7"
        );
    }

    #[test]
    fn sign_request_sets_auth_headers() {
        let headers = signer("s3cret")
            .sign_request("POST", "/v1/me/sendchildorder", b"{}", 1_700_000_000)
            .unwrap();
        assert_eq!(headers.get("ACCESS-KEY").unwrap(), "test_key");
        assert_eq!(headers.get("ACCESS-TIMESTAMP").unwrap(), "1700000000");
        assert_eq!(
            headers.get("ACCESS-SIGN").unwrap(),
            "bd250b475f15ab2704c640e2fec1a76f4bedb9faa0fc04a85bec25c0eff67ce6"
        );
    }

    #[test]
    fn deterministic_for_identical_inputs() {
        let a = signer("s3cret")
            .compute_signature("POST", "/v1/me/sendchildorder", b"{}", 1_700_000_000)
            .unwrap();
        let b = signer("s3cret")
            .compute_signature("POST", "/v1/me/sendchildorder", b"{}", 1_700_000_000)
            .unwrap();
        assert_eq!(a, b);
    }
}
