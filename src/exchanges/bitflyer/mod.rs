pub mod connector;
pub mod converters;
pub mod rest;
pub mod signer;
pub mod types;

pub use connector::BitflyerConnector;
pub use rest::BitflyerRestClient;
pub use signer::BitflyerSigner;

use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::{ReqwestRest, RestClientBuilder, RestClientConfig};
use std::sync::Arc;

/// Production REST endpoint
pub const BITFLYER_BASE_URL: &str = "https://api.bitflyer.jp";

/// Build a bitFlyer connector from a configuration
///
/// Without credentials the connector serves public market data only;
/// private operations fail with a configuration error before any I/O.
pub fn build_connector(
    config: ExchangeConfig,
) -> Result<BitflyerConnector<ReqwestRest>, ExchangeError> {
    let base_url = config
        .base_url
        .clone()
        .unwrap_or_else(|| BITFLYER_BASE_URL.to_string());

    let rest_config = RestClientConfig::new(base_url, "bitflyer".to_string());
    let mut rest_builder = RestClientBuilder::new(rest_config);

    if config.has_credentials() {
        let signer = Arc::new(BitflyerSigner::new(
            config.api_key().to_string(),
            config.secret_key().to_string(),
        ));
        rest_builder = rest_builder.with_signer(signer);
    }

    let rest = rest_builder.build()?;
    Ok(BitflyerConnector::new(rest, &config))
}
