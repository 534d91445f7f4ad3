use crate::core::{
    errors::ExchangeError,
    kernel::RestClient,
    traits::AccountInfo,
    types::{Balance, Collateral},
};
use crate::exchanges::bitflyer::converters;
use crate::exchanges::bitflyer::rest::BitflyerRestClient;
use async_trait::async_trait;
use tracing::instrument;

/// Account information implementation for bitFlyer
pub struct Account<R: RestClient> {
    rest: BitflyerRestClient<R>,
    can_authenticate: bool,
}

impl<R: RestClient> Account<R> {
    /// Create a new account source
    pub fn new(rest: &R, can_authenticate: bool) -> Self
    where
        R: Clone,
    {
        Self {
            rest: BitflyerRestClient::new(rest.clone()),
            can_authenticate,
        }
    }

    fn ensure_authenticated(&self) -> Result<(), ExchangeError> {
        if self.can_authenticate {
            Ok(())
        } else {
            Err(ExchangeError::ConfigurationError(
                "API credentials required for account operations".to_string(),
            ))
        }
    }
}

#[async_trait]
impl<R: RestClient> AccountInfo for Account<R> {
    #[instrument(skip(self), fields(exchange = "bitflyer"))]
    async fn get_balances(&self) -> Result<Vec<Balance>, ExchangeError> {
        self.ensure_authenticated()?;
        let balances = self.rest.get_balances().await?;
        Ok(balances
            .into_iter()
            .map(converters::convert_balance)
            .collect())
    }

    #[instrument(skip(self), fields(exchange = "bitflyer"))]
    async fn get_collateral(&self) -> Result<Collateral, ExchangeError> {
        self.ensure_authenticated()?;
        let collateral = self.rest.get_collateral().await?;
        Ok(converters::convert_collateral(collateral))
    }
}
