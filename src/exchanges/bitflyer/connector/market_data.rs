use crate::core::{
    errors::ExchangeError,
    kernel::RestClient,
    traits::MarketDataSource,
    types::{Execution, OrderBook, ProductCode, Ticker},
};
use crate::exchanges::bitflyer::converters;
use crate::exchanges::bitflyer::rest::BitflyerRestClient;
use async_trait::async_trait;
use tracing::instrument;

/// Market data implementation for bitFlyer
pub struct MarketData<R: RestClient> {
    rest: BitflyerRestClient<R>,
}

impl<R: RestClient> MarketData<R> {
    /// Create a new market data source
    pub fn new(rest: &R) -> Self
    where
        R: Clone,
    {
        Self {
            rest: BitflyerRestClient::new(rest.clone()),
        }
    }
}

#[async_trait]
impl<R: RestClient> MarketDataSource for MarketData<R> {
    #[instrument(skip(self), fields(exchange = "bitflyer"))]
    async fn get_order_book(
        &self,
        product_code: Option<&ProductCode>,
    ) -> Result<OrderBook, ExchangeError> {
        let board = self
            .rest
            .get_board(product_code.map(ProductCode::as_str))
            .await?;
        Ok(converters::convert_order_book(board))
    }

    #[instrument(skip(self), fields(exchange = "bitflyer"))]
    async fn get_ticker(
        &self,
        product_code: Option<&ProductCode>,
    ) -> Result<Ticker, ExchangeError> {
        let ticker = self
            .rest
            .get_ticker(product_code.map(ProductCode::as_str))
            .await?;
        converters::convert_ticker(ticker).map_err(ExchangeError::Other)
    }

    #[instrument(skip(self), fields(exchange = "bitflyer"))]
    async fn get_executions(
        &self,
        product_code: Option<&ProductCode>,
        count: Option<u32>,
        before: Option<i64>,
        after: Option<i64>,
    ) -> Result<Vec<Execution>, ExchangeError> {
        let executions = self
            .rest
            .get_executions(product_code.map(ProductCode::as_str), count, before, after)
            .await?;
        Ok(executions
            .into_iter()
            .map(converters::convert_execution)
            .collect())
    }
}
