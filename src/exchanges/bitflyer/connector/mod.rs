pub mod account;
pub mod market_data;
pub mod trading;

pub use account::Account;
pub use market_data::MarketData;
pub use trading::Trading;

use crate::core::{
    config::ExchangeConfig,
    errors::ExchangeError,
    kernel::RestClient,
    traits::{AccountInfo, ExchangeConnector, MarketDataSource, OrderPlacer},
    types::{
        Balance, Collateral, Execution, Order, OrderBook, OrderRequest, OrderResponse, OrderState,
        ProductCode, Ticker,
    },
};
use async_trait::async_trait;

/// Composite bitFlyer connector
///
/// Wraps the market data, account and trading sub-components behind the
/// core traits so callers can hold one value for the whole exchange.
pub struct BitflyerConnector<R: RestClient> {
    market: MarketData<R>,
    account: Account<R>,
    trading: Trading<R>,
}

impl<R: RestClient + Clone> BitflyerConnector<R> {
    /// Create a connector from a kernel REST client and configuration
    pub fn new(rest: R, config: &ExchangeConfig) -> Self {
        let can_authenticate = config.has_credentials();
        Self {
            market: MarketData::new(&rest),
            account: Account::new(&rest, can_authenticate),
            trading: Trading::new(&rest, can_authenticate),
        }
    }
}

#[async_trait]
impl<R: RestClient + Clone> MarketDataSource for BitflyerConnector<R> {
    async fn get_order_book(
        &self,
        product_code: Option<&ProductCode>,
    ) -> Result<OrderBook, ExchangeError> {
        self.market.get_order_book(product_code).await
    }

    async fn get_ticker(
        &self,
        product_code: Option<&ProductCode>,
    ) -> Result<Ticker, ExchangeError> {
        self.market.get_ticker(product_code).await
    }

    async fn get_executions(
        &self,
        product_code: Option<&ProductCode>,
        count: Option<u32>,
        before: Option<i64>,
        after: Option<i64>,
    ) -> Result<Vec<Execution>, ExchangeError> {
        self.market
            .get_executions(product_code, count, before, after)
            .await
    }
}

#[async_trait]
impl<R: RestClient + Clone> AccountInfo for BitflyerConnector<R> {
    async fn get_balances(&self) -> Result<Vec<Balance>, ExchangeError> {
        self.account.get_balances().await
    }

    async fn get_collateral(&self) -> Result<Collateral, ExchangeError> {
        self.account.get_collateral().await
    }
}

#[async_trait]
impl<R: RestClient + Clone> OrderPlacer for BitflyerConnector<R> {
    async fn place_order(&self, order: OrderRequest) -> Result<OrderResponse, ExchangeError> {
        self.trading.place_order(order).await
    }

    async fn get_orders(
        &self,
        product_code: Option<&ProductCode>,
        count: Option<u32>,
        before: Option<i64>,
        after: Option<i64>,
        state: Option<OrderState>,
    ) -> Result<Vec<Order>, ExchangeError> {
        self.trading
            .get_orders(product_code, count, before, after, state)
            .await
    }

    async fn cancel_order(
        &self,
        product_code: &ProductCode,
        child_order_id: &str,
    ) -> Result<(), ExchangeError> {
        self.trading.cancel_order(product_code, child_order_id).await
    }

    async fn cancel_all_orders(&self, product_code: &ProductCode) -> Result<(), ExchangeError> {
        self.trading.cancel_all_orders(product_code).await
    }
}

impl<R: RestClient + Clone> ExchangeConnector for BitflyerConnector<R> {}
