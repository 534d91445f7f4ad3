use crate::core::{
    errors::ExchangeError,
    types::{
        Balance, Collateral, Execution, Order, OrderBook, OrderRequest, OrderResponse, OrderState,
        ProductCode, Ticker,
    },
};
use async_trait::async_trait;

/// Public market data operations
#[async_trait]
pub trait MarketDataSource {
    /// Get the order book for a product
    async fn get_order_book(
        &self,
        product_code: Option<&ProductCode>,
    ) -> Result<OrderBook, ExchangeError>;

    /// Get the current ticker for a product
    async fn get_ticker(
        &self,
        product_code: Option<&ProductCode>,
    ) -> Result<Ticker, ExchangeError>;

    /// Get recent public executions, newest first
    async fn get_executions(
        &self,
        product_code: Option<&ProductCode>,
        count: Option<u32>,
        before: Option<i64>,
        after: Option<i64>,
    ) -> Result<Vec<Execution>, ExchangeError>;
}

/// Private account state operations
#[async_trait]
pub trait AccountInfo {
    /// Get asset balances for every currency in the account
    async fn get_balances(&self) -> Result<Vec<Balance>, ExchangeError>;

    /// Get the margin collateral snapshot
    async fn get_collateral(&self) -> Result<Collateral, ExchangeError>;
}

/// Order placement and management operations
#[async_trait]
pub trait OrderPlacer {
    /// Place a new child order
    async fn place_order(&self, order: OrderRequest) -> Result<OrderResponse, ExchangeError>;

    /// List child orders, optionally filtered by state
    async fn get_orders(
        &self,
        product_code: Option<&ProductCode>,
        count: Option<u32>,
        before: Option<i64>,
        after: Option<i64>,
        state: Option<OrderState>,
    ) -> Result<Vec<Order>, ExchangeError>;

    /// Cancel a single child order by its order id
    async fn cancel_order(
        &self,
        product_code: &ProductCode,
        child_order_id: &str,
    ) -> Result<(), ExchangeError>;

    /// Cancel every open child order for a product
    async fn cancel_all_orders(&self, product_code: &ProductCode) -> Result<(), ExchangeError>;
}

// Composite trait for convenience when you need all functionality
#[async_trait]
pub trait ExchangeConnector: MarketDataSource + AccountInfo + OrderPlacer {}
