use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::exchanges::bitflyer::types::{
    BitflyerBalance, BitflyerBoard, BitflyerCancelAllChildOrdersRequest,
    BitflyerCancelChildOrderRequest, BitflyerChildOrder, BitflyerCollateral, BitflyerExecution,
    BitflyerSendChildOrderRequest, BitflyerSendChildOrderResponse, BitflyerTicker,
};
use serde::Serialize;
use serde_json::Value;

/// Thin typed wrapper around `RestClient` for the bitFlyer Lightning API
pub struct BitflyerRestClient<R: RestClient> {
    client: R,
}

impl<R: RestClient> BitflyerRestClient<R> {
    pub fn new(client: R) -> Self {
        Self { client }
    }

    fn to_body<T: Serialize>(request: &T) -> Result<Value, ExchangeError> {
        serde_json::to_value(request).map_err(|e| {
            ExchangeError::SerializationError(format!("Failed to serialize request body: {}", e))
        })
    }

    /// Get the order book
    pub async fn get_board(
        &self,
        product_code: Option<&str>,
    ) -> Result<BitflyerBoard, ExchangeError> {
        let mut params = vec![];

        if let Some(product_code) = product_code {
            params.push(("product_code", product_code));
        }

        self.client.get_json("/v1/getboard", &params, false).await
    }

    /// Get the ticker
    pub async fn get_ticker(
        &self,
        product_code: Option<&str>,
    ) -> Result<BitflyerTicker, ExchangeError> {
        let mut params = vec![];

        if let Some(product_code) = product_code {
            params.push(("product_code", product_code));
        }

        self.client.get_json("/v1/getticker", &params, false).await
    }

    /// Get recent public executions
    pub async fn get_executions(
        &self,
        product_code: Option<&str>,
        count: Option<u32>,
        before: Option<i64>,
        after: Option<i64>,
    ) -> Result<Vec<BitflyerExecution>, ExchangeError> {
        let count_str = count.map(|c| c.to_string());
        let before_str = before.map(|b| b.to_string());
        let after_str = after.map(|a| a.to_string());
        let mut params = vec![];

        if let Some(product_code) = product_code {
            params.push(("product_code", product_code));
        }
        if let Some(ref count) = count_str {
            params.push(("count", count.as_str()));
        }
        if let Some(ref before) = before_str {
            params.push(("before", before.as_str()));
        }
        if let Some(ref after) = after_str {
            params.push(("after", after.as_str()));
        }

        self.client
            .get_json("/v1/getexecutions", &params, false)
            .await
    }

    /// Get account balances (requires authentication)
    pub async fn get_balances(&self) -> Result<Vec<BitflyerBalance>, ExchangeError> {
        self.client.get_json("/v1/me/getbalance", &[], true).await
    }

    /// Get the margin collateral snapshot (requires authentication)
    pub async fn get_collateral(&self) -> Result<BitflyerCollateral, ExchangeError> {
        self.client
            .get_json("/v1/me/getcollateral", &[], true)
            .await
    }

    /// List child orders (requires authentication)
    pub async fn get_child_orders(
        &self,
        product_code: Option<&str>,
        count: Option<u32>,
        before: Option<i64>,
        after: Option<i64>,
        child_order_state: Option<&str>,
    ) -> Result<Vec<BitflyerChildOrder>, ExchangeError> {
        let count_str = count.map(|c| c.to_string());
        let before_str = before.map(|b| b.to_string());
        let after_str = after.map(|a| a.to_string());
        let mut params = vec![];

        if let Some(product_code) = product_code {
            params.push(("product_code", product_code));
        }
        if let Some(ref count) = count_str {
            params.push(("count", count.as_str()));
        }
        if let Some(ref before) = before_str {
            params.push(("before", before.as_str()));
        }
        if let Some(ref after) = after_str {
            params.push(("after", after.as_str()));
        }
        if let Some(child_order_state) = child_order_state {
            params.push(("child_order_state", child_order_state));
        }

        self.client
            .get_json("/v1/me/getchildorders", &params, true)
            .await
    }

    /// Place a child order (requires authentication)
    pub async fn send_child_order(
        &self,
        request: &BitflyerSendChildOrderRequest,
    ) -> Result<BitflyerSendChildOrderResponse, ExchangeError> {
        let body = Self::to_body(request)?;
        self.client
            .post_json("/v1/me/sendchildorder", &body, true)
            .await
    }

    /// Cancel a child order (requires authentication)
    ///
    /// The exchange acknowledges with HTTP 200 and an empty body.
    pub async fn cancel_child_order(
        &self,
        request: &BitflyerCancelChildOrderRequest,
    ) -> Result<(), ExchangeError> {
        let body = Self::to_body(request)?;
        self.client
            .post_no_content("/v1/me/cancelchildorder", &body, true)
            .await
    }

    /// Cancel every open child order for a product (requires authentication)
    pub async fn cancel_all_child_orders(
        &self,
        request: &BitflyerCancelAllChildOrdersRequest,
    ) -> Result<(), ExchangeError> {
        let body = Self::to_body(request)?;
        self.client
            .post_no_content("/v1/me/cancelallchildorders", &body, true)
            .await
    }
}
