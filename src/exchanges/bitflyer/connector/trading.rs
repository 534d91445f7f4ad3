use crate::core::{
    errors::ExchangeError,
    kernel::RestClient,
    traits::OrderPlacer,
    types::{Order, OrderRequest, OrderResponse, OrderState, ProductCode},
};
use crate::exchanges::bitflyer::converters;
use crate::exchanges::bitflyer::rest::BitflyerRestClient;
use crate::exchanges::bitflyer::types::{
    BitflyerCancelAllChildOrdersRequest, BitflyerCancelChildOrderRequest,
};
use async_trait::async_trait;
use tracing::instrument;

/// Trading implementation for bitFlyer
pub struct Trading<R: RestClient> {
    rest: BitflyerRestClient<R>,
    can_authenticate: bool,
}

impl<R: RestClient> Trading<R> {
    /// Create a new trading engine
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
                "API credentials required for trading operations".to_string(),
            ))
        }
    }
}

#[async_trait]
impl<R: RestClient> OrderPlacer for Trading<R> {
    #[instrument(skip(self, order), fields(exchange = "bitflyer", product = %order.product_code, side = %order.side))]
    async fn place_order(&self, order: OrderRequest) -> Result<OrderResponse, ExchangeError> {
        self.ensure_authenticated()?;
        let request =
            converters::build_send_child_order_request(&order).map_err(ExchangeError::Other)?;
        let response = self.rest.send_child_order(&request).await?;
        Ok(OrderResponse {
            child_order_acceptance_id: response.child_order_acceptance_id,
        })
    }

    #[instrument(skip(self), fields(exchange = "bitflyer"))]
    async fn get_orders(
        &self,
        product_code: Option<&ProductCode>,
        count: Option<u32>,
        before: Option<i64>,
        after: Option<i64>,
        state: Option<OrderState>,
    ) -> Result<Vec<Order>, ExchangeError> {
        self.ensure_authenticated()?;
        let orders = self
            .rest
            .get_child_orders(
                product_code.map(ProductCode::as_str),
                count,
                before,
                after,
                state.map(OrderState::as_str),
            )
            .await?;
        orders
            .into_iter()
            .map(|order| converters::convert_child_order(order).map_err(ExchangeError::Other))
            .collect()
    }

    #[instrument(skip(self), fields(exchange = "bitflyer", product = %product_code, order_id = %child_order_id))]
    async fn cancel_order(
        &self,
        product_code: &ProductCode,
        child_order_id: &str,
    ) -> Result<(), ExchangeError> {
        self.ensure_authenticated()?;
        let request = BitflyerCancelChildOrderRequest {
            product_code: product_code.as_str().to_string(),
            child_order_id: child_order_id.to_string(),
        };
        self.rest.cancel_child_order(&request).await
    }

    #[instrument(skip(self), fields(exchange = "bitflyer", product = %product_code))]
    async fn cancel_all_orders(&self, product_code: &ProductCode) -> Result<(), ExchangeError> {
        self.ensure_authenticated()?;
        let request = BitflyerCancelAllChildOrdersRequest {
            product_code: product_code.as_str().to_string(),
        };
        self.rest.cancel_all_child_orders(&request).await
    }
}
