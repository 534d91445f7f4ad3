use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One price level in a board response
#[derive(Debug, Clone, Deserialize)]
pub struct BitflyerBoardEntry {
    pub price: Decimal,
    pub size: Decimal,
}

/// Response from `/v1/getboard`
#[derive(Debug, Clone, Deserialize)]
pub struct BitflyerBoard {
    pub mid_price: Decimal,
    pub bids: Vec<BitflyerBoardEntry>,
    pub asks: Vec<BitflyerBoardEntry>,
}

/// Response from `/v1/getticker`
#[derive(Debug, Clone, Deserialize)]
pub struct BitflyerTicker {
    pub product_code: String,
    pub timestamp: String,
    pub tick_id: i64,
    pub best_bid: Decimal,
    pub best_ask: Decimal,
    pub best_bid_size: Decimal,
    pub best_ask_size: Decimal,
    pub total_bid_depth: Decimal,
    pub total_ask_depth: Decimal,
    pub ltp: Decimal,
    pub volume: Decimal,
    pub volume_by_product: Decimal,
}

/// One record from `/v1/getexecutions`
#[derive(Debug, Clone, Deserialize)]
pub struct BitflyerExecution {
    pub id: i64,
    pub side: String,
    pub price: Decimal,
    pub size: Decimal,
    pub exec_date: String,
    pub buy_child_order_acceptance_id: String,
    pub sell_child_order_acceptance_id: String,
}

/// One record from `/v1/me/getbalance`
#[derive(Debug, Clone, Deserialize)]
pub struct BitflyerBalance {
    pub currency_code: String,
    pub amount: Decimal,
    pub available: Decimal,
}

/// Response from `/v1/me/getcollateral`
#[derive(Debug, Clone, Deserialize)]
pub struct BitflyerCollateral {
    pub collateral: Decimal,
    pub open_position_pnl: Decimal,
    pub require_collateral: Decimal,
    pub keep_rate: Decimal,
}

/// Request body for `/v1/me/sendchildorder`
///
/// Optional fields are omitted from the JSON entirely so the exchange
/// applies its own defaults. Decimal fields serialize as JSON numbers.
#[derive(Debug, Clone, Serialize)]
pub struct BitflyerSendChildOrderRequest {
    pub product_code: String,
    pub child_order_type: String,
    pub side: String,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub price: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float")]
    pub size: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minute_to_expire: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<String>,
}

/// Response from `/v1/me/sendchildorder`
#[derive(Debug, Clone, Deserialize)]
pub struct BitflyerSendChildOrderResponse {
    pub child_order_acceptance_id: String,
}

/// Request body for `/v1/me/cancelchildorder`
#[derive(Debug, Clone, Serialize)]
pub struct BitflyerCancelChildOrderRequest {
    pub product_code: String,
    pub child_order_id: String,
}

/// Request body for `/v1/me/cancelallchildorders`
#[derive(Debug, Clone, Serialize)]
pub struct BitflyerCancelAllChildOrdersRequest {
    pub product_code: String,
}

/// One record from `/v1/me/getchildorders`
#[derive(Debug, Clone, Deserialize)]
pub struct BitflyerChildOrder {
    pub id: i64,
    pub child_order_id: String,
    pub product_code: String,
    pub side: String,
    pub child_order_type: String,
    pub price: Decimal,
    pub average_price: Decimal,
    pub size: Decimal,
    pub child_order_state: String,
    pub expire_date: String,
    pub child_order_date: String,
    pub child_order_acceptance_id: String,
    pub outstanding_size: Decimal,
    pub cancel_size: Decimal,
    pub executed_size: Decimal,
    pub total_commission: Decimal,
}
