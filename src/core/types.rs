use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Exchange timestamp layout, e.g. `2024-01-15T10:30:00`
pub const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Typed errors for the types subsystem
#[derive(Error, Debug)]
pub enum TypesError {
    #[error("Invalid product code: {0}")]
    InvalidProductCode(String),
    #[error("Invalid price: {0}")]
    InvalidPrice(#[from] rust_decimal::Error),
    #[error("Parsing error: {0}")]
    ParseError(String),
}

/// Type-safe product code representation, e.g. `BTC_JPY` or `FX_BTC_JPY`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductCode(String);

impl ProductCode {
    /// Create a new product code with validation
    pub fn new(code: impl Into<String>) -> Result<Self, TypesError> {
        let code = code.into();
        if code.is_empty() {
            return Err(TypesError::InvalidProductCode(
                "Product code cannot be empty".to_string(),
            ));
        }
        Ok(Self(code))
    }

    /// Default spot pair on the exchange
    #[must_use]
    pub fn btc_jpy() -> Self {
        Self("BTC_JPY".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Type-safe price representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(pub Decimal);

impl Price {
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn from_str(s: &str) -> Result<Self, TypesError> {
        Ok(Self(s.parse()?))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Type-safe quantity representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(pub Decimal);

impl Quantity {
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn from_str(s: &str) -> Result<Self, TypesError> {
        Ok(Self(s.parse()?))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Order type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    Limit,
    Market,
}

impl OrderType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Limit => "LIMIT",
            Self::Market => "MARKET",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Time in force policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeInForce {
    GTC,
    IOC,
    FOK,
}

impl TimeInForce {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GTC => "GTC",
            Self::IOC => "IOC",
            Self::FOK => "FOK",
        }
    }
}

impl fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle state of a child order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderState {
    Active,
    Completed,
    Canceled,
    Expired,
    Rejected,
}

impl OrderState {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Completed => "COMPLETED",
            Self::Canceled => "CANCELED",
            Self::Expired => "EXPIRED",
            Self::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for OrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One price level of the order book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBookEntry {
    pub price: Price,
    pub size: Quantity,
}

/// Order book snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderBook {
    pub mid_price: Price,
    pub bids: Vec<OrderBookEntry>,
    pub asks: Vec<OrderBookEntry>,
}

/// Ticker snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticker {
    pub product_code: ProductCode,
    pub timestamp: String,
    pub tick_id: i64,
    pub best_bid: Price,
    pub best_ask: Price,
    pub best_bid_size: Quantity,
    pub best_ask_size: Quantity,
    pub total_bid_depth: Quantity,
    pub total_ask_depth: Quantity,
    pub ltp: Price,
    pub volume: Quantity,
    pub volume_by_product: Quantity,
}

/// A single public execution (trade)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Execution {
    pub id: i64,
    pub side: String,
    pub price: Price,
    pub size: Quantity,
    pub exec_date: String,
    pub buy_child_order_acceptance_id: String,
    pub sell_child_order_acceptance_id: String,
}

/// Asset balance for one currency
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Balance {
    pub currency_code: String,
    pub amount: Decimal,
    pub available: Decimal,
}

/// Margin collateral snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collateral {
    pub collateral: Decimal,
    pub open_position_pnl: Decimal,
    pub require_collateral: Decimal,
    pub keep_rate: Decimal,
}

/// New order parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    pub product_code: ProductCode,
    pub order_type: OrderType,
    pub side: OrderSide,
    /// Required for LIMIT orders, absent for MARKET orders
    pub price: Option<Price>,
    pub size: Quantity,
    /// Minutes until expiry; the exchange defaults to 43200 (30 days)
    pub minute_to_expire: Option<i64>,
    /// Execution policy; the exchange defaults to GTC
    pub time_in_force: Option<TimeInForce>,
}

/// Acknowledgement of an accepted order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    pub child_order_acceptance_id: String,
}

/// A child order record as reported by the exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub child_order_id: String,
    pub product_code: ProductCode,
    pub side: OrderSide,
    pub child_order_type: OrderType,
    pub price: Price,
    pub average_price: Price,
    pub size: Quantity,
    pub child_order_state: OrderState,
    pub expire_date: String,
    pub child_order_date: String,
    pub child_order_acceptance_id: String,
    pub outstanding_size: Quantity,
    pub cancel_size: Quantity,
    pub executed_size: Quantity,
    pub total_commission: Decimal,
}

/// Parse an exchange timestamp (`%Y-%m-%dT%H:%M:%S`, fractional seconds
/// tolerated) into a [`NaiveDateTime`]
pub fn parse_exchange_time(value: &str) -> Result<NaiveDateTime, TypesError> {
    let trimmed = value.split('.').next().unwrap_or(value);
    NaiveDateTime::parse_from_str(trimmed, TIME_FORMAT)
        .map_err(|e| TypesError::ParseError(format!("Invalid exchange timestamp '{}': {}", value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use rust_decimal_macros::dec;

    #[test]
    fn product_code_rejects_empty() {
        assert!(ProductCode::new("").is_err());
        assert_eq!(ProductCode::new("FX_BTC_JPY").unwrap().as_str(), "FX_BTC_JPY");
    }

    #[test]
    fn parse_exchange_time_handles_plain_and_fractional() {
        let t = parse_exchange_time("2024-01-15T10:30:00").unwrap();
        assert_eq!(t.year(), 2024);
        assert_eq!(t.hour(), 10);

        let t = parse_exchange_time("2024-01-15T10:30:00.123456").unwrap();
        assert_eq!(t.minute(), 30);

        assert!(parse_exchange_time("not a time").is_err());
    }

    #[test]
    fn order_side_round_trips_through_serde() {
        let json = serde_json::to_string(&OrderSide::Buy).unwrap();
        assert_eq!(json, "\"BUY\"");
        let side: OrderSide = serde_json::from_str("\"SELL\"").unwrap();
        assert_eq!(side, OrderSide::Sell);
    }

    #[test]
    fn price_preserves_decimal_exactness() {
        let price = Price::from_str("31415.926").unwrap();
        assert_eq!(price.value(), dec!(31415.926));
        assert_eq!(price.to_string(), "31415.926");
    }

    #[test]
    fn order_state_serde_matches_wire_casing() {
        let state: OrderState = serde_json::from_str("\"ACTIVE\"").unwrap();
        assert_eq!(state, OrderState::Active);
        assert_eq!(state.as_str(), "ACTIVE");
    }
}
