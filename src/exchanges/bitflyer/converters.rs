use crate::core::types::{
    Balance, Collateral, Execution, Order, OrderBook, OrderBookEntry, OrderRequest, OrderSide,
    OrderState, OrderType, Price, ProductCode, Quantity, Ticker,
};
use crate::exchanges::bitflyer::types::{
    BitflyerBalance, BitflyerBoard, BitflyerBoardEntry, BitflyerChildOrder, BitflyerCollateral,
    BitflyerExecution, BitflyerSendChildOrderRequest, BitflyerTicker,
};

pub fn parse_side(side: &str) -> Result<OrderSide, String> {
    match side {
        "BUY" => Ok(OrderSide::Buy),
        "SELL" => Ok(OrderSide::Sell),
        other => Err(format!("Unknown order side: {}", other)),
    }
}

pub fn parse_order_type(order_type: &str) -> Result<OrderType, String> {
    match order_type {
        "LIMIT" => Ok(OrderType::Limit),
        "MARKET" => Ok(OrderType::Market),
        other => Err(format!("Unknown order type: {}", other)),
    }
}

pub fn parse_order_state(state: &str) -> Result<OrderState, String> {
    match state {
        "ACTIVE" => Ok(OrderState::Active),
        "COMPLETED" => Ok(OrderState::Completed),
        "CANCELED" => Ok(OrderState::Canceled),
        "EXPIRED" => Ok(OrderState::Expired),
        "REJECTED" => Ok(OrderState::Rejected),
        other => Err(format!("Unknown order state: {}", other)),
    }
}

fn convert_levels(levels: Vec<BitflyerBoardEntry>) -> Vec<OrderBookEntry> {
    levels
        .into_iter()
        .map(|level| OrderBookEntry {
            price: Price::new(level.price),
            size: Quantity::new(level.size),
        })
        .collect()
}

pub fn convert_order_book(board: BitflyerBoard) -> OrderBook {
    OrderBook {
        mid_price: Price::new(board.mid_price),
        bids: convert_levels(board.bids),
        asks: convert_levels(board.asks),
    }
}

pub fn convert_ticker(ticker: BitflyerTicker) -> Result<Ticker, String> {
    Ok(Ticker {
        product_code: ProductCode::new(ticker.product_code).map_err(|e| e.to_string())?,
        timestamp: ticker.timestamp,
        tick_id: ticker.tick_id,
        best_bid: Price::new(ticker.best_bid),
        best_ask: Price::new(ticker.best_ask),
        best_bid_size: Quantity::new(ticker.best_bid_size),
        best_ask_size: Quantity::new(ticker.best_ask_size),
        total_bid_depth: Quantity::new(ticker.total_bid_depth),
        total_ask_depth: Quantity::new(ticker.total_ask_depth),
        ltp: Price::new(ticker.ltp),
        volume: Quantity::new(ticker.volume),
        volume_by_product: Quantity::new(ticker.volume_by_product),
    })
}

pub fn convert_execution(execution: BitflyerExecution) -> Execution {
    Execution {
        id: execution.id,
        side: execution.side,
        price: Price::new(execution.price),
        size: Quantity::new(execution.size),
        exec_date: execution.exec_date,
        buy_child_order_acceptance_id: execution.buy_child_order_acceptance_id,
        sell_child_order_acceptance_id: execution.sell_child_order_acceptance_id,
    }
}

pub fn convert_balance(balance: BitflyerBalance) -> Balance {
    Balance {
        currency_code: balance.currency_code,
        amount: balance.amount,
        available: balance.available,
    }
}

pub fn convert_collateral(collateral: BitflyerCollateral) -> Collateral {
    Collateral {
        collateral: collateral.collateral,
        open_position_pnl: collateral.open_position_pnl,
        require_collateral: collateral.require_collateral,
        keep_rate: collateral.keep_rate,
    }
}

pub fn convert_child_order(order: BitflyerChildOrder) -> Result<Order, String> {
    Ok(Order {
        id: order.id,
        child_order_id: order.child_order_id,
        product_code: ProductCode::new(order.product_code).map_err(|e| e.to_string())?,
        side: parse_side(&order.side)?,
        child_order_type: parse_order_type(&order.child_order_type)?,
        price: Price::new(order.price),
        average_price: Price::new(order.average_price),
        size: Quantity::new(order.size),
        child_order_state: parse_order_state(&order.child_order_state)?,
        expire_date: order.expire_date,
        child_order_date: order.child_order_date,
        child_order_acceptance_id: order.child_order_acceptance_id,
        outstanding_size: Quantity::new(order.outstanding_size),
        cancel_size: Quantity::new(order.cancel_size),
        executed_size: Quantity::new(order.executed_size),
        total_commission: order.total_commission,
    })
}

/// Build the wire request for a new child order
///
/// MARKET orders never carry a price; LIMIT orders must. Absent optional
/// fields are left out so the exchange applies its own defaults.
pub fn build_send_child_order_request(
    order: &OrderRequest,
) -> Result<BitflyerSendChildOrderRequest, String> {
    let price = match order.order_type {
        OrderType::Market => None,
        OrderType::Limit => Some(
            order
                .price
                .ok_or_else(|| "LIMIT order requires a price".to_string())?
                .value(),
        ),
    };

    Ok(BitflyerSendChildOrderRequest {
        product_code: order.product_code.as_str().to_string(),
        child_order_type: order.order_type.as_str().to_string(),
        side: order.side.as_str().to_string(),
        price,
        size: order.size.value(),
        minute_to_expire: order.minute_to_expire,
        time_in_force: order.time_in_force.map(|tif| tif.as_str().to_string()),
    })
}
