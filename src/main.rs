use anyhow::Result;
use bitflyer_connector::core::config::ExchangeConfig;
use bitflyer_connector::core::traits::MarketDataSource;
use bitflyer_connector::core::types::ProductCode;
use bitflyer_connector::exchanges::bitflyer::build_connector;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Public endpoints work without credentials; set BITFLYER_API_KEY and
    // BITFLYER_SECRET_KEY to enable the private ones.
    let config =
        ExchangeConfig::from_env("BITFLYER").unwrap_or_else(|_| ExchangeConfig::read_only());
    let connector = build_connector(config)?;

    let product = ProductCode::btc_jpy();

    println!("Fetching order book...");
    match connector.get_order_book(Some(&product)).await {
        Ok(board) => {
            println!(
                "Mid price: {} ({} bids, {} asks)",
                board.mid_price,
                board.bids.len(),
                board.asks.len()
            );
        }
        Err(e) => {
            println!("Error fetching order book: {}", e);
        }
    }

    println!("Fetching ticker...");
    match connector.get_ticker(Some(&product)).await {
        Ok(ticker) => {
            println!(
                "{}: ltp={} best_bid={} best_ask={}",
                ticker.product_code, ticker.ltp, ticker.best_bid, ticker.best_ask
            );
        }
        Err(e) => {
            println!("Error fetching ticker: {}", e);
        }
    }

    // Example order (commented out for safety)
    /*
    use bitflyer_connector::core::traits::OrderPlacer;
    use bitflyer_connector::core::types::{
        OrderRequest, OrderSide, OrderType, Price, Quantity, TimeInForce,
    };
    use rust_decimal::Decimal;

    let order = OrderRequest {
        product_code: ProductCode::btc_jpy(),
        order_type: OrderType::Limit,
        side: OrderSide::Buy,
        price: Some(Price::from_str("3000000")?),
        size: Quantity::from_str("0.001")?,
        minute_to_expire: Some(60),
        time_in_force: Some(TimeInForce::GTC),
    };

    match connector.place_order(order).await {
        Ok(response) => {
            println!("Order accepted: {}", response.child_order_acceptance_id);
        }
        Err(e) => {
            println!("Error placing order: {}", e);
        }
    }
    */

    Ok(())
}
