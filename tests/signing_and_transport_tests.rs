use bitflyer_connector::core::config::ExchangeConfig;
use bitflyer_connector::core::errors::ExchangeError;
use bitflyer_connector::core::kernel::{RestClientBuilder, RestClientConfig};
use bitflyer_connector::core::traits::{AccountInfo, MarketDataSource, OrderPlacer};
use bitflyer_connector::core::types::{
    OrderRequest, OrderSide, OrderType, Price, ProductCode, Quantity,
};
use bitflyer_connector::exchanges::bitflyer::{build_connector, BitflyerRestClient};
use hmac::{Hmac, Mac};
use rust_decimal_macros::dec;
use sha2::Sha256;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

fn http_response(status_line: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_line,
        body.len(),
        body
    )
}

async fn read_request(stream: &mut TcpStream) -> String {
    let mut data = Vec::new();
    let mut buf = [0u8; 1024];
    loop {
        let n = stream.read(&mut buf).await.unwrap();
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buf[..n]);
        if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&data[..pos]);
            let content_length = headers
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    if name.eq_ignore_ascii_case("content-length") {
                        value.trim().parse::<usize>().ok()
                    } else {
                        None
                    }
                })
                .unwrap_or(0);
            if data.len() >= pos + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&data).to_string()
}

/// Serve exactly one request and hand back what the client sent
async fn serve_once(response: String) -> (SocketAddr, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let request = read_request(&mut stream).await;
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.ok();
        request
    });
    (addr, handle)
}

fn header_value(request: &str, name: &str) -> Option<String> {
    request.lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        if key.eq_ignore_ascii_case(name) {
            Some(value.trim().to_string())
        } else {
            None
        }
    })
}

fn public_config(addr: SocketAddr) -> ExchangeConfig {
    ExchangeConfig::read_only().base_url(format!("http://{}", addr))
}

fn private_config(addr: SocketAddr) -> ExchangeConfig {
    ExchangeConfig::new("test_key".to_string(), "test_secret".to_string())
        .base_url(format!("http://{}", addr))
}

#[tokio::test]
async fn board_request_decodes_and_sends_expected_query() {
    let body = r#"{"mid_price":100.5,"bids":[{"price":100,"size":1}],"asks":[{"price":101,"size":2}]}"#;
    let (addr, handle) = serve_once(http_response("200 OK", body)).await;

    let connector = build_connector(public_config(addr)).unwrap();
    let board = connector
        .get_order_book(Some(&ProductCode::btc_jpy()))
        .await
        .unwrap();

    assert_eq!(board.mid_price.value(), dec!(100.5));
    assert_eq!(board.bids.len(), 1);
    assert_eq!(board.bids[0].price.value(), dec!(100));
    assert_eq!(board.bids[0].size.value(), dec!(1));
    assert_eq!(board.asks[0].price.value(), dec!(101));
    assert_eq!(board.asks[0].size.value(), dec!(2));

    let request = handle.await.unwrap();
    assert!(request.starts_with("GET /v1/getboard?product_code=BTC_JPY HTTP/1.1"));
}

#[tokio::test]
async fn omitted_filters_never_reach_the_query_string() {
    let body = r#"{"mid_price":1,"bids":[],"asks":[]}"#;
    let (addr, handle) = serve_once(http_response("200 OK", body)).await;

    let connector = build_connector(public_config(addr)).unwrap();
    connector.get_order_book(None).await.unwrap();

    let request = handle.await.unwrap();
    assert!(request.starts_with("GET /v1/getboard HTTP/1.1"));
}

#[tokio::test]
async fn signed_request_carries_valid_auth_headers() {
    let (addr, handle) = serve_once(http_response("200 OK", "[]")).await;

    let connector = build_connector(private_config(addr)).unwrap();
    let balances = connector.get_balances().await.unwrap();
    assert!(balances.is_empty());

    let request = handle.await.unwrap();
    assert!(request.starts_with("GET /v1/me/getbalance HTTP/1.1"));

    let api_key = header_value(&request, "ACCESS-KEY").unwrap();
    let timestamp = header_value(&request, "ACCESS-TIMESTAMP").unwrap();
    let signature = header_value(&request, "ACCESS-SIGN").unwrap();
    assert_eq!(api_key, "test_key");

    // Recompute the MAC over the captured timestamp to verify the material
    let mut mac = Hmac::<Sha256>::new_from_slice(b"test_secret").unwrap();
    mac.update(format!("{}GET/v1/me/getbalance", timestamp).as_bytes());
    assert_eq!(signature, hex::encode(mac.finalize().into_bytes()));
}

#[tokio::test]
async fn signed_post_covers_the_body() {
    let body = r#"{"child_order_acceptance_id":"JRF20240115-000000-000001"}"#;
    let (addr, handle) = serve_once(http_response("200 OK", body)).await;

    let connector = build_connector(private_config(addr)).unwrap();
    let response = connector
        .place_order(OrderRequest {
            product_code: ProductCode::btc_jpy(),
            order_type: OrderType::Limit,
            side: OrderSide::Buy,
            price: Some(Price::new(dec!(5000000))),
            size: Quantity::new(dec!(0.01)),
            minute_to_expire: None,
            time_in_force: None,
        })
        .await
        .unwrap();
    assert_eq!(
        response.child_order_acceptance_id,
        "JRF20240115-000000-000001"
    );

    let request = handle.await.unwrap();
    assert!(request.starts_with("POST /v1/me/sendchildorder HTTP/1.1"));
    assert_eq!(
        header_value(&request, "Content-Type").as_deref(),
        Some("application/json")
    );

    let timestamp = header_value(&request, "ACCESS-TIMESTAMP").unwrap();
    let signature = header_value(&request, "ACCESS-SIGN").unwrap();
    let sent_body = request.split("\r\n\r\n").nth(1).unwrap();

    let mut mac = Hmac::<Sha256>::new_from_slice(b"test_secret").unwrap();
    mac.update(format!("{}POST/v1/me/sendchildorder{}", timestamp, sent_body).as_bytes());
    assert_eq!(signature, hex::encode(mac.finalize().into_bytes()));
}

#[tokio::test]
async fn rejected_write_maps_to_api_error_with_body_text() {
    let body = r#"{"status":-156,"error_message":"Invalid product_code"}"#;
    let (addr, _handle) = serve_once(http_response("400 Bad Request", body)).await;

    let connector = build_connector(private_config(addr)).unwrap();
    let result = connector
        .place_order(OrderRequest {
            product_code: ProductCode::btc_jpy(),
            order_type: OrderType::Market,
            side: OrderSide::Sell,
            price: None,
            size: Quantity::new(dec!(0.01)),
            minute_to_expire: None,
            time_in_force: None,
        })
        .await;

    match result {
        Err(ExchangeError::ApiError { status, message }) => {
            assert_eq!(status, 400);
            assert!(message.contains("Invalid product_code"));
        }
        other => panic!("expected ApiError, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn empty_error_body_falls_back_to_status_reason() {
    let (addr, _handle) = serve_once(http_response("500 Internal Server Error", "")).await;

    let connector = build_connector(public_config(addr)).unwrap();
    let result = connector.get_ticker(None).await;

    match result {
        Err(ExchangeError::ApiError { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "Internal Server Error");
        }
        other => panic!("expected ApiError, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn cancel_accepts_an_empty_success_body() {
    let (addr, handle) = serve_once(http_response("200 OK", "")).await;

    let connector = build_connector(private_config(addr)).unwrap();
    connector
        .cancel_order(&ProductCode::btc_jpy(), "JOR20240115-000000-000001")
        .await
        .unwrap();

    let request = handle.await.unwrap();
    assert!(request.starts_with("POST /v1/me/cancelchildorder HTTP/1.1"));
    assert!(request.contains("JOR20240115-000000-000001"));
}

#[tokio::test]
async fn slow_response_surfaces_a_timeout() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let _request = read_request(&mut stream).await;
        tokio::time::sleep(Duration::from_secs(5)).await;
        let _ = stream
            .write_all(http_response("200 OK", "{}").as_bytes())
            .await;
    });

    let rest = RestClientBuilder::new(
        RestClientConfig::new(format!("http://{}", addr), "bitflyer".to_string()).with_timeout(1),
    )
    .build()
    .unwrap();
    let client = BitflyerRestClient::new(rest);

    let result = client.get_board(None).await;
    assert!(matches!(result, Err(ExchangeError::TimeoutError(_))));
    server.abort();
}

#[tokio::test]
async fn private_call_without_credentials_fails_before_io() {
    // Discard-protocol port; a connection attempt would hang or be refused,
    // so a fast ConfigurationError proves nothing touched the network.
    let config = ExchangeConfig::read_only().base_url("http://127.0.0.1:9".to_string());
    let connector = build_connector(config).unwrap();

    let result = connector.get_balances().await;
    assert!(matches!(
        result,
        Err(ExchangeError::ConfigurationError(_))
    ));
}
