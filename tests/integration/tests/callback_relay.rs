//! Integration test: inbound result callbacks through the client's router.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use mpesa_client::{GatewayClient, IPaymentGateway};
use mpesa_core::{Market, PushCallbackResponse};
use mpesa_integration_tests::{client_config, RecordingHandler, SimulatedGateway};
use tower::ServiceExt;

const PATH: &str = "/hooks/mpesa";

fn setup() -> (GatewayClient, Arc<RecordingHandler>) {
    let handler = Arc::new(RecordingHandler::new());
    let client = GatewayClient::new(
        client_config(Market::Tanzania),
        Arc::new(SimulatedGateway::new()),
        handler.clone(),
    )
    .expect("valid config");
    (client, handler)
}

fn callback_body(result_code: &str) -> String {
    serde_json::json!({
        "input_OriginalConversationID": "conv-9",
        "input_TransactionID": "tx-9",
        "input_ResultCode": result_code,
        "input_ResultDesc": "Request processed successfully",
        "input_ThirdPartyConversationID": "tp-9",
    })
    .to_string()
}

fn post(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(PATH)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

#[tokio::test]
async fn test_undecodable_callback_yields_500_without_handler() {
    let (client, handler) = setup();
    let app = client.callback_router(PATH);

    let resp = app.oneshot(post("{not json")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(handler.received().is_empty());
}

#[tokio::test]
async fn test_decoded_callback_yields_handler_result() {
    let (client, handler) = setup();
    let app = client.callback_router(PATH);

    let resp = app.oneshot(post(callback_body("INS-0"))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let ack: PushCallbackResponse = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(ack.response_code, "0");
    assert_eq!(ack.response_desc, "Successfully Accepted Result");
    assert_eq!(ack.third_party_conversation_id, "tp-9");

    let received = handler.received();
    assert_eq!(received.len(), 1);
    assert!(received[0].is_success());
    assert_eq!(received[0].transaction_id, "tx-9");
}

#[tokio::test]
async fn test_failed_payment_callback_still_relayed() {
    let (client, handler) = setup();

    let resp = client.callback_serve(callback_body("INS-2006").as_bytes()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(!handler.received()[0].is_success());
}

#[tokio::test]
async fn test_callback_route_only_accepts_post() {
    let (client, _handler) = setup();
    let app = client.callback_router(PATH);

    let resp = app
        .oneshot(Request::builder().uri(PATH).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}
