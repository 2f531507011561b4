//! Integration test: payment and disbursement requests across markets.

use std::sync::Arc;

use mpesa_client::{ClientError, GatewayClient, IPaymentGateway};
use mpesa_core::{Market, OperationKind, Platform, QueryTxParams, Request};
use mpesa_integration_tests::{client_config, gateway_key, RecordingHandler, SimulatedGateway};

fn client_for(market: Market, gateway: &Arc<SimulatedGateway>) -> GatewayClient {
    GatewayClient::new(
        client_config(market),
        gateway.clone(),
        Arc::new(RecordingHandler::new()),
    )
    .expect("valid config")
}

fn request(msisdn: &str) -> Request {
    Request {
        third_party_id: "tp-7".into(),
        reference: "inv-7".into(),
        amount: 99.5,
        msisdn: msisdn.into(),
        description: "Invoice 7".into(),
    }
}

#[test]
fn test_base_path_for_every_market_and_platform() {
    for market in Market::ALL {
        for platform in [Platform::Sandbox, Platform::OpenApi] {
            let mut config = client_config(market);
            config.platform = platform;
            let client = GatewayClient::new(
                config,
                Arc::new(SimulatedGateway::new()),
                Arc::new(RecordingHandler::new()),
            )
            .unwrap();
            assert_eq!(
                client.base_path(),
                format!(
                    "https://openapi.m-pesa.com/{}/ipg/v2/{}/",
                    platform.as_str(),
                    market.url_context_value()
                )
            );
        }
    }
}

#[tokio::test]
async fn test_push_payload_follows_market() {
    let gateway = Arc::new(SimulatedGateway::new());
    let client = client_for(Market::Ghana, &gateway);

    let res = client.push_async(&request("0244000111")).await.expect("push");
    assert_eq!(res.conversation_id, "conv-tp-7");
    assert_eq!(res.third_party_conversation_id, "tp-7");

    let push = gateway.calls().pop().expect("push call");
    assert!(push.url.ends_with("/vodafoneGHA/c2bPayment/singleStage/"));
    let body = push.body.expect("body");
    assert_eq!(body["input_Country"], "GHA");
    assert_eq!(body["input_Currency"], "GHS");
    assert_eq!(body["input_CustomerMSISDN"], "233244000111");
    assert_eq!(body["input_Amount"], "99.50");
    assert_eq!(body["input_TransactionReference"], "inv-7");
    assert_eq!(body["input_PurchasedItemsDesc"], "Invoice 7");
}

#[tokio::test]
async fn test_disburse_bearer_token_is_session_id() {
    let gateway = Arc::new(SimulatedGateway::new());
    let client = client_for(Market::Lesotho, &gateway);

    client.disburse(&request("+266 5800 0111")).await.expect("disburse");

    let calls = gateway.calls();
    let disburse = &calls[1];
    assert_eq!(disburse.operation, OperationKind::Disburse);
    assert!(disburse.url.ends_with("/vodacomLES/b2cPayment/"));

    let token = disburse.bearer_token().expect("bearer token");
    let session = mpesa_crypto::decrypt(token, gateway_key()).unwrap();
    assert_eq!(session.as_str(), "S1");

    let body = disburse.body.as_ref().expect("body");
    assert_eq!(body["input_CustomerMSISDN"], "26658000111");
    assert_eq!(body["input_PaymentItemsDesc"], "Invoice 7");
}

#[tokio::test]
async fn test_invalid_request_never_reaches_payment_endpoint() {
    let gateway = Arc::new(SimulatedGateway::new());
    let client = client_for(Market::Tanzania, &gateway);

    let mut bad = request("0754000111");
    bad.amount = -5.0;
    let err = client.push_async(&bad).await.unwrap_err();
    assert!(matches!(err, ClientError::Adapt(_)));
    assert_eq!(gateway.operations(), vec![OperationKind::SessionId]);
}

#[tokio::test]
async fn test_query_reports_not_implemented() {
    let gateway = Arc::new(SimulatedGateway::new());
    let client = client_for(Market::Tanzania, &gateway);

    let err = client
        .query_tx(&QueryTxParams {
            query_reference: "tx-1".into(),
            third_party_id: "tp-1".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::NotImplemented(OperationKind::Query)));
    assert!(gateway.calls().is_empty());
}
