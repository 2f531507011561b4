//! Fixtures for the cross-crate scenarios: an in-process gateway simulator
//! that checks bearer tokens the way the real gateway does, and a callback
//! handler that records what it was given.

use async_trait::async_trait;
use mpesa_client::{
    CallbackError, CallbackHandler, GatewayReply, GatewayRequest, HttpExecutor, TransportError,
};
use mpesa_core::{ClientConfig, Market, OperationKind, Platform, PushCallbackRequest, PushCallbackResponse};
use mpesa_crypto::GatewayPrivateKey;
use serde_json::json;
use std::collections::HashSet;
use std::sync::{Mutex, OnceLock};

pub const API_KEY: &str = "integration-api-key";

/// Gateway key pair, generated once per test binary.
pub fn gateway_key() -> &'static GatewayPrivateKey {
    static KEY: OnceLock<GatewayPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| GatewayPrivateKey::generate(1024).expect("generate gateway key"))
}

/// Client configuration pointing at the simulator's key.
pub fn client_config(market: Market) -> ClientConfig {
    let public_key = gateway_key()
        .public_key()
        .to_base64()
        .expect("encode public key");
    let mut config = ClientConfig::new(market, Platform::Sandbox, API_KEY, public_key, "000000");
    config.session_lifetime_minutes = 5;
    config.request_timeout_secs = 2;
    config
}

#[derive(Default)]
struct GatewayState {
    issued: HashSet<String>,
    next_session: u32,
    session_error: Option<String>,
    calls: Vec<GatewayRequest>,
}

/// Simulated M-Pesa gateway.
///
/// Session requests must carry the API key encrypted under the gateway key;
/// payment requests must carry a session id this gateway issued. Sessions
/// are numbered `S1`, `S2`, ...
#[derive(Default)]
pub struct SimulatedGateway {
    state: Mutex<GatewayState>,
}

impl SimulatedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer the next session requests with this `output_error`.
    pub fn fail_sessions(&self, message: &str) {
        self.state.lock().unwrap().session_error = Some(message.to_string());
    }

    pub fn calls(&self) -> Vec<GatewayRequest> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn operations(&self) -> Vec<OperationKind> {
        self.calls().iter().map(|c| c.operation).collect()
    }

    fn decrypt_bearer(request: &GatewayRequest) -> Option<String> {
        let token = request.bearer_token()?;
        mpesa_crypto::decrypt(token, gateway_key())
            .ok()
            .map(|plain| plain.to_string())
    }

    fn open_session(&self, request: &GatewayRequest) -> GatewayReply {
        let mut state = self.state.lock().unwrap();
        if let Some(message) = state.session_error.clone() {
            return GatewayReply::new(200, json!({ "output_error": message }).to_string());
        }
        if Self::decrypt_bearer(request).as_deref() != Some(API_KEY) {
            return GatewayReply::new(
                401,
                json!({ "output_ResponseCode": "INS-989", "output_ResponseDesc": "Invalid API key" })
                    .to_string(),
            );
        }
        state.next_session += 1;
        let id = format!("S{}", state.next_session);
        state.issued.insert(id.clone());
        GatewayReply::new(
            200,
            json!({
                "output_ResponseCode": "INS-0",
                "output_ResponseDesc": "Request processed successfully",
                "output_SessionID": id,
            })
            .to_string(),
        )
    }

    fn payment(&self, request: &GatewayRequest) -> GatewayReply {
        let session = Self::decrypt_bearer(request);
        let authorized = session
            .map(|id| self.state.lock().unwrap().issued.contains(&id))
            .unwrap_or(false);
        if !authorized {
            return GatewayReply::new(
                401,
                json!({ "output_ResponseCode": "INS-995", "output_ResponseDesc": "Invalid session" })
                    .to_string(),
            );
        }

        let body = request.body.clone().unwrap_or_default();
        let third_party = body["input_ThirdPartyConversationID"].as_str().unwrap_or_default();
        GatewayReply::new(
            201,
            json!({
                "output_ConversationID": format!("conv-{}", third_party),
                "output_ResponseCode": "INS-0",
                "output_ResponseDesc": "Request processed successfully",
                "output_ThirdPartyConversationID": third_party,
                "output_TransactionID": format!("tx-{}", third_party),
            })
            .to_string(),
        )
    }
}

#[async_trait]
impl HttpExecutor for SimulatedGateway {
    async fn execute(&self, request: GatewayRequest) -> Result<GatewayReply, TransportError> {
        self.state.lock().unwrap().calls.push(request.clone());
        let reply = match request.operation {
            OperationKind::SessionId => self.open_session(&request),
            OperationKind::PushPay | OperationKind::Disburse => self.payment(&request),
            OperationKind::Query => GatewayReply::new(404, ""),
        };
        Ok(reply)
    }
}

/// Callback handler that records every request and acknowledges it.
#[derive(Default)]
pub struct RecordingHandler {
    received: Mutex<Vec<PushCallbackRequest>>,
}

impl RecordingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn received(&self) -> Vec<PushCallbackRequest> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl CallbackHandler for RecordingHandler {
    async fn handle_callback(
        &self,
        request: PushCallbackRequest,
    ) -> Result<PushCallbackResponse, CallbackError> {
        self.received.lock().unwrap().push(request.clone());
        Ok(request.accept())
    }
}
