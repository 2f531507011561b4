use serde::{Deserialize, Serialize};

/// Caller-facing payment intent, shared by push payments and disbursements.
///
/// Carries no market or platform information; the request adapter injects
/// those when building the wire payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Caller-generated id, echoed back by the gateway and in callbacks.
    pub third_party_id: String,
    /// Transaction reference shown to the customer.
    pub reference: String,
    /// Amount in major currency units.
    pub amount: f64,
    /// Customer phone number, local or international form.
    pub msisdn: String,
    /// Purchased / paid items description.
    pub description: String,
}

/// Response of the generate-session call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResponse {
    #[serde(rename = "output_ResponseCode", default)]
    pub code: String,
    #[serde(rename = "output_ResponseDesc", default)]
    pub desc: String,
    #[serde(rename = "output_SessionID", default)]
    pub id: String,
    #[serde(rename = "output_error", default, skip_serializing_if = "String::is_empty")]
    pub output_err: String,
}

/// Response of the C2B single stage call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushAsyncResponse {
    #[serde(rename = "output_ConversationID", default)]
    pub conversation_id: String,
    #[serde(rename = "output_ResponseCode", default)]
    pub code: String,
    #[serde(rename = "output_ResponseDesc", default)]
    pub desc: String,
    #[serde(rename = "output_ThirdPartyConversationID", default)]
    pub third_party_conversation_id: String,
    #[serde(rename = "output_TransactionID", default)]
    pub transaction_id: String,
    #[serde(rename = "output_error", default, skip_serializing_if = "String::is_empty")]
    pub output_err: String,
}

/// Response of the B2C call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisburseResponse {
    #[serde(rename = "output_ConversationID", default)]
    pub conversation_id: String,
    #[serde(rename = "output_ResponseCode", default)]
    pub code: String,
    #[serde(rename = "output_ResponseDesc", default)]
    pub desc: String,
    #[serde(rename = "output_ThirdPartyConversationID", default)]
    pub third_party_conversation_id: String,
    #[serde(rename = "output_TransactionID", default)]
    pub transaction_id: String,
    #[serde(rename = "output_error", default, skip_serializing_if = "String::is_empty")]
    pub output_err: String,
}

/// Parameters of a transaction status query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryTxParams {
    /// Transaction id, conversation id or third party conversation id to look up.
    pub query_reference: String,
    pub third_party_id: String,
}

/// Response of a transaction status query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryTxResponse {
    #[serde(rename = "output_ConversationID", default)]
    pub conversation_id: String,
    #[serde(rename = "output_ResponseCode", default)]
    pub code: String,
    #[serde(rename = "output_ResponseDesc", default)]
    pub desc: String,
    #[serde(rename = "output_ResponseTransactionStatus", default)]
    pub transaction_status: String,
    #[serde(rename = "output_ThirdPartyConversationID", default)]
    pub third_party_conversation_id: String,
    #[serde(rename = "output_error", default, skip_serializing_if = "String::is_empty")]
    pub output_err: String,
}
