use serde::{Deserialize, Serialize};

/// Result notification the gateway posts after an asynchronous push payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushCallbackRequest {
    #[serde(rename = "input_OriginalConversationID")]
    pub original_conversation_id: String,
    #[serde(rename = "input_TransactionID")]
    pub transaction_id: String,
    #[serde(rename = "input_ResultCode")]
    pub result_code: String,
    #[serde(rename = "input_ResultDesc")]
    pub result_desc: String,
    #[serde(rename = "input_ThirdPartyConversationID")]
    pub third_party_conversation_id: String,
}

/// Acknowledgement returned to the gateway for a callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushCallbackResponse {
    #[serde(rename = "output_OriginalConversationID")]
    pub original_conversation_id: String,
    #[serde(rename = "output_ResponseCode")]
    pub response_code: String,
    #[serde(rename = "output_ResponseDesc")]
    pub response_desc: String,
    #[serde(rename = "output_ThirdPartyConversationID")]
    pub third_party_conversation_id: String,
}

impl PushCallbackRequest {
    /// Whether the gateway reported the transaction as completed.
    pub fn is_success(&self) -> bool {
        self.result_code == "INS-0"
    }

    /// Build the standard "accepted" acknowledgement for this notification.
    pub fn accept(&self) -> PushCallbackResponse {
        PushCallbackResponse {
            original_conversation_id: self.original_conversation_id.clone(),
            response_code: "0".into(),
            response_desc: "Successfully Accepted Result".into(),
            third_party_conversation_id: self.third_party_conversation_id.clone(),
        }
    }
}
