use async_trait::async_trait;
use mpesa_client::{CallbackError, CallbackHandler};
use mpesa_core::{PushCallbackRequest, PushCallbackResponse};

/// Logs every payment result and acknowledges it.
pub struct LoggingHandler;

#[async_trait]
impl CallbackHandler for LoggingHandler {
    async fn handle_callback(
        &self,
        request: PushCallbackRequest,
    ) -> Result<PushCallbackResponse, CallbackError> {
        if request.is_success() {
            tracing::info!(
                transaction_id = %request.transaction_id,
                conversation_id = %request.original_conversation_id,
                third_party_id = %request.third_party_conversation_id,
                "payment completed"
            );
        } else {
            tracing::warn!(
                transaction_id = %request.transaction_id,
                third_party_id = %request.third_party_conversation_id,
                result_code = %request.result_code,
                result_desc = %request.result_desc,
                "payment failed"
            );
        }
        Ok(request.accept())
    }
}
