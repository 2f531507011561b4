//! Maps caller requests onto the gateway's wire payloads.

use mpesa_core::{ClientConfig, Market, OperationKind, Request};
use serde_json::{Map, Value};

use crate::error::AdaptError;

/// JSON object sent as the body of a gateway call.
pub type WirePayload = Map<String, Value>;

/// How a request is laid out for one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mapping {
    /// No body (session generation).
    Empty,
    /// Single stage payment; only the description key differs per operation.
    Payment { description_field: &'static str },
}

const MAPPINGS: &[(OperationKind, Mapping)] = &[
    (OperationKind::SessionId, Mapping::Empty),
    (
        OperationKind::PushPay,
        Mapping::Payment {
            description_field: "input_PurchasedItemsDesc",
        },
    ),
    (
        OperationKind::Disburse,
        Mapping::Payment {
            description_field: "input_PaymentItemsDesc",
        },
    ),
];

fn mapping_for(kind: OperationKind) -> Option<Mapping> {
    MAPPINGS
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, mapping)| *mapping)
}

/// Builds wire payloads for a fixed market and service provider.
///
/// Pure: no I/O and no state beyond the context it was built with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestAdapter {
    market: Market,
    service_provider_code: String,
}

impl RequestAdapter {
    pub fn new(market: Market, service_provider_code: impl Into<String>) -> Self {
        Self {
            market,
            service_provider_code: service_provider_code.into(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.market, config.service_provider_code.clone())
    }

    /// Build the payload for `kind`.
    pub fn adapt(&self, kind: OperationKind, request: &Request) -> Result<WirePayload, AdaptError> {
        match mapping_for(kind).ok_or(AdaptError::UnsupportedOperation(kind))? {
            Mapping::Empty => Ok(WirePayload::new()),
            Mapping::Payment { description_field } => self.payment(request, description_field),
        }
    }

    fn payment(&self, request: &Request, description_field: &'static str) -> Result<WirePayload, AdaptError> {
        let service_provider_code = required("input_ServiceProviderCode", &self.service_provider_code)?;
        let third_party_id = required("input_ThirdPartyConversationID", &request.third_party_id)?;
        let reference = required("input_TransactionReference", &request.reference)?;
        let description = required(description_field, &request.description)?;
        let msisdn = self.normalize_msisdn(required("input_CustomerMSISDN", &request.msisdn)?)?;
        let amount = format_amount(request.amount)?;

        let mut payload = WirePayload::new();
        payload.insert("input_Amount".into(), Value::String(amount));
        payload.insert("input_Country".into(), self.market.country().into());
        payload.insert("input_Currency".into(), self.market.currency().into());
        payload.insert("input_CustomerMSISDN".into(), Value::String(msisdn));
        payload.insert("input_ServiceProviderCode".into(), service_provider_code.into());
        payload.insert("input_ThirdPartyConversationID".into(), third_party_id.into());
        payload.insert("input_TransactionReference".into(), reference.into());
        payload.insert(description_field.into(), description.into());
        Ok(payload)
    }

    /// International form without `+`: local numbers get the market dial code.
    fn normalize_msisdn(&self, raw: &str) -> Result<String, AdaptError> {
        let digits: String = raw
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '+' && *c != '-')
            .collect();
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(AdaptError::InvalidField {
                field: "input_CustomerMSISDN",
                reason: format!("not a phone number: {}", raw),
            });
        }

        let dial_code = self.market.dial_code();
        if let Some(local) = digits.strip_prefix('0') {
            return Ok(format!("{}{}", dial_code, local));
        }
        if digits.starts_with(dial_code) {
            return Ok(digits);
        }
        Ok(format!("{}{}", dial_code, digits))
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, AdaptError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AdaptError::MissingField(field));
    }
    Ok(trimmed)
}

/// Two decimals; the amount must still be positive once rounded to cents.
fn format_amount(amount: f64) -> Result<String, AdaptError> {
    let cents = (amount * 100.0).round();
    if !cents.is_finite() || cents <= 0.0 {
        return Err(AdaptError::InvalidField {
            field: "input_Amount",
            reason: format!("amount must be at least 0.01, got {}", amount),
        });
    }
    Ok(format!("{:.2}", cents / 100.0))
}
