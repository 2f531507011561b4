use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// M-Pesa market (operator + country) the client is provisioned for.
///
/// The market selects the URL context segment of the base path, the country
/// and currency codes injected into payloads, and the dial code used to
/// normalise subscriber numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Market {
    Ghana,
    Tanzania,
    Lesotho,
    DemocraticRepublicOfCongo,
    Mozambique,
    Egypt,
}

impl Market {
    /// All supported markets.
    pub const ALL: [Market; 6] = [
        Market::Ghana,
        Market::Tanzania,
        Market::Lesotho,
        Market::DemocraticRepublicOfCongo,
        Market::Mozambique,
        Market::Egypt,
    ];

    /// Path segment used in `https://<host>/<platform>/ipg/v2/<market>/`.
    pub fn url_context_value(&self) -> &'static str {
        match self {
            Self::Ghana => "vodafoneGHA",
            Self::Tanzania => "vodacomTZN",
            Self::Lesotho => "vodacomLES",
            Self::DemocraticRepublicOfCongo => "vodacomDRC",
            Self::Mozambique => "vodacomMOZ",
            Self::Egypt => "vodafoneEGY",
        }
    }

    /// Value of `input_Country`.
    pub fn country(&self) -> &'static str {
        match self {
            Self::Ghana => "GHA",
            Self::Tanzania => "TZN",
            Self::Lesotho => "LES",
            Self::DemocraticRepublicOfCongo => "DRC",
            Self::Mozambique => "MOZ",
            Self::Egypt => "EGY",
        }
    }

    /// Value of `input_Currency`.
    pub fn currency(&self) -> &'static str {
        match self {
            Self::Ghana => "GHS",
            Self::Tanzania => "TZS",
            Self::Lesotho => "LSL",
            Self::DemocraticRepublicOfCongo => "USD",
            Self::Mozambique => "MZN",
            Self::Egypt => "EGP",
        }
    }

    /// International dial code, without the leading `+`.
    pub fn dial_code(&self) -> &'static str {
        match self {
            Self::Ghana => "233",
            Self::Tanzania => "255",
            Self::Lesotho => "266",
            Self::DemocraticRepublicOfCongo => "243",
            Self::Mozambique => "258",
            Self::Egypt => "20",
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url_context_value())
    }
}

impl FromStr for Market {
    type Err = CoreError;

    /// Accepts the variant name, the country code or the URL context value,
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Market::ALL
            .into_iter()
            .find(|m| {
                let name = format!("{:?}", m).to_ascii_lowercase();
                needle == name
                    || needle == m.country().to_ascii_lowercase()
                    || needle == m.url_context_value().to_ascii_lowercase()
            })
            .ok_or_else(|| CoreError::InvalidMarket(s.to_string()))
    }
}

/// Deployment platform: the public sandbox or the production OpenAPI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    Sandbox,
    OpenApi,
}

impl Platform {
    /// Path segment used in the base path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sandbox => "sandbox",
            Self::OpenApi => "openapi",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Platform {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sandbox" => Ok(Self::Sandbox),
            "openapi" | "production" => Ok(Self::OpenApi),
            _ => Err(CoreError::InvalidPlatform(s.to_string())),
        }
    }
}

/// HTTP verb used for a gateway operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// The closed set of gateway operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    /// Generate a session key from the encrypted API key.
    SessionId,
    /// C2B single stage: push a payment prompt to the customer handset.
    PushPay,
    /// B2C: pay out to a customer wallet.
    Disburse,
    /// Transaction status query. Declared but not implemented.
    Query,
}

impl OperationKind {
    pub fn method(&self) -> HttpMethod {
        match self {
            Self::SessionId | Self::Query => HttpMethod::Get,
            Self::PushPay | Self::Disburse => HttpMethod::Post,
        }
    }

    /// Path segment appended to the base path when no override is configured.
    pub fn default_path(&self) -> &'static str {
        match self {
            Self::SessionId => "getSession/",
            Self::PushPay => "c2bPayment/singleStage/",
            Self::Disburse => "b2cPayment/",
            Self::Query => "queryTransactionStatus/",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SessionId => write!(f, "session id"),
            Self::PushPay => write!(f, "push pay"),
            Self::Disburse => write!(f, "disburse"),
            Self::Query => write!(f, "query"),
        }
    }
}
