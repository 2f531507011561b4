use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::Zeroizing;

use crate::error::CoreError;
use crate::types::{Market, OperationKind, Platform};

/// Public M-Pesa OpenAPI host.
pub const DEFAULT_HOST: &str = "openapi.m-pesa.com";

/// Per-operation path segments, relative to the client base path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    #[serde(default = "default_auth_endpoint")]
    pub auth: String,
    #[serde(default = "default_push_endpoint")]
    pub push: String,
    #[serde(default = "default_disburse_endpoint")]
    pub disburse: String,
    #[serde(default = "default_query_endpoint")]
    pub query: String,
}

fn default_auth_endpoint() -> String {
    OperationKind::SessionId.default_path().into()
}
fn default_push_endpoint() -> String {
    OperationKind::PushPay.default_path().into()
}
fn default_disburse_endpoint() -> String {
    OperationKind::Disburse.default_path().into()
}
fn default_query_endpoint() -> String {
    OperationKind::Query.default_path().into()
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            auth: default_auth_endpoint(),
            push: default_push_endpoint(),
            disburse: default_disburse_endpoint(),
            query: default_query_endpoint(),
        }
    }
}

impl Endpoints {
    /// Path segment for the given operation.
    pub fn path(&self, kind: OperationKind) -> &str {
        match kind {
            OperationKind::SessionId => &self.auth,
            OperationKind::PushPay => &self.push,
            OperationKind::Disburse => &self.disburse,
            OperationKind::Query => &self.query,
        }
    }
}

/// Application details provisioned in the M-Pesa developer portal.
///
/// Immutable once handed to a client. The API key is wiped from memory when
/// the config is dropped.
#[derive(Clone)]
pub struct ClientConfig {
    /// Human-readable application name.
    pub name: String,
    /// Application version registered in the portal.
    pub version: String,
    pub description: String,
    /// Gateway host without scheme, e.g. `openapi.m-pesa.com`.
    pub host: String,
    pub market: Market,
    pub platform: Platform,
    /// Authorisation key for the first (session) call.
    pub api_key: Zeroizing<String>,
    /// Gateway RSA public key, base64 DER or PEM.
    pub public_key: String,
    /// Lifetime of a session key as configured in the portal.
    pub session_lifetime_minutes: i64,
    pub service_provider_code: String,
    /// Caller IP addresses allowed by the portal.
    pub trusted_sources: Vec<String>,
    pub endpoints: Endpoints,
    /// Upper bound on a single gateway round trip.
    pub request_timeout_secs: u64,
}

impl ClientConfig {
    /// Create a configuration with defaults for everything but credentials
    /// and deployment context.
    pub fn new(
        market: Market,
        platform: Platform,
        api_key: impl Into<String>,
        public_key: impl Into<String>,
        service_provider_code: impl Into<String>,
    ) -> Self {
        Self {
            name: "mpesa-client".into(),
            version: "1.0".into(),
            description: String::new(),
            host: DEFAULT_HOST.into(),
            market,
            platform,
            api_key: Zeroizing::new(api_key.into()),
            public_key: public_key.into(),
            session_lifetime_minutes: 60,
            service_provider_code: service_provider_code.into(),
            trusted_sources: Vec::new(),
            endpoints: Endpoints::default(),
            request_timeout_secs: 30,
        }
    }

    /// Base path: `https://<host>/<platform>/ipg/v2/<market>/`.
    pub fn base_path(&self) -> String {
        format!(
            "https://{}/{}/ipg/v2/{}/",
            self.host,
            self.platform.as_str(),
            self.market.url_context_value()
        )
    }

    /// Full URL for an operation.
    pub fn url_for(&self, kind: OperationKind) -> String {
        format!("{}{}", self.base_path(), self.endpoints.path(kind))
    }

    /// Check the fields every gateway call depends on.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.host.trim().is_empty() {
            return Err(CoreError::InvalidConfig("host is empty".into()));
        }
        if self.host.contains("://") {
            return Err(CoreError::InvalidConfig(format!(
                "host must not carry a scheme: {}",
                self.host
            )));
        }
        if self.api_key.trim().is_empty() {
            return Err(CoreError::InvalidConfig("api key is empty".into()));
        }
        if self.public_key.trim().is_empty() {
            return Err(CoreError::InvalidConfig("public key is empty".into()));
        }
        if self.session_lifetime_minutes <= 0 {
            return Err(CoreError::InvalidConfig(format!(
                "session lifetime must be positive, got {}",
                self.session_lifetime_minutes
            )));
        }
        Ok(())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("host", &self.host)
            .field("market", &self.market)
            .field("platform", &self.platform)
            .field("api_key", &"<redacted>")
            .field("session_lifetime_minutes", &self.session_lifetime_minutes)
            .field("service_provider_code", &self.service_provider_code)
            .field("trusted_sources", &self.trusted_sources)
            .field("endpoints", &self.endpoints)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}
