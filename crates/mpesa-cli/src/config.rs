//! CLI configuration loading and management.

use mpesa_core::{ClientConfig, Endpoints, Market, Platform, DEFAULT_HOST};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Full configuration for the `mpesa` binary.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MpesaConfig {
    /// Gateway credentials and deployment context.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Per-operation path overrides.
    #[serde(default)]
    pub endpoints: Endpoints,

    /// Callback server settings.
    #[serde(default)]
    pub callback: CallbackConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub description: String,
    /// Gateway host, without scheme.
    #[serde(default = "default_host")]
    pub host: String,
    /// Market name, country code or URL context (e.g. `tanzania`, `TZN`).
    #[serde(default = "default_market")]
    pub market: String,
    /// `sandbox` or `openapi`.
    #[serde(default = "default_platform")]
    pub platform: String,
    /// API key; `MPESA_API_KEY` takes precedence.
    #[serde(default)]
    pub api_key: String,
    /// Base64 DER public key; `MPESA_PUBLIC_KEY` takes precedence.
    #[serde(default)]
    pub public_key: String,
    #[serde(default = "default_session_lifetime")]
    pub session_lifetime_minutes: i64,
    #[serde(default = "default_service_provider_code")]
    pub service_provider_code: String,
    #[serde(default)]
    pub trusted_sources: Vec<String>,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackConfig {
    #[serde(default = "default_callback_addr")]
    pub listen_addr: String,
    #[serde(default = "default_callback_port")]
    pub port: u16,
    #[serde(default = "default_callback_path")]
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (text, json).
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_name() -> String {
    "mpesa-client".into()
}
fn default_version() -> String {
    "1.0".into()
}
fn default_host() -> String {
    DEFAULT_HOST.into()
}
fn default_market() -> String {
    "tanzania".into()
}
fn default_platform() -> String {
    "sandbox".into()
}
fn default_session_lifetime() -> i64 {
    60
}
fn default_service_provider_code() -> String {
    "000000".into()
}
fn default_request_timeout() -> u64 {
    30
}
fn default_callback_addr() -> String {
    "0.0.0.0".into()
}
fn default_callback_port() -> u16 {
    8080
}
fn default_callback_path() -> String {
    mpesa_client::DEFAULT_CALLBACK_PATH.into()
}
fn default_log_level() -> String {
    "info".into()
}
fn default_log_format() -> String {
    "text".into()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            version: default_version(),
            description: String::new(),
            host: default_host(),
            market: default_market(),
            platform: default_platform(),
            api_key: String::new(),
            public_key: String::new(),
            session_lifetime_minutes: default_session_lifetime(),
            service_provider_code: default_service_provider_code(),
            trusted_sources: Vec::new(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl Default for CallbackConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_callback_addr(),
            port: default_callback_port(),
            path: default_callback_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl MpesaConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let config: MpesaConfig = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save the current config to a TOML file.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Let `MPESA_API_KEY` / `MPESA_PUBLIC_KEY` override the file.
    pub fn apply_env(&mut self) {
        self.apply_overrides(
            std::env::var("MPESA_API_KEY").ok(),
            std::env::var("MPESA_PUBLIC_KEY").ok(),
        );
    }

    fn apply_overrides(&mut self, api_key: Option<String>, public_key: Option<String>) {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.gateway.api_key = key;
        }
        if let Some(key) = public_key.filter(|k| !k.trim().is_empty()) {
            self.gateway.public_key = key;
        }
    }

    /// Build the client configuration, parsing market and platform.
    pub fn client_config(&self) -> anyhow::Result<ClientConfig> {
        let gw = &self.gateway;
        let market: Market = gw.market.parse()?;
        let platform: Platform = gw.platform.parse()?;

        let mut config = ClientConfig::new(
            market,
            platform,
            gw.api_key.clone(),
            gw.public_key.clone(),
            gw.service_provider_code.clone(),
        );
        config.name = gw.name.clone();
        config.version = gw.version.clone();
        config.description = gw.description.clone();
        config.host = gw.host.clone();
        config.session_lifetime_minutes = gw.session_lifetime_minutes;
        config.trusted_sources = gw.trusted_sources.clone();
        config.endpoints = self.endpoints.clone();
        config.request_timeout_secs = gw.request_timeout_secs;
        config.validate()?;
        Ok(config)
    }

    /// Socket address string for the callback server.
    pub fn callback_addr(&self) -> String {
        format!("{}:{}", self.callback.listen_addr, self.callback.port)
    }
}
