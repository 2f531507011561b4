/// Core errors raised while building client context.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("unknown market: {0}")]
    InvalidMarket(String),

    #[error("unknown platform: {0}")]
    InvalidPlatform(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
