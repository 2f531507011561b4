//! Credential encryption for the M-Pesa OpenAPI.
//!
//! The gateway expects both the API key (to open a session) and the session
//! key (to authorise payment calls) encrypted with its RSA public key using
//! PKCS#1 v1.5 padding and base64 encoded.

pub mod error;
pub mod keys;
pub mod encryption;

pub use error::CryptoError;
pub use keys::{GatewayPrivateKey, GatewayPublicKey};
pub use encryption::{decrypt, encrypt, encrypt_with};
