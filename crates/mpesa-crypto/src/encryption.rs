use base64::{engine::general_purpose::STANDARD, Engine as _};
use zeroize::Zeroizing;

use crate::error::CryptoError;
use crate::keys::{GatewayPrivateKey, GatewayPublicKey};

/// Encrypt a secret for the gateway and return it as a bearer token.
///
/// `public_key` is the key string from the developer portal (base64 DER) or
/// a PEM block. Padding is PKCS#1 v1.5; the gateway does not accept OAEP.
/// The output differs on every call, only its decryption is stable.
pub fn encrypt(plaintext: &str, public_key: &str) -> Result<String, CryptoError> {
    let key = GatewayPublicKey::parse(public_key)?;
    encrypt_with(&key, plaintext)
}

/// Same as [`encrypt`] with an already parsed key.
pub fn encrypt_with(key: &GatewayPublicKey, plaintext: &str) -> Result<String, CryptoError> {
    // PKCS#1 v1.5 leaves k - 11 bytes for the message.
    let limit = key.size().saturating_sub(11);
    if plaintext.len() > limit {
        return Err(CryptoError::Encryption(format!(
            "plaintext is {} bytes, key allows at most {}",
            plaintext.len(),
            limit
        )));
    }
    let ciphertext = key.encrypt(plaintext.as_bytes())?;
    tracing::trace!(key_bytes = key.size(), "encrypted credential");
    Ok(STANDARD.encode(ciphertext))
}

/// Reverse of [`encrypt`] given the matching private key.
pub fn decrypt(token: &str, private_key: &GatewayPrivateKey) -> Result<Zeroizing<String>, CryptoError> {
    let ciphertext = STANDARD
        .decode(token.trim().as_bytes())
        .map_err(|e| CryptoError::Decryption(format!("base64: {}", e)))?;
    let plaintext = Zeroizing::new(private_key.decrypt(&ciphertext)?);
    let text = std::str::from_utf8(&plaintext)
        .map_err(|e| CryptoError::Decryption(format!("plaintext is not UTF-8: {}", e)))?;
    Ok(Zeroizing::new(text.to_string()))
}
