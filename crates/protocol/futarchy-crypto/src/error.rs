//! Error types for futarchy-crypto

use thiserror::Error;

/// Errors that can occur while handling wallet key material
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Invalid base58 encoding
    #[error("Invalid base58 encoding: {0}")]
    InvalidBase58(String),

    /// Decoded key has the wrong number of bytes
    #[error("Invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    /// The embedded public half does not belong to the secret half
    #[error("Keypair mismatch: embedded public key does not match the secret key")]
    KeypairMismatch,

    /// Public key string is not a valid 32-byte base58 value
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),
}
