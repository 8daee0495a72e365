//! Wallet key material for futarchy402 payment-gated voting.
//!
//! This crate is the only place where a wallet's private key is handled:
//!
//! - **Key Material**: decoding a base58 Solana keypair, validating it and
//!   deriving its public identifier
//! - **Public Keys**: base58 parsing and validation of wallet addresses
//! - **Signatures**: raw Ed25519 signing of transaction messages
//!
//! Secret bytes live in [`SecretKey`], which zeroes itself on drop and never
//! prints its contents.
//!
//! # Example
//!
//! ```
//! use futarchy_crypto::{sign, verify, KeyMaterial};
//!
//! let key = KeyMaterial::generate();
//! let encoded = key.to_base58();
//!
//! let decoded = KeyMaterial::decode(&encoded).unwrap();
//! assert_eq!(decoded.public_key(), key.public_key());
//!
//! let signature = sign(&decoded, b"message");
//! assert!(verify(&decoded.public_key(), b"message", &signature));
//! ```

mod error;
mod keypair;
mod serde_impl;
mod signature;

pub use error::CryptoError;
pub use keypair::{derive_public_identifier, validate_public_key, KeyMaterial};
pub use signature::{sign, verify};

use std::str::FromStr;

use ed25519_dalek::SigningKey;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length of an Ed25519 secret seed.
pub const SECRET_KEY_LENGTH: usize = 32;

/// Length of an Ed25519 public key.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Length of an encoded keypair (secret seed followed by public key).
pub const KEYPAIR_LENGTH: usize = SECRET_KEY_LENGTH + PUBLIC_KEY_LENGTH;

/// Length of an Ed25519 signature.
pub const SIGNATURE_LENGTH: usize = 64;

/// An Ed25519 secret seed (32 bytes).
///
/// Implements Zeroize + ZeroizeOnDrop to clear key material from memory.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecretKey([u8; SECRET_KEY_LENGTH]);

impl SecretKey {
    pub(crate) fn from_bytes(bytes: [u8; SECRET_KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    pub(crate) fn as_bytes(&self) -> &[u8; SECRET_KEY_LENGTH] {
        &self.0
    }

    /// Convert to an ed25519-dalek SigningKey.
    ///
    /// The returned key zeroizes itself on drop as well.
    pub(crate) fn to_signing_key(&self) -> SigningKey {
        SigningKey::from_bytes(&self.0)
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecretKey([REDACTED])")
    }
}

/// An Ed25519 public key (32 bytes), the wallet's public identifier.
///
/// Displays as base58, the usual Solana address form.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey(pub [u8; PUBLIC_KEY_LENGTH]);

impl PublicKey {
    /// Create a PublicKey from raw bytes.
    pub fn from_bytes(bytes: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes of the public key.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.0
    }

    /// Base58 representation.
    pub fn to_base58(&self) -> String {
        bs58::encode(&self.0).into_string()
    }
}

impl std::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PublicKey({})", self.to_base58())
    }
}

impl std::fmt::Display for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl FromStr for PublicKey {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decoded = bs58::decode(s)
            .into_vec()
            .map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))?;

        let bytes: [u8; PUBLIC_KEY_LENGTH] = decoded.as_slice().try_into().map_err(|_| {
            CryptoError::InvalidPublicKey(format!(
                "expected {} bytes, got {}",
                PUBLIC_KEY_LENGTH,
                decoded.len()
            ))
        })?;

        Ok(Self(bytes))
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// An Ed25519 signature (64 bytes).
///
/// Displays as base58, which is how Solana names transactions.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature(pub [u8; SIGNATURE_LENGTH]);

impl Signature {
    /// Create a Signature from raw bytes.
    pub fn from_bytes(bytes: [u8; SIGNATURE_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes of the signature.
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.0
    }

    /// Base58 representation.
    pub fn to_base58(&self) -> String {
        bs58::encode(&self.0).into_string()
    }
}

impl std::fmt::Debug for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Signature({})", self.to_base58())
    }
}

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_key_display_is_base58() {
        let key = KeyMaterial::generate();
        let s = key.public_key().to_string();
        let parsed: PublicKey = s.parse().unwrap();
        assert_eq!(parsed, key.public_key());
    }

    #[test]
    fn test_system_program_address_parses() {
        let parsed: PublicKey = "11111111111111111111111111111111".parse().unwrap();
        assert_eq!(parsed.0, [0u8; 32]);
    }

    #[test]
    fn test_public_key_wrong_length_rejected() {
        let err = "123".parse::<PublicKey>().unwrap_err();
        assert!(matches!(err, CryptoError::InvalidPublicKey(_)));
    }

    #[test]
    fn test_secret_key_debug_redacted() {
        let secret = SecretKey::from_bytes([7u8; 32]);
        let debug = format!("{:?}", secret);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("07"));
    }

    #[test]
    fn test_secret_key_implements_zeroize() {
        let mut secret = SecretKey::from_bytes([0xAB; 32]);
        assert!(secret.0.iter().any(|&b| b != 0));

        secret.zeroize();
        assert!(
            secret.0.iter().all(|&b| b == 0),
            "SecretKey bytes should be zeroed after zeroize()"
        );
    }
}
