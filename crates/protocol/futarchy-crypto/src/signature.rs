//! Signature creation and verification.
//!
//! Solana signs the serialized transaction message directly, so unlike
//! hash-then-sign schemes the message bytes are passed to Ed25519 as-is:
//! ```text
//! signature = Ed25519_Sign(secret_key, message)
//! ```

use ed25519_dalek::{Signature as DalekSignature, Signer, Verifier, VerifyingKey};

use crate::{KeyMaterial, PublicKey, Signature};

/// Sign a message with a wallet's key material.
///
/// # Example
/// ```
/// use futarchy_crypto::{sign, verify, KeyMaterial};
///
/// let key = KeyMaterial::generate();
/// let signature = sign(&key, b"Hello, world!");
/// assert!(verify(&key.public_key(), b"Hello, world!", &signature));
/// ```
pub fn sign(key: &KeyMaterial, message: &[u8]) -> Signature {
    let signing_key = key.secret().to_signing_key();
    let sig: DalekSignature = signing_key.sign(message);
    Signature(sig.to_bytes())
}

/// Verify a signature against a public key and message.
///
/// # Returns
/// `true` if the signature is valid, `false` otherwise.
pub fn verify(public_key: &PublicKey, message: &[u8], signature: &Signature) -> bool {
    let Ok(verifying_key) = VerifyingKey::from_bytes(&public_key.0) else {
        return false;
    };

    let sig = DalekSignature::from_bytes(&signature.0);
    verifying_key.verify(message, &sig).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_verify() {
        let key = KeyMaterial::generate();
        let message = b"test message";
        let signature = sign(&key, message);
        assert!(verify(&key.public_key(), message, &signature));
    }

    #[test]
    fn test_signing_is_deterministic() {
        let key = KeyMaterial::generate();
        assert_eq!(sign(&key, b"same"), sign(&key, b"same"));
    }

    #[test]
    fn test_wrong_key_fails() {
        let key1 = KeyMaterial::generate();
        let key2 = KeyMaterial::generate();
        let signature = sign(&key1, b"test message");
        assert!(!verify(&key2.public_key(), b"test message", &signature));
    }

    #[test]
    fn test_tampered_message_fails() {
        let key = KeyMaterial::generate();
        let signature = sign(&key, b"test message");
        assert!(!verify(&key.public_key(), b"different message", &signature));
    }
}
