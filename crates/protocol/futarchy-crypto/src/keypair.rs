//! Wallet key material.
//!
//! A wallet key is supplied as base58 text encoding 64 bytes:
//!
//! ```text
//! [secret seed: 32 bytes][public key: 32 bytes]
//! ```
//!
//! Decoding is all-or-nothing: malformed input is rejected outright and the
//! intermediate decoded buffer is wiped before returning.

use ed25519_dalek::SigningKey;
use rand::rngs::OsRng;
use zeroize::Zeroizing;

use crate::error::CryptoError;
use crate::{PublicKey, SecretKey, KEYPAIR_LENGTH, PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH};

/// A decoded wallet keypair.
///
/// Owned by the single invocation that needs to sign. Dropping it zeroes the
/// secret half.
pub struct KeyMaterial {
    secret: SecretKey,
    public: PublicKey,
}

impl KeyMaterial {
    /// Decode a base58-encoded 64-byte keypair.
    ///
    /// # Errors
    /// - `InvalidBase58` if the string is not base58
    /// - `InvalidKeyLength` if it does not decode to exactly 64 bytes
    /// - `KeypairMismatch` if the public half is not derived from the secret half
    ///
    /// # Example
    /// ```
    /// use futarchy_crypto::{CryptoError, KeyMaterial};
    ///
    /// assert!(matches!(
    ///     KeyMaterial::decode("invalid-key"),
    ///     Err(CryptoError::InvalidBase58(_))
    /// ));
    /// ```
    pub fn decode(encoded: &str) -> Result<Self, CryptoError> {
        let decoded = Zeroizing::new(
            bs58::decode(encoded.trim())
                .into_vec()
                .map_err(|e| CryptoError::InvalidBase58(e.to_string()))?,
        );

        if decoded.len() != KEYPAIR_LENGTH {
            return Err(CryptoError::InvalidKeyLength {
                expected: KEYPAIR_LENGTH,
                actual: decoded.len(),
            });
        }

        let mut seed = Zeroizing::new([0u8; SECRET_KEY_LENGTH]);
        seed.copy_from_slice(&decoded[..SECRET_KEY_LENGTH]);
        let secret = SecretKey::from_bytes(*seed);

        let derived = secret.to_signing_key().verifying_key().to_bytes();
        if derived[..] != decoded[SECRET_KEY_LENGTH..] {
            return Err(CryptoError::KeypairMismatch);
        }

        Ok(Self {
            secret,
            public: PublicKey(derived),
        })
    }

    /// Generate a fresh keypair from the operating system's CSPRNG.
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut OsRng);
        let public = PublicKey(signing_key.verifying_key().to_bytes());

        Self {
            secret: SecretKey::from_bytes(signing_key.to_bytes()),
            public,
        }
    }

    /// The wallet's public identifier.
    pub fn public_key(&self) -> PublicKey {
        self.public
    }

    /// Encode back to the 64-byte base58 form.
    ///
    /// The returned string is wiped on drop.
    pub fn to_base58(&self) -> Zeroizing<String> {
        let mut bytes = Zeroizing::new([0u8; KEYPAIR_LENGTH]);
        bytes[..SECRET_KEY_LENGTH].copy_from_slice(self.secret.as_bytes());
        bytes[SECRET_KEY_LENGTH..].copy_from_slice(&self.public.0);
        Zeroizing::new(bs58::encode(&bytes[..]).into_string())
    }

    pub(crate) fn secret(&self) -> &SecretKey {
        &self.secret
    }
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("public", &self.public)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Derive the public identifier for a keypair.
///
/// Pure and deterministic; equivalent to [`KeyMaterial::public_key`].
pub fn derive_public_identifier(key: &KeyMaterial) -> PublicKey {
    key.public_key()
}

/// Check whether a string is a valid wallet address.
///
/// Any base58 string decoding to exactly 32 bytes is accepted; on-curve
/// checks are not performed (program-derived addresses are off-curve).
pub fn validate_public_key(s: &str) -> bool {
    matches!(bs58::decode(s).into_vec(), Ok(bytes) if bytes.len() == PUBLIC_KEY_LENGTH)
}
