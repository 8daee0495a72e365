//! Helper functions for creating test fixtures.
//!
//! Provides deterministic wallets, facilitator-style unsigned transactions
//! and temporary config files.

use base64::Engine as _;
use ed25519_dalek::SigningKey;
use futarchy_crypto::{KeyMaterial, PublicKey};
use std::path::PathBuf;
use tempfile::TempDir;

/// Seed of the default test wallet.
pub const TEST_SEED: [u8; 32] = [7u8; 32];

/// Base58 keypair (secret seed followed by public key) for `seed`.
pub fn keypair_base58_from_seed(seed: [u8; 32]) -> String {
    let signing_key = SigningKey::from_bytes(&seed);
    bs58::encode(signing_key.to_keypair_bytes()).into_string()
}

/// Base58 keypair of the default test wallet.
pub fn test_keypair_base58() -> String {
    keypair_base58_from_seed(TEST_SEED)
}

/// Decoded key material of the default test wallet.
pub fn test_keypair() -> KeyMaterial {
    KeyMaterial::decode(&test_keypair_base58()).unwrap()
}

/// Public identifier of the default test wallet.
pub fn test_public_key() -> PublicKey {
    test_keypair().public_key()
}

/// Raw legacy transaction with `payer` as its only signer.
///
/// Shaped like a facilitator's transfer: one empty signature slot, then a
/// message listing payer, destination and token program.
pub fn unsigned_transaction_bytes(payer: &PublicKey) -> Vec<u8> {
    let mut tx = vec![1u8];
    tx.extend([0u8; 64]);
    // header: 1 required signer, 0 read-only signed, 1 read-only unsigned
    tx.extend([1u8, 0, 1]);
    tx.push(3);
    tx.extend_from_slice(payer.as_bytes());
    tx.extend([0x44u8; 32]);
    tx.extend([0x06u8; 32]);
    tx.extend([0x0bu8; 32]); // recent blockhash
    tx.extend([1u8, 2, 2, 0, 1, 9, 3, 64, 66, 15, 0, 0, 0, 0, 0]);
    tx
}

/// Base64 unsigned transaction for `payer`, as the facilitator returns it.
pub fn unsigned_transaction_for(payer: &PublicKey) -> String {
    base64::engine::general_purpose::STANDARD.encode(unsigned_transaction_bytes(payer))
}

/// Write `contents` to a `config.toml` inside a fresh temp directory.
///
/// The directory must be kept alive for the duration of the test.
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, contents).unwrap();
    (dir, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keypair_is_deterministic() {
        assert_eq!(test_keypair_base58(), test_keypair_base58());
        assert_eq!(test_keypair().public_key(), test_public_key());
        assert_ne!(
            keypair_base58_from_seed([1u8; 32]),
            keypair_base58_from_seed([2u8; 32])
        );
    }

    #[test]
    fn test_unsigned_transaction_lists_payer() {
        let payer = test_public_key();
        let bytes = unsigned_transaction_bytes(&payer);
        assert_eq!(&bytes[69..101], payer.as_bytes());
    }
}
