//! Transaction signing.
//!
//! The facilitator returns a serialized Solana transaction with empty
//! signature slots. Only the wallet's own slot is filled in.
//!
//! # Wire Format
//!
//! ```text
//! [num_signatures: compact-u16]
//! [signatures: num_signatures × 64 bytes]
//! [message]
//!   [0x80 | version: u8]          # only for versioned (v0) messages
//!   [num_required_signatures: u8]
//!   [num_readonly_signed: u8]
//!   [num_readonly_unsigned: u8]
//!   [num_account_keys: compact-u16]
//!   [account_keys: num_account_keys × 32 bytes]
//!   ...                           # blockhash, instructions (not inspected)
//! ```
//!
//! The signature covers the message bytes exactly as received.

use base64::Engine as _;
use futarchy_crypto::{sign, KeyMaterial, Signature, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};
use tracing::debug;

use crate::error::{VoteError, VoteResult};

/// Prefix bit marking a versioned message.
const VERSION_PREFIX_MASK: u8 = 0x80;

/// A transaction as returned by the facilitator, not yet decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedTransaction {
    encoded: String,
}

impl UnsignedTransaction {
    /// Wrap a base64 serialized transaction.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self {
            encoded: encoded.into(),
        }
    }

    /// Wrap raw transaction bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::new(base64::engine::general_purpose::STANDARD.encode(bytes))
    }

    /// The base64 payload.
    pub fn encoded(&self) -> &str {
        &self.encoded
    }
}

/// A transaction carrying the wallet's signature.
#[derive(Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    bytes: Vec<u8>,
    signature: Signature,
}

impl SignedTransaction {
    /// Serialized transaction bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Base64 serialized transaction.
    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.bytes)
    }

    /// The wallet's signature, which doubles as the transaction id.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }
}

impl std::fmt::Debug for SignedTransaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedTransaction")
            .field("bytes", &self.bytes.len())
            .field("signature", &self.signature)
            .finish()
    }
}

/// Sign `unsigned` with `key`.
///
/// Takes the key by value: it is dropped, and its secret zeroed, when this
/// returns, whether signing succeeded or not. On failure nothing is
/// returned but the error.
///
/// # Errors
/// `SigningError` if the payload is not base64, is truncated, or does not
/// list the wallet among its required signers.
pub fn sign_transaction(
    unsigned: UnsignedTransaction,
    key: KeyMaterial,
) -> VoteResult<SignedTransaction> {
    let mut bytes = base64::engine::general_purpose::STANDARD
        .decode(unsigned.encoded.trim())
        .map_err(|e| VoteError::SigningError(format!("transaction is not valid base64: {}", e)))?;

    let layout = TransactionLayout::parse(&bytes)?;
    let payer = key.public_key();

    let slot = layout
        .signer_keys(&bytes)
        .position(|k| k == payer.as_bytes())
        .ok_or_else(|| {
            VoteError::SigningError(format!(
                "wallet {} is not a required signer of this transaction",
                payer
            ))
        })?;

    let signature = sign(&key, &bytes[layout.message_offset..]);
    drop(key);

    let start = layout.signatures_offset + slot * SIGNATURE_LENGTH;
    bytes[start..start + SIGNATURE_LENGTH].copy_from_slice(signature.as_bytes());

    debug!(
        slot,
        signature = %signature,
        bytes = bytes.len(),
        "Transaction signed"
    );
    Ok(SignedTransaction { bytes, signature })
}

/// Offsets of the parts of a serialized transaction the signer touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TransactionLayout {
    signatures_offset: usize,
    message_offset: usize,
    num_required_signatures: usize,
    account_keys_offset: usize,
}

impl TransactionLayout {
    fn parse(bytes: &[u8]) -> VoteResult<Self> {
        let (num_signatures, signatures_offset) = read_compact_u16(bytes, 0)?;
        let num_signatures = num_signatures as usize;
        if num_signatures == 0 {
            return Err(signing_error("transaction has no signature slots"));
        }

        let message_offset = signatures_offset + num_signatures * SIGNATURE_LENGTH;
        let mut cursor = message_offset;

        let first = *bytes
            .get(cursor)
            .ok_or_else(|| signing_error("transaction truncated before message"))?;
        if first & VERSION_PREFIX_MASK != 0 {
            let version = first & !VERSION_PREFIX_MASK;
            if version != 0 {
                return Err(VoteError::SigningError(format!(
                    "unsupported message version {}",
                    version
                )));
            }
            cursor += 1;
        }

        let header = bytes
            .get(cursor..cursor + 3)
            .ok_or_else(|| signing_error("transaction truncated in message header"))?;
        let num_required_signatures = header[0] as usize;
        cursor += 3;

        if num_required_signatures != num_signatures {
            return Err(VoteError::SigningError(format!(
                "message requires {} signatures but transaction has {} slots",
                num_required_signatures, num_signatures
            )));
        }

        let (num_keys, account_keys_offset) = read_compact_u16(bytes, cursor)?;
        let num_keys = num_keys as usize;
        if num_keys < num_required_signatures {
            return Err(signing_error("fewer account keys than required signers"));
        }
        if bytes.len() < account_keys_offset + num_keys * PUBLIC_KEY_LENGTH {
            return Err(signing_error("transaction truncated in account keys"));
        }

        Ok(Self {
            signatures_offset,
            message_offset,
            num_required_signatures,
            account_keys_offset,
        })
    }

    /// Account keys that must sign, in slot order.
    fn signer_keys<'a>(&self, bytes: &'a [u8]) -> impl Iterator<Item = &'a [u8]> {
        let start = self.account_keys_offset;
        let end = start + self.num_required_signatures * PUBLIC_KEY_LENGTH;
        bytes[start..end].chunks_exact(PUBLIC_KEY_LENGTH)
    }
}

fn signing_error(reason: &str) -> VoteError {
    VoteError::SigningError(reason.to_string())
}

/// Decode a compact-u16 (1–3 bytes, 7 bits per byte, little-endian groups).
///
/// Returns the value and the offset just past it.
fn read_compact_u16(bytes: &[u8], offset: usize) -> VoteResult<(u16, usize)> {
    let mut value: u32 = 0;
    for i in 0..3 {
        let byte = *bytes
            .get(offset + i)
            .ok_or_else(|| signing_error("transaction truncated in length prefix"))?;
        value |= ((byte & 0x7f) as u32) << (7 * i);
        if byte & 0x80 == 0 {
            let value = u16::try_from(value)
                .map_err(|_| signing_error("length prefix overflows u16"))?;
            return Ok((value, offset + i + 1));
        }
    }
    Err(signing_error("length prefix longer than 3 bytes"))
}
