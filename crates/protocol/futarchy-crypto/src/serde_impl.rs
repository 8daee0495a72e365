//! Serde support: public keys and signatures travel as base58 strings.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{PublicKey, Signature, SIGNATURE_LENGTH};

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base58())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base58())
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let bytes = bs58::decode(&s).into_vec().map_err(D::Error::custom)?;
        let bytes: [u8; SIGNATURE_LENGTH] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| D::Error::invalid_length(bytes.len(), &"64 bytes"))?;
        Ok(Signature(bytes))
    }
}

#[cfg(test)]
mod tests {
    use crate::{sign, KeyMaterial, PublicKey, Signature};

    #[test]
    fn test_public_key_json() {
        let key = KeyMaterial::generate();
        let json = serde_json::to_string(&key.public_key()).unwrap();
        assert_eq!(json, format!("\"{}\"", key.public_key()));

        let back: PublicKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key.public_key());
    }

    #[test]
    fn test_signature_json() {
        let key = KeyMaterial::generate();
        let sig = sign(&key, b"payload");
        let json = serde_json::to_string(&sig).unwrap();
        let back: Signature = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sig);
    }

    #[test]
    fn test_public_key_rejects_garbage() {
        assert!(serde_json::from_str::<PublicKey>("\"not-a-key\"").is_err());
    }
}
