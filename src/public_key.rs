use ed25519_dalek::VerifyingKey;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt::{Display, Formatter};

const PUBLIC_KEY_BYTE_COUNT: usize = 32;

/// The Ed25519 public key that owns a transaction output.
/// Only the holder of the matching signing key can spend the output.
#[derive(Debug, Copy, Clone, Hash, Ord, PartialOrd, Serialize, Deserialize, Eq, PartialEq)]
pub struct PublicKey([u8; PUBLIC_KEY_BYTE_COUNT]);

impl PublicKey {
    pub const fn new(raw_bytes: [u8; PUBLIC_KEY_BYTE_COUNT]) -> Self {
        Self(raw_bytes)
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_BYTE_COUNT] {
        &self.0
    }

    pub fn from_hex(s: &str) -> Result<Self, String> {
        let bytes = hex::decode(s).map_err(|e| e.to_string())?;
        <[u8; PUBLIC_KEY_BYTE_COUNT]>::try_from(bytes.as_slice())
            .map(PublicKey::new)
            .map_err(|_| {
                format!(
                    "Invalid public key length. Expected: {} but got: {} in: {}",
                    PUBLIC_KEY_BYTE_COUNT,
                    bytes.len(),
                    s
                )
            })
    }
}

impl From<VerifyingKey> for PublicKey {
    fn from(key: VerifyingKey) -> Self {
        Self(key.to_bytes())
    }
}

impl Display for PublicKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::SigningKey;

    #[test]
    fn displays_and_parses_hex() {
        let key = PublicKey::from(SigningKey::from_bytes(&[7; 32]).verifying_key());
        assert_eq!(PublicKey::from_hex(&key.to_string()), Ok(key));
    }

    #[test]
    fn rejects_short_keys() {
        assert!(PublicKey::from_hex("00ff").is_err());
    }
}
