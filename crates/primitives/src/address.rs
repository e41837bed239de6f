use std::{fmt, str::FromStr};

use secp256k1::{rand::rngs::OsRng, Secp256k1};
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};

use crate::Error;

pub type PublicKey = secp256k1::PublicKey;
pub type SecretKey = secp256k1::SecretKey;
pub type AccountKeypair = (SecretKey, PublicKey);

/// Identifies the account behind a request.
///
/// Represents the lower 20 bytes of a Keccak-256 digest of an uncompressed
/// secp256k1 public key. Serialized as a `0x`-prefixed hex string.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Address(pub [u8; 20]);

impl Address {
    pub fn new(public_key: PublicKey) -> Self {
        Self::from(public_key)
    }

    pub fn raw_address(&self) -> [u8; 20] {
        self.0
    }
}

impl From<PublicKey> for Address {
    fn from(item: PublicKey) -> Self {
        let mut hasher = Keccak256::new();
        let pk_bytes = item.serialize_uncompressed();
        hasher.update(&pk_bytes[1..]);
        let hash = hasher.finalize();

        let mut address_bytes = [0u8; 20];
        address_bytes.copy_from_slice(&hash[(hash.len() - 20)..]);

        Address(address_bytes)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| Error::InvalidAddress(s.to_string(), reason.to_string());

        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or_else(|| invalid("missing 0x prefix"))?;

        if digits.len() != 40 {
            return Err(invalid("expected 40 hex digits"));
        }

        let address_bytes = hex::decode(digits).map_err(|err| invalid(&err.to_string()))?;

        let mut address = [0u8; 20];
        address.copy_from_slice(&address_bytes);

        Ok(Address(address))
    }
}

impl TryFrom<String> for Address {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.to_string()
    }
}

pub fn generate_account_keypair() -> AccountKeypair {
    let secp = Secp256k1::new();
    secp.generate_keypair(&mut OsRng)
}

/// Deterministic keypair derived from `seed`, meant for tests and local
/// fixtures only.
pub fn generate_mock_account_keypair(seed: &[u8]) -> AccountKeypair {
    type H = secp256k1::hashes::sha256::Hash;

    let secp = Secp256k1::new();
    let secret_key = SecretKey::from_hashed_data::<H>(seed);
    let public_key = PublicKey::from_secret_key(&secp, &secret_key);
    (secret_key, public_key)
}

/// Address of the deterministic mock keypair for `seed`.
pub fn mock_address(seed: &[u8]) -> Address {
    let (_, public_key) = generate_mock_account_keypair(seed);
    Address::new(public_key)
}
