//! Key generation and address derivation.
//!
//! An identity is a secp256k1 keypair plus the P2PKH address derived
//! from the compressed public key: base58check over
//! `version || RIPEMD160(SHA256(pubkey))`. The remote ledger validates
//! addresses against exactly these rules, so the encoding here must
//! match the network's standard format bit for bit.

use ripemd::Ripemd160;
use secp256k1::rand::rngs::OsRng;
use secp256k1::rand::RngCore;
use secp256k1::{PublicKey, Secp256k1, SecretKey};
use sha2::{Digest, Sha256};

use crate::config::Network;
use crate::error::WalletError;

/// A user-controlled identity: keypair, derived address and the alias
/// it is stored under (empty while the identity is unsaved).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalletIdentity {
    pub alias: String,
    secret: SecretKey,
    public: PublicKey,
    pub address: String,
}

impl WalletIdentity {
    /// Generate a fresh identity from the OS entropy source.
    ///
    /// Fails only when the entropy source itself fails. The rare
    /// out-of-range draw is rejected and redrawn from the same source.
    pub fn generate(network: Network) -> Result<Self, WalletError> {
        let mut buf = [0u8; 32];
        loop {
            OsRng
                .try_fill_bytes(&mut buf)
                .map_err(|e| WalletError::KeyGeneration(e.to_string()))?;
            if let Ok(secret) = SecretKey::from_slice(&buf) {
                return Ok(Self::from_secret(String::new(), secret, network));
            }
        }
    }

    /// Rebuild an identity from a hex-encoded private key.
    pub fn from_private_hex(private_hex: &str, network: Network) -> Result<Self, WalletError> {
        let bytes = hex::decode(private_hex.trim())
            .map_err(|_| WalletError::InvalidKeyFormat("not valid hex".to_string()))?;
        if bytes.len() != 32 {
            return Err(WalletError::InvalidKeyFormat(format!(
                "expected 32 bytes, got {}",
                bytes.len()
            )));
        }
        let secret = SecretKey::from_slice(&bytes)
            .map_err(|_| WalletError::InvalidKeyFormat("not a valid curve scalar".to_string()))?;
        Ok(Self::from_secret(String::new(), secret, network))
    }

    fn from_secret(alias: String, secret: SecretKey, network: Network) -> Self {
        let secp = Secp256k1::new();
        let public = PublicKey::from_secret_key(&secp, &secret);
        let address = p2pkh_address(&public, network);
        Self {
            alias,
            secret,
            public,
            address,
        }
    }

    /// Rebuild an identity from stored record fields without
    /// re-deriving the address.
    pub(crate) fn from_stored_parts(
        alias: String,
        private_hex: &str,
        public_hex: &str,
        address: String,
    ) -> Option<Self> {
        let secret = SecretKey::from_slice(&hex::decode(private_hex).ok()?).ok()?;
        let public = PublicKey::from_slice(&hex::decode(public_hex).ok()?).ok()?;
        Some(Self {
            alias,
            secret,
            public,
            address,
        })
    }

    /// Private key as lowercase hex (64 chars), the persistence format.
    pub fn private_key_hex(&self) -> String {
        hex::encode(self.secret.secret_bytes())
    }

    /// Compressed public key as lowercase hex (66 chars).
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public.serialize())
    }

    pub(crate) fn secret_key(&self) -> &SecretKey {
        &self.secret
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }
}

/// Base58check P2PKH address for a compressed public key.
fn p2pkh_address(public: &PublicKey, network: Network) -> String {
    let sha = Sha256::digest(public.serialize());
    let pkh = Ripemd160::digest(sha);
    bs58::encode(pkh.as_slice())
        .with_check_version(network.p2pkh_version())
        .into_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Generator-point key: privkey 1.
    const PRIV_ONE: &str = "0000000000000000000000000000000000000000000000000000000000000001";
    const PUB_ONE: &str = "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";

    #[test]
    fn test_derivation_vector_mainnet() {
        let id = WalletIdentity::from_private_hex(PRIV_ONE, Network::Mainnet).unwrap();
        assert_eq!(id.private_key_hex(), PRIV_ONE);
        assert_eq!(id.public_key_hex(), PUB_ONE);
        assert_eq!(id.address, "LVuDpNCSSj6pQ7t9Pv6d6sUkLKoqDEVUnJ");
    }

    #[test]
    fn test_derivation_vector_testnet() {
        let id = WalletIdentity::from_private_hex(PRIV_ONE, Network::Testnet).unwrap();
        assert_eq!(id.address, "mrCDrCybB6J1vRfbwM5hemdJz73FwDBC8r");
    }

    #[test]
    fn test_derivation_second_vector() {
        let id = WalletIdentity::from_private_hex(
            "18e14a7b6a307f426a94f8114701e7c8e774e7f9a47e2c2035db29a206321725",
            Network::Mainnet,
        )
        .unwrap();
        assert_eq!(
            id.public_key_hex(),
            "0250863ad64a87ae8a2fe83c1af1a8403cb53f53e486d8511dad8a04887e5b2352"
        );
        assert_eq!(id.address, "LhavsnvcPEguCjzzuivpTFvYZ5vPWWHpbx");
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let a = WalletIdentity::from_private_hex(PRIV_ONE, Network::Mainnet).unwrap();
        let b = WalletIdentity::from_private_hex(PRIV_ONE, Network::Mainnet).unwrap();
        assert_eq!(a.public_key_hex(), b.public_key_hex());
        assert_eq!(a.address, b.address);
    }

    #[test]
    fn test_generate_round_trips_through_hex() {
        let id = WalletIdentity::generate(Network::Mainnet).unwrap();
        assert!(id.alias.is_empty());
        assert_eq!(id.private_key_hex().len(), 64);
        assert_eq!(id.public_key_hex().len(), 66);
        assert!(id.address.starts_with('L'));

        let reloaded =
            WalletIdentity::from_private_hex(&id.private_key_hex(), Network::Mainnet).unwrap();
        assert_eq!(reloaded.public_key_hex(), id.public_key_hex());
        assert_eq!(reloaded.address, id.address);
    }

    #[test]
    fn test_generate_produces_distinct_keys() {
        let a = WalletIdentity::generate(Network::Mainnet).unwrap();
        let b = WalletIdentity::generate(Network::Mainnet).unwrap();
        assert_ne!(a.private_key_hex(), b.private_key_hex());
        assert_ne!(a.address, b.address);
    }

    #[test]
    fn test_rejects_non_hex() {
        let err = WalletIdentity::from_private_hex("zz".repeat(32).as_str(), Network::Mainnet)
            .unwrap_err();
        assert!(matches!(err, WalletError::InvalidKeyFormat(_)));
    }

    #[test]
    fn test_rejects_wrong_length() {
        let err = WalletIdentity::from_private_hex(&"ab".repeat(31), Network::Mainnet).unwrap_err();
        assert!(matches!(err, WalletError::InvalidKeyFormat(_)));
    }

    #[test]
    fn test_rejects_out_of_range_scalars() {
        // Zero and the curve order are both invalid scalars.
        let zero = "00".repeat(32);
        let order = "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141";
        for key in [zero.as_str(), order] {
            let err = WalletIdentity::from_private_hex(key, Network::Mainnet).unwrap_err();
            assert!(matches!(err, WalletError::InvalidKeyFormat(_)));
        }
    }
}
