//! Ed25519 chain adapter.
//!
//! Expands SLIP-0010 leaf material into an Ed25519 keypair and encodes it
//! the way the target chain's wallets do: the address is the raw 32-byte
//! public key in base58 (no checksum, no version byte), the exportable
//! secret is the 64-byte `seed || public` keypair in base64. The encoding
//! asymmetry is inherited reference behavior; see DESIGN.md.

use crate::account::{AccountRecord, Chain};
use crate::error::Error;
use crate::slip10;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use ed25519_dalek::SigningKey;

/// Derive the account at `index` for the Ed25519 chain.
///
/// The path is `m/44'/501'/index'/0'`, every segment hardened. Deterministic;
/// the only failure mode for well-formed input is a seed of the wrong length.
pub fn create_account(seed: &[u8], index: u32) -> Result<AccountRecord, Error> {
    if seed.len() != 64 {
        return Err(Error::InvalidSeed(format!(
            "Binary seed must be 64 bytes, got {}",
            seed.len()
        )));
    }

    let path = Chain::Solana.account_path(index).to_derivation_path();
    let material = slip10::derive(seed, &path)?;

    // Standard Ed25519 key expansion: clamping and public-point computation
    let signing_key = SigningKey::from_bytes(&material.key);
    let public_key = signing_key.verifying_key().to_bytes();
    let keypair = signing_key.to_keypair_bytes();

    Ok(AccountRecord {
        chain: Chain::Solana,
        index,
        public_key: bs58::encode(public_key).into_string(),
        private_key: BASE64.encode(keypair),
    })
}

/// Decode a base58 address back to the raw 32-byte public key
pub fn parse_address(address: &str) -> Result<[u8; 32], Error> {
    let bytes = bs58::decode(address)
        .into_vec()
        .map_err(|_| Error::InvalidAddress("Invalid base58 string".to_string()))?;

    bytes
        .try_into()
        .map_err(|_| Error::InvalidAddress("Address must decode to 32 bytes".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bip39::{Language, Mnemonic};

    const REFERENCE_PHRASE: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    fn reference_seed() -> Vec<u8> {
        Mnemonic::from_phrase(REFERENCE_PHRASE, Language::English)
            .unwrap()
            .to_seed("")
            .as_bytes()
            .to_vec()
    }

    #[test]
    fn test_create_account_index_0() {
        let record = create_account(&reference_seed(), 0).unwrap();
        assert_eq!(record.chain, Chain::Solana);
        assert_eq!(record.index, 0);
        assert_eq!(
            record.public_key,
            "HAgk14JpMQLgt6rVgv7cBQFJWFto5Dqxi472uT3DKpqk"
        );
        assert_eq!(
            record.private_key,
            "N99XOzrErVtSLgZOJbY+oWvL551EnoGgJo0QR5SLtEXwNidiRqdbneM0ntQrFeIy9lGPwg9fzU8dZOgfm9JY9w=="
        );
    }

    #[test]
    fn test_create_account_index_1() {
        let record = create_account(&reference_seed(), 1).unwrap();
        assert_eq!(
            record.public_key,
            "Hh8QwFUA6MtVu1qAoq12ucvFHNwCcVTV7hpWjeY1Hztb"
        );
        assert_eq!(
            record.private_key,
            "ul57bjaAtOuB245UyORmsumomTVYiEAzVdhYq5hdL8T4AprPXLy91axG7BR/O3ij325QIu8EEdsrq2UNMppM1A=="
        );
    }

    #[test]
    fn test_secret_embeds_public_key() {
        let record = create_account(&reference_seed(), 0).unwrap();
        let keypair = BASE64.decode(&record.private_key).unwrap();
        assert_eq!(keypair.len(), 64);
        assert_eq!(
            &keypair[32..],
            &parse_address(&record.public_key).unwrap()[..]
        );
    }

    #[test]
    fn test_address_round_trip() {
        let record = create_account(&reference_seed(), 2).unwrap();
        let raw = parse_address(&record.public_key).unwrap();
        assert_eq!(bs58::encode(raw).into_string(), record.public_key);
    }

    #[test]
    fn test_wrong_seed_length_rejected() {
        assert!(matches!(
            create_account(&[0u8; 32], 0),
            Err(Error::InvalidSeed(_))
        ));
        assert!(matches!(
            create_account(&[0u8; 65], 0),
            Err(Error::InvalidSeed(_))
        ));
    }

    #[test]
    fn test_parse_address_rejects_garbage() {
        assert!(parse_address("not-base58-0OIl").is_err());
        // Valid base58 but wrong decoded length
        assert!(parse_address("3yZe7d").is_err());
    }
}
