//! secp256k1 chain adapter.
//!
//! Walks the full BIP-32 tree (hardened and non-hardened steps) from the
//! binary seed and encodes the result the chain-standard way: an EIP-55
//! mixed-case checksummed hex address from the Keccak-256 hash of the
//! uncompressed public key, and a 0x-prefixed hex private scalar.

use crate::account::{AccountRecord, Chain};
use crate::bip32::ExtendedPrivKey;
use crate::error::Error;
use crate::utils;

/// Derive the account at `index` for the secp256k1 chain.
///
/// The path is `m/44'/60'/index'/0`; the final segment is non-hardened per
/// the chain's convention.
pub fn create_account(seed: &[u8], index: u32) -> Result<AccountRecord, Error> {
    if seed.len() != 64 {
        return Err(Error::InvalidSeed(format!(
            "Binary seed must be 64 bytes, got {}",
            seed.len()
        )));
    }

    let master = ExtendedPrivKey::new_master(seed)?;
    let path = Chain::Ethereum.account_path(index).to_derivation_path();
    let leaf = master.derive_path(&path)?;

    // Address = last 20 bytes of Keccak-256 over the uncompressed public
    // key without its 0x04 prefix
    let public_key = leaf.public_key().serialize_uncompressed();
    let hash = utils::keccak256(&public_key[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);

    Ok(AccountRecord {
        chain: Chain::Ethereum,
        index,
        public_key: checksum_address(&address),
        private_key: format!("0x{}", hex::encode(leaf.private_key.secret_bytes())),
    })
}

/// Encode 20 address bytes as an EIP-55 mixed-case checksummed hex string
pub fn checksum_address(address: &[u8; 20]) -> String {
    let lower = hex::encode(address);
    let hash = utils::keccak256(lower.as_bytes());

    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, ch) in lower.chars().enumerate() {
        // Uppercase a hex letter when the corresponding checksum nibble >= 8
        let nibble = (hash[i / 2] >> (4 * (1 - i % 2))) & 0x0f;
        if ch.is_ascii_alphabetic() && nibble >= 8 {
            out.push(ch.to_ascii_uppercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Decode a hex address back to its 20 raw bytes.
///
/// A mixed-case input must carry a valid EIP-55 checksum; an all-lowercase
/// or all-uppercase input is accepted without one.
pub fn parse_address(address: &str) -> Result<[u8; 20], Error> {
    let hex_part = address
        .strip_prefix("0x")
        .ok_or_else(|| Error::InvalidAddress("Address must start with 0x".to_string()))?;

    if hex_part.len() != 40 {
        return Err(Error::InvalidAddress(
            "Address must be 20 bytes of hex".to_string(),
        ));
    }

    let bytes: [u8; 20] = hex::decode(hex_part)
        .map_err(|_| Error::InvalidAddress("Invalid hex".to_string()))?
        .try_into()
        .expect("length checked above");

    let has_upper = hex_part.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = hex_part.chars().any(|c| c.is_ascii_lowercase());
    if has_upper && has_lower && checksum_address(&bytes) != address {
        return Err(Error::InvalidAddress("EIP-55 checksum mismatch".to_string()));
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bip39::{Language, Mnemonic};
    use hex_literal::hex;

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
        assert_eq!(record.chain, Chain::Ethereum);
        assert_eq!(record.index, 0);
        assert_eq!(
            record.public_key,
            "0xB8Fd42000d00202DCbCF5e18d6640d656345FD6A"
        );
        assert_eq!(
            record.private_key,
            "0xa29ac2cb17e31cdab42a8fe2d83f04f4b69c5e73bc8d3bf6b5dc96ac239b145a"
        );
    }

    #[test]
    fn test_create_account_index_1() {
        let record = create_account(&reference_seed(), 1).unwrap();
        assert_eq!(
            record.public_key,
            "0xefE95D823dAF0EDb954033078957689dAb656a7f"
        );
        assert_eq!(
            record.private_key,
            "0x22bb3713c03d085043103e571752cb04e1549c45272301ac0e6dabf480fc03c2"
        );
    }

    #[test]
    fn test_checksum_address_known_vectors() {
        // Examples from the EIP-55 specification
        for expected in [
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
            "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
            "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
            "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
        ] {
            let raw = parse_address(expected).unwrap();
            assert_eq!(checksum_address(&raw), expected);
        }
    }

    #[test]
    fn test_address_from_known_private_key() {
        // Well-known development key (Anvil/Hardhat account 0)
        use secp256k1::{PublicKey, Secp256k1, SecretKey};
        let secp = Secp256k1::new();
        let sk = SecretKey::from_slice(&hex!(
            "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"
        ))
        .unwrap();
        let pk = PublicKey::from_secret_key(&secp, &sk).serialize_uncompressed();
        let hash = utils::keccak256(&pk[1..]);
        let mut address = [0u8; 20];
        address.copy_from_slice(&hash[12..]);
        assert_eq!(
            checksum_address(&address),
            "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
        );
    }

    #[test]
    fn test_address_round_trip() {
        let record = create_account(&reference_seed(), 3).unwrap();
        let raw = parse_address(&record.public_key).unwrap();
        assert_eq!(checksum_address(&raw), record.public_key);
    }

    #[test]
    fn test_parse_address_rejects_bad_checksum() {
        // Correct hex digits, deliberately wrong case on one letter
        assert!(parse_address("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BEAed").is_err());
        // Case-insensitive forms pass without checksum
        assert!(parse_address("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").is_ok());
        assert!(parse_address("0x5AAEB6053F3E94C9B9A09F33669435E7EF1BEAED").is_ok());
    }

    #[test]
    fn test_parse_address_rejects_malformed_input() {
        assert!(parse_address("5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").is_err());
        assert!(parse_address("0x1234").is_err());
        assert!(parse_address("0xzzaeb6053f3e94c9b9a09f33669435e7ef1beaed").is_err());
    }

    #[test]
    fn test_wrong_seed_length_rejected() {
        assert!(matches!(
            create_account(&[0u8; 16], 0),
            Err(Error::InvalidSeed(_))
        ));
    }
}
