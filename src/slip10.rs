//! SLIP-0010 hierarchical derivation for the Ed25519 curve.
//!
//! Unlike the secp256k1 scheme in [`crate::bip32`], Ed25519 derivation is
//! hardened-only: a child key never depends on a parent public key, so a
//! non-hardened segment is a configuration error, not a derivable request.

use crate::bip32::DerivationPath;
use crate::error::Error;
use crate::utils;

/// HMAC key for the Ed25519 master node
const MASTER_KEY: &[u8] = b"ed25519 seed";

/// A 32-byte private key plus the chain code needed to derive its children.
///
/// Ephemeral output of one derivation walk; consumed immediately by a chain
/// adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedKeyMaterial {
    pub key: [u8; 32],
    pub chain_code: [u8; 32],
}

/// Derive the master node from a binary seed
pub fn master_key(seed: &[u8]) -> DerivedKeyMaterial {
    split(utils::hmac_sha512(MASTER_KEY, seed))
}

/// Walk a derivation path from the master node to its leaf.
///
/// Every segment must be hardened; the first non-hardened segment fails the
/// whole derivation with [`Error::HardenedDerivationRequired`].
pub fn derive(seed: &[u8], path: &DerivationPath) -> Result<DerivedKeyMaterial, Error> {
    let mut node = master_key(seed);

    for child in &path.path {
        if !child.is_hardened() {
            return Err(Error::HardenedDerivationRequired(format!(
                "Ed25519 derivation only supports hardened segments, got {}",
                child
            )));
        }
        node = derive_child(&node, child.to_u32());
    }

    Ok(node)
}

/// One hardened child step: split(HMAC-SHA512(chain_code, 0x00 || key || ser32(index)))
fn derive_child(parent: &DerivedKeyMaterial, index: u32) -> DerivedKeyMaterial {
    let mut data = Vec::with_capacity(37);
    data.push(0);
    data.extend_from_slice(&parent.key);
    data.extend_from_slice(&index.to_be_bytes());

    split(utils::hmac_sha512(&parent.chain_code, &data))
}

fn split(hmac_result: [u8; 64]) -> DerivedKeyMaterial {
    let mut key = [0u8; 32];
    let mut chain_code = [0u8; 32];
    key.copy_from_slice(&hmac_result[0..32]);
    chain_code.copy_from_slice(&hmac_result[32..64]);
    DerivedKeyMaterial { key, chain_code }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    // SLIP-0010 test vector 1 for Ed25519, seed 000102030405060708090a0b0c0d0e0f
    const VECTOR_1_SEED: [u8; 16] = hex!("000102030405060708090a0b0c0d0e0f");

    #[test]
    fn test_master_key_vector_1() {
        let node = master_key(&VECTOR_1_SEED);
        assert_eq!(
            node.key,
            hex!("2b4be7f19ee27bbf30c667b642d5f4aa69fd169872f8fc3059c08ebae2eb19e7")
        );
        assert_eq!(
            node.chain_code,
            hex!("90046a93de5380a72b5e45010748567d5ea02bbf6522f979e05c0d8d8ca9fffb")
        );
    }

    #[test]
    fn test_hardened_child_vector_1() {
        let path = DerivationPath::from_str("m/0'").unwrap();
        let node = derive(&VECTOR_1_SEED, &path).unwrap();
        assert_eq!(
            node.key,
            hex!("68e0fe46dfb67e368c75379acec591dad19df3cde26e63b93a8e704f1dade7a3")
        );
        assert_eq!(
            node.chain_code,
            hex!("8b59aa11380b624e81507a27fedda59fea6d0b779a778918a2fd3590e16e9c69")
        );
    }

    #[test]
    fn test_non_hardened_segment_rejected() {
        let path = DerivationPath::from_str("m/44'/501'/0'/0").unwrap();
        assert!(matches!(
            derive(&VECTOR_1_SEED, &path),
            Err(Error::HardenedDerivationRequired(_))
        ));
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let path = DerivationPath::from_str("m/44'/501'/0'/0'").unwrap();
        let a = derive(&VECTOR_1_SEED, &path).unwrap();
        let b = derive(&VECTOR_1_SEED, &path).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_sibling_accounts_diverge() {
        let a = derive(&VECTOR_1_SEED, &DerivationPath::from_str("m/44'/501'/0'/0'").unwrap());
        let b = derive(&VECTOR_1_SEED, &DerivationPath::from_str("m/44'/501'/1'/0'").unwrap());
        assert_ne!(a.unwrap().key, b.unwrap().key);
    }
}
