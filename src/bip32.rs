use crate::error::Error;
use crate::utils;
use secp256k1::{PublicKey, Secp256k1, SecretKey};
use std::fmt;
use std::str::FromStr;

/// A path element in a derivation path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildNumber {
    /// Normal derivation index (0..2^31-1)
    Normal(u32),
    /// Hardened derivation index (2^31..2^32-1)
    Hardened(u32),
}

impl ChildNumber {
    /// Maximum normal index
    pub const MAX_NORMAL_INDEX: u32 = 0x7fffffff;

    /// Convert to raw index value
    pub fn to_u32(&self) -> u32 {
        match self {
            ChildNumber::Normal(i) => *i,
            // Mask rather than add so an out-of-range hardened index cannot
            // overflow; the high bit is the hardened marker either way
            ChildNumber::Hardened(i) => i | (ChildNumber::MAX_NORMAL_INDEX + 1),
        }
    }

    /// Check if the child number is hardened
    pub fn is_hardened(&self) -> bool {
        match self {
            ChildNumber::Normal(_) => false,
            ChildNumber::Hardened(_) => true,
        }
    }
}

impl fmt::Display for ChildNumber {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ChildNumber::Normal(i) => write!(f, "{}", i),
            ChildNumber::Hardened(i) => write!(f, "{}'", i),
        }
    }
}

impl FromStr for ChildNumber {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.ends_with('\'') || s.ends_with('h') {
            let index: u32 = s[..s.len() - 1]
                .parse()
                .map_err(|_| Error::InvalidDerivationPath("Invalid hardened index".to_string()))?;

            if index > ChildNumber::MAX_NORMAL_INDEX {
                return Err(Error::InvalidDerivationPath(
                    "Hardened index out of range".to_string(),
                ));
            }

            Ok(ChildNumber::Hardened(index))
        } else {
            let index: u32 = s
                .parse()
                .map_err(|_| Error::InvalidDerivationPath("Invalid normal index".to_string()))?;

            if index > ChildNumber::MAX_NORMAL_INDEX {
                return Err(Error::InvalidDerivationPath(
                    "Normal index out of range".to_string(),
                ));
            }

            Ok(ChildNumber::Normal(index))
        }
    }
}

/// A BIP-32 derivation path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivationPath {
    pub path: Vec<ChildNumber>,
}

impl DerivationPath {
    /// Create a new derivation path from a string (e.g., "m/44'/60'/0'/0")
    pub fn from_str(path: &str) -> Result<Self, Error> {
        if !path.starts_with('m') {
            return Err(Error::InvalidDerivationPath(
                "Path must start with 'm'".to_string(),
            ));
        }

        // Skip "m" and possibly "/"
        let path_str = if path.starts_with("m/") {
            &path[2..]
        } else if path == "m" {
            return Ok(DerivationPath { path: vec![] });
        } else {
            return Err(Error::InvalidDerivationPath(
                "Invalid path format".to_string(),
            ));
        };

        let path: Result<Vec<ChildNumber>, Error> = path_str
            .split('/')
            .filter(|p| !p.is_empty())
            .map(|p| p.parse::<ChildNumber>())
            .collect();

        Ok(DerivationPath { path: path? })
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "m")?;
        for child in &self.path {
            write!(f, "/{}", child)?;
        }
        Ok(())
    }
}

impl FromStr for DerivationPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DerivationPath::from_str(s)
    }
}

/// One node of the secp256k1 derivation tree: a private key plus its
/// chain code, as defined in BIP-32
#[derive(Debug, Clone)]
pub struct ExtendedPrivKey {
    pub depth: u8,
    pub child_number: u32,
    pub chain_code: [u8; 32],
    pub private_key: SecretKey,
}

impl ExtendedPrivKey {
    /// Create a new master extended private key from a seed
    pub fn new_master(seed: &[u8]) -> Result<Self, Error> {
        if seed.len() < 16 {
            return Err(Error::InvalidSeed(
                "Seed must be at least 16 bytes".to_string(),
            ));
        }

        let hmac_result = utils::hmac_sha512("Bitcoin seed".as_bytes(), seed);

        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&hmac_result[32..64]);

        let private_key = SecretKey::from_slice(&hmac_result[0..32])
            .map_err(|_| Error::InvalidKey("Invalid master key from seed".to_string()))?;

        Ok(ExtendedPrivKey {
            depth: 0,
            child_number: 0,
            chain_code,
            private_key,
        })
    }

    /// Derive a child key (CKDpriv).
    ///
    /// On the (cryptographically negligible) chance that a step yields key
    /// material outside the curve order, BIP-32 says to proceed with the
    /// next index; that retry happens here and is never visible to callers.
    pub fn derive_child(&self, child_number: ChildNumber) -> Result<ExtendedPrivKey, Error> {
        let hardened = child_number.is_hardened();
        let mut index = child_number.to_u32();

        loop {
            match self.ckd_priv(index, hardened) {
                Ok(child) => return Ok(child),
                Err(Error::InvalidKey(_)) => {
                    index = index.checked_add(1).ok_or_else(|| {
                        Error::InvalidKey("Child index space exhausted".to_string())
                    })?;
                    if !hardened && index > ChildNumber::MAX_NORMAL_INDEX {
                        return Err(Error::InvalidKey(
                            "Child index space exhausted".to_string(),
                        ));
                    }
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// One CKDpriv attempt at a raw index
    fn ckd_priv(&self, index: u32, hardened: bool) -> Result<ExtendedPrivKey, Error> {
        let mut hmac_input = Vec::with_capacity(37);

        if hardened {
            // Hardened derivation: data = 0x00 || private_key || index
            hmac_input.push(0);
            hmac_input.extend_from_slice(&self.private_key.secret_bytes());
        } else {
            // Normal derivation: data = public_key || index
            hmac_input.extend_from_slice(&self.public_key().serialize());
        }

        hmac_input.extend_from_slice(&index.to_be_bytes());

        // I = HMAC-SHA512(chain_code, hmac_input)
        let hmac_result = utils::hmac_sha512(&self.chain_code, &hmac_input);

        // Split I into I_L and I_R (left 32 bytes, right 32 bytes)
        let mut i_r = [0u8; 32];
        i_r.copy_from_slice(&hmac_result[32..64]);

        // Child key = (I_L + parent_key) mod n
        let child_private_key = SecretKey::from_slice(&hmac_result[0..32])
            .map_err(|_| Error::InvalidKey("Invalid HMAC-SHA512 left half".to_string()))?
            .add_tweak(&self.private_key.into())
            .map_err(|_| Error::InvalidKey("Invalid child private key".to_string()))?;

        Ok(ExtendedPrivKey {
            depth: self.depth + 1,
            child_number: index,
            chain_code: i_r,
            private_key: child_private_key,
        })
    }

    /// Derive a child key from a derivation path
    pub fn derive_path(&self, path: &DerivationPath) -> Result<ExtendedPrivKey, Error> {
        let mut key = self.clone();

        for &child_number in &path.path {
            key = key.derive_child(child_number)?;
        }

        Ok(key)
    }

    /// Get the public key for this node
    pub fn public_key(&self) -> PublicKey {
        let secp = Secp256k1::new();
        PublicKey::from_secret_key(&secp, &self.private_key)
    }
}
