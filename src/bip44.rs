use crate::bip32::{ChildNumber, DerivationPath};
use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// Purpose constant as defined in BIP-44
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Purpose(pub u32);

impl Purpose {
    /// BIP-44 purpose (44')
    pub const BIP44: Purpose = Purpose(44);

    /// Get the derivation path element
    pub fn child_number(&self) -> ChildNumber {
        ChildNumber::Hardened(self.0)
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}'", self.0)
    }
}

/// Coin type as registered in SLIP-44
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoinType(pub u32);

impl CoinType {
    /// Ethereum (60')
    pub const ETHEREUM: CoinType = CoinType(60);
    /// Solana (501')
    pub const SOLANA: CoinType = CoinType(501);

    /// Get the derivation path element
    pub fn child_number(&self) -> ChildNumber {
        ChildNumber::Hardened(self.0)
    }
}

impl fmt::Display for CoinType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}'", self.0)
    }
}

/// Account level as defined in BIP-44; the sequential per-chain index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountLevel(pub u32);

impl AccountLevel {
    /// Get the derivation path element
    pub fn child_number(&self) -> ChildNumber {
        ChildNumber::Hardened(self.0)
    }
}

impl fmt::Display for AccountLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}'", self.0)
    }
}

/// A depth-4 account derivation path:
/// m / purpose' / coin_type' / account' / change
///
/// The change segment is hardened for Ed25519 chains (SLIP-0010 requires
/// every segment hardened) and normal for secp256k1 chains (the BIP-44
/// external-chain convention).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountPath {
    /// Purpose (hardened)
    pub purpose: Purpose,
    /// Coin type (hardened)
    pub coin_type: CoinType,
    /// Account index (hardened)
    pub account: AccountLevel,
    /// External-chain marker; hardening depends on the curve family
    pub change: ChildNumber,
}

impl AccountPath {
    /// Account path for an Ed25519 chain: every segment hardened
    pub fn ed25519(coin_type: CoinType, account: u32) -> Self {
        AccountPath {
            purpose: Purpose::BIP44,
            coin_type,
            account: AccountLevel(account),
            change: ChildNumber::Hardened(0),
        }
    }

    /// Account path for a secp256k1 chain: final segment non-hardened
    pub fn secp256k1(coin_type: CoinType, account: u32) -> Self {
        AccountPath {
            purpose: Purpose::BIP44,
            coin_type,
            account: AccountLevel(account),
            change: ChildNumber::Normal(0),
        }
    }

    /// Convert to a BIP-32 derivation path
    pub fn to_derivation_path(&self) -> DerivationPath {
        DerivationPath {
            path: vec![
                self.purpose.child_number(),
                self.coin_type.child_number(),
                self.account.child_number(),
                self.change,
            ],
        }
    }
}

impl FromStr for AccountPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = DerivationPath::from_str(s)?;

        if path.path.len() != 4 {
            return Err(Error::InvalidDerivationPath(
                "Account path must have 4 components".to_string(),
            ));
        }

        let purpose = match path.path[0] {
            ChildNumber::Hardened(n) => Purpose(n),
            _ => {
                return Err(Error::InvalidDerivationPath(
                    "Purpose must be hardened".to_string(),
                ))
            }
        };

        let coin_type = match path.path[1] {
            ChildNumber::Hardened(n) => CoinType(n),
            _ => {
                return Err(Error::InvalidDerivationPath(
                    "Coin type must be hardened".to_string(),
                ))
            }
        };

        let account = match path.path[2] {
            ChildNumber::Hardened(n) => AccountLevel(n),
            _ => {
                return Err(Error::InvalidDerivationPath(
                    "Account must be hardened".to_string(),
                ))
            }
        };

        let change = match path.path[3] {
            ChildNumber::Normal(0) | ChildNumber::Hardened(0) => path.path[3],
            _ => {
                return Err(Error::InvalidDerivationPath(
                    "Change must be 0 or 0'".to_string(),
                ))
            }
        };

        Ok(AccountPath {
            purpose,
            coin_type,
            account,
            change,
        })
    }
}

impl fmt::Display for AccountPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "m/{}/{}/{}/{}",
            self.purpose, self.coin_type, self.account, self.change
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ed25519_account_path() {
        let path = AccountPath::ed25519(CoinType::SOLANA, 3);
        assert_eq!(path.to_string(), "m/44'/501'/3'/0'");
        assert!(path
            .to_derivation_path()
            .path
            .iter()
            .all(|c| c.is_hardened()));
    }

    #[test]
    fn test_secp256k1_account_path() {
        let path = AccountPath::secp256k1(CoinType::ETHEREUM, 0);
        assert_eq!(path.to_string(), "m/44'/60'/0'/0");
        assert_eq!(path.to_derivation_path().path[3], ChildNumber::Normal(0));
    }

    #[test]
    fn test_parse_round_trip() {
        for s in ["m/44'/501'/7'/0'", "m/44'/60'/2'/0"] {
            let path: AccountPath = s.parse().unwrap();
            assert_eq!(path.to_string(), s);
        }
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        assert!("m/44'/60'/0'/0/0".parse::<AccountPath>().is_err());
        assert!("m/44/60'/0'/0".parse::<AccountPath>().is_err());
        assert!("m/44'/60/0'/0".parse::<AccountPath>().is_err());
        assert!("m/44'/60'/0/0".parse::<AccountPath>().is_err());
        assert!("m/44'/60'/0'/1".parse::<AccountPath>().is_err());
    }
}
