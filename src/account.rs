use crate::bip44::{AccountPath, CoinType};
use std::fmt;

/// The two supported chains, tagged by their curve family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Chain {
    /// Ed25519 chain (SLIP-0010 hardened-only derivation)
    Solana,
    /// secp256k1 chain (full BIP-32 derivation)
    Ethereum,
}

impl Chain {
    /// All supported chains, in counter-slot order
    pub const ALL: [Chain; 2] = [Chain::Solana, Chain::Ethereum];

    /// SLIP-44 coin type for this chain
    pub fn coin_type(&self) -> CoinType {
        match self {
            Chain::Solana => CoinType::SOLANA,
            Chain::Ethereum => CoinType::ETHEREUM,
        }
    }

    /// The depth-4 account path for a given account index on this chain
    pub fn account_path(&self, account: u32) -> AccountPath {
        match self {
            Chain::Solana => AccountPath::ed25519(self.coin_type(), account),
            Chain::Ethereum => AccountPath::secp256k1(self.coin_type(), account),
        }
    }

    /// Stable slot used for per-chain counters
    pub(crate) fn slot(&self) -> usize {
        match self {
            Chain::Solana => 0,
            Chain::Ethereum => 1,
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Chain::Solana => write!(f, "Solana"),
            Chain::Ethereum => write!(f, "Ethereum"),
        }
    }
}

/// One derived account: the chain tag, its sequential index, and the fully
/// encoded key strings.
///
/// Both strings come out of the chain adapter ready to display; callers
/// render them without further transformation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRecord {
    pub chain: Chain,
    pub index: u32,
    pub public_key: String,
    pub private_key: String,
}
