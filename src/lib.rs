// Deterministic multi-chain account derivation.
// This library implements BIP-39 mnemonic handling, BIP-32 (secp256k1) and
// SLIP-0010 (Ed25519) hierarchical derivation, and a sequential account
// generator over the two supported chains.

pub mod account;
pub mod bip32;
pub mod bip39;
pub mod bip44;
pub mod error;
pub mod ethereum;
pub mod sequencer;
pub mod slip10;
pub mod solana;
pub mod utils;
mod wordlist;

pub use account::{AccountRecord, Chain};
pub use bip32::{ChildNumber, DerivationPath, ExtendedPrivKey};
pub use bip39::{Language, Mnemonic, MnemonicType, Seed};
pub use bip44::{AccountLevel, AccountPath, CoinType, Purpose};
pub use error::Error;
pub use sequencer::AccountSequencer;
pub use slip10::DerivedKeyMaterial;

// Re-export types from dependencies that are part of our public API
pub use secp256k1::{self, PublicKey, Secp256k1, SecretKey};
