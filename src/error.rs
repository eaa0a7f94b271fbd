use thiserror::Error;

/// Error types for deterministic key derivation
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid seed: {0}")]
    InvalidSeed(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Invalid derivation path: {0}")]
    InvalidDerivationPath(String),

    #[error("Hardened derivation required: {0}")]
    HardenedDerivationRequired(String),

    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("Invalid entropy: {0}")]
    InvalidEntropy(String),

    #[error("Invalid word in mnemonic: {0}")]
    InvalidWord(String),

    #[error("Invalid checksum")]
    InvalidChecksum,

    #[error("Secure randomness source unavailable")]
    RandomnessUnavailable,

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Secp256k1 error: {0}")]
    Secp256k1(#[from] secp256k1::Error),
}
