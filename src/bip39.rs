use crate::error::Error;
use crate::utils;
use crate::wordlist;
use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha512;
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Number of PBKDF2 rounds for the mnemonic-to-seed stretch
const PBKDF2_ROUNDS: u32 = 2048;

/// Supported wordlist languages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
}

impl Language {
    /// Get the wordlist for this language
    pub fn wordlist(&self) -> &'static [&'static str; 2048] {
        match self {
            Language::English => &wordlist::WORDS,
        }
    }
}

/// Mnemonic length, tied to the entropy it encodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MnemonicType {
    /// 12 words (128 bits of entropy)
    Words12,
    /// 15 words (160 bits of entropy)
    Words15,
    /// 18 words (192 bits of entropy)
    Words18,
    /// 21 words (224 bits of entropy)
    Words21,
    /// 24 words (256 bits of entropy)
    Words24,
}

impl MnemonicType {
    /// Entropy length in bits
    pub fn entropy_bits(&self) -> usize {
        match self {
            MnemonicType::Words12 => 128,
            MnemonicType::Words15 => 160,
            MnemonicType::Words18 => 192,
            MnemonicType::Words21 => 224,
            MnemonicType::Words24 => 256,
        }
    }

    /// Checksum length in bits (one bit per 32 bits of entropy)
    pub fn checksum_bits(&self) -> usize {
        self.entropy_bits() / 32
    }

    /// Number of words in the phrase
    pub fn word_count(&self) -> usize {
        (self.entropy_bits() + self.checksum_bits()) / 11
    }

    /// Look up the type for an entropy length in bits
    pub fn from_entropy_bits(bits: usize) -> Result<Self, Error> {
        match bits {
            128 => Ok(MnemonicType::Words12),
            160 => Ok(MnemonicType::Words15),
            192 => Ok(MnemonicType::Words18),
            224 => Ok(MnemonicType::Words21),
            256 => Ok(MnemonicType::Words24),
            _ => Err(Error::InvalidEntropy(format!(
                "Entropy must be 128, 160, 192, 224 or 256 bits, got {}",
                bits
            ))),
        }
    }

    /// Look up the type for a word count
    pub fn from_word_count(count: usize) -> Result<Self, Error> {
        match count {
            12 => Ok(MnemonicType::Words12),
            15 => Ok(MnemonicType::Words15),
            18 => Ok(MnemonicType::Words18),
            21 => Ok(MnemonicType::Words21),
            24 => Ok(MnemonicType::Words24),
            _ => Err(Error::InvalidMnemonic(format!(
                "Phrase must have 12, 15, 18, 21 or 24 words, got {}",
                count
            ))),
        }
    }
}

/// A BIP-39 mnemonic phrase: entropy plus checksum mapped onto the wordlist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mnemonic {
    phrase: String,
    language: Language,
}

impl Mnemonic {
    /// Generate a new mnemonic from operating-system randomness.
    ///
    /// Fails with [`Error::RandomnessUnavailable`] if the OS entropy source
    /// cannot be read; there is no fallback to a weaker source.
    pub fn generate(mnemonic_type: MnemonicType, language: Language) -> Result<Self, Error> {
        let entropy_bytes = mnemonic_type.entropy_bits() / 8;
        let mut entropy = [0u8; 32];
        OsRng
            .try_fill_bytes(&mut entropy[..entropy_bytes])
            .map_err(|_| Error::RandomnessUnavailable)?;

        Self::from_entropy(&entropy[..entropy_bytes], language)
    }

    /// Create a mnemonic from raw entropy bytes
    pub fn from_entropy(entropy: &[u8], language: Language) -> Result<Self, Error> {
        let mnemonic_type = MnemonicType::from_entropy_bits(entropy.len() * 8)?;
        let checksum_bits = mnemonic_type.checksum_bits();
        let word_count = mnemonic_type.word_count();

        // The checksum is the first checksum_bits of SHA256(entropy),
        // appended to the entropy bit stream.
        let hash = utils::sha256(entropy);
        let mut combined = entropy.to_vec();
        combined.push(hash[0]);

        // Read 11-bit wordlist indices from the combined stream, MSB first
        let wordlist = language.wordlist();
        let mut words = Vec::with_capacity(word_count);
        let mut buffer = 0u32;
        let mut bits = 0usize;
        for &byte in &combined {
            buffer = (buffer << 8) | byte as u32;
            bits += 8;
            while bits >= 11 && words.len() < word_count {
                let index = ((buffer >> (bits - 11)) & 0x7FF) as usize;
                words.push(wordlist[index]);
                bits -= 11;
            }
        }
        debug_assert_eq!(words.len(), word_count);
        debug_assert!(checksum_bits <= 8);

        Ok(Mnemonic {
            phrase: words.join(" "),
            language,
        })
    }

    /// Parse and validate a candidate phrase.
    ///
    /// Whitespace is collapsed and words lowercased before validation, so a
    /// phrase that round-trips through a text field still parses.
    pub fn from_phrase(phrase: &str, language: Language) -> Result<Self, Error> {
        let words: Vec<String> = phrase
            .split_whitespace()
            .map(|w| w.to_lowercase())
            .collect();

        let mnemonic_type = MnemonicType::from_word_count(words.len())?;
        let wordlist = language.wordlist();

        let indices: Vec<usize> = words
            .iter()
            .map(|word| {
                wordlist
                    .binary_search(&word.as_str())
                    .map_err(|_| Error::InvalidWord(word.clone()))
            })
            .collect::<Result<_, _>>()?;

        // Rebuild the entropy and verify the embedded checksum
        let entropy = Self::indices_to_entropy(&indices, mnemonic_type)?;
        let checksum_bits = mnemonic_type.checksum_bits();
        let expected = utils::sha256(&entropy)[0] >> (8 - checksum_bits);
        let provided = Self::indices_checksum(&indices, mnemonic_type);
        if provided != expected {
            return Err(Error::InvalidChecksum);
        }

        Ok(Mnemonic {
            phrase: words.join(" "),
            language,
        })
    }

    /// Checksum-validate a candidate phrase without constructing a mnemonic.
    ///
    /// Malformed input of any kind (wrong length, unknown words, checksum
    /// mismatch) yields `false`, never an error.
    pub fn validate(phrase: &str, language: Language) -> bool {
        Self::from_phrase(phrase, language).is_ok()
    }

    /// Get the phrase as a single space-separated string
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Get the language
    pub fn language(&self) -> Language {
        self.language
    }

    /// Recover the entropy this mnemonic encodes
    pub fn to_entropy(&self) -> Result<Vec<u8>, Error> {
        let wordlist = self.language.wordlist();
        let indices: Vec<usize> = self
            .phrase
            .split_whitespace()
            .map(|word| {
                wordlist
                    .binary_search(&word)
                    .map_err(|_| Error::InvalidWord(word.to_string()))
            })
            .collect::<Result<_, _>>()?;
        let mnemonic_type = MnemonicType::from_word_count(indices.len())?;
        Self::indices_to_entropy(&indices, mnemonic_type)
    }

    /// Stretch the mnemonic into a 64-byte binary seed.
    ///
    /// PBKDF2-HMAC-SHA512 with 2048 rounds, salt `"mnemonic" + passphrase`,
    /// NFKD normalization of both inputs. Deterministic: the same phrase and
    /// passphrase always produce the same seed. Pass `""` for no passphrase.
    pub fn to_seed(&self, passphrase: &str) -> Seed {
        let normalized_phrase: String = self.phrase.nfkd().collect();
        let salt: String = format!("mnemonic{}", passphrase).nfkd().collect();

        let mut seed = [0u8; 64];
        pbkdf2_hmac::<Sha512>(
            normalized_phrase.as_bytes(),
            salt.as_bytes(),
            PBKDF2_ROUNDS,
            &mut seed,
        );

        Seed(seed)
    }

    fn indices_to_entropy(
        indices: &[usize],
        mnemonic_type: MnemonicType,
    ) -> Result<Vec<u8>, Error> {
        let entropy_bytes = mnemonic_type.entropy_bits() / 8;
        let mut entropy = Vec::with_capacity(entropy_bytes);
        let mut buffer = 0u32;
        let mut bits = 0usize;
        for &index in indices {
            buffer = (buffer << 11) | index as u32;
            bits += 11;
            while bits >= 8 && entropy.len() < entropy_bytes {
                entropy.push((buffer >> (bits - 8)) as u8);
                bits -= 8;
            }
        }
        if entropy.len() != entropy_bytes {
            return Err(Error::InvalidEntropy(
                "Phrase does not encode a whole number of entropy bytes".to_string(),
            ));
        }
        Ok(entropy)
    }

    fn indices_checksum(indices: &[usize], mnemonic_type: MnemonicType) -> u8 {
        let checksum_bits = mnemonic_type.checksum_bits();
        // The checksum occupies the lowest checksum_bits of the final index
        let mask = (1u32 << checksum_bits) - 1;
        (indices[indices.len() - 1] as u32 & mask) as u8
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.phrase)
    }
}

/// A 64-byte binary seed derived from a mnemonic via PBKDF2.
///
/// Always recomputed from the phrase; never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct Seed([u8; 64]);

impl Seed {
    /// Borrow the raw seed bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Key material stays out of logs
        write!(f, "Seed([redacted; 64])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    const REFERENCE_PHRASE: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_from_entropy_reference() {
        let mnemonic = Mnemonic::from_entropy(&[0u8; 16], Language::English).unwrap();
        assert_eq!(mnemonic.phrase(), REFERENCE_PHRASE);
    }

    #[test]
    fn test_to_entropy_round_trip() {
        let entropy = hex!("7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f");
        let mnemonic = Mnemonic::from_entropy(&entropy, Language::English).unwrap();
        assert_eq!(mnemonic.to_entropy().unwrap(), entropy);
    }

    #[test]
    fn test_generate_validates_for_all_types() {
        for ty in [
            MnemonicType::Words12,
            MnemonicType::Words15,
            MnemonicType::Words18,
            MnemonicType::Words21,
            MnemonicType::Words24,
        ] {
            let mnemonic = Mnemonic::generate(ty, Language::English).unwrap();
            assert_eq!(mnemonic.phrase().split_whitespace().count(), ty.word_count());
            assert!(Mnemonic::validate(mnemonic.phrase(), Language::English));
        }
    }

    #[test]
    fn test_validate_rejects_malformed_input() {
        // Wrong length
        assert!(!Mnemonic::validate("abandon abandon abandon", Language::English));
        // Word outside the wordlist
        assert!(!Mnemonic::validate(
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon notaword",
            Language::English
        ));
        // Valid words, broken checksum
        assert!(!Mnemonic::validate(
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon",
            Language::English
        ));
        assert!(Mnemonic::validate(REFERENCE_PHRASE, Language::English));
    }

    #[test]
    fn test_from_phrase_normalizes_whitespace_and_case() {
        let messy = "  Abandon  abandon ABANDON abandon abandon abandon abandon abandon abandon abandon abandon about ";
        let mnemonic = Mnemonic::from_phrase(messy, Language::English).unwrap();
        assert_eq!(mnemonic.phrase(), REFERENCE_PHRASE);
    }

    #[test]
    fn test_to_seed_reference_vectors() {
        let mnemonic = Mnemonic::from_phrase(REFERENCE_PHRASE, Language::English).unwrap();

        let seed = mnemonic.to_seed("");
        assert_eq!(
            seed.as_bytes(),
            hex!(
                "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc1"
                "9a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4"
            )
        );

        let seed = mnemonic.to_seed("TREZOR");
        assert_eq!(
            seed.as_bytes(),
            hex!(
                "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e5349553"
                "1f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04"
            )
        );
    }

    #[test]
    fn test_to_seed_deterministic() {
        let mnemonic = Mnemonic::generate(MnemonicType::Words12, Language::English).unwrap();
        assert_eq!(mnemonic.to_seed(""), mnemonic.to_seed(""));
        assert_ne!(mnemonic.to_seed(""), mnemonic.to_seed("25th word"));
    }

    #[test]
    fn test_unique_generation() {
        let a = Mnemonic::generate(MnemonicType::Words12, Language::English).unwrap();
        let b = Mnemonic::generate(MnemonicType::Words12, Language::English).unwrap();
        assert_ne!(a.phrase(), b.phrase());
    }

    #[test]
    fn test_seed_debug_is_redacted() {
        let mnemonic = Mnemonic::from_phrase(REFERENCE_PHRASE, Language::English).unwrap();
        let debug = format!("{:?}", mnemonic.to_seed(""));
        assert!(!debug.contains("5eb00bbd"));
    }
}
