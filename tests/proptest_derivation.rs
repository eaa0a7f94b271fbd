use hdkeyring::{ethereum, solana, AccountPath, Chain, Language, Mnemonic};
use proptest::prelude::*;

proptest! {
    #[test]
    fn mnemonics_from_any_entropy_validate(entropy in prop::array::uniform16(any::<u8>())) {
        let mnemonic = Mnemonic::from_entropy(&entropy, Language::English).unwrap();
        prop_assert!(Mnemonic::validate(mnemonic.phrase(), Language::English));
        prop_assert_eq!(mnemonic.to_entropy().unwrap(), entropy.to_vec());
    }

    #[test]
    fn mnemonics_from_max_entropy_validate(entropy in prop::array::uniform32(any::<u8>())) {
        let mnemonic = Mnemonic::from_entropy(&entropy, Language::English).unwrap();
        prop_assert!(Mnemonic::validate(mnemonic.phrase(), Language::English));
        prop_assert_eq!(mnemonic.to_entropy().unwrap(), entropy.to_vec());
    }

    #[test]
    fn base58_address_round_trips(raw in prop::array::uniform32(any::<u8>())) {
        let encoded = bs58::encode(raw).into_string();
        prop_assert_eq!(solana::parse_address(&encoded).unwrap(), raw);
    }

    #[test]
    fn eip55_address_round_trips(raw in prop::array::uniform20(any::<u8>())) {
        let encoded = ethereum::checksum_address(&raw);
        prop_assert_eq!(ethereum::parse_address(&encoded).unwrap(), raw);
    }

    #[test]
    fn account_paths_round_trip_through_strings(index in 0u32..=0x7fffffff) {
        for chain in Chain::ALL {
            let path = chain.account_path(index);
            let parsed: AccountPath = path.to_string().parse().unwrap();
            prop_assert_eq!(parsed, path);
        }
    }
}

proptest! {
    // Each case runs the full PBKDF2 stretch twice; keep the count down
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn seed_stretch_is_deterministic(entropy in prop::array::uniform16(any::<u8>()), pass in "[a-z]{0,8}") {
        let mnemonic = Mnemonic::from_entropy(&entropy, Language::English).unwrap();
        prop_assert_eq!(mnemonic.to_seed(&pass), mnemonic.to_seed(&pass));
    }
}
