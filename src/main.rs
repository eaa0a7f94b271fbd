use anyhow::Result;
use hdkeyring::{AccountSequencer, Chain, Language, Mnemonic, MnemonicType};

fn main() -> Result<()> {
    // Example 1: Generate a fresh mnemonic and derive accounts on both chains
    println!("Example 1: Generate new mnemonic and accounts");
    println!("---------------------------------------------");

    let mnemonic = Mnemonic::generate(MnemonicType::Words12, Language::English)?;
    println!("Mnemonic: {}", mnemonic);

    let seed = mnemonic.to_seed("");
    let sequencer = AccountSequencer::new(&seed);

    for chain in Chain::ALL {
        for _ in 0..2 {
            let account = sequencer.next_account(chain)?;
            println!(
                "{} account {}: {}",
                account.chain, account.index, account.public_key
            );
        }
    }

    // Example 2: Import a known phrase; derivation is deterministic, so these
    // accounts match any standard-conforming wallet
    println!("\nExample 2: Import mnemonic and re-derive");
    println!("----------------------------------------");

    let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
    let mnemonic = Mnemonic::from_phrase(phrase, Language::English)?;
    println!("Mnemonic: {}", mnemonic);

    let sequencer = AccountSequencer::new(&mnemonic.to_seed(""));
    let solana = sequencer.next_account(Chain::Solana)?;
    let ethereum = sequencer.next_account(Chain::Ethereum)?;

    println!("Solana address:   {}", solana.public_key);
    println!("Ethereum address: {}", ethereum.public_key);

    Ok(())
}
