//! Session state: per-chain account counters and the ordered record list.
//!
//! Derivation itself is pure; this is the only mutable state in the crate.
//! Each chain has its own counter lock, held across the whole
//! read-derive-append step so that concurrent calls for the same chain
//! serialize and indices come out 0, 1, 2, ... with no gaps or repeats.
//! Calls for different chains never contend.

use crate::account::{AccountRecord, Chain};
use crate::bip39::Seed;
use crate::error::Error;
use crate::{ethereum, solana};
use std::sync::Mutex;

/// Sequential account derivation over one active seed.
///
/// Replacing the seed invalidates everything derived from the old one:
/// records are cleared and both counters return to 0.
pub struct AccountSequencer {
    seed: Vec<u8>,
    counters: [Mutex<u32>; 2],
    accounts: Mutex<Vec<AccountRecord>>,
}

impl AccountSequencer {
    /// Create a sequencer for a freshly stretched seed, with both chains
    /// starting at index 0
    pub fn new(seed: &Seed) -> Self {
        AccountSequencer {
            seed: seed.as_bytes().to_vec(),
            counters: [Mutex::new(0), Mutex::new(0)],
            accounts: Mutex::new(Vec::new()),
        }
    }

    /// Replace the active seed. Clears every record and resets both
    /// counters; accounts from the previous seed are gone.
    pub fn set_seed(&mut self, seed: &Seed) {
        self.seed = seed.as_bytes().to_vec();
        self.reset();
    }

    /// Clear the record list and reset both per-chain counters to 0
    pub fn reset(&self) {
        for counter in &self.counters {
            *counter.lock().expect("sequencer counter lock poisoned") = 0;
        }
        self.accounts
            .lock()
            .expect("sequencer account lock poisoned")
            .clear();
    }

    /// Derive the next account for a chain.
    ///
    /// The chain's counter advances only after a successful derivation, so
    /// a failure consumes no index.
    pub fn next_account(&self, chain: Chain) -> Result<AccountRecord, Error> {
        let mut counter = self.counters[chain.slot()]
            .lock()
            .expect("sequencer counter lock poisoned");

        let record = match chain {
            Chain::Solana => solana::create_account(&self.seed, *counter)?,
            Chain::Ethereum => ethereum::create_account(&self.seed, *counter)?,
        };

        self.accounts
            .lock()
            .expect("sequencer account lock poisoned")
            .push(record.clone());
        *counter += 1;

        Ok(record)
    }

    /// The index the next `next_account` call for this chain will use
    pub fn next_index(&self, chain: Chain) -> u32 {
        *self.counters[chain.slot()]
            .lock()
            .expect("sequencer counter lock poisoned")
    }

    /// Snapshot of every record derived so far, in creation order
    pub fn accounts(&self) -> Vec<AccountRecord> {
        self.accounts
            .lock()
            .expect("sequencer account lock poisoned")
            .clone()
    }
}
