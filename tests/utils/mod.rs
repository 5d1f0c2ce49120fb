#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use presale_client::chain::ChainClient;
use presale_client::types::{PresaleConfig, PresaleParams};
use presale_client::{Error, Result};
use solana_sdk::{
    instruction::Instruction,
    pubkey,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
};

pub const MINTER_PROGRAM: Pubkey = pubkey!("EjNJTD8WJDkXqVhrPqEKHnbU1j6kQDJ2Lt4CoutTW9Cs");
pub const PRESALE_PROGRAM: Pubkey = pubkey!("CDSXanmPbW46F8mSpWvC6hvFnqn9hikPcPEKPjWCo7ov");

/// In-memory chain: accounts are seeded by the test, submissions are recorded.
#[derive(Default)]
pub struct FakeChain {
    accounts: Mutex<HashMap<Pubkey, Vec<u8>>>,
    sent: Mutex<Vec<(Pubkey, Vec<Instruction>)>>,
    attempts: Mutex<u32>,
    failing_attempts: Mutex<Vec<u32>>,
    effects: Mutex<Vec<([u8; 8], Pubkey, Vec<u8>)>>,
}

impl FakeChain {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_account(&self, pubkey: Pubkey, data: Vec<u8>) {
        self.accounts.lock().unwrap().insert(pubkey, data);
    }

    pub fn fail_next_sends(&self, count: u32) {
        let next = *self.attempts.lock().unwrap() + 1;
        self.failing_attempts
            .lock()
            .unwrap()
            .extend(next..next + count);
    }

    /// Makes send number `attempt` (1-based, failed sends included) fail.
    pub fn fail_send_attempt(&self, attempt: u32) {
        self.failing_attempts.lock().unwrap().push(attempt);
    }

    /// Stores `data` at `pubkey` once a transaction carrying an instruction
    /// with this discriminator lands.
    pub fn store_on_instruction(&self, discriminator: [u8; 8], pubkey: Pubkey, data: Vec<u8>) {
        self.effects
            .lock()
            .unwrap()
            .push((discriminator, pubkey, data));
    }

    pub fn sent(&self) -> Vec<(Pubkey, Vec<Instruction>)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChainClient for FakeChain {
    async fn get_account_data(&self, pubkey: &Pubkey) -> Result<Option<Vec<u8>>> {
        Ok(self.accounts.lock().unwrap().get(pubkey).cloned())
    }

    async fn send_instructions(&self, ixs: &[Instruction], payer: &Keypair) -> Result<Signature> {
        let attempt = {
            let mut attempts = self.attempts.lock().unwrap();
            *attempts += 1;
            *attempts
        };
        if self.failing_attempts.lock().unwrap().contains(&attempt) {
            return Err(Error::Io(std::io::Error::other("simulated send failure")));
        }
        for (discriminator, pubkey, data) in self.effects.lock().unwrap().iter() {
            if ixs.iter().any(|ix| ix.data.starts_with(discriminator)) {
                self.set_account(*pubkey, data.clone());
            }
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push((payer.pubkey(), ixs.to_vec()));
        Ok(Signature::from([sent.len() as u8; 64]))
    }
}

pub fn payer() -> Arc<Keypair> {
    Arc::new(Keypair::new())
}

pub fn presale_config(admin: Pubkey, mint: Pubkey, sold: u64) -> PresaleConfig {
    let mut config = PresaleConfig::new(
        admin,
        mint,
        PresaleParams {
            price_per_token: 1_000_000,
            total_tokens: 1_000_000,
            presale_start: 1_000,
            presale_end: 1_000 + 86_400,
        },
    );
    config.tokens_sold = sold;
    config
}
