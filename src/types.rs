use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::{hash::hash, pubkey::Pubkey, signature::Signature};

use crate::error::{Error, Result};

/// First 8 bytes of `sha256("global:<name>")`, Anchor's instruction selector.
pub fn instruction_discriminator(name: &str) -> [u8; 8] {
    sighash("global", name)
}

/// First 8 bytes of `sha256("account:<Name>")`.
pub fn account_discriminator(name: &str) -> [u8; 8] {
    sighash("account", name)
}

fn sighash(namespace: &str, name: &str) -> [u8; 8] {
    let preimage = format!("{namespace}:{name}");
    let mut out = [0u8; 8];
    out.copy_from_slice(&hash(preimage.as_bytes()).to_bytes()[..8]);
    out
}

/// Result of a create-if-absent call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    AlreadyInitialized,
    Created(Signature),
}

/// Instruction data in Anchor layout: discriminator followed by borsh args.
pub trait AnchorInstruction: BorshSerialize {
    const NAME: &'static str;

    fn data(&self) -> Vec<u8> {
        let mut data = instruction_discriminator(Self::NAME).to_vec();
        // Writing into a Vec cannot fail.
        self.serialize(&mut data).unwrap_or_default();
        data
    }
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub decimals: u8,
}

impl Default for TokenMetadata {
    fn default() -> Self {
        Self {
            name: "Prophecy Jimpsons Token".to_string(),
            symbol: "PJT".to_string(),
            uri: "https://example.com/metadata.json".to_string(),
            decimals: 9,
        }
    }
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct InitToken {
    pub metadata: TokenMetadata,
}

impl AnchorInstruction for InitToken {
    const NAME: &'static str = "init_token";
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct MintTokens {
    pub quantity: u64,
}

impl AnchorInstruction for MintTokens {
    const NAME: &'static str = "mint_tokens";
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PresaleParams {
    pub price_per_token: u64,
    pub total_tokens: u64,
    pub presale_start: i64,
    pub presale_end: i64,
}

impl PresaleParams {
    pub fn validate(&self) -> Result<()> {
        if self.presale_start >= self.presale_end {
            return Err(Error::InvalidPresaleWindow {
                start: self.presale_start,
                end: self.presale_end,
            });
        }
        Ok(())
    }
}

impl AnchorInstruction for PresaleParams {
    const NAME: &'static str = "create_presale";
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Participate {
    pub amount: u64,
}

impl AnchorInstruction for Participate {
    const NAME: &'static str = "participate";
}

/// Presale state stored at the presale PDA.
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct PresaleConfig {
    admin: [u8; 32],
    token_mint: [u8; 32],
    pub price_per_token: u64,
    pub total_tokens: u64,
    pub tokens_sold: u64,
    pub presale_start: i64,
    pub presale_end: i64,
}

impl PresaleConfig {
    pub const NAME: &'static str = "PresaleConfig";
    pub const LEN: usize = 8 + 32 + 32 + 8 + 8 + 8 + 8 + 8;

    pub fn new(admin: Pubkey, token_mint: Pubkey, params: PresaleParams) -> Self {
        Self {
            admin: admin.to_bytes(),
            token_mint: token_mint.to_bytes(),
            price_per_token: params.price_per_token,
            total_tokens: params.total_tokens,
            tokens_sold: 0,
            presale_start: params.presale_start,
            presale_end: params.presale_end,
        }
    }

    pub fn admin(&self) -> Pubkey {
        Pubkey::new_from_array(self.admin)
    }

    pub fn token_mint(&self) -> Pubkey {
        Pubkey::new_from_array(self.token_mint)
    }

    pub fn remaining(&self) -> u64 {
        self.total_tokens.saturating_sub(self.tokens_sold)
    }

    pub fn is_active(&self, now: i64) -> bool {
        now >= self.presale_start && now <= self.presale_end
    }

    /// Lamports the buyer pays for `amount` tokens, checked the way the
    /// program checks it before transferring anything.
    pub fn quote(&self, amount: u64, now: i64) -> Result<u64> {
        if !self.is_active(now) {
            return Err(Error::PresaleNotActive);
        }
        let sold_after = self
            .tokens_sold
            .checked_add(amount)
            .ok_or(Error::CalculationError)?;
        if sold_after > self.total_tokens {
            return Err(Error::InsufficientTokens {
                requested: amount,
                remaining: self.remaining(),
            });
        }
        amount
            .checked_mul(self.price_per_token)
            .ok_or(Error::CalculationError)
    }

    pub fn try_from_account_data(data: &[u8]) -> Result<Self> {
        if data.len() < Self::LEN {
            return Err(Error::AccountDataTooShort {
                need: Self::LEN,
                got: data.len(),
            });
        }
        if data[..8] != account_discriminator(Self::NAME) {
            return Err(Error::DiscriminatorMismatch);
        }
        let mut rest = &data[8..];
        Ok(Self::deserialize(&mut rest)?)
    }

    pub fn to_account_data(&self) -> Vec<u8> {
        let mut data = account_discriminator(Self::NAME).to_vec();
        self.serialize(&mut data).unwrap_or_default();
        data
    }
}
