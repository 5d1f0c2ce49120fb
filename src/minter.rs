use std::sync::Arc;

use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
};
use tracing::info;

use crate::chain::ChainClient;
use crate::error::{Error, Result};
use crate::instructions;
use crate::pda::{associated_token_address, metadata_pda, mint_pda};
use crate::types::{InitOutcome, TokenMetadata};

pub const DEFAULT_MINT_QUANTITY: u64 = 1_000_000_000;

/// Client for the token minter program.
pub struct TokenMinter {
    chain: Arc<dyn ChainClient>,
    payer: Arc<Keypair>,
    program_id: Pubkey,
    mint_seed: String,
    metadata: TokenMetadata,
}

impl TokenMinter {
    pub fn new(
        chain: Arc<dyn ChainClient>,
        payer: Arc<Keypair>,
        program_id: Pubkey,
        mint_seed: impl Into<String>,
        metadata: TokenMetadata,
    ) -> Self {
        Self {
            chain,
            payer,
            program_id,
            mint_seed: mint_seed.into(),
            metadata,
        }
    }

    pub fn mint(&self) -> Pubkey {
        mint_pda(&self.program_id, &self.mint_seed)
    }

    pub fn destination(&self) -> Pubkey {
        associated_token_address(&self.payer.pubkey(), &self.mint())
    }

    /// Creates the mint and its metadata unless the mint account already exists.
    pub async fn init_token(&self) -> Result<InitOutcome> {
        let mint = self.mint();
        info!(
            mint = %mint,
            metadata = %metadata_pda(&mint),
            payer = %self.payer.pubkey(),
            program_id = %self.program_id,
            "Initializing token"
        );

        if self.chain.account_exists(&mint).await? {
            info!(mint = %mint, "Mint account already initialized");
            return Ok(InitOutcome::AlreadyInitialized);
        }

        info!("Mint not found, attempting to initialize");
        let ix = instructions::init_token(
            &self.program_id,
            &self.payer.pubkey(),
            &self.mint_seed,
            &self.metadata,
        );
        let signature = self.chain.send_instructions(&[ix], &self.payer).await?;
        info!(mint = %mint, %signature, "Token mint created");
        Ok(InitOutcome::Created(signature))
    }

    /// Mints `quantity` whole tokens to the payer's associated token account.
    pub async fn mint_tokens(&self, quantity: u64) -> Result<Signature> {
        let destination = self.destination();
        if self.chain.account_exists(&destination).await? {
            info!(%destination, "Token account already exists");
        } else {
            info!(%destination, "Token account does not exist, it will be created");
        }

        let raw_amount = scale_amount(quantity, self.metadata.decimals)?;
        let ix = instructions::mint_tokens(
            &self.program_id,
            &self.payer.pubkey(),
            &self.mint_seed,
            raw_amount,
        );
        let signature = self.chain.send_instructions(&[ix], &self.payer).await?;
        info!(quantity, raw_amount, %destination, %signature, "Tokens minted");
        Ok(signature)
    }
}

/// `quantity * 10^decimals`, failing instead of wrapping.
pub fn scale_amount(quantity: u64, decimals: u8) -> Result<u64> {
    10u64
        .checked_pow(decimals as u32)
        .and_then(|factor| quantity.checked_mul(factor))
        .ok_or(Error::AmountOverflow { quantity, decimals })
}
