use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
};
use tracing::{info, warn};

use crate::chain::ChainClient;
use crate::error::{Error, Result};
use crate::instructions;
use crate::pda::{associated_token_address, presale_pda, presale_vault};
use crate::types::{InitOutcome, PresaleConfig, PresaleParams};

pub const DEFAULT_PRICE_PER_TOKEN: u64 = 1_000_000;
pub const DEFAULT_TOTAL_TOKENS: u64 = 1_000_000;
pub const DEFAULT_DURATION_SECS: i64 = 86_400;
pub const DEFAULT_PARTICIPATION: u64 = 100;

pub fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participation {
    pub signature: Signature,
    pub amount: u64,
    pub total_cost: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresaleStatus {
    pub address: Pubkey,
    pub config: PresaleConfig,
    pub remaining: u64,
    pub active: bool,
}

/// Client for the presale program.
pub struct Presale {
    chain: Arc<dyn ChainClient>,
    payer: Arc<Keypair>,
    program_id: Pubkey,
    token_mint: Pubkey,
}

impl Presale {
    pub fn new(
        chain: Arc<dyn ChainClient>,
        payer: Arc<Keypair>,
        program_id: Pubkey,
        token_mint: Pubkey,
    ) -> Self {
        Self {
            chain,
            payer,
            program_id,
            token_mint,
        }
    }

    pub fn address(&self) -> Pubkey {
        presale_pda(&self.program_id).0
    }

    pub fn vault(&self) -> Pubkey {
        presale_vault(&self.program_id, &self.token_mint)
    }

    /// Default window: open now, closes a day later.
    pub fn default_params(now: i64) -> PresaleParams {
        PresaleParams {
            price_per_token: DEFAULT_PRICE_PER_TOKEN,
            total_tokens: DEFAULT_TOTAL_TOKENS,
            presale_start: now,
            presale_end: now.saturating_add(DEFAULT_DURATION_SECS),
        }
    }

    /// End of a window opening at `start`, one day later unless given.
    pub fn window_end(start: i64, end: Option<i64>) -> Result<i64> {
        match end {
            Some(end) => Ok(end),
            None => start
                .checked_add(DEFAULT_DURATION_SECS)
                .ok_or(Error::InvalidPresaleWindow { start, end: start }),
        }
    }

    pub async fn create_presale(&self, params: PresaleParams) -> Result<Signature> {
        params.validate()?;
        let admin = self.payer.pubkey();
        info!(
            presale = %self.address(),
            vault = %self.vault(),
            admin_token_account = %associated_token_address(&admin, &self.token_mint),
            token_mint = %self.token_mint,
            price_per_token = params.price_per_token,
            total_tokens = params.total_tokens,
            "Creating presale"
        );
        let ix = instructions::create_presale(&self.program_id, &admin, &self.token_mint, &params);
        let signature = self.chain.send_instructions(&[ix], &self.payer).await?;
        info!(%signature, "Presale created");
        Ok(signature)
    }

    /// Creates the presale unless its state account already exists.
    pub async fn ensure_presale(&self, params: PresaleParams) -> Result<InitOutcome> {
        let address = self.address();
        if self.chain.account_exists(&address).await? {
            info!(presale = %address, "Presale already created");
            return Ok(InitOutcome::AlreadyInitialized);
        }
        Ok(InitOutcome::Created(self.create_presale(params).await?))
    }

    pub async fn fetch_config(&self) -> Result<PresaleConfig> {
        let address = self.address();
        let data = self
            .chain
            .get_account_data(&address)
            .await?
            .ok_or(Error::AccountNotFound(address))?;
        PresaleConfig::try_from_account_data(&data)
    }

    pub async fn presale_status(&self) -> Result<PresaleStatus> {
        self.presale_status_at(unix_now()).await
    }

    pub async fn presale_status_at(&self, now: i64) -> Result<PresaleStatus> {
        let config = self.fetch_config().await?;
        Ok(PresaleStatus {
            address: self.address(),
            remaining: config.remaining(),
            active: config.is_active(now),
            config,
        })
    }

    pub async fn participate(&self, amount: u64) -> Result<Participation> {
        self.participate_at(amount, unix_now()).await
    }

    /// Checks the purchase against the on-chain state as of `now` before
    /// paying for a transaction the program would reject.
    pub async fn participate_at(&self, amount: u64, now: i64) -> Result<Participation> {
        let config = self.fetch_config().await?;
        let total_cost = config.quote(amount, now)?;
        if config.token_mint() != self.token_mint {
            warn!(
                configured = %self.token_mint,
                on_chain = %config.token_mint(),
                "Token mint differs from the presale's, using the on-chain mint"
            );
        }

        let buyer = self.payer.pubkey();
        let ix = instructions::participate(
            &self.program_id,
            &buyer,
            &config.admin(),
            &config.token_mint(),
            amount,
        );
        let signature = self.chain.send_instructions(&[ix], &self.payer).await?;
        info!(amount, total_cost, %buyer, %signature, "Participated in presale");
        Ok(Participation {
            signature,
            amount,
            total_cost,
        })
    }
}
