use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    transaction::Transaction,
};
use tracing::debug;

use crate::error::Result;

/// The RPC calls the minter and presale flows need.
#[async_trait]
pub trait ChainClient: Send + Sync {
    async fn get_account_data(&self, pubkey: &Pubkey) -> Result<Option<Vec<u8>>>;

    async fn account_exists(&self, pubkey: &Pubkey) -> Result<bool> {
        Ok(self.get_account_data(pubkey).await?.is_some())
    }

    /// Signs with `payer` alone and waits for confirmation.
    async fn send_instructions(&self, ixs: &[Instruction], payer: &Keypair) -> Result<Signature>;
}

pub struct RpcChainClient {
    rpc_client: RpcClient,
}

impl RpcChainClient {
    pub fn new(rpc_url: &str, commitment: CommitmentConfig) -> Self {
        Self {
            rpc_client: RpcClient::new_with_commitment(rpc_url.to_string(), commitment),
        }
    }
}

#[async_trait]
impl ChainClient for RpcChainClient {
    async fn get_account_data(&self, pubkey: &Pubkey) -> Result<Option<Vec<u8>>> {
        let response = self
            .rpc_client
            .get_account_with_commitment(pubkey, self.rpc_client.commitment())
            .await?;
        Ok(response.value.map(|account| account.data))
    }

    async fn send_instructions(&self, ixs: &[Instruction], payer: &Keypair) -> Result<Signature> {
        let blockhash = self.rpc_client.get_latest_blockhash().await?;
        let tx =
            Transaction::new_signed_with_payer(ixs, Some(&payer.pubkey()), &[payer], blockhash);
        debug!(%blockhash, instructions = ixs.len(), "Sending transaction");
        Ok(self.rpc_client.send_and_confirm_transaction(&tx).await?)
    }
}
