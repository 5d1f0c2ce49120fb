use std::error::Error;
use std::sync::Arc;

use clap::Parser;
use solana_sdk::signature::{Keypair, Signer};
use tokio::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use presale_client::args::{Args, Command, Config};
use presale_client::chain::{ChainClient, RpcChainClient};
use presale_client::keys::{export_secret, load_keypair};
use presale_client::minter::TokenMinter;
use presale_client::pda::metadata_pda;
use presale_client::presale::{unix_now, Presale};
use presale_client::retry::run_with_retry;
use presale_client::types::{PresaleParams, TokenMetadata};

const RETRY_DELAY: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = Config::resolve(&args)?;
    let payer = Arc::new(load_keypair(&config.keypair_path)?);
    info!(wallet_pubkey = %payer.pubkey(), "Identity initialized");

    let chain: Arc<dyn ChainClient> =
        Arc::new(RpcChainClient::new(&config.cluster, config.commitment));
    let minter = TokenMinter::new(
        chain.clone(),
        payer.clone(),
        config.minter_program_id,
        config.mint_seed.clone(),
        TokenMetadata::default(),
    );
    let presale = Presale::new(
        chain,
        payer.clone(),
        config.presale_program_id,
        config.token_mint.unwrap_or_else(|| minter.mint()),
    );

    match args.command {
        Command::InitToken => {
            minter.init_token().await?;
        }
        Command::MintTokens { quantity } => {
            minter.mint_tokens(quantity).await?;
        }
        Command::RunMinter { quantity } => {
            let minter = &minter;
            run_with_retry(config.retries, RETRY_DELAY, || async move {
                info!("Initializing token");
                minter.init_token().await?;
                info!("Minting tokens");
                minter.mint_tokens(quantity).await
            })
            .await?;
        }
        Command::CreatePresale {
            price_per_token,
            total_tokens,
            start,
            end,
        } => {
            let start = start.unwrap_or_else(unix_now);
            let end = Presale::window_end(start, end)?;
            presale
                .create_presale(PresaleParams {
                    price_per_token,
                    total_tokens,
                    presale_start: start,
                    presale_end: end,
                })
                .await?;
        }
        Command::Participate { amount } => {
            presale.participate(amount).await?;
        }
        Command::RunPresale { amount } => {
            let presale = &presale;
            run_with_retry(config.retries, RETRY_DELAY, || async move {
                info!("Creating presale");
                presale
                    .ensure_presale(Presale::default_params(unix_now()))
                    .await?;
                info!("Participating in presale");
                presale.participate(amount).await
            })
            .await?;
        }
        Command::PresaleStatus => {
            let status = presale.presale_status().await?;
            info!(
                presale = %status.address,
                admin = %status.config.admin(),
                token_mint = %status.config.token_mint(),
                price_per_token = status.config.price_per_token,
                total_tokens = status.config.total_tokens,
                tokens_sold = status.config.tokens_sold,
                remaining = status.remaining,
                presale_start = status.config.presale_start,
                presale_end = status.config.presale_end,
                active = status.active,
                "Presale status"
            );
        }
        Command::ExportKey { json } => print_secret(&payer, json)?,
        Command::Addresses => {
            let mint = minter.mint();
            info!(
                cluster = %config.cluster,
                payer = %payer.pubkey(),
                minter_program_id = %config.minter_program_id,
                mint = %mint,
                metadata = %metadata_pda(&mint),
                payer_token_account = %minter.destination(),
                presale_program_id = %config.presale_program_id,
                presale = %presale.address(),
                presale_vault = %presale.vault(),
                "Derived addresses"
            );
        }
    }

    info!("Done");
    Ok(())
}

fn print_secret(payer: &Keypair, json: bool) -> presale_client::Result<()> {
    let exported = export_secret(payer);
    if json {
        println!("{}", exported.to_json()?);
    } else {
        println!("Private Key (Base58): {}", exported.base58);
        println!("Private Key (Base64): {}", exported.base64);
        println!("Private Key (Hex): {}", exported.hex);
    }
    Ok(())
}
