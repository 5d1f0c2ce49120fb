use std::str::FromStr;

use clap::{Parser, Subcommand};
use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey};

use crate::error::{Error, Result};
use crate::keys::DEFAULT_KEYPAIR_PATH;
use crate::pda::MINT_SEED;

pub const DEFAULT_CLUSTER: &str = "https://api.devnet.solana.com";
pub const DEFAULT_MINTER_PROGRAM_ID: &str = "EjNJTD8WJDkXqVhrPqEKHnbU1j6kQDJ2Lt4CoutTW9Cs";
pub const DEFAULT_PRESALE_PROGRAM_ID: &str = "CDSXanmPbW46F8mSpWvC6hvFnqn9hikPcPEKPjWCo7ov";
pub const DEFAULT_RETRIES: u32 = 1;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[arg(long, global = true, help = "Solana cluster URL")]
    pub cluster: Option<String>,
    #[arg(long, global = true, help = "Path to the payer keypair file")]
    pub keypair: Option<String>,
    #[arg(long, global = true, help = "Token minter program id")]
    pub minter_program_id: Option<String>,
    #[arg(long, global = true, help = "Presale program id")]
    pub presale_program_id: Option<String>,
    #[arg(long, global = true, help = "Seed of the minter's mint PDA")]
    pub mint_seed: Option<String>,
    #[arg(
        long,
        global = true,
        help = "Token mint sold by the presale, defaults to the minter's mint"
    )]
    pub token_mint: Option<String>,
    #[arg(long, global = true, help = "processed, confirmed or finalized")]
    pub commitment: Option<String>,
    #[arg(long, global = true, help = "Extra attempts after a failed run")]
    pub retries: Option<u32>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create the mint and its metadata if the mint does not exist yet
    InitToken,
    /// Mint whole tokens to the payer's associated token account
    MintTokens {
        #[arg(long, default_value_t = crate::minter::DEFAULT_MINT_QUANTITY)]
        quantity: u64,
    },
    /// init-token followed by mint-tokens
    RunMinter {
        #[arg(long, default_value_t = crate::minter::DEFAULT_MINT_QUANTITY)]
        quantity: u64,
    },
    /// Create the presale and fund its vault from the payer
    CreatePresale {
        #[arg(long, default_value_t = crate::presale::DEFAULT_PRICE_PER_TOKEN)]
        price_per_token: u64,
        #[arg(long, default_value_t = crate::presale::DEFAULT_TOTAL_TOKENS)]
        total_tokens: u64,
        #[arg(long, help = "Unix timestamp, defaults to now")]
        start: Option<i64>,
        #[arg(long, help = "Unix timestamp, defaults to start plus one day")]
        end: Option<i64>,
    },
    /// Buy tokens from the presale
    Participate {
        #[arg(long, default_value_t = crate::presale::DEFAULT_PARTICIPATION)]
        amount: u64,
    },
    /// create-presale with defaults followed by participate
    RunPresale {
        #[arg(long, default_value_t = crate::presale::DEFAULT_PARTICIPATION)]
        amount: u64,
    },
    /// Show the presale's on-chain state
    PresaleStatus,
    /// Print the payer secret key as base58, base64 and hex
    ExportKey {
        #[arg(long, help = "Print as JSON")]
        json: bool,
    },
    /// Print every derived address without contacting the cluster
    Addresses,
}

/// Settings resolved from the command line, then the environment, then defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub cluster: String,
    pub keypair_path: String,
    pub minter_program_id: Pubkey,
    pub presale_program_id: Pubkey,
    pub mint_seed: String,
    pub token_mint: Option<Pubkey>,
    pub commitment: CommitmentConfig,
    pub retries: u32,
}

impl Config {
    pub fn resolve(args: &Args) -> Result<Self> {
        Ok(Self {
            cluster: get_solana_cluster(args.cluster.clone()),
            keypair_path: get_keypair_path(args.keypair.clone()),
            minter_program_id: parse_pubkey(&get_or_env(
                args.minter_program_id.clone(),
                "MINTER_PROGRAM_ID",
                DEFAULT_MINTER_PROGRAM_ID,
            ))?,
            presale_program_id: parse_pubkey(&get_or_env(
                args.presale_program_id.clone(),
                "PRESALE_PROGRAM_ID",
                DEFAULT_PRESALE_PROGRAM_ID,
            ))?,
            mint_seed: get_or_env(args.mint_seed.clone(), "MINT_SEED", MINT_SEED),
            token_mint: args
                .token_mint
                .clone()
                .or_else(|| std::env::var("TOKEN_MINT").ok())
                .map(|s| parse_pubkey(&s))
                .transpose()?,
            commitment: get_commitment(args.commitment.clone())?,
            retries: get_retries(args.retries)?,
        })
    }
}

fn get_or_env(cli: Option<String>, var: &str, default: &str) -> String {
    cli.or_else(|| std::env::var(var).ok())
        .unwrap_or_else(|| default.to_string())
}

pub fn get_solana_cluster(cli_cluster: Option<String>) -> String {
    get_or_env(cli_cluster, "SOLANA_CLUSTER", DEFAULT_CLUSTER)
}

pub fn get_keypair_path(cli_path: Option<String>) -> String {
    get_or_env(cli_path, "SOLANA_KEYPAIR", DEFAULT_KEYPAIR_PATH)
}

pub fn get_commitment(cli_commitment: Option<String>) -> Result<CommitmentConfig> {
    commitment_or_env(cli_commitment, "SOLANA_COMMITMENT")
}

fn commitment_or_env(cli: Option<String>, var: &str) -> Result<CommitmentConfig> {
    parse_commitment(&get_or_env(cli, var, "confirmed"))
}

pub fn parse_commitment(level: &str) -> Result<CommitmentConfig> {
    match level.trim() {
        "processed" => Ok(CommitmentConfig::processed()),
        "confirmed" => Ok(CommitmentConfig::confirmed()),
        "finalized" => Ok(CommitmentConfig::finalized()),
        other => Err(Error::InvalidSetting {
            name: "commitment".to_string(),
            value: other.to_string(),
        }),
    }
}

pub fn get_retries(cli_retries: Option<u32>) -> Result<u32> {
    retries_or_env(cli_retries, "RETRIES")
}

fn retries_or_env(cli: Option<u32>, var: &str) -> Result<u32> {
    if let Some(retries) = cli {
        return Ok(retries);
    }
    match std::env::var(var) {
        Ok(value) => value.trim().parse().map_err(|_| Error::InvalidSetting {
            name: "retries".to_string(),
            value,
        }),
        Err(_) => Ok(DEFAULT_RETRIES),
    }
}

pub fn parse_pubkey(s: &str) -> Result<Pubkey> {
    Pubkey::from_str(s.trim()).map_err(|_| Error::InvalidPubkey(s.to_string()))
}
