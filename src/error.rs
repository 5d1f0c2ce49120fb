use solana_client::client_error::ClientError;
use solana_sdk::pubkey::Pubkey;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum Error {
    #[error("rpc: {0}")]
    Rpc(#[from] Box<ClientError>),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid keypair file {path}: {reason}")]
    InvalidKeypair { path: String, reason: String },
    #[error("invalid {name} {value:?}")]
    InvalidSetting { name: String, value: String },
    #[error("invalid pubkey {0:?}")]
    InvalidPubkey(String),
    #[error("account {0} not found")]
    AccountNotFound(Pubkey),
    #[error("account data too short: need {need} bytes, got {got}")]
    AccountDataTooShort { need: usize, got: usize },
    #[error("account discriminator mismatch")]
    DiscriminatorMismatch,
    #[error("{quantity} tokens with {decimals} decimals overflows u64")]
    AmountOverflow { quantity: u64, decimals: u8 },
    #[error("presale window is empty: start {start} >= end {end}")]
    InvalidPresaleWindow { start: i64, end: i64 },
    #[error("presale is not active")]
    PresaleNotActive,
    #[error("insufficient tokens available: {requested} requested, {remaining} remaining")]
    InsufficientTokens { requested: u64, remaining: u64 },
    #[error("calculation error")]
    CalculationError,
}

impl From<ClientError> for Error {
    fn from(e: ClientError) -> Self {
        Error::Rpc(Box::new(e))
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
