pub mod args;
pub mod chain;
pub mod error;
pub mod instructions;
pub mod keys;
pub mod minter;
pub mod pda;
pub mod presale;
pub mod retry;
pub mod types;

pub use error::{Error, Result};
