use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;

use crate::pda::{
    associated_token_address, metadata_pda, mint_pda, presale_pda, presale_vault,
    ASSOCIATED_TOKEN_PROGRAM_ID, RENT_SYSVAR_ID, SYSTEM_PROGRAM_ID, TOKEN_METADATA_PROGRAM_ID,
    TOKEN_PROGRAM_ID,
};
use crate::types::{
    AnchorInstruction, InitToken, MintTokens, Participate, PresaleParams, TokenMetadata,
};

pub fn init_token(
    program_id: &Pubkey,
    payer: &Pubkey,
    mint_seed: &str,
    metadata: &TokenMetadata,
) -> Instruction {
    let mint = mint_pda(program_id, mint_seed);
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(metadata_pda(&mint), false),
            AccountMeta::new(mint, false),
            AccountMeta::new(*payer, true),
            AccountMeta::new_readonly(RENT_SYSVAR_ID, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(TOKEN_METADATA_PROGRAM_ID, false),
        ],
        data: InitToken {
            metadata: metadata.clone(),
        }
        .data(),
    }
}

/// `raw_amount` is in base units, already scaled by the mint's decimals.
pub fn mint_tokens(
    program_id: &Pubkey,
    payer: &Pubkey,
    mint_seed: &str,
    raw_amount: u64,
) -> Instruction {
    let mint = mint_pda(program_id, mint_seed);
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(mint, false),
            AccountMeta::new(associated_token_address(payer, &mint), false),
            AccountMeta::new(*payer, true),
            AccountMeta::new_readonly(RENT_SYSVAR_ID, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(ASSOCIATED_TOKEN_PROGRAM_ID, false),
        ],
        data: MintTokens {
            quantity: raw_amount,
        }
        .data(),
    }
}

pub fn create_presale(
    program_id: &Pubkey,
    admin: &Pubkey,
    token_mint: &Pubkey,
    params: &PresaleParams,
) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*admin, true),
            AccountMeta::new(presale_pda(program_id).0, false),
            AccountMeta::new_readonly(*token_mint, false),
            AccountMeta::new(presale_vault(program_id, token_mint), false),
            AccountMeta::new(associated_token_address(admin, token_mint), false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(ASSOCIATED_TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(RENT_SYSVAR_ID, false),
        ],
        data: params.data(),
    }
}

pub fn participate(
    program_id: &Pubkey,
    buyer: &Pubkey,
    admin: &Pubkey,
    token_mint: &Pubkey,
    amount: u64,
) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*buyer, true),
            AccountMeta::new(*admin, false),
            AccountMeta::new(presale_pda(program_id).0, false),
            AccountMeta::new_readonly(*token_mint, false),
            AccountMeta::new(associated_token_address(buyer, token_mint), false),
            AccountMeta::new(presale_vault(program_id, token_mint), false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(ASSOCIATED_TOKEN_PROGRAM_ID, false),
        ],
        data: Participate { amount }.data(),
    }
}
