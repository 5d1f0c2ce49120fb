//! Address derivation for the minter and presale programs.

use solana_sdk::{pubkey, pubkey::Pubkey};

pub const MINT_SEED: &str = "mint";
pub const METADATA_SEED: &[u8] = b"metadata";
pub const PRESALE_SEED: &[u8] = b"presale";

pub const TOKEN_PROGRAM_ID: Pubkey = pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");
pub const ASSOCIATED_TOKEN_PROGRAM_ID: Pubkey = spl_associated_token_account::ID;
pub const TOKEN_METADATA_PROGRAM_ID: Pubkey =
    pubkey!("metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s");
pub const SYSTEM_PROGRAM_ID: Pubkey = solana_sdk::system_program::ID;
pub const RENT_SYSVAR_ID: Pubkey = solana_sdk::sysvar::rent::ID;

/// Single-seed PDA, the seed taken as its UTF-8 bytes.
pub fn find_pda(seed: &str, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[seed.as_bytes()], program_id)
}

/// Mint account owned by the minter program: seeds = [mint_seed]
pub fn mint_pda(program_id: &Pubkey, mint_seed: &str) -> Pubkey {
    find_pda(mint_seed, program_id).0
}

/// Metaplex metadata account: seeds = ["metadata", metadata_program, mint]
pub fn metadata_pda(mint: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[
            METADATA_SEED,
            TOKEN_METADATA_PROGRAM_ID.as_ref(),
            mint.as_ref(),
        ],
        &TOKEN_METADATA_PROGRAM_ID,
    )
    .0
}

pub fn associated_token_address(owner: &Pubkey, mint: &Pubkey) -> Pubkey {
    spl_associated_token_account::get_associated_token_address(owner, mint)
}

/// Presale state account: seeds = ["presale"]
pub fn presale_pda(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[PRESALE_SEED], program_id)
}

/// Token vault of the presale, the presale PDA's associated token account.
pub fn presale_vault(program_id: &Pubkey, mint: &Pubkey) -> Pubkey {
    associated_token_address(&presale_pda(program_id).0, mint)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINTER: Pubkey = pubkey!("EjNJTD8WJDkXqVhrPqEKHnbU1j6kQDJ2Lt4CoutTW9Cs");
    const PRESALE: Pubkey = pubkey!("CDSXanmPbW46F8mSpWvC6hvFnqn9hikPcPEKPjWCo7ov");

    #[test]
    fn test_find_pda_is_deterministic_and_off_curve() {
        let (a, bump_a) = find_pda("mint2", &MINTER);
        let (b, bump_b) = find_pda("mint2", &MINTER);
        assert_eq!(a, b);
        assert_eq!(bump_a, bump_b);
        assert!(!a.is_on_curve());
    }

    #[test]
    fn test_mint_seed_changes_address() {
        assert_ne!(mint_pda(&MINTER, "mint"), mint_pda(&MINTER, "mint2"));
        assert_eq!(mint_pda(&MINTER, MINT_SEED), find_pda("mint", &MINTER).0);
    }

    #[test]
    fn test_associated_token_address_matches_manual_derivation() {
        let owner = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let (expected, _) = Pubkey::find_program_address(
            &[owner.as_ref(), TOKEN_PROGRAM_ID.as_ref(), mint.as_ref()],
            &ASSOCIATED_TOKEN_PROGRAM_ID,
        );
        assert_eq!(associated_token_address(&owner, &mint), expected);
    }

    #[test]
    fn test_presale_vault_is_ata_of_presale_pda() {
        let mint = Pubkey::new_unique();
        let (presale, _) = presale_pda(&PRESALE);
        assert_eq!(
            presale_vault(&PRESALE, &mint),
            associated_token_address(&presale, &mint)
        );
    }

    #[test]
    fn test_metadata_pda_depends_on_mint() {
        let mint = mint_pda(&MINTER, "mint2");
        assert_eq!(metadata_pda(&mint), metadata_pda(&mint));
        assert_ne!(metadata_pda(&mint), metadata_pda(&Pubkey::new_unique()));
    }
}
