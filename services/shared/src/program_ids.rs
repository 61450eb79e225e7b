//! Solana program IDs and public keys used across the workspace
//!
//! Centralizes all program ID constants to ensure consistency
//! and make it easier to update when needed.

use anyhow::{Context, Result};
use solana_sdk::pubkey;
use solana_sdk::pubkey::Pubkey;
use std::env;
use std::str::FromStr;

/// SPL Token-2022 Program ID (owner of mints created by the mint demo)
pub const TOKEN_2022_PROGRAM_ID: Pubkey = pubkey!("TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb");

/// Legacy SPL Token Program ID
pub const SPL_TOKEN_PROGRAM_ID: Pubkey = pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");

/// Compute Budget Program ID
pub const COMPUTE_BUDGET_PROGRAM_ID: Pubkey = pubkey!("ComputeBudget111111111111111111111111111111");

/// Program ids declared by the programs exercised in the integration suites.
pub const COUNTER_PROGRAM_ID: Pubkey = pubkey!("3YBAAuxLMjGFUpYZMpJcLb1S2efo4A9v4RdatxvZvp9d");
pub const KING_OF_THE_HILL_PROGRAM_ID: Pubkey = pubkey!("iALpvVQS1CoqrFuoHopycSv8tUCZRu75dZbfWBYj9ny");
pub const MOVIE_REVIEW_PROGRAM_ID: Pubkey = pubkey!("7yNXF6wFHjHe2QANXwF9qFVyhUW6Th4NAEPzTgqNepcu");
pub const PDA_ACCOUNT_PROGRAM_ID: Pubkey = pubkey!("Gy7friDAkNofEynWmg4v1nFTqAiL27pL1MUvk2F584ZH");

/// Read a program id override from `var`, falling back to `default`
///
/// # Errors
/// Returns error if the variable is set but cannot be parsed as a valid Pubkey
pub fn program_id_from_env(var: &str, default: Pubkey) -> Result<Pubkey> {
    match env::var(var) {
        Ok(id_str) => Pubkey::from_str(id_str.trim())
            .with_context(|| format!("Failed to parse {} as a valid Pubkey", var)),
        Err(_) => Ok(default),
    }
}

pub fn counter_program_id() -> Result<Pubkey> {
    program_id_from_env("COUNTER_PROGRAM_ID", COUNTER_PROGRAM_ID)
}

pub fn king_of_the_hill_program_id() -> Result<Pubkey> {
    program_id_from_env("KING_OF_THE_HILL_PROGRAM_ID", KING_OF_THE_HILL_PROGRAM_ID)
}

pub fn movie_review_program_id() -> Result<Pubkey> {
    program_id_from_env("MOVIE_REVIEW_PROGRAM_ID", MOVIE_REVIEW_PROGRAM_ID)
}

pub fn pda_account_program_id() -> Result<Pubkey> {
    program_id_from_env("PDA_ACCOUNT_PROGRAM_ID", PDA_ACCOUNT_PROGRAM_ID)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_budget_program_id_matches_sdk() {
        assert_eq!(COMPUTE_BUDGET_PROGRAM_ID, solana_sdk::compute_budget::id());
    }

    #[test]
    fn test_program_id_from_env_falls_back_to_default() {
        let id = program_id_from_env("SHARED_TEST_UNSET_PROGRAM_ID", COUNTER_PROGRAM_ID).unwrap();
        assert_eq!(id, COUNTER_PROGRAM_ID);
    }

    #[test]
    fn test_program_id_from_env_rejects_garbage() {
        env::set_var("SHARED_TEST_GARBAGE_PROGRAM_ID", "not-a-pubkey");
        let result = program_id_from_env("SHARED_TEST_GARBAGE_PROGRAM_ID", COUNTER_PROGRAM_ID);
        assert!(result.is_err());
    }
}
