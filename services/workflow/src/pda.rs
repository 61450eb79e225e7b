//! Program Derived Address (PDA) derivation utilities

use shared::{MAX_SEEDS, MAX_SEED_LEN};
use solana_sdk::pubkey::{Pubkey, PubkeyError};

use crate::errors::{Result, WorkflowError};

/// A program-derived address with its canonical bump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DerivedAddress {
    pub address: Pubkey,
    pub bump: u8,
}

impl From<DerivedAddress> for (Pubkey, u8) {
    fn from(derived: DerivedAddress) -> Self {
        (derived.address, derived.bump)
    }
}

/// Derive the canonical PDA for `seeds` under `program_id`.
///
/// Bumps are tried from 255 down to 0; the first candidate that falls off the
/// ed25519 curve wins.
pub fn derive_address(seeds: &[&[u8]], program_id: &Pubkey) -> Result<DerivedAddress> {
    validate_seeds(seeds)?;

    for bump in (0..=u8::MAX).rev() {
        let bump_seed = [bump];
        let mut candidate_seeds = seeds.to_vec();
        candidate_seeds.push(&bump_seed);

        match Pubkey::create_program_address(&candidate_seeds, program_id) {
            Ok(address) => return Ok(DerivedAddress { address, bump }),
            // On the curve: try the next bump.
            Err(PubkeyError::InvalidSeeds) => continue,
            Err(PubkeyError::IllegalOwner) => {
                return Err(WorkflowError::InvalidSeeds(format!(
                    "{program_id} cannot own program addresses"
                )))
            }
            Err(other) => return Err(WorkflowError::InvalidSeeds(other.to_string())),
        }
    }

    Err(WorkflowError::NoValidBumpFound {
        program_id: *program_id,
    })
}

fn validate_seeds(seeds: &[&[u8]]) -> Result<()> {
    // The bump occupies one of the seed slots.
    if seeds.len() >= MAX_SEEDS {
        return Err(WorkflowError::InvalidSeeds(format!(
            "{} seeds given, at most {} allowed",
            seeds.len(),
            MAX_SEEDS - 1
        )));
    }
    if let Some((index, seed)) = seeds
        .iter()
        .enumerate()
        .find(|(_, seed)| seed.len() > MAX_SEED_LEN)
    {
        return Err(WorkflowError::InvalidSeeds(format!(
            "seed {} is {} bytes, at most {} allowed",
            index,
            seed.len(),
            MAX_SEED_LEN
        )));
    }
    Ok(())
}

/// Derive the king-of-the-hill game state PDA
pub fn derive_game_state_pda(program_id: &Pubkey) -> Result<DerivedAddress> {
    derive_address(&[b"game_state"], program_id)
}

/// Derive the king-of-the-hill prize pool PDA
pub fn derive_prize_pool_pda(program_id: &Pubkey) -> Result<DerivedAddress> {
    derive_address(&[b"prize_pool"], program_id)
}

/// Derive a movie review PDA (seeds: title, reviewer)
pub fn derive_movie_review_pda(
    title: &str,
    reviewer: &Pubkey,
    program_id: &Pubkey,
) -> Result<DerivedAddress> {
    derive_address(&[title.as_bytes(), reviewer.as_ref()], program_id)
}

/// Derive the per-user data account PDA (seeds: "data", user)
pub fn derive_user_data_pda(user: &Pubkey, program_id: &Pubkey) -> Result<DerivedAddress> {
    derive_address(&[b"data", user.as_ref()], program_id)
}

/// Derive a user profile PDA (seeds: "user_profile", wallet)
pub fn derive_user_profile_pda(wallet: &Pubkey, program_id: &Pubkey) -> Result<DerivedAddress> {
    derive_address(&[b"user_profile", wallet.as_ref()], program_id)
}
