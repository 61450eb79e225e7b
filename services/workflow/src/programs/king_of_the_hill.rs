//! king-of-the-hill
//!
//! The game state and prize pool are singleton PDAs (`game_state`,
//! `prize_pool`). The program refuses a zero initial prize and any bid that is
//! not strictly higher than the current prize.

use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program,
};

use super::anchor::ArgsBuilder;
use crate::errors::Result;
use crate::pda::{derive_game_state_pda, derive_prize_pool_pda};

pub fn initialize(program_id: &Pubkey, initial_king: &Pubkey, initial_prize: u64) -> Result<Instruction> {
    let game_state = derive_game_state_pda(program_id)?;
    let prize_pool = derive_prize_pool_pda(program_id)?;

    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(game_state.address, false),
            AccountMeta::new(*initial_king, true),
            AccountMeta::new(prize_pool.address, false),
            AccountMeta::new_readonly(system_program::ID, false),
        ],
        data: ArgsBuilder::instruction("initialize").u64(initial_prize).build(),
    })
}

/// `payer` outbids `current_king`; the old prize is refunded to `current_king`
pub fn become_king(
    program_id: &Pubkey,
    current_king: &Pubkey,
    payer: &Pubkey,
    new_prize: u64,
) -> Result<Instruction> {
    let game_state = derive_game_state_pda(program_id)?;
    let prize_pool = derive_prize_pool_pda(program_id)?;

    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(game_state.address, false),
            AccountMeta::new(*current_king, false),
            AccountMeta::new(*payer, true),
            AccountMeta::new(prize_pool.address, false),
            AccountMeta::new_readonly(system_program::ID, false),
        ],
        data: ArgsBuilder::instruction("become_king").u64(new_prize).build(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::programs::anchor::instruction_discriminator;

    #[test]
    fn test_initialize_targets_singleton_pdas() {
        let program_id = Pubkey::new_unique();
        let king = Pubkey::new_unique();

        let ix = initialize(&program_id, &king, 1_000_000_000).unwrap();

        let (game_state, _) = Pubkey::find_program_address(&[b"game_state"], &program_id);
        let (prize_pool, _) = Pubkey::find_program_address(&[b"prize_pool"], &program_id);
        assert_eq!(ix.accounts[0].pubkey, game_state);
        assert_eq!(ix.accounts[2].pubkey, prize_pool);
        assert_eq!(&ix.data[..8], &instruction_discriminator("initialize"));
        assert_eq!(&ix.data[8..], &1_000_000_000u64.to_le_bytes());
    }

    #[test]
    fn test_become_king_signed_by_payer_only() {
        let program_id = Pubkey::new_unique();
        let current = Pubkey::new_unique();
        let payer = Pubkey::new_unique();

        let ix = become_king(&program_id, &current, &payer, 2).unwrap();
        let signers: Vec<Pubkey> = ix
            .accounts
            .iter()
            .filter(|meta| meta.is_signer)
            .map(|meta| meta.pubkey)
            .collect();
        assert_eq!(signers, vec![payer]);
        assert!(ix.accounts[1].is_writable);
    }
}
