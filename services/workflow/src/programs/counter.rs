//! anchor-counter

use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program,
};

use super::anchor::ArgsBuilder;

/// Space for a `Counter` account: discriminator plus the count
pub const COUNTER_SPACE: usize = 8 + 8;

/// Create `counter` (a fresh keypair that must co-sign) funded by `user`
pub fn initialize(program_id: &Pubkey, counter: &Pubkey, user: &Pubkey) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*counter, true),
            AccountMeta::new(*user, true),
            AccountMeta::new_readonly(system_program::ID, false),
        ],
        data: ArgsBuilder::instruction("initialize").build(),
    }
}

pub fn increment(program_id: &Pubkey, counter: &Pubkey, user: &Pubkey) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*counter, false),
            AccountMeta::new_readonly(*user, true),
        ],
        data: ArgsBuilder::instruction("increment").build(),
    }
}
