//! create-pda: one `DataAccount` per user at `["data", user]`

use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program,
};

use super::anchor::ArgsBuilder;
use crate::errors::Result;
use crate::pda::derive_user_data_pda;

pub fn initialize(program_id: &Pubkey, user: &Pubkey) -> Result<Instruction> {
    let data_account = derive_user_data_pda(user, program_id)?;

    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*user, true),
            AccountMeta::new(data_account.address, false),
            AccountMeta::new_readonly(system_program::ID, false),
        ],
        data: ArgsBuilder::instruction("initialize").build(),
    })
}
