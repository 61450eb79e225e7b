//! Solana instruction builders

use shared::{program_ids::TOKEN_2022_PROGRAM_ID, MINT_SIZE};
use solana_sdk::{
    compute_budget::ComputeBudgetInstruction,
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_instruction, sysvar,
};

/// The instruction shapes the workflow knows how to build
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstructionKind {
    /// Move lamports between two system accounts
    Transfer {
        from: Pubkey,
        to: Pubkey,
        lamports: u64,
    },
    /// Allocate a new account owned by `owner`, funded by `payer`
    CreateAccount {
        payer: Pubkey,
        new_account: Pubkey,
        lamports: u64,
        space: u64,
        owner: Pubkey,
    },
    /// SPL `InitializeMint` (works for Token and Token-2022)
    InitializeMint {
        mint: Pubkey,
        decimals: u8,
        mint_authority: Pubkey,
        freeze_authority: Option<Pubkey>,
        token_program: Pubkey,
    },
    SetComputeUnitLimit {
        units: u32,
    },
    SetComputeUnitPrice {
        micro_lamports: u64,
    },
}

/// Build the instruction described by `kind`.
///
/// Pure construction: accounts are laid out in the order the target program
/// expects, nothing is checked against the ledger.
pub fn build_instruction(kind: InstructionKind) -> Instruction {
    match kind {
        InstructionKind::Transfer { from, to, lamports } => {
            system_instruction::transfer(&from, &to, lamports)
        }
        InstructionKind::CreateAccount {
            payer,
            new_account,
            lamports,
            space,
            owner,
        } => system_instruction::create_account(&payer, &new_account, lamports, space, &owner),
        InstructionKind::InitializeMint {
            mint,
            decimals,
            mint_authority,
            freeze_authority,
            token_program,
        } => build_initialize_mint_instruction(
            &token_program,
            &mint,
            decimals,
            &mint_authority,
            freeze_authority.as_ref(),
        ),
        InstructionKind::SetComputeUnitLimit { units } => {
            ComputeBudgetInstruction::set_compute_unit_limit(units)
        }
        InstructionKind::SetComputeUnitPrice { micro_lamports } => {
            ComputeBudgetInstruction::set_compute_unit_price(micro_lamports)
        }
    }
}

/// Build SPL token `InitializeMint` manually
///
/// Layout: tag 0 | decimals (1) | mint_authority (32) | freeze_authority option (1 + 32?)
fn build_initialize_mint_instruction(
    token_program: &Pubkey,
    mint: &Pubkey,
    decimals: u8,
    mint_authority: &Pubkey,
    freeze_authority: Option<&Pubkey>,
) -> Instruction {
    let mut data = Vec::with_capacity(67);
    data.push(0);
    data.push(decimals);
    data.extend_from_slice(mint_authority.as_ref());
    match freeze_authority {
        Some(authority) => {
            data.push(1);
            data.extend_from_slice(authority.as_ref());
        }
        None => data.push(0),
    }

    Instruction {
        program_id: *token_program,
        accounts: vec![
            AccountMeta::new(*mint, false),
            AccountMeta::new_readonly(sysvar::rent::ID, false),
        ],
        data,
    }
}

/// Optional per-transaction compute limits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComputeBudget {
    pub unit_limit: Option<u32>,
    pub unit_price_micro_lamports: Option<u64>,
}

impl ComputeBudget {
    pub fn new(unit_limit: u32, unit_price_micro_lamports: u64) -> Self {
        Self {
            unit_limit: Some(unit_limit),
            unit_price_micro_lamports: Some(unit_price_micro_lamports),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.unit_limit.is_none() && self.unit_price_micro_lamports.is_none()
    }

    /// Compute-budget instructions, limit first then price
    pub fn instructions(&self) -> Vec<Instruction> {
        let limit = self
            .unit_limit
            .map(|units| build_instruction(InstructionKind::SetComputeUnitLimit { units }));
        let price = self.unit_price_micro_lamports.map(|micro_lamports| {
            build_instruction(InstructionKind::SetComputeUnitPrice { micro_lamports })
        });
        limit.into_iter().chain(price).collect()
    }
}

/// Account creation + mint initialization for a new mint at `mint`
///
/// `rent_lamports` must cover rent exemption for `MINT_SIZE` bytes.
pub fn create_mint_instructions(
    payer: &Pubkey,
    mint: &Pubkey,
    rent_lamports: u64,
    decimals: u8,
    mint_authority: &Pubkey,
    freeze_authority: Option<&Pubkey>,
    token_program: Option<&Pubkey>,
) -> [Instruction; 2] {
    let token_program = token_program.copied().unwrap_or(TOKEN_2022_PROGRAM_ID);
    [
        build_instruction(InstructionKind::CreateAccount {
            payer: *payer,
            new_account: *mint,
            lamports: rent_lamports,
            space: MINT_SIZE as u64,
            owner: token_program,
        }),
        build_instruction(InstructionKind::InitializeMint {
            mint: *mint,
            decimals,
            mint_authority: *mint_authority,
            freeze_authority: freeze_authority.copied(),
            token_program,
        }),
    ]
}
