//! Explicit program context
//!
//! Bundles the connection, the paying wallet and a program id so program
//! calls and account fetches can be written without passing all three around.

use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
};
use std::sync::Arc;
use tracing::debug;

use crate::account_parsing::AnchorAccount;
use crate::connection::Connection;
use crate::errors::{DecodeError, Result, WorkflowError};
use crate::instructions::ComputeBudget;
use crate::submission::{send_instructions, SubmissionRecord};

#[derive(Debug, Clone)]
pub struct ProgramContext {
    connection: Connection,
    payer: Arc<Keypair>,
    program_id: Pubkey,
}

impl ProgramContext {
    pub fn new(connection: Connection, payer: Arc<Keypair>, program_id: Pubkey) -> Self {
        Self {
            connection,
            payer,
            program_id,
        }
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    pub fn payer(&self) -> &Keypair {
        &self.payer
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    /// Same connection and payer, another program
    pub fn for_program(&self, program_id: Pubkey) -> Self {
        Self {
            program_id,
            ..self.clone()
        }
    }

    /// Build, sign with the payer plus `extra_signers`, submit and confirm
    pub async fn rpc(
        &self,
        instructions: &[Instruction],
        extra_signers: &[&Keypair],
    ) -> Result<SubmissionRecord> {
        send_instructions(
            &self.connection,
            &self.payer,
            extra_signers,
            instructions,
            ComputeBudget::default(),
        )
        .await
    }

    /// Fetch and decode an account owned by this context's program
    pub async fn fetch<T: AnchorAccount>(&self, address: &Pubkey) -> Result<T> {
        let account = self
            .connection
            .get_account(address)
            .await?
            .ok_or(WorkflowError::AccountNotFound(*address))?;

        if account.owner != self.program_id {
            return Err(DecodeError::WrongOwner {
                address: *address,
                owner: account.owner,
                expected: self.program_id,
            }
            .into());
        }

        let record = T::decode(&account.data)?;
        debug!(
            %address,
            account_type = T::NAME,
            payer = %self.payer.pubkey(),
            "Fetched account"
        );
        Ok(record)
    }
}
