//! Transaction packaging and signing

use solana_sdk::{
    hash::Hash,
    instruction::Instruction,
    message::Message,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    transaction::Transaction,
};
use tracing::debug;

use crate::connection::Connection;
use crate::errors::{Result, WorkflowError};

/// A recent blockhash and the last block height it can land at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidityAnchor {
    pub blockhash: Hash,
    pub last_valid_block_height: u64,
}

/// Fetch a fresh validity anchor at the connection's commitment
pub async fn latest_anchor(connection: &Connection) -> Result<ValidityAnchor> {
    let (blockhash, last_valid_block_height) = connection
        .ledger()
        .get_latest_blockhash(connection.commitment_config())
        .await
        .map_err(|e| connection.lost(e))?;

    debug!(%blockhash, last_valid_block_height, "Fetched validity anchor");

    Ok(ValidityAnchor {
        blockhash,
        last_valid_block_height,
    })
}

/// A transaction bound to the anchor its message was compiled against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchoredTransaction {
    pub transaction: Transaction,
    pub anchor: ValidityAnchor,
}

impl AnchoredTransaction {
    pub fn fee_payer(&self) -> Pubkey {
        self.transaction.message.account_keys[0]
    }

    /// Keys that must sign, in slot order
    pub fn required_signers(&self) -> &[Pubkey] {
        let required = self.transaction.message.header.num_required_signatures as usize;
        &self.transaction.message.account_keys[..required]
    }

    /// Required signers whose slot still holds the default signature
    pub fn missing_signers(&self) -> Vec<Pubkey> {
        self.required_signers()
            .iter()
            .zip(self.transaction.signatures.iter())
            .filter(|(_, signature)| **signature == Signature::default())
            .map(|(key, _)| *key)
            .collect()
    }

    pub fn is_fully_signed(&self) -> bool {
        self.missing_signers().is_empty()
    }

    /// The fee payer's signature, which identifies the transaction on the ledger
    pub fn signature(&self) -> Signature {
        self.transaction.signatures[0]
    }

    pub fn instructions(&self) -> Vec<Instruction> {
        let message = &self.transaction.message;
        message
            .instructions
            .iter()
            .map(|compiled| Instruction {
                program_id: message.account_keys[compiled.program_id_index as usize],
                accounts: compiled
                    .accounts
                    .iter()
                    .map(|&index| {
                        let index = index as usize;
                        let pubkey = message.account_keys[index];
                        solana_sdk::instruction::AccountMeta {
                            pubkey,
                            is_signer: message.is_signer(index),
                            is_writable: message.is_maybe_writable(index, None),
                        }
                    })
                    .collect(),
                data: compiled.data.clone(),
            })
            .collect()
    }
}

/// Bundle `instructions` with `fee_payer` and `anchor`.
///
/// No signer coverage is checked here; every signature slot starts empty.
pub fn package_transaction(
    instructions: &[Instruction],
    fee_payer: &Pubkey,
    anchor: ValidityAnchor,
) -> AnchoredTransaction {
    let message = Message::new_with_blockhash(instructions, Some(fee_payer), &anchor.blockhash);
    AnchoredTransaction {
        transaction: Transaction::new_unsigned(message),
        anchor,
    }
}

/// Sign every required slot that matches one of `keys`.
///
/// Slots without a matching key stay unsigned; a key matching no slot is an
/// error and leaves the transaction untouched.
pub fn sign(mut transaction: AnchoredTransaction, keys: &[&Keypair]) -> Result<AnchoredTransaction> {
    let positions = {
        let required = transaction.required_signers();
        keys.iter()
            .map(|key| {
                let pubkey = key.pubkey();
                required
                    .iter()
                    .position(|slot| *slot == pubkey)
                    .ok_or(WorkflowError::UnauthorizedSigner(pubkey))
            })
            .collect::<Result<Vec<usize>>>()?
    };

    let message_data = transaction.transaction.message_data();
    for (key, position) in keys.iter().zip(positions) {
        transaction.transaction.signatures[position] = key.sign_message(&message_data);
    }

    debug!(
        signature = %transaction.signature(),
        missing = transaction.missing_signers().len(),
        "Signed transaction"
    );

    Ok(transaction)
}
