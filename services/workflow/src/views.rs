//! Printable JSON views of instructions and compiled messages

use serde::Serialize;
use solana_sdk::{
    instruction::Instruction,
    message::Message,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    system_program,
    transaction::Transaction,
};

/// `SystemInstruction::Transfer` variant index
const SYSTEM_TRANSFER_TAG: [u8; 4] = [2, 0, 0, 0];

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccountMetaView {
    pub pubkey: String,
    pub is_signer: bool,
    pub is_writable: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TransferView {
    pub from: String,
    pub to: String,
    pub lamports: u64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "type", content = "info", rename_all = "camelCase")]
pub enum ParsedInstruction {
    Transfer(TransferView),
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InstructionView {
    pub keys: Vec<AccountMetaView>,
    pub program_id: String,
    pub data: Vec<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed: Option<ParsedInstruction>,
}

impl From<&Instruction> for InstructionView {
    fn from(ix: &Instruction) -> Self {
        Self {
            keys: ix
                .accounts
                .iter()
                .map(|meta| AccountMetaView {
                    pubkey: meta.pubkey.to_string(),
                    is_signer: meta.is_signer,
                    is_writable: meta.is_writable,
                })
                .collect(),
            program_id: ix.program_id.to_string(),
            data: ix.data.clone(),
            parsed: parse_system_transfer(ix).map(ParsedInstruction::Transfer),
        }
    }
}

/// Decode a system transfer; `None` for any other instruction
pub fn parse_system_transfer(ix: &Instruction) -> Option<TransferView> {
    if ix.program_id != system_program::ID || ix.data.len() != 12 || ix.accounts.len() != 2 {
        return None;
    }
    if ix.data[..4] != SYSTEM_TRANSFER_TAG {
        return None;
    }
    let lamports = u64::from_le_bytes(ix.data[4..12].try_into().ok()?);
    Some(TransferView {
        from: ix.accounts[0].pubkey.to_string(),
        to: ix.accounts[1].pubkey.to_string(),
        lamports,
    })
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MessageHeaderView {
    pub num_required_signatures: u8,
    pub num_readonly_signed_accounts: u8,
    pub num_readonly_unsigned_accounts: u8,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CompiledInstructionView {
    pub program_id_index: u8,
    pub accounts: Vec<u8>,
    pub data: Vec<u8>,
}

/// The compiled message as it goes on the wire, in readable form
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MessageView {
    pub header: MessageHeaderView,
    pub account_keys: Vec<String>,
    pub recent_blockhash: String,
    pub instructions: Vec<CompiledInstructionView>,
}

impl From<&Message> for MessageView {
    fn from(message: &Message) -> Self {
        Self {
            header: MessageHeaderView {
                num_required_signatures: message.header.num_required_signatures,
                num_readonly_signed_accounts: message.header.num_readonly_signed_accounts,
                num_readonly_unsigned_accounts: message.header.num_readonly_unsigned_accounts,
            },
            account_keys: message.account_keys.iter().map(Pubkey::to_string).collect(),
            recent_blockhash: message.recent_blockhash.to_string(),
            instructions: message
                .instructions
                .iter()
                .map(|ix| CompiledInstructionView {
                    program_id_index: ix.program_id_index,
                    accounts: ix.accounts.clone(),
                    data: ix.data.clone(),
                })
                .collect(),
        }
    }
}

impl From<&Transaction> for MessageView {
    fn from(transaction: &Transaction) -> Self {
        Self::from(&transaction.message)
    }
}

/// A keypair as a wallet would export it
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct KeypairView {
    pub public_key: String,
    /// Base58 of the 64-byte secret key
    pub secret_key: String,
}

impl From<&Keypair> for KeypairView {
    fn from(keypair: &Keypair) -> Self {
        Self {
            public_key: keypair.pubkey().to_string(),
            secret_key: keypair.to_base58_string(),
        }
    }
}

/// Pretty JSON for anything with a view
pub fn to_pretty_json<T: Serialize>(view: &T) -> String {
    serde_json::to_string_pretty(view).unwrap_or_else(|e| format!("<unprintable: {e}>"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::{build_instruction, InstructionKind};
    use serde_json::Value;
    use shared::types::LamportAmount;
    use solana_sdk::hash::Hash;

    #[test]
    fn test_transfer_view_shows_one_from_one_to_and_lamports() {
        let sender = Keypair::new();
        let recipient = Keypair::new();
        let lamports = LamportAmount::from_sol(0.01).unwrap().as_u64();

        let ix = build_instruction(InstructionKind::Transfer {
            from: sender.pubkey(),
            to: recipient.pubkey(),
            lamports,
        });
        let json: Value = serde_json::from_str(&to_pretty_json(&InstructionView::from(&ix))).unwrap();

        assert_eq!(json["programId"], system_program::ID.to_string());
        assert_eq!(json["keys"].as_array().unwrap().len(), 2);
        assert_eq!(json["parsed"]["type"], "transfer");
        assert_eq!(json["parsed"]["info"]["from"], sender.pubkey().to_string());
        assert_eq!(json["parsed"]["info"]["to"], recipient.pubkey().to_string());
        assert_eq!(json["parsed"]["info"]["lamports"], 10_000_000u64);
    }

    #[test]
    fn test_non_transfer_has_no_parsed_section() {
        let ix = build_instruction(InstructionKind::SetComputeUnitLimit { units: 300_000 });
        let json = serde_json::to_value(InstructionView::from(&ix)).unwrap();
        assert!(json.get("parsed").is_none());
    }

    #[test]
    fn test_message_view_header_and_keys() {
        let sender = Keypair::new();
        let recipient = Pubkey::new_unique();
        let ix = build_instruction(InstructionKind::Transfer {
            from: sender.pubkey(),
            to: recipient,
            lamports: 1,
        });
        let blockhash = Hash::new_unique();
        let message = Message::new_with_blockhash(&[ix], Some(&sender.pubkey()), &blockhash);

        let view = MessageView::from(&message);
        assert_eq!(view.header.num_required_signatures, 1);
        assert_eq!(view.account_keys[0], sender.pubkey().to_string());
        assert_eq!(view.recent_blockhash, blockhash.to_string());
        assert_eq!(view.instructions.len(), 1);
    }

    #[test]
    fn test_keypair_view_round_trips_secret() {
        let keypair = Keypair::new();
        let view = KeypairView::from(&keypair);

        let restored = Keypair::from_base58_string(&view.secret_key);
        assert_eq!(restored.pubkey().to_string(), view.public_key);
    }
}
