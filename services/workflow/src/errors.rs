//! Workflow error types
//!
//! Every failure the workflow surfaces is one of these variants; nothing is
//! retried silently. Each variant maps onto a shared category and code.

use shared::errors::{ErrorCategory, ErrorCode};
use solana_sdk::{pubkey::Pubkey, signature::Signature, transaction::TransactionError};

/// Failure while turning raw account bytes into a typed record
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("Account data too short: {actual} bytes (expected at least {expected})")]
    TooShort { expected: usize, actual: usize },

    #[error("Discriminator mismatch for {account}: expected {expected:?}, found {found:?}")]
    DiscriminatorMismatch {
        account: &'static str,
        expected: [u8; 8],
        found: [u8; 8],
    },

    #[error("Invalid UTF-8 in field {0}")]
    InvalidUtf8(&'static str),

    #[error("Invalid option tag {tag} in field {field}")]
    InvalidOptionTag { field: &'static str, tag: u32 },

    #[error("Account {address} is owned by {owner}, expected {expected}")]
    WrongOwner {
        address: Pubkey,
        owner: Pubkey,
        expected: Pubkey,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("Endpoint unreachable: {endpoint}: {reason}")]
    UnreachableEndpoint { endpoint: String, reason: String },

    #[error("Test funds unavailable for {recipient}: {reason}")]
    FundingUnavailable { recipient: Pubkey, reason: String },

    #[error("No valid bump found for program {program_id}")]
    NoValidBumpFound { program_id: Pubkey },

    #[error("Invalid seeds: {0}")]
    InvalidSeeds(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Signer {0} is not a required signer of this transaction")]
    UnauthorizedSigner(Pubkey),

    #[error("Transaction is missing signatures from: {}", format_keys(.missing))]
    IncompleteSignatures { missing: Vec<Pubkey> },

    #[error("Transaction {signature} expired: block height passed {last_valid_block_height}")]
    Expired {
        signature: Signature,
        last_valid_block_height: u64,
    },

    #[error("Transaction {} rejected: {error}", display_signature(.signature))]
    Rejected {
        signature: Option<Signature>,
        error: TransactionError,
        logs: Vec<String>,
    },

    #[error("Connection lost: {0}")]
    ConnectionLost(String),

    #[error("Account does not exist: {0}")]
    AccountNotFound(Pubkey),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),
}

impl WorkflowError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            WorkflowError::UnreachableEndpoint { .. }
            | WorkflowError::FundingUnavailable { .. }
            | WorkflowError::ConnectionLost(_) => ErrorCategory::Network,
            WorkflowError::InvalidSeeds(_) | WorkflowError::InvalidArgument(_) => {
                ErrorCategory::Validation
            }
            WorkflowError::UnauthorizedSigner(_) | WorkflowError::IncompleteSignatures { .. } => {
                ErrorCategory::Signing
            }
            WorkflowError::Expired { .. } => ErrorCategory::Expired,
            WorkflowError::Rejected { .. } => ErrorCategory::Ledger,
            WorkflowError::AccountNotFound(_) => ErrorCategory::NotFound,
            WorkflowError::NoValidBumpFound { .. } | WorkflowError::Decode(_) => {
                ErrorCategory::Internal
            }
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            WorkflowError::UnreachableEndpoint { .. } => ErrorCode::NETWORK_UNREACHABLE_ENDPOINT,
            WorkflowError::FundingUnavailable { .. } => ErrorCode::NETWORK_FUNDING_UNAVAILABLE,
            WorkflowError::NoValidBumpFound { .. } => ErrorCode::INTERNAL_NO_VALID_BUMP,
            WorkflowError::InvalidSeeds(_) => ErrorCode::VALIDATION_INVALID_SEEDS,
            WorkflowError::InvalidArgument(_) => ErrorCode::VALIDATION_INVALID_ARGUMENT,
            WorkflowError::UnauthorizedSigner(_) => ErrorCode::SIGNING_UNAUTHORIZED_SIGNER,
            WorkflowError::IncompleteSignatures { .. } => ErrorCode::SIGNING_INCOMPLETE_SIGNATURES,
            WorkflowError::Expired { .. } => ErrorCode::EXPIRED_BLOCKHASH,
            WorkflowError::Rejected { .. } => ErrorCode::LEDGER_REJECTED,
            WorkflowError::ConnectionLost(_) => ErrorCode::NETWORK_CONNECTION_LOST,
            WorkflowError::AccountNotFound(_) => ErrorCode::NOT_FOUND_ACCOUNT,
            WorkflowError::Decode(_) => ErrorCode::INTERNAL_DECODE,
        }
    }
}

fn format_keys(keys: &[Pubkey]) -> String {
    keys.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn display_signature(signature: &Option<Signature>) -> String {
    signature
        .map(|s| s.to_string())
        .unwrap_or_else(|| "<unsent>".to_string())
}

pub type Result<T> = std::result::Result<T, WorkflowError>;
