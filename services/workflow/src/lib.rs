//! Client-side Solana transaction workflow
//!
//! connection → funding → instruction assembly → packaging and signing →
//! submission and confirmation, plus typed clients for a few Anchor programs.

pub mod account_parsing;
pub mod config;
pub mod connection;
pub mod context;
pub mod errors;
pub mod funding;
pub mod instructions;
pub mod ledger;
pub mod logging;
pub mod pda;
pub mod programs;
pub mod retry_strategy;
pub mod submission;
pub mod transaction;
pub mod views;

pub use account_parsing::{fetch_mint, AnchorAccount, MintAccount};
pub use config::WorkflowConfig;
pub use connection::{acquire_configured_connection, acquire_connection, ConfirmationSettings, Connection};
pub use context::ProgramContext;
pub use errors::{DecodeError, Result, WorkflowError};
pub use funding::{confirm_funding, fund_keypair, request_test_funds};
pub use instructions::{build_instruction, create_mint_instructions, ComputeBudget, InstructionKind};
pub use ledger::{Ledger, LedgerError};
pub use pda::{derive_address, DerivedAddress};
pub use retry_strategy::{resubmit_with_fresh_anchor, RetryStrategy};
pub use submission::{send_instructions, submit_and_confirm, SubmissionRecord};
pub use transaction::{latest_anchor, package_transaction, sign, AnchoredTransaction, ValidityAnchor};
