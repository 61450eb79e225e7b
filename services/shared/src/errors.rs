//! Shared error classification for the transaction workflow
//!
//! Design:
//! - Standardized error codes for consistent reporting across the library and binaries
//! - Categorized by error domain (Validation, Network, Ledger, Signing, Internal, NotFound)
//! - Codes follow the pattern: <CATEGORY>_<SPECIFIC>
//!
//! The workflow's concrete error enum maps each of its variants onto one
//! category and one code defined here.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error categories that drive metrics labels and caller retry decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCategory {
    /// Caller supplied malformed input (seeds, arguments)
    Validation,

    /// Node unreachable, transport dropped, faucet unavailable
    Network,

    /// The anchor's validity window elapsed before confirmation
    Expired,

    /// The ledger executed the transaction and reported a failure
    Ledger,

    /// Signer set does not match the transaction's required signers
    Signing,

    /// Account lookups that found nothing
    NotFound,

    /// Decoding failures and exhausted derivations
    Internal,
}

impl ErrorCategory {
    /// Whether resubmitting with a fresh anchor may succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Expired)
    }
}

/// Standard error codes used across the workspace
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorCode(pub &'static str);

impl ErrorCode {
    // Validation errors
    pub const VALIDATION_INVALID_SEEDS: ErrorCode = ErrorCode("VALIDATION_INVALID_SEEDS");
    pub const VALIDATION_INVALID_ARGUMENT: ErrorCode = ErrorCode("VALIDATION_INVALID_ARGUMENT");

    // Network errors
    pub const NETWORK_UNREACHABLE_ENDPOINT: ErrorCode = ErrorCode("NETWORK_UNREACHABLE_ENDPOINT");
    pub const NETWORK_CONNECTION_LOST: ErrorCode = ErrorCode("NETWORK_CONNECTION_LOST");
    pub const NETWORK_FUNDING_UNAVAILABLE: ErrorCode = ErrorCode("NETWORK_FUNDING_UNAVAILABLE");

    // Validity window
    pub const EXPIRED_BLOCKHASH: ErrorCode = ErrorCode("EXPIRED_BLOCKHASH");

    // Ledger execution
    pub const LEDGER_REJECTED: ErrorCode = ErrorCode("LEDGER_REJECTED");

    // Signing
    pub const SIGNING_UNAUTHORIZED_SIGNER: ErrorCode = ErrorCode("SIGNING_UNAUTHORIZED_SIGNER");
    pub const SIGNING_INCOMPLETE_SIGNATURES: ErrorCode = ErrorCode("SIGNING_INCOMPLETE_SIGNATURES");

    // Resource errors
    pub const NOT_FOUND_ACCOUNT: ErrorCode = ErrorCode("NOT_FOUND_ACCOUNT");

    // Internal errors
    pub const INTERNAL_NO_VALID_BUMP: ErrorCode = ErrorCode("INTERNAL_NO_VALID_BUMP");
    pub const INTERNAL_DECODE: ErrorCode = ErrorCode("INTERNAL_DECODE");

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
