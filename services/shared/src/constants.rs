//! Shared constants for the transaction workflow
//!
//! This module centralizes the magic numbers used by the client workflow,
//! the program clients and the demo binaries.

pub use solana_sdk::native_token::LAMPORTS_PER_SOL;

/// Default RPC endpoint (local test validator)
pub const DEFAULT_RPC_URL: &str = "http://localhost:8899";

/// Default faucet request: 1 SOL
pub const DEFAULT_AIRDROP_LAMPORTS: u64 = LAMPORTS_PER_SOL;

/// Number of blocks a blockhash stays valid for inclusion.
///
/// The validity window reported by `getLatestBlockhash` is derived from this;
/// it is kept here for display and for test ledgers.
pub const MAX_PROCESSING_AGE: u64 = 150;

/// Delay between two signature status polls
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

/// Upper bound on a single confirmation wait.
///
/// Expiry of the validity anchor normally ends the wait first (~60-90s).
pub const DEFAULT_CONFIRM_TIMEOUT_SECS: u64 = 90;

/// Attempts allowed to the opt-in resubmission helper
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Size of an SPL mint account without extensions
pub const MINT_SIZE: usize = 82;

/// Size of the Anchor account / instruction discriminator
pub const ANCHOR_DISCRIMINATOR_LEN: usize = 8;

/// Maximum length of a single PDA seed
pub const MAX_SEED_LEN: usize = 32;

/// Maximum number of PDA seeds, the bump seed included
pub const MAX_SEEDS: usize = 16;

/// Movie review limits (`#[max_len]` on the on-chain account)
pub const MAX_MOVIE_TITLE_LEN: usize = 80;
pub const MAX_MOVIE_DESCRIPTION_LEN: usize = 200;

/// Compute budget used by the compute-budget demo
pub const DEMO_COMPUTE_UNIT_LIMIT: u32 = 300_000;
pub const DEMO_COMPUTE_UNIT_PRICE_MICRO_LAMPORTS: u64 = 1;
