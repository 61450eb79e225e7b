use anyhow::Context;
use shared::{
    Commitment, DEFAULT_AIRDROP_LAMPORTS, DEFAULT_CONFIRM_TIMEOUT_SECS, DEFAULT_MAX_RETRIES,
    DEFAULT_POLL_INTERVAL_MS, DEFAULT_RPC_URL,
};
use solana_sdk::signature::{read_keypair_file, Keypair};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::connection::ConfirmationSettings;
use crate::retry_strategy::RetryStrategy;

#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    pub rpc_url: String,
    pub commitment: Commitment,
    pub poll_interval_ms: u64,
    pub confirm_timeout_secs: u64,
    pub max_retries: u32,
    pub airdrop_lamports: u64,
    /// Fee payer keypair file; a fresh keypair is generated when unset
    pub wallet_path: Option<PathBuf>,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            commitment: Commitment::Confirmed,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            confirm_timeout_secs: DEFAULT_CONFIRM_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            airdrop_lamports: DEFAULT_AIRDROP_LAMPORTS,
            wallet_path: None,
        }
    }
}

impl WorkflowConfig {
    /// Load `.env` (if present) then read the environment.
    ///
    /// Endpoint resolution order: `ANCHOR_PROVIDER_URL`, `SOLANA_RPC_URL`,
    /// then the local validator.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let rpc_url = env::var("ANCHOR_PROVIDER_URL")
            .or_else(|_| env::var("SOLANA_RPC_URL"))
            .unwrap_or(defaults.rpc_url);

        let commitment = match env::var("SOLANA_COMMITMENT") {
            Ok(value) => value
                .parse::<Commitment>()
                .context("SOLANA_COMMITMENT is invalid")?,
            Err(_) => defaults.commitment,
        };

        let wallet_path = env::var("ANCHOR_WALLET")
            .or_else(|_| env::var("SOLANA_KEYPAIR_PATH"))
            .ok()
            .map(PathBuf::from);

        Ok(WorkflowConfig {
            rpc_url,
            commitment,
            poll_interval_ms: env::var("WORKFLOW_POLL_INTERVAL_MS")
                .unwrap_or_else(|_| defaults.poll_interval_ms.to_string())
                .parse()
                .context("WORKFLOW_POLL_INTERVAL_MS must be an integer")?,
            confirm_timeout_secs: env::var("WORKFLOW_CONFIRM_TIMEOUT_SECS")
                .unwrap_or_else(|_| defaults.confirm_timeout_secs.to_string())
                .parse()
                .context("WORKFLOW_CONFIRM_TIMEOUT_SECS must be an integer")?,
            max_retries: env::var("WORKFLOW_MAX_RETRIES")
                .unwrap_or_else(|_| defaults.max_retries.to_string())
                .parse()
                .context("WORKFLOW_MAX_RETRIES must be an integer")?,
            airdrop_lamports: env::var("WORKFLOW_AIRDROP_LAMPORTS")
                .unwrap_or_else(|_| defaults.airdrop_lamports.to_string())
                .parse()
                .context("WORKFLOW_AIRDROP_LAMPORTS must be an integer")?,
            wallet_path,
        })
    }

    pub fn confirmation_settings(&self) -> ConfirmationSettings {
        ConfirmationSettings {
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            max_wait: Duration::from_secs(self.confirm_timeout_secs),
        }
    }

    /// Backoff policy for `resubmit_with_fresh_anchor`, bounded by `WORKFLOW_MAX_RETRIES`
    pub fn retry_strategy(&self) -> RetryStrategy {
        RetryStrategy::new(self.max_retries)
    }

    /// The configured wallet, or a freshly generated keypair when none is set
    pub fn load_wallet(&self) -> anyhow::Result<Keypair> {
        match &self.wallet_path {
            Some(path) => read_keypair_file(path)
                .map_err(|e| anyhow::anyhow!("Failed to load wallet {}: {}", path.display(), e)),
            None => Ok(Keypair::new()),
        }
    }
}
