//! Connection acquisition
//!
//! A `Connection` pairs a ledger handle with the commitment level every query
//! and confirmation uses, plus the confirmation polling settings.

use shared::{
    Commitment, DEFAULT_CONFIRM_TIMEOUT_SECS, DEFAULT_POLL_INTERVAL_MS,
};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::WorkflowConfig;
use crate::errors::{Result, WorkflowError};
use crate::ledger::{Ledger, LedgerError};

/// How confirmation waits poll the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationSettings {
    pub poll_interval: Duration,
    /// Hard ceiling on a single wait, in case block height stops advancing
    pub max_wait: Duration,
}

impl Default for ConfirmationSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            max_wait: Duration::from_secs(DEFAULT_CONFIRM_TIMEOUT_SECS),
        }
    }
}

#[derive(Clone)]
pub struct Connection {
    ledger: Arc<dyn Ledger>,
    endpoint: String,
    commitment: Commitment,
    settings: ConfirmationSettings,
}

/// Open a handle to `endpoint` and check it answers
pub async fn acquire_connection(endpoint: &str, commitment: Commitment) -> Result<Connection> {
    let client = RpcClient::new_with_commitment(endpoint.to_string(), commitment.into());
    Connection::from_ledger(Arc::new(client), endpoint, commitment).await
}

/// Same as [`acquire_connection`], with polling settings taken from `config`
pub async fn acquire_configured_connection(config: &WorkflowConfig) -> Result<Connection> {
    let connection = acquire_connection(&config.rpc_url, config.commitment).await?;
    Ok(connection.with_settings(config.confirmation_settings()))
}

impl Connection {
    /// Wrap an existing ledger handle, performing the same handshake
    pub async fn from_ledger(
        ledger: Arc<dyn Ledger>,
        endpoint: impl Into<String>,
        commitment: Commitment,
    ) -> Result<Self> {
        let endpoint = endpoint.into();
        let version = ledger
            .get_version()
            .await
            .map_err(|e| WorkflowError::UnreachableEndpoint {
                endpoint: endpoint.clone(),
                reason: e.to_string(),
            })?;

        info!(
            endpoint = %endpoint,
            commitment = %commitment,
            node_version = %version,
            "Connection acquired"
        );

        Ok(Self {
            ledger,
            endpoint,
            commitment,
            settings: ConfirmationSettings::default(),
        })
    }

    pub fn with_settings(mut self, settings: ConfirmationSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn ledger(&self) -> &dyn Ledger {
        self.ledger.as_ref()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn commitment(&self) -> Commitment {
        self.commitment
    }

    pub fn commitment_config(&self) -> CommitmentConfig {
        self.commitment.into()
    }

    pub fn settings(&self) -> ConfirmationSettings {
        self.settings
    }

    pub async fn get_balance(&self, address: &Pubkey) -> Result<u64> {
        let balance = self
            .ledger
            .get_balance(address, self.commitment_config())
            .await
            .map_err(|e| self.lost(e))?;
        debug!(address = %address, balance, "Fetched balance");
        Ok(balance)
    }

    pub async fn get_minimum_balance_for_rent_exemption(&self, data_len: usize) -> Result<u64> {
        self.ledger
            .get_minimum_balance_for_rent_exemption(data_len)
            .await
            .map_err(|e| self.lost(e))
    }

    pub async fn get_block_height(&self) -> Result<u64> {
        self.ledger
            .get_block_height(self.commitment_config())
            .await
            .map_err(|e| self.lost(e))
    }

    /// Raw account fetch; `None` when the account does not exist
    pub async fn get_account(&self, address: &Pubkey) -> Result<Option<solana_sdk::account::Account>> {
        self.ledger
            .get_account(address, self.commitment_config())
            .await
            .map_err(|e| self.lost(e))
    }

    /// Classify a failure of an established connection
    pub(crate) fn lost(&self, error: LedgerError) -> WorkflowError {
        WorkflowError::ConnectionLost(format!("{}: {}", self.endpoint, error))
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("endpoint", &self.endpoint)
            .field("commitment", &self.commitment)
            .field("settings", &self.settings)
            .finish()
    }
}
