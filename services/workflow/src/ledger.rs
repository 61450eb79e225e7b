//! The seam between the workflow and a ledger node
//!
//! `Ledger` lists the handful of RPC calls the workflow needs. The nonblocking
//! `RpcClient` is the production implementation; tests substitute an
//! in-memory ledger.

use async_trait::async_trait;
use solana_client::{
    client_error::{ClientError, ClientErrorKind},
    nonblocking::rpc_client::RpcClient,
    rpc_config::RpcSendTransactionConfig,
    rpc_request::{RpcError, RpcResponseErrorData},
};
use solana_sdk::{
    account::Account,
    commitment_config::CommitmentConfig,
    hash::Hash,
    pubkey::Pubkey,
    signature::Signature,
    transaction::{Transaction, TransactionError},
};

/// Error returned by a ledger call, before the workflow classifies it
#[derive(Debug, Clone, thiserror::Error)]
pub enum LedgerError {
    /// The request never got an answer (DNS, refused, reset, timeout)
    #[error("transport error: {0}")]
    Transport(String),

    /// The node answered with an RPC-level error
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The node refused or failed the transaction itself
    #[error("transaction error: {error}")]
    Transaction {
        error: TransactionError,
        logs: Vec<String>,
    },
}

impl LedgerError {
    pub fn is_transport(&self) -> bool {
        matches!(self, LedgerError::Transport(_))
    }
}

pub type LedgerResult<T> = std::result::Result<T, LedgerError>;

#[async_trait]
pub trait Ledger: Send + Sync {
    /// Handshake; returns the node's version string
    async fn get_version(&self) -> LedgerResult<String>;

    /// Latest blockhash and the last block height at which it is still valid
    async fn get_latest_blockhash(&self, commitment: CommitmentConfig) -> LedgerResult<(Hash, u64)>;

    async fn get_block_height(&self, commitment: CommitmentConfig) -> LedgerResult<u64>;

    async fn send_transaction(
        &self,
        transaction: &Transaction,
        commitment: CommitmentConfig,
    ) -> LedgerResult<Signature>;

    /// `None` while the signature is unknown at `commitment`
    async fn get_signature_status(
        &self,
        signature: &Signature,
        commitment: CommitmentConfig,
    ) -> LedgerResult<Option<Result<(), TransactionError>>>;

    async fn request_airdrop(&self, recipient: &Pubkey, lamports: u64) -> LedgerResult<Signature>;

    async fn get_balance(&self, address: &Pubkey, commitment: CommitmentConfig) -> LedgerResult<u64>;

    async fn get_account(
        &self,
        address: &Pubkey,
        commitment: CommitmentConfig,
    ) -> LedgerResult<Option<Account>>;

    async fn get_minimum_balance_for_rent_exemption(&self, data_len: usize) -> LedgerResult<u64>;
}

#[async_trait]
impl Ledger for RpcClient {
    async fn get_version(&self) -> LedgerResult<String> {
        self.get_version()
            .await
            .map(|version| version.solana_core)
            .map_err(LedgerError::from)
    }

    async fn get_latest_blockhash(&self, commitment: CommitmentConfig) -> LedgerResult<(Hash, u64)> {
        self.get_latest_blockhash_with_commitment(commitment)
            .await
            .map_err(LedgerError::from)
    }

    async fn get_block_height(&self, commitment: CommitmentConfig) -> LedgerResult<u64> {
        self.get_block_height_with_commitment(commitment)
            .await
            .map_err(LedgerError::from)
    }

    async fn send_transaction(
        &self,
        transaction: &Transaction,
        commitment: CommitmentConfig,
    ) -> LedgerResult<Signature> {
        let config = RpcSendTransactionConfig {
            preflight_commitment: Some(commitment.commitment),
            ..RpcSendTransactionConfig::default()
        };
        self.send_transaction_with_config(transaction, config)
            .await
            .map_err(LedgerError::from)
    }

    async fn get_signature_status(
        &self,
        signature: &Signature,
        commitment: CommitmentConfig,
    ) -> LedgerResult<Option<Result<(), TransactionError>>> {
        self.get_signature_status_with_commitment(signature, commitment)
            .await
            .map_err(LedgerError::from)
    }

    async fn request_airdrop(&self, recipient: &Pubkey, lamports: u64) -> LedgerResult<Signature> {
        RpcClient::request_airdrop(self, recipient, lamports)
            .await
            .map_err(LedgerError::from)
    }

    async fn get_balance(&self, address: &Pubkey, commitment: CommitmentConfig) -> LedgerResult<u64> {
        self.get_balance_with_commitment(address, commitment)
            .await
            .map(|response| response.value)
            .map_err(LedgerError::from)
    }

    async fn get_account(
        &self,
        address: &Pubkey,
        commitment: CommitmentConfig,
    ) -> LedgerResult<Option<Account>> {
        self.get_account_with_commitment(address, commitment)
            .await
            .map(|response| response.value)
            .map_err(LedgerError::from)
    }

    async fn get_minimum_balance_for_rent_exemption(&self, data_len: usize) -> LedgerResult<u64> {
        RpcClient::get_minimum_balance_for_rent_exemption(self, data_len)
            .await
            .map_err(LedgerError::from)
    }
}

impl From<ClientError> for LedgerError {
    fn from(error: ClientError) -> Self {
        match error.kind() {
            ClientErrorKind::Io(e) => LedgerError::Transport(e.to_string()),
            ClientErrorKind::Reqwest(e) => LedgerError::Transport(e.to_string()),
            ClientErrorKind::TransactionError(e) => LedgerError::Transaction {
                error: e.clone(),
                logs: vec![],
            },
            ClientErrorKind::RpcError(RpcError::RpcResponseError {
                data: RpcResponseErrorData::SendTransactionPreflightFailure(simulation),
                code,
                message,
            }) => match &simulation.err {
                Some(err) => LedgerError::Transaction {
                    error: err.clone(),
                    logs: simulation.logs.clone().unwrap_or_default(),
                },
                None => LedgerError::Rpc {
                    code: *code,
                    message: message.clone(),
                },
            },
            ClientErrorKind::RpcError(RpcError::RpcResponseError { code, message, .. }) => {
                LedgerError::Rpc {
                    code: *code,
                    message: message.clone(),
                }
            }
            other => LedgerError::Rpc {
                code: 0,
                message: other.to_string(),
            },
        }
    }
}
