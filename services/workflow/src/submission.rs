//! Submission and confirmation
//!
//! A signed transaction is sent once, then its signature status is polled at
//! the connection's commitment until it lands, fails, or its anchor expires.

use chrono::{DateTime, Utc};
use shared::Commitment;
use solana_sdk::{
    instruction::Instruction,
    signature::{Keypair, Signature, Signer},
    transaction::TransactionError,
};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::connection::Connection;
use crate::errors::{Result, WorkflowError};
use crate::instructions::ComputeBudget;
use crate::ledger::LedgerError;
use crate::transaction::{latest_anchor, package_transaction, sign, AnchoredTransaction};

/// What a confirmed submission looked like
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRecord {
    pub signature: Signature,
    pub commitment: Commitment,
    pub submitted_at: DateTime<Utc>,
    pub confirmed_at: DateTime<Utc>,
    /// Status queries made before the signature reached `commitment`
    pub poll_count: u32,
}

impl SubmissionRecord {
    pub fn latency(&self) -> chrono::Duration {
        self.confirmed_at - self.submitted_at
    }
}

/// Send `transaction` and wait until it reaches the connection's commitment.
///
/// Fails locally with `IncompleteSignatures` before any network call when a
/// required slot is unsigned. The transaction is sent exactly once.
pub async fn submit_and_confirm(
    connection: &Connection,
    transaction: &AnchoredTransaction,
) -> Result<SubmissionRecord> {
    let missing = transaction.missing_signers();
    if !missing.is_empty() {
        return Err(WorkflowError::IncompleteSignatures { missing });
    }

    let signature = transaction.signature();
    let last_valid_block_height = transaction.anchor.last_valid_block_height;

    let block_height = connection.get_block_height().await?;
    if block_height > last_valid_block_height {
        warn!(
            %signature,
            block_height,
            last_valid_block_height,
            "Anchor already expired, not sending"
        );
        let error = WorkflowError::Expired {
            signature,
            last_valid_block_height,
        };
        record_failure(&error);
        return Err(error);
    }

    let submitted_at = Utc::now();
    connection
        .ledger()
        .send_transaction(&transaction.transaction, connection.commitment_config())
        .await
        .map_err(|e| {
            let error = classify_send_error(connection, signature, last_valid_block_height, e);
            record_failure(&error);
            error
        })?;

    debug!(%signature, endpoint = connection.endpoint(), "Transaction sent");

    let poll_count = match wait_for_signature(connection, &signature, last_valid_block_height).await {
        Ok(polls) => polls,
        Err(error) => {
            record_failure(&error);
            return Err(error);
        }
    };

    let record = SubmissionRecord {
        signature,
        commitment: connection.commitment(),
        submitted_at,
        confirmed_at: Utc::now(),
        poll_count,
    };

    record_outcome("confirmed");
    if let Ok(latency) = record.latency().to_std() {
        metrics::histogram!("workflow_confirmation_duration_seconds").record(latency.as_secs_f64());
    }

    info!(
        %signature,
        commitment = %record.commitment,
        polls = poll_count,
        latency_ms = record.latency().num_milliseconds(),
        "Transaction confirmed"
    );

    Ok(record)
}

/// Fetch an anchor, prepend the compute budget, package, sign and submit.
///
/// `payer` pays fees and signs first; `extra_signers` cover any other
/// required slots.
pub async fn send_instructions(
    connection: &Connection,
    payer: &Keypair,
    extra_signers: &[&Keypair],
    instructions: &[Instruction],
    compute_budget: ComputeBudget,
) -> Result<SubmissionRecord> {
    let anchor = latest_anchor(connection).await?;

    let mut all_instructions = compute_budget.instructions();
    all_instructions.extend_from_slice(instructions);

    let mut signers = Vec::with_capacity(extra_signers.len() + 1);
    signers.push(payer);
    signers.extend(
        extra_signers
            .iter()
            .copied()
            .filter(|signer| signer.pubkey() != payer.pubkey()),
    );

    let transaction = package_transaction(&all_instructions, &payer.pubkey(), anchor);
    let transaction = sign(transaction, &signers)?;
    submit_and_confirm(connection, &transaction).await
}

/// Poll `signature` until it settles; returns the number of status queries.
///
/// Expiry is judged by block height against `last_valid_block_height`, with
/// the connection's `max_wait` as a ceiling in case the height stalls.
pub(crate) async fn wait_for_signature(
    connection: &Connection,
    signature: &Signature,
    last_valid_block_height: u64,
) -> Result<u32> {
    let settings = connection.settings();
    let started = Instant::now();
    let mut polls = 0u32;

    loop {
        polls += 1;
        let status = connection
            .ledger()
            .get_signature_status(signature, connection.commitment_config())
            .await
            .map_err(|e| connection.lost(e))?;

        match status {
            Some(Ok(())) => return Ok(polls),
            Some(Err(error)) => {
                warn!(%signature, %error, "Transaction failed on-chain");
                return Err(WorkflowError::Rejected {
                    signature: Some(*signature),
                    error,
                    logs: vec![],
                });
            }
            None => {
                let block_height = connection.get_block_height().await?;
                if block_height > last_valid_block_height {
                    warn!(
                        %signature,
                        block_height,
                        last_valid_block_height,
                        "Transaction expired before confirmation"
                    );
                    return Err(WorkflowError::Expired {
                        signature: *signature,
                        last_valid_block_height,
                    });
                }
                if started.elapsed() >= settings.max_wait {
                    warn!(
                        %signature,
                        waited_secs = started.elapsed().as_secs(),
                        "Gave up waiting for confirmation"
                    );
                    return Err(WorkflowError::Expired {
                        signature: *signature,
                        last_valid_block_height,
                    });
                }

                debug!(%signature, polls, block_height, "Signature not yet confirmed");
                tokio::time::sleep(settings.poll_interval).await;
            }
        }
    }
}

fn classify_send_error(
    connection: &Connection,
    signature: Signature,
    last_valid_block_height: u64,
    error: LedgerError,
) -> WorkflowError {
    match error {
        LedgerError::Transaction {
            error: TransactionError::BlockhashNotFound,
            ..
        } => {
            warn!(%signature, "Node does not know the blockhash");
            WorkflowError::Expired {
                signature,
                last_valid_block_height,
            }
        }
        LedgerError::Transaction { error, logs } => {
            warn!(%signature, %error, log_lines = logs.len(), "Transaction refused by node");
            WorkflowError::Rejected {
                signature: Some(signature),
                error,
                logs,
            }
        }
        other => {
            warn!(%signature, error = %other, "Send failed");
            connection.lost(other)
        }
    }
}

fn record_failure(error: &WorkflowError) {
    metrics::counter!(
        "workflow_submissions_total",
        "outcome" => "failed",
        "code" => error.code().as_str()
    )
    .increment(1);
}

fn record_outcome(outcome: &'static str) {
    metrics::counter!("workflow_submissions_total", "outcome" => outcome).increment(1);
}
