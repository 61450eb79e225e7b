use backoff::{backoff::Backoff, ExponentialBackoff, ExponentialBackoffBuilder};
use solana_sdk::{instruction::Instruction, signature::Keypair};
use std::time::Duration;
use tracing::warn;

use crate::connection::Connection;
use crate::errors::{Result, WorkflowError};
use crate::instructions::ComputeBudget;
use crate::submission::{send_instructions, SubmissionRecord};

#[derive(Debug, Clone, Copy)]
pub struct RetryStrategy {
    max_retries: u32,
    initial_interval: Duration,
    max_interval: Duration,
}

impl RetryStrategy {
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            initial_interval: Duration::from_secs(1),
            max_interval: Duration::from_secs(30),
        }
    }

    pub fn with_intervals(mut self, initial: Duration, max: Duration) -> Self {
        self.initial_interval = initial;
        self.max_interval = max;
        self
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn create_backoff(&self) -> ExponentialBackoff {
        ExponentialBackoffBuilder::new()
            .with_initial_interval(self.initial_interval)
            .with_max_interval(self.max_interval)
            .with_multiplier(2.0)
            .with_max_elapsed_time(None)
            .build()
    }

    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_retries
    }

    /// Only an expired anchor or a network failure is worth another attempt
    pub fn is_retryable_error(&self, error: &WorkflowError) -> bool {
        error.category().is_transient()
    }
}

/// Send `instructions`, rebuilding the transaction on a fresh anchor after each
/// retryable failure.
///
/// Opt-in only: the core workflow never resubmits. A `ConnectionLost` during
/// confirmation can mean the earlier attempt landed anyway, so callers should
/// only use this for instructions that are safe to execute twice.
pub async fn resubmit_with_fresh_anchor(
    connection: &Connection,
    strategy: &RetryStrategy,
    payer: &Keypair,
    extra_signers: &[&Keypair],
    instructions: &[Instruction],
    compute_budget: ComputeBudget,
) -> Result<SubmissionRecord> {
    let mut backoff = strategy.create_backoff();
    let mut attempt = 0u32;

    loop {
        match send_instructions(connection, payer, extra_signers, instructions, compute_budget).await {
            Ok(record) => return Ok(record),
            Err(error) if strategy.is_retryable_error(&error) && strategy.should_retry(attempt) => {
                attempt += 1;
                let delay = backoff.next_backoff().unwrap_or(strategy.max_interval);
                warn!(
                    attempt,
                    max_retries = strategy.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    error = %error,
                    "Retrying with a fresh anchor"
                );
                metrics::counter!("workflow_resubmissions_total").increment(1);
                tokio::time::sleep(delay).await;
            }
            Err(error) => return Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::{pubkey::Pubkey, signature::Signature, transaction::TransactionError};

    #[test]
    fn test_should_retry() {
        let strategy = RetryStrategy::new(3);
        assert!(strategy.should_retry(0));
        assert!(strategy.should_retry(2));
        assert!(!strategy.should_retry(3));
    }

    #[test]
    fn test_is_retryable_error() {
        let strategy = RetryStrategy::new(3);
        assert!(strategy.is_retryable_error(&WorkflowError::Expired {
            signature: Signature::default(),
            last_valid_block_height: 10,
        }));
        assert!(strategy.is_retryable_error(&WorkflowError::ConnectionLost("reset".into())));
        assert!(!strategy.is_retryable_error(&WorkflowError::Rejected {
            signature: None,
            error: TransactionError::InsufficientFundsForFee,
            logs: vec![],
        }));
        assert!(!strategy.is_retryable_error(&WorkflowError::UnauthorizedSigner(
            Pubkey::new_unique()
        )));
    }

    #[test]
    fn test_backoff_grows_and_caps() {
        let strategy = RetryStrategy::new(5)
            .with_intervals(Duration::from_millis(100), Duration::from_millis(250));
        let mut backoff = strategy.create_backoff();

        let delays: Vec<Duration> = (0..6).filter_map(|_| backoff.next_backoff()).collect();
        assert_eq!(delays.len(), 6);
        // Randomisation keeps each delay within 50% of the nominal interval.
        assert!(delays.iter().all(|d| *d <= Duration::from_millis(375)));
    }
}
