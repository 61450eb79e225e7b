//! Test-cluster funding through the faucet

use solana_sdk::{pubkey::Pubkey, signature::Signature};
use tracing::{info, warn};

use crate::connection::Connection;
use crate::errors::{Result, WorkflowError};
use crate::submission::wait_for_signature;
use crate::transaction::latest_anchor;

/// Ask the faucet for `lamports`; the returned signature is still pending.
///
/// A refusal or rate limit from the faucet is `FundingUnavailable`; a
/// transport failure is `ConnectionLost`.
pub async fn request_test_funds(
    connection: &Connection,
    recipient: &Pubkey,
    lamports: u64,
) -> Result<Signature> {
    let signature = connection
        .ledger()
        .request_airdrop(recipient, lamports)
        .await
        .map_err(|e| {
            metrics::counter!("workflow_airdrop_failures_total").increment(1);
            if e.is_transport() {
                warn!(%recipient, lamports, error = %e, "Airdrop request never reached the faucet");
                return connection.lost(e);
            }
            warn!(%recipient, lamports, error = %e, "Airdrop request refused");
            WorkflowError::FundingUnavailable {
                recipient: *recipient,
                reason: e.to_string(),
            }
        })?;

    info!(%recipient, lamports, %signature, "Airdrop requested");
    Ok(signature)
}

/// Wait for a faucet signature against a freshly fetched anchor
pub async fn confirm_funding(connection: &Connection, signature: &Signature) -> Result<()> {
    let anchor = latest_anchor(connection).await?;
    let polls = wait_for_signature(connection, signature, anchor.last_valid_block_height).await?;
    info!(%signature, polls, "Airdrop confirmed");
    Ok(())
}

/// Request and confirm funds in one step; returns the new balance
pub async fn fund_keypair(connection: &Connection, recipient: &Pubkey, lamports: u64) -> Result<u64> {
    let signature = request_test_funds(connection, recipient, lamports).await?;
    confirm_funding(connection, &signature).await?;
    connection.get_balance(recipient).await
}
