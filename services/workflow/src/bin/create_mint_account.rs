use anyhow::{Context, Result};
use serde_json::json;
use shared::{program_ids::TOKEN_2022_PROGRAM_ID, MINT_SIZE};
use solana_sdk::signature::{Keypair, Signer};
use workflow::{
    acquire_configured_connection, create_mint_instructions, fetch_mint, fund_keypair,
    resubmit_with_fresh_anchor, ComputeBudget, WorkflowConfig,
};

const DECIMALS: u8 = 9;

#[tokio::main]
async fn main() -> Result<()> {
    workflow::logging::init();

    let config = WorkflowConfig::load()?;
    let connection = acquire_configured_connection(&config).await?;

    let fee_payer = Keypair::new();
    fund_keypair(&connection, &fee_payer.pubkey(), config.airdrop_lamports).await?;

    let mint = Keypair::new();
    let rent = connection.get_minimum_balance_for_rent_exemption(MINT_SIZE).await?;

    let instructions = create_mint_instructions(
        &fee_payer.pubkey(),
        &mint.pubkey(),
        rent,
        DECIMALS,
        &fee_payer.pubkey(),
        Some(&fee_payer.pubkey()),
        Some(&TOKEN_2022_PROGRAM_ID),
    );

    // A repeated create_account on the same mint address fails, so a resend is harmless.
    let record = resubmit_with_fresh_anchor(
        &connection,
        &config.retry_strategy(),
        &fee_payer,
        &[&mint],
        &instructions,
        ComputeBudget::default(),
    )
    .await
    .context("Mint creation failed")?;

    println!("Mint Address: {}", mint.pubkey());
    println!("Transaction Signature: {}", record.signature);

    let account = connection
        .get_account(&mint.pubkey())
        .await?
        .context("Mint account missing after confirmation")?;

    let data_summary = match (account.data.first(), account.data.last()) {
        (Some(first), Some(last)) => json!([first, format!("...truncated, total bytes: {}...", account.data.len()), last]),
        _ => json!([]),
    };
    let account_info = json!({
        "lamports": account.lamports,
        "owner": account.owner.to_string(),
        "executable": account.executable,
        "rentEpoch": account.rent_epoch,
        "data": data_summary,
    });
    println!("{}", serde_json::to_string_pretty(&account_info)?);

    let mint_account = fetch_mint(&connection, &mint.pubkey()).await?;
    println!("{mint_account:#?}");
    Ok(())
}
