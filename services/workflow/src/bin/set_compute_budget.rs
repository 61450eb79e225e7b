use anyhow::Result;
use shared::{LamportAmount, DEMO_COMPUTE_UNIT_LIMIT, DEMO_COMPUTE_UNIT_PRICE_MICRO_LAMPORTS};
use solana_sdk::signature::{Keypair, Signer};
use workflow::instructions::{build_instruction, ComputeBudget, InstructionKind};
use workflow::{acquire_configured_connection, fund_keypair, send_instructions, WorkflowConfig};

#[tokio::main]
async fn main() -> Result<()> {
    workflow::logging::init();

    let config = WorkflowConfig::load()?;
    let connection = acquire_configured_connection(&config).await?;

    let sender = Keypair::new();
    let recipient = Keypair::new();

    fund_keypair(&connection, &sender.pubkey(), config.airdrop_lamports).await?;

    let transfer = build_instruction(InstructionKind::Transfer {
        from: sender.pubkey(),
        to: recipient.pubkey(),
        lamports: LamportAmount::from_sol(0.01)?.as_u64(),
    });
    let budget = ComputeBudget::new(DEMO_COMPUTE_UNIT_LIMIT, DEMO_COMPUTE_UNIT_PRICE_MICRO_LAMPORTS);

    let record = send_instructions(&connection, &sender, &[], &[transfer], budget).await?;
    println!("Transaction Signature: {}", record.signature);
    Ok(())
}
