use anyhow::Result;
use shared::LamportAmount;
use solana_sdk::signature::{Keypair, Signer};
use workflow::instructions::{build_instruction, InstructionKind};
use workflow::views::{to_pretty_json, MessageView};
use workflow::{acquire_configured_connection, latest_anchor, package_transaction, sign, WorkflowConfig};

#[tokio::main]
async fn main() -> Result<()> {
    workflow::logging::init();

    let config = WorkflowConfig::load()?;
    let connection = acquire_configured_connection(&config).await?;
    let anchor = latest_anchor(&connection).await?;

    let sender = Keypair::new();
    let recipient = Keypair::new();

    let transfer = build_instruction(InstructionKind::Transfer {
        from: sender.pubkey(),
        to: recipient.pubkey(),
        lamports: LamportAmount::from_sol(0.01)?.as_u64(),
    });

    // Built and signed only; nothing is sent.
    let transaction = package_transaction(&[transfer], &sender.pubkey(), anchor);
    let transaction = sign(transaction, &[&sender])?;

    println!("Last valid block height: {}", anchor.last_valid_block_height);
    println!("{}", to_pretty_json(&MessageView::from(&transaction.transaction)));
    Ok(())
}
