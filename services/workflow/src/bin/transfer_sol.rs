use anyhow::Result;
use shared::LamportAmount;
use solana_sdk::signature::{Keypair, Signer};
use workflow::instructions::{build_instruction, ComputeBudget, InstructionKind};
use workflow::{acquire_configured_connection, fund_keypair, send_instructions, WorkflowConfig};

#[tokio::main]
async fn main() -> Result<()> {
    workflow::logging::init();

    let config = WorkflowConfig::load()?;
    let connection = acquire_configured_connection(&config).await?;

    let sender = Keypair::new();
    let receiver = Keypair::new();

    fund_keypair(&connection, &sender.pubkey(), config.airdrop_lamports).await?;

    println!("Sender's initial balance: {}", connection.get_balance(&sender.pubkey()).await?);
    println!("Receiver's initial balance: {}", connection.get_balance(&receiver.pubkey()).await?);

    let transfer = build_instruction(InstructionKind::Transfer {
        from: sender.pubkey(),
        to: receiver.pubkey(),
        lamports: LamportAmount::from_sol(0.01)?.as_u64(),
    });

    let record = send_instructions(&connection, &sender, &[], &[transfer], ComputeBudget::default()).await?;
    println!("Transaction Signature: {}", record.signature);

    println!("Sender's final balance: {}", connection.get_balance(&sender.pubkey()).await?);
    println!("Receiver's final balance: {}", connection.get_balance(&receiver.pubkey()).await?);
    Ok(())
}
