use anyhow::Result;
use shared::LamportAmount;
use solana_sdk::signature::{Keypair, Signer};
use workflow::instructions::{build_instruction, InstructionKind};
use workflow::views::{to_pretty_json, InstructionView};

fn main() -> Result<()> {
    workflow::logging::init();

    let sender = Keypair::new();
    let recipient = Keypair::new();
    let amount = LamportAmount::from_sol(0.01)?;

    let transfer = build_instruction(InstructionKind::Transfer {
        from: sender.pubkey(),
        to: recipient.pubkey(),
        lamports: amount.as_u64(),
    });

    println!("{}", to_pretty_json(&InstructionView::from(&transfer)));
    Ok(())
}
