use anyhow::Result;
use solana_sdk::signature::Keypair;
use workflow::views::{to_pretty_json, KeypairView};

fn main() -> Result<()> {
    workflow::logging::init();

    // 32-byte public key, 64-byte secret key
    let keypair = Keypair::new();
    let view = KeypairView::from(&keypair);

    println!("Public Key: {}", view.public_key);
    println!("Secret Key: {}", view.secret_key);

    tracing::debug!(json = %to_pretty_json(&view), "Generated keypair");
    Ok(())
}
