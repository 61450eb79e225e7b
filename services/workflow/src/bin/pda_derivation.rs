use anyhow::{Context, Result};
use solana_sdk::pubkey::Pubkey;
use workflow::pda::derive_user_profile_pda;

const USER_WALLET: &str = "9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM";

fn main() -> Result<()> {
    workflow::logging::init();

    let user_wallet: Pubkey = USER_WALLET.parse().context("Invalid wallet address")?;

    // The wallet doubles as the owning program id here, as in the classic example.
    let derived = derive_user_profile_pda(&user_wallet, &user_wallet)?;

    println!("PDA: {}", derived.address);
    println!("Canonical Bump: {}", derived.bump);
    Ok(())
}
