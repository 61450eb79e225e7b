//! Typed account fetches through the program context
mod common;

use common::mock_connection;
use shared::program_ids::{SPL_TOKEN_PROGRAM_ID, TOKEN_2022_PROGRAM_ID};
use shared::MINT_SIZE;
use solana_sdk::{account::Account, pubkey::Pubkey, signature::Keypair, system_program};
use std::sync::Arc;
use workflow::account_parsing::{Counter, GameState, MovieAccountState};
use workflow::pda::derive_movie_review_pda;
use workflow::programs::anchor::ArgsBuilder;
use workflow::{fetch_mint, DecodeError, ProgramContext, WorkflowError};

fn program_account(owner: Pubkey, data: Vec<u8>) -> Account {
    Account {
        lamports: 1_000_000,
        data,
        owner,
        executable: false,
        rent_epoch: 0,
    }
}

#[tokio::test]
async fn test_fetch_decodes_counter() {
    let (ledger, connection) = mock_connection().await;
    let program_id = Pubkey::new_unique();
    let counter = Pubkey::new_unique();
    ledger.set_account(
        counter,
        program_account(program_id, ArgsBuilder::account("Counter").u64(1).build()),
    );

    let context = ProgramContext::new(connection, Arc::new(Keypair::new()), program_id);
    let account: Counter = context.fetch(&counter).await.unwrap();
    assert_eq!(account.count, 1);
}

#[tokio::test]
async fn test_fetch_movie_review_at_derived_address() {
    let (ledger, connection) = mock_connection().await;
    let program_id = Pubkey::new_unique();
    let reviewer = Pubkey::new_unique();
    let review = derive_movie_review_pda("Test movie", &reviewer, &program_id).unwrap();

    let data = ArgsBuilder::account("MovieAccountState")
        .pubkey(&reviewer)
        .u8(4)
        .string("Test movie")
        .string("Wow this is new")
        .padding(100)
        .build();
    ledger.set_account(review.address, program_account(program_id, data));

    let context = ProgramContext::new(connection, Arc::new(Keypair::new()), program_id);
    let account: MovieAccountState = context.fetch(&review.address).await.unwrap();
    assert_eq!(account.reviewer, reviewer);
    assert_eq!(account.rating, 4);
    assert_eq!(account.description, "Wow this is new");
}

#[tokio::test]
async fn test_fetch_missing_account_does_not_exist() {
    let (_ledger, connection) = mock_connection().await;
    let context = ProgramContext::new(connection, Arc::new(Keypair::new()), Pubkey::new_unique());
    let address = Pubkey::new_unique();

    let error = context.fetch::<MovieAccountState>(&address).await.unwrap_err();
    assert!(matches!(error, WorkflowError::AccountNotFound(a) if a == address));
    assert!(error.to_string().contains("Account does not exist"));
}

#[tokio::test]
async fn test_fetch_wrong_type_is_decode_error() {
    let (ledger, connection) = mock_connection().await;
    let program_id = Pubkey::new_unique();
    let address = Pubkey::new_unique();
    ledger.set_account(
        address,
        program_account(program_id, ArgsBuilder::account("Counter").u64(3).build()),
    );

    let context = ProgramContext::new(connection, Arc::new(Keypair::new()), program_id);
    let result = context.fetch::<GameState>(&address).await;
    assert!(matches!(
        result,
        Err(WorkflowError::Decode(DecodeError::DiscriminatorMismatch { account: "GameState", .. }))
    ));
}

#[tokio::test]
async fn test_fetch_foreign_owner_is_rejected() {
    let (ledger, connection) = mock_connection().await;
    let program_id = Pubkey::new_unique();
    let address = Pubkey::new_unique();
    ledger.set_account(
        address,
        program_account(system_program::ID, ArgsBuilder::account("Counter").u64(3).build()),
    );

    let context = ProgramContext::new(connection, Arc::new(Keypair::new()), program_id);
    let result = context.fetch::<Counter>(&address).await;
    assert!(matches!(
        result,
        Err(WorkflowError::Decode(DecodeError::WrongOwner { .. }))
    ));
}

fn mint_data(authority: &Pubkey) -> Vec<u8> {
    let mut data = Vec::with_capacity(MINT_SIZE);
    data.extend_from_slice(&1u32.to_le_bytes());
    data.extend_from_slice(authority.as_ref());
    data.extend_from_slice(&0u64.to_le_bytes());
    data.push(9);
    data.push(1);
    data.extend_from_slice(&0u32.to_le_bytes());
    data.extend_from_slice(&[0u8; 32]);
    data
}

#[tokio::test]
async fn test_fetch_mint_from_either_token_program() {
    let (ledger, connection) = mock_connection().await;
    let authority = Pubkey::new_unique();

    for owner in [TOKEN_2022_PROGRAM_ID, SPL_TOKEN_PROGRAM_ID] {
        let mint = Pubkey::new_unique();
        ledger.set_account(mint, program_account(owner, mint_data(&authority)));

        let decoded = fetch_mint(&connection, &mint).await.unwrap();
        assert_eq!(decoded.decimals, 9);
        assert_eq!(decoded.mint_authority, Some(authority));
        assert_eq!(decoded.freeze_authority, None);
        assert!(decoded.is_initialized);
    }
}

#[tokio::test]
async fn test_fetch_mint_rejects_non_token_owner() {
    let (ledger, connection) = mock_connection().await;
    let mint = Pubkey::new_unique();
    ledger.set_account(mint, program_account(system_program::ID, mint_data(&mint)));

    let result = fetch_mint(&connection, &mint).await;
    assert!(matches!(
        result,
        Err(WorkflowError::Decode(DecodeError::WrongOwner { .. }))
    ));
}
