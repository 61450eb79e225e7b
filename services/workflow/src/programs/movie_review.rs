//! movie-review
//!
//! One review account per (title, reviewer), at the PDA seeded by both. The
//! title doubles as a seed, so it cannot exceed 32 bytes even though the
//! account stores up to 80 characters.

use shared::{MAX_MOVIE_DESCRIPTION_LEN, MAX_MOVIE_TITLE_LEN};
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program,
};

use super::anchor::ArgsBuilder;
use crate::errors::{Result, WorkflowError};
use crate::pda::derive_movie_review_pda;

pub fn add_movie_review(
    program_id: &Pubkey,
    initializer: &Pubkey,
    title: &str,
    description: &str,
    rating: u8,
) -> Result<Instruction> {
    review_instruction("add_movie_review", program_id, initializer, title, description, rating)
}

pub fn update_movie_review(
    program_id: &Pubkey,
    initializer: &Pubkey,
    title: &str,
    description: &str,
    rating: u8,
) -> Result<Instruction> {
    review_instruction("update_movie_review", program_id, initializer, title, description, rating)
}

/// Close the review and return its rent to `initializer`
pub fn delete_movie_review(program_id: &Pubkey, initializer: &Pubkey, title: &str) -> Result<Instruction> {
    validate_title(title)?;
    let review = derive_movie_review_pda(title, initializer, program_id)?;

    Ok(Instruction {
        program_id: *program_id,
        accounts: review_accounts(&review.address, initializer),
        data: ArgsBuilder::instruction("delete_movie_review").string(title).build(),
    })
}

fn review_instruction(
    name: &str,
    program_id: &Pubkey,
    initializer: &Pubkey,
    title: &str,
    description: &str,
    rating: u8,
) -> Result<Instruction> {
    validate_title(title)?;
    if description.chars().count() > MAX_MOVIE_DESCRIPTION_LEN {
        return Err(WorkflowError::InvalidArgument(format!(
            "description is {} characters, at most {} allowed",
            description.chars().count(),
            MAX_MOVIE_DESCRIPTION_LEN
        )));
    }
    let review = derive_movie_review_pda(title, initializer, program_id)?;

    Ok(Instruction {
        program_id: *program_id,
        accounts: review_accounts(&review.address, initializer),
        data: ArgsBuilder::instruction(name)
            .string(title)
            .string(description)
            .u8(rating)
            .build(),
    })
}

fn validate_title(title: &str) -> Result<()> {
    if title.chars().count() > MAX_MOVIE_TITLE_LEN {
        return Err(WorkflowError::InvalidArgument(format!(
            "title is {} characters, at most {} allowed",
            title.chars().count(),
            MAX_MOVIE_TITLE_LEN
        )));
    }
    Ok(())
}

fn review_accounts(review: &Pubkey, initializer: &Pubkey) -> Vec<AccountMeta> {
    vec![
        AccountMeta::new(*review, false),
        AccountMeta::new(*initializer, true),
        AccountMeta::new_readonly(system_program::ID, false),
    ]
}
