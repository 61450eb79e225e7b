//! Instruction builders for the Anchor programs the workflow drives
//!
//! Each builder lays out accounts in the order of the program's `Accounts`
//! struct. Program rules (prize ordering, rating range, ownership) are left
//! to the program; only what a client must know up front is checked here.

pub mod anchor;
pub mod counter;
pub mod king_of_the_hill;
pub mod movie_review;
pub mod pda_account;
