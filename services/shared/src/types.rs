//! Type-safe wrappers for workflow primitives
//!
//! These types enforce validation at construction time.

use serde::{Deserialize, Serialize};
use solana_sdk::commitment_config::CommitmentConfig;
use std::str::FromStr;
use thiserror::Error;

use crate::constants::LAMPORTS_PER_SOL;

#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Unknown commitment level: {0} (expected processed, confirmed or finalized)")]
    UnknownCommitment(String),

    #[error("Invalid SOL amount: {0}")]
    InvalidSolAmount(f64),

    #[error("Lamport amount overflow in operation")]
    LamportOverflow,
}

/// Commitment level a connection queries and confirms at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    /// Processed by the leader, fastest and least certain
    Processed,
    /// Voted on by a supermajority
    #[default]
    Confirmed,
    /// Rooted, slowest and most certain
    Finalized,
}

impl Commitment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Commitment::Processed => "processed",
            Commitment::Confirmed => "confirmed",
            Commitment::Finalized => "finalized",
        }
    }
}

impl FromStr for Commitment {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "processed" => Ok(Commitment::Processed),
            "confirmed" => Ok(Commitment::Confirmed),
            "finalized" => Ok(Commitment::Finalized),
            other => Err(ValidationError::UnknownCommitment(other.to_string())),
        }
    }
}

impl From<Commitment> for CommitmentConfig {
    fn from(commitment: Commitment) -> Self {
        match commitment {
            Commitment::Processed => CommitmentConfig::processed(),
            Commitment::Confirmed => CommitmentConfig::confirmed(),
            Commitment::Finalized => CommitmentConfig::finalized(),
        }
    }
}

impl std::fmt::Display for Commitment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lamport amount converted from a SOL figure
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LamportAmount(u64);

impl LamportAmount {
    /// Get the raw lamport value
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Create from a SOL amount, rounding to the nearest lamport
    pub fn from_sol(sol: f64) -> Result<Self, ValidationError> {
        if !sol.is_finite() || sol < 0.0 {
            return Err(ValidationError::InvalidSolAmount(sol));
        }
        let lamports = (sol * LAMPORTS_PER_SOL as f64).round();
        if lamports > u64::MAX as f64 {
            return Err(ValidationError::LamportOverflow);
        }
        Ok(Self(lamports as u64))
    }
}
