//! Anchor wire encoding: discriminators and borsh-style arguments

use solana_sdk::{hash::hashv, pubkey::Pubkey};

/// SHA256("global:<name>")[0..8]
pub fn instruction_discriminator(name: &str) -> [u8; 8] {
    sighash("global", name)
}

/// SHA256("account:<Name>")[0..8]
pub fn account_discriminator(name: &str) -> [u8; 8] {
    sighash("account", name)
}

fn sighash(namespace: &str, name: &str) -> [u8; 8] {
    let hash = hashv(&[namespace.as_bytes(), b":", name.as_bytes()]);
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&hash.to_bytes()[..8]);
    discriminator
}

/// Instruction data (or account body) builder
///
/// Integers are little-endian, strings are a u32 length followed by UTF-8.
#[derive(Debug, Clone, Default)]
pub struct ArgsBuilder {
    data: Vec<u8>,
}

impl ArgsBuilder {
    /// Start instruction data for the Anchor instruction `name`
    pub fn instruction(name: &str) -> Self {
        Self {
            data: instruction_discriminator(name).to_vec(),
        }
    }

    /// Start account data for the Anchor account type `name`
    pub fn account(name: &str) -> Self {
        Self {
            data: account_discriminator(name).to_vec(),
        }
    }

    pub fn u8(mut self, value: u8) -> Self {
        self.data.push(value);
        self
    }

    pub fn u64(mut self, value: u64) -> Self {
        self.data.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn pubkey(mut self, value: &Pubkey) -> Self {
        self.data.extend_from_slice(value.as_ref());
        self
    }

    pub fn string(mut self, value: &str) -> Self {
        self.data
            .extend_from_slice(&(value.len() as u32).to_le_bytes());
        self.data.extend_from_slice(value.as_bytes());
        self
    }

    /// Zero padding, for fixed-space accounts
    pub fn padding(mut self, len: usize) -> Self {
        self.data.resize(self.data.len() + len, 0);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_discriminator() {
        assert_eq!(
            instruction_discriminator("initialize"),
            [175, 175, 109, 31, 13, 152, 155, 237]
        );
    }

    #[test]
    fn test_account_and_instruction_namespaces_differ() {
        assert_ne!(account_discriminator("Counter"), instruction_discriminator("Counter"));
    }

    #[test]
    fn test_string_is_length_prefixed() {
        let data = ArgsBuilder::instruction("add_movie_review").string("abc").u8(7).build();

        assert_eq!(&data[8..12], &3u32.to_le_bytes());
        assert_eq!(&data[12..15], b"abc");
        assert_eq!(data[15], 7);
    }
}
