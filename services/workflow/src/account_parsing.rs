//! Typed decoding of fetched account data

use shared::{
    program_ids::{SPL_TOKEN_PROGRAM_ID, TOKEN_2022_PROGRAM_ID},
    ANCHOR_DISCRIMINATOR_LEN, MINT_SIZE,
};
use solana_sdk::pubkey::Pubkey;

use crate::connection::Connection;
use crate::errors::{DecodeError, Result, WorkflowError};
use crate::programs::anchor::account_discriminator;

/// Forward-only cursor over account bytes
pub struct AccountReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> AccountReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    fn take(&mut self, len: usize) -> std::result::Result<&'a [u8], DecodeError> {
        let end = self.offset + len;
        if self.data.len() < end {
            return Err(DecodeError::TooShort {
                expected: end,
                actual: self.data.len(),
            });
        }
        let bytes = &self.data[self.offset..end];
        self.offset = end;
        Ok(bytes)
    }

    pub fn read_array<const N: usize>(&mut self) -> std::result::Result<[u8; N], DecodeError> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.take(N)?);
        Ok(buf)
    }

    pub fn read_u8(&mut self) -> std::result::Result<u8, DecodeError> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u32(&mut self) -> std::result::Result<u32, DecodeError> {
        self.read_array().map(u32::from_le_bytes)
    }

    pub fn read_u64(&mut self) -> std::result::Result<u64, DecodeError> {
        self.read_array().map(u64::from_le_bytes)
    }

    pub fn read_pubkey(&mut self) -> std::result::Result<Pubkey, DecodeError> {
        self.read_array().map(Pubkey::new_from_array)
    }

    pub fn read_string(&mut self, field: &'static str) -> std::result::Result<String, DecodeError> {
        let len = self.read_u32()? as usize;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| DecodeError::InvalidUtf8(field))
    }

    /// SPL `COption<Pubkey>`: a u32 tag then always 32 bytes
    pub fn read_coption_pubkey(
        &mut self,
        field: &'static str,
    ) -> std::result::Result<Option<Pubkey>, DecodeError> {
        let tag = self.read_u32()?;
        let key = self.read_pubkey()?;
        match tag {
            0 => Ok(None),
            1 => Ok(Some(key)),
            tag => Err(DecodeError::InvalidOptionTag { field, tag }),
        }
    }
}

/// An account type written by an Anchor program
///
/// Data is the 8-byte account discriminator followed by the borsh fields.
/// Bytes after the last field are ignored, since accounts are allocated at
/// their maximum size.
pub trait AnchorAccount: Sized {
    /// The Rust type name in the program, which seeds the discriminator
    const NAME: &'static str;

    fn decode_fields(reader: &mut AccountReader<'_>) -> std::result::Result<Self, DecodeError>;

    fn discriminator() -> [u8; 8] {
        account_discriminator(Self::NAME)
    }

    fn decode(data: &[u8]) -> std::result::Result<Self, DecodeError> {
        let mut reader = AccountReader::new(data);
        let found: [u8; ANCHOR_DISCRIMINATOR_LEN] = reader.read_array()?;
        let expected = Self::discriminator();
        if found != expected {
            return Err(DecodeError::DiscriminatorMismatch {
                account: Self::NAME,
                expected,
                found,
            });
        }
        Self::decode_fields(&mut reader)
    }
}

/// anchor-counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counter {
    pub count: u64,
}

impl AnchorAccount for Counter {
    const NAME: &'static str = "Counter";

    fn decode_fields(reader: &mut AccountReader<'_>) -> std::result::Result<Self, DecodeError> {
        Ok(Self {
            count: reader.read_u64()?,
        })
    }
}

/// king-of-the-hill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    pub king: Pubkey,
    pub prize: u64,
    pub prize_pool_bump: u8,
}

impl AnchorAccount for GameState {
    const NAME: &'static str = "GameState";

    fn decode_fields(reader: &mut AccountReader<'_>) -> std::result::Result<Self, DecodeError> {
        Ok(Self {
            king: reader.read_pubkey()?,
            prize: reader.read_u64()?,
            prize_pool_bump: reader.read_u8()?,
        })
    }
}

/// movie-review
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieAccountState {
    pub reviewer: Pubkey,
    pub rating: u8,
    pub title: String,
    pub description: String,
}

impl AnchorAccount for MovieAccountState {
    const NAME: &'static str = "MovieAccountState";

    fn decode_fields(reader: &mut AccountReader<'_>) -> std::result::Result<Self, DecodeError> {
        Ok(Self {
            reviewer: reader.read_pubkey()?,
            rating: reader.read_u8()?,
            title: reader.read_string("title")?,
            description: reader.read_string("description")?,
        })
    }
}

/// create-pda
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataAccount {
    pub user: Pubkey,
    pub bump: u8,
}

impl AnchorAccount for DataAccount {
    const NAME: &'static str = "DataAccount";

    fn decode_fields(reader: &mut AccountReader<'_>) -> std::result::Result<Self, DecodeError> {
        Ok(Self {
            user: reader.read_pubkey()?,
            bump: reader.read_u8()?,
        })
    }
}

/// SPL mint base layout, shared by Token and Token-2022
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintAccount {
    pub mint_authority: Option<Pubkey>,
    pub supply: u64,
    pub decimals: u8,
    pub is_initialized: bool,
    pub freeze_authority: Option<Pubkey>,
}

impl MintAccount {
    /// Decode the first `MINT_SIZE` bytes; Token-2022 extensions after them are ignored
    pub fn decode(data: &[u8]) -> std::result::Result<Self, DecodeError> {
        if data.len() < MINT_SIZE {
            return Err(DecodeError::TooShort {
                expected: MINT_SIZE,
                actual: data.len(),
            });
        }
        let mut reader = AccountReader::new(data);
        Ok(Self {
            mint_authority: reader.read_coption_pubkey("mint_authority")?,
            supply: reader.read_u64()?,
            decimals: reader.read_u8()?,
            is_initialized: reader.read_u8()? != 0,
            freeze_authority: reader.read_coption_pubkey("freeze_authority")?,
        })
    }
}

/// Fetch and decode a mint owned by either token program
pub async fn fetch_mint(connection: &Connection, address: &Pubkey) -> Result<MintAccount> {
    let account = connection
        .get_account(address)
        .await?
        .ok_or(WorkflowError::AccountNotFound(*address))?;

    if account.owner != TOKEN_2022_PROGRAM_ID && account.owner != SPL_TOKEN_PROGRAM_ID {
        return Err(DecodeError::WrongOwner {
            address: *address,
            owner: account.owner,
            expected: TOKEN_2022_PROGRAM_ID,
        }
        .into());
    }

    Ok(MintAccount::decode(&account.data)?)
}
