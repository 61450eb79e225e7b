//! In-memory ledger for driving the workflow without a validator
#![allow(dead_code)]

use async_trait::async_trait;
use shared::{Commitment, MAX_PROCESSING_AGE};
use solana_sdk::{
    account::Account,
    commitment_config::CommitmentConfig,
    hash::Hash,
    instruction::InstructionError,
    pubkey::Pubkey,
    signature::Signature,
    system_program,
    transaction::{Transaction, TransactionError},
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use workflow::ledger::{Ledger, LedgerError, LedgerResult};
use workflow::views::parse_system_transfer;
use workflow::{ConfirmationSettings, Connection};

pub const LAMPORTS_PER_SIGNATURE: u64 = 5_000;

#[derive(Default)]
struct State {
    block_height: u64,
    /// blockhash -> last valid block height
    blockhashes: HashMap<Hash, u64>,
    balances: HashMap<Pubkey, u64>,
    accounts: HashMap<Pubkey, Account>,
    statuses: HashMap<Signature, Result<(), TransactionError>>,
}

/// Executes system transfers atomically; compute-budget instructions are
/// accepted and ignored, any other program fails its instruction.
pub struct MockLedger {
    state: Mutex<State>,
    unreachable: AtomicBool,
    transport_down: AtomicBool,
    faucet_dry: AtomicBool,
    /// Sends to swallow without executing
    drop_next: AtomicUsize,
    /// Blocks produced per block-height query
    height_step: AtomicU64,
    sent: AtomicUsize,
}

impl MockLedger {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                block_height: 1_000,
                ..State::default()
            }),
            unreachable: AtomicBool::new(false),
            transport_down: AtomicBool::new(false),
            faucet_dry: AtomicBool::new(false),
            drop_next: AtomicUsize::new(0),
            height_step: AtomicU64::new(1),
            sent: AtomicUsize::new(0),
        }
    }

    pub fn set_unreachable(&self, value: bool) {
        self.unreachable.store(value, Ordering::SeqCst);
    }

    pub fn set_transport_down(&self, value: bool) {
        self.transport_down.store(value, Ordering::SeqCst);
    }

    pub fn set_faucet_dry(&self, value: bool) {
        self.faucet_dry.store(value, Ordering::SeqCst);
    }

    pub fn drop_next_sends(&self, count: usize) {
        self.drop_next.store(count, Ordering::SeqCst);
    }

    pub fn set_height_step(&self, step: u64) {
        self.height_step.store(step, Ordering::SeqCst);
    }

    pub fn advance_blocks(&self, blocks: u64) {
        self.state.lock().unwrap().block_height += blocks;
    }

    pub fn sent_count(&self) -> usize {
        self.sent.load(Ordering::SeqCst)
    }

    pub fn credit(&self, address: &Pubkey, lamports: u64) {
        *self.state.lock().unwrap().balances.entry(*address).or_default() += lamports;
    }

    pub fn balance(&self, address: &Pubkey) -> u64 {
        self.state
            .lock()
            .unwrap()
            .balances
            .get(address)
            .copied()
            .unwrap_or_default()
    }

    pub fn set_account(&self, address: Pubkey, account: Account) {
        self.state.lock().unwrap().accounts.insert(address, account);
    }

    fn transport_error(&self) -> Option<LedgerError> {
        self.transport_down
            .load(Ordering::SeqCst)
            .then(|| LedgerError::Transport("connection reset by peer".to_string()))
    }

    /// Run every instruction against a scratch copy; commit only if all succeed
    fn execute(state: &mut State, transaction: &Transaction) -> Result<(), TransactionError> {
        let fee_payer = transaction.message.account_keys[0];
        let fee = LAMPORTS_PER_SIGNATURE * transaction.signatures.len() as u64;
        let payer_balance = state.balances.get(&fee_payer).copied().unwrap_or_default();
        if payer_balance < fee {
            return Err(TransactionError::InsufficientFundsForFee);
        }
        state.balances.insert(fee_payer, payer_balance - fee);

        let mut scratch = state.balances.clone();
        for (index, instruction) in transaction.message.instructions.iter().enumerate() {
            let index = index as u8;
            let program_id = transaction.message.account_keys[instruction.program_id_index as usize];
            if program_id == shared::program_ids::COMPUTE_BUDGET_PROGRAM_ID {
                continue;
            }
            if program_id != system_program::ID {
                return Err(TransactionError::InstructionError(
                    index,
                    InstructionError::UnsupportedProgramId,
                ));
            }

            let decompiled = solana_sdk::instruction::Instruction {
                program_id,
                accounts: instruction
                    .accounts
                    .iter()
                    .map(|&i| {
                        solana_sdk::instruction::AccountMeta::new(
                            transaction.message.account_keys[i as usize],
                            transaction.message.is_signer(i as usize),
                        )
                    })
                    .collect(),
                data: instruction.data.clone(),
            };
            let transfer = parse_system_transfer(&decompiled).ok_or(
                TransactionError::InstructionError(index, InstructionError::InvalidInstructionData),
            )?;

            let from: Pubkey = transfer.from.parse().unwrap();
            let to: Pubkey = transfer.to.parse().unwrap();
            let available = scratch.get(&from).copied().unwrap_or_default();
            if available < transfer.lamports {
                // SystemError::ResultWithNegativeLamports
                return Err(TransactionError::InstructionError(index, InstructionError::Custom(1)));
            }
            scratch.insert(from, available - transfer.lamports);
            *scratch.entry(to).or_default() += transfer.lamports;
        }

        state.balances = scratch;
        Ok(())
    }
}

#[async_trait]
impl Ledger for MockLedger {
    async fn get_version(&self) -> LedgerResult<String> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(LedgerError::Transport("connection refused".to_string()));
        }
        Ok("2.1.0-mock".to_string())
    }

    async fn get_latest_blockhash(&self, _commitment: CommitmentConfig) -> LedgerResult<(Hash, u64)> {
        if let Some(error) = self.transport_error() {
            return Err(error);
        }
        let mut state = self.state.lock().unwrap();
        let blockhash = Hash::new_unique();
        let last_valid = state.block_height + MAX_PROCESSING_AGE;
        state.blockhashes.insert(blockhash, last_valid);
        Ok((blockhash, last_valid))
    }

    async fn get_block_height(&self, _commitment: CommitmentConfig) -> LedgerResult<u64> {
        if let Some(error) = self.transport_error() {
            return Err(error);
        }
        let mut state = self.state.lock().unwrap();
        state.block_height += self.height_step.load(Ordering::SeqCst);
        Ok(state.block_height)
    }

    async fn send_transaction(
        &self,
        transaction: &Transaction,
        _commitment: CommitmentConfig,
    ) -> LedgerResult<Signature> {
        if let Some(error) = self.transport_error() {
            return Err(error);
        }
        self.sent.fetch_add(1, Ordering::SeqCst);

        if transaction.verify().is_err() {
            return Err(LedgerError::Transaction {
                error: TransactionError::SignatureFailure,
                logs: vec![],
            });
        }

        let signature = transaction.signatures[0];
        let mut state = self.state.lock().unwrap();

        let blockhash = transaction.message.recent_blockhash;
        match state.blockhashes.get(&blockhash) {
            Some(last_valid) if *last_valid >= state.block_height => {}
            _ => {
                return Err(LedgerError::Transaction {
                    error: TransactionError::BlockhashNotFound,
                    logs: vec![],
                })
            }
        }

        let dropped = self
            .drop_next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if dropped {
            return Ok(signature);
        }

        match Self::execute(&mut state, transaction) {
            // Preflight refuses a payer that cannot cover the fee.
            Err(TransactionError::InsufficientFundsForFee) => Err(LedgerError::Transaction {
                error: TransactionError::InsufficientFundsForFee,
                logs: vec!["Transfer: insufficient lamports".to_string()],
            }),
            result => {
                state.statuses.insert(signature, result);
                Ok(signature)
            }
        }
    }

    async fn get_signature_status(
        &self,
        signature: &Signature,
        _commitment: CommitmentConfig,
    ) -> LedgerResult<Option<Result<(), TransactionError>>> {
        if let Some(error) = self.transport_error() {
            return Err(error);
        }
        Ok(self.state.lock().unwrap().statuses.get(signature).cloned())
    }

    async fn request_airdrop(&self, recipient: &Pubkey, lamports: u64) -> LedgerResult<Signature> {
        if let Some(error) = self.transport_error() {
            return Err(error);
        }
        if self.faucet_dry.load(Ordering::SeqCst) {
            return Err(LedgerError::Rpc {
                code: 429,
                message: "airdrop request limit reached".to_string(),
            });
        }
        let signature = Signature::new_unique();
        let mut state = self.state.lock().unwrap();
        *state.balances.entry(*recipient).or_default() += lamports;
        state.statuses.insert(signature, Ok(()));
        Ok(signature)
    }

    async fn get_balance(&self, address: &Pubkey, _commitment: CommitmentConfig) -> LedgerResult<u64> {
        if let Some(error) = self.transport_error() {
            return Err(error);
        }
        Ok(self.balance(address))
    }

    async fn get_account(
        &self,
        address: &Pubkey,
        _commitment: CommitmentConfig,
    ) -> LedgerResult<Option<Account>> {
        if let Some(error) = self.transport_error() {
            return Err(error);
        }
        Ok(self.state.lock().unwrap().accounts.get(address).cloned())
    }

    async fn get_minimum_balance_for_rent_exemption(&self, data_len: usize) -> LedgerResult<u64> {
        Ok((128 + data_len as u64) * 6_960)
    }
}

/// Fast polling so expiry tests finish quickly
pub fn fast_settings() -> ConfirmationSettings {
    ConfirmationSettings {
        poll_interval: Duration::from_millis(1),
        max_wait: Duration::from_secs(5),
    }
}

pub async fn mock_connection() -> (Arc<MockLedger>, Connection) {
    let ledger = Arc::new(MockLedger::new());
    let connection = Connection::from_ledger(ledger.clone(), "mock://ledger", Commitment::Confirmed)
        .await
        .unwrap()
        .with_settings(fast_settings());
    (ledger, connection)
}
