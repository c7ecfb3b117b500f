//! Account fixtures shared by unit tests.

use async_trait::async_trait;
use solana_sdk::{
    account::Account,
    hash::Hash,
    program_option::COption,
    program_pack::Pack,
    pubkey::Pubkey,
    signature::{write_keypair_file, Keypair, Signature},
    system_program,
    transaction::Transaction,
};
use spl_token::{
    instruction::TokenInstruction,
    state::{Account as TokenAccount, AccountState, Mint},
};
use std::collections::HashMap;
use std::sync::Mutex;

use crate::{
    config::*,
    error::Result,
    solana::{client::NetworkClient, rent::LAMPORTS_PER_SOL},
};

type Ledger = HashMap<Pubkey, Account>;

pub fn mint_account(authority: &Pubkey, supply: u64, decimals: u8) -> Account {
    let mint = Mint {
        mint_authority: COption::Some(*authority),
        supply,
        decimals,
        is_initialized: true,
        freeze_authority: COption::Some(*authority),
    };
    let mut data = vec![0u8; Mint::LEN];
    Mint::pack(mint, &mut data).unwrap();
    Account {
        lamports: 1_461_600,
        data,
        owner: spl_token::id(),
        executable: false,
        rent_epoch: 0,
    }
}

pub fn token_account(mint: &Pubkey, owner: &Pubkey, amount: u64) -> Account {
    let token = TokenAccount {
        mint: *mint,
        owner: *owner,
        amount,
        delegate: COption::None,
        state: AccountState::Initialized,
        is_native: COption::None,
        delegated_amount: 0,
        close_authority: COption::None,
    };
    let mut data = vec![0u8; TokenAccount::LEN];
    TokenAccount::pack(token, &mut data).unwrap();
    Account {
        lamports: 2_039_280,
        data,
        owner: spl_token::id(),
        executable: false,
        rent_epoch: 0,
    }
}

pub fn config() -> Config {
    Config {
        solana: SolanaConfig {
            rpc_url: "http://localhost:8899".to_string(),
            network: Network::Localnet,
            commitment: "confirmed".to_string(),
        },
        funding: FundingConfig {
            airdrop_lamports: LAMPORTS_PER_SOL,
            wallet_min_balance_lamports: LAMPORTS_PER_SOL,
            wallet_top_up_lamports: 2 * LAMPORTS_PER_SOL,
        },
        transfer: TransferConfig {
            lamports: LAMPORTS_PER_SOL / 100,
        },
        token: TokenConfig {
            decimals: 2,
            mint_to_amount: 10_000,
            transfer_amount: 1_000,
        },
        wallet: WalletConfig::default(),
    }
}

/// Rent the fake charges, matching the cluster's default rate
pub fn rent_for(data_len: usize) -> u64 {
    (data_len as u64 + 128) * 6_960
}

pub const FAKE_FEE: u64 = 5_000;

/// In-memory network that applies the system, token and associated-token
/// instructions the workflows send.
#[derive(Default)]
pub struct FakeNetwork {
    accounts: Mutex<Ledger>,
    pub sent: Mutex<Vec<Transaction>>,
}

impl FakeNetwork {
    pub fn account(&self, pubkey: &Pubkey) -> Option<Account> {
        self.accounts.lock().unwrap().get(pubkey).cloned()
    }

    fn apply(accounts: &mut Ledger, program: Pubkey, keys: &[Pubkey], data: &[u8]) -> Result<()> {
        if program == system_program::id() {
            let tag = u32::from_le_bytes(data[0..4].try_into().unwrap());
            let lamports = u64::from_le_bytes(data[4..12].try_into().unwrap());
            match tag {
                0 => {
                    let space = u64::from_le_bytes(data[12..20].try_into().unwrap());
                    let owner = Pubkey::try_from(&data[20..52]).unwrap();
                    if accounts.contains_key(&keys[1]) {
                        return Err(anyhow::anyhow!("account {} already in use", keys[1]).into());
                    }
                    Self::debit(accounts, &keys[0], lamports)?;
                    accounts.insert(
                        keys[1],
                        Account::new(lamports, space as usize, &owner),
                    );
                }
                2 => {
                    Self::debit(accounts, &keys[0], lamports)?;
                    accounts
                        .entry(keys[1])
                        .or_insert_with(|| Account::new(0, 0, &system_program::id()))
                        .lamports += lamports;
                }
                _ => return Err(anyhow::anyhow!("unsupported system instruction {}", tag).into()),
            }
            return Ok(());
        }

        if program == spl_associated_token_account::id() {
            let (funder, ata, wallet, mint) = (keys[0], keys[1], keys[2], keys[3]);
            Self::debit(accounts, &funder, rent_for(TokenAccount::LEN))?;
            let mut account = token_account(&mint, &wallet, 0);
            account.lamports = rent_for(TokenAccount::LEN);
            accounts.insert(ata, account);
            return Ok(());
        }

        if program != spl_token::id() {
            return Err(anyhow::anyhow!("unsupported program {}", program).into());
        }

        match TokenInstruction::unpack(data)? {
            TokenInstruction::InitializeMint2 {
                decimals,
                mint_authority,
                freeze_authority,
            } => {
                let account = accounts
                    .get_mut(&keys[0])
                    .ok_or_else(|| anyhow::anyhow!("mint account missing"))?;
                let mint = Mint {
                    mint_authority: COption::Some(mint_authority),
                    supply: 0,
                    decimals,
                    is_initialized: true,
                    freeze_authority,
                };
                Mint::pack(mint, &mut account.data)?;
            }
            TokenInstruction::InitializeAccount => {
                let (mint, owner) = (keys[1], keys[2]);
                let account = accounts
                    .get_mut(&keys[0])
                    .ok_or_else(|| anyhow::anyhow!("token account missing"))?;
                account.data = token_account(&mint, &owner, 0).data;
            }
            TokenInstruction::MintTo { amount } => {
                Self::update_mint(accounts, &keys[0], |mint| mint.supply += amount)?;
                Self::update_token(accounts, &keys[1], |token| token.amount += amount)?;
            }
            TokenInstruction::TransferChecked { amount, .. } => {
                let source = TokenAccount::unpack(&accounts[&keys[0]].data)?;
                if source.amount < amount {
                    return Err(anyhow::anyhow!("insufficient token funds").into());
                }
                Self::update_token(accounts, &keys[0], |token| token.amount -= amount)?;
                Self::update_token(accounts, &keys[2], |token| token.amount += amount)?;
            }
            other => return Err(anyhow::anyhow!("unsupported token instruction {:?}", other).into()),
        }
        Ok(())
    }

    fn debit(accounts: &mut Ledger, pubkey: &Pubkey, lamports: u64) -> Result<()> {
        let account = accounts
            .get_mut(pubkey)
            .filter(|a| a.lamports >= lamports)
            .ok_or_else(|| anyhow::anyhow!("insufficient lamports in {}", pubkey))?;
        account.lamports -= lamports;
        Ok(())
    }

    fn update_mint(
        accounts: &mut Ledger,
        pubkey: &Pubkey,
        f: impl FnOnce(&mut Mint),
    ) -> Result<()> {
        let account = accounts.get_mut(pubkey).ok_or_else(|| anyhow::anyhow!("no mint"))?;
        let mut mint = Mint::unpack(&account.data)?;
        f(&mut mint);
        Mint::pack(mint, &mut account.data)?;
        Ok(())
    }

    fn update_token(
        accounts: &mut Ledger,
        pubkey: &Pubkey,
        f: impl FnOnce(&mut TokenAccount),
    ) -> Result<()> {
        let account = accounts.get_mut(pubkey).ok_or_else(|| anyhow::anyhow!("no token account"))?;
        let mut token = TokenAccount::unpack(&account.data)?;
        f(&mut token);
        TokenAccount::pack(token, &mut account.data)?;
        Ok(())
    }
}

#[async_trait]
impl NetworkClient for FakeNetwork {
    async fn request_airdrop(&self, pubkey: &Pubkey, lamports: u64) -> Result<Signature> {
        self.accounts
            .lock()
            .unwrap()
            .entry(*pubkey)
            .or_insert_with(|| Account::new(0, 0, &system_program::id()))
            .lamports += lamports;
        Ok(Signature::new_unique())
    }

    async fn confirm_signature(&self, _signature: &Signature) -> Result<()> {
        Ok(())
    }

    async fn get_account(&self, pubkey: &Pubkey) -> Result<Option<Account>> {
        Ok(self.account(pubkey))
    }

    async fn get_balance(&self, pubkey: &Pubkey) -> Result<u64> {
        Ok(self.account(pubkey).map(|a| a.lamports).unwrap_or(0))
    }

    async fn get_latest_blockhash(&self) -> Result<Hash> {
        Ok(Hash::new_unique())
    }

    async fn get_minimum_balance_for_rent_exemption(&self, data_len: usize) -> Result<u64> {
        Ok(rent_for(data_len))
    }

    async fn send_and_confirm_transaction(&self, transaction: &Transaction) -> Result<Signature> {
        transaction
            .verify()
            .map_err(|e| anyhow::anyhow!("signature verification failed: {}", e))?;

        // Apply to a copy so a failing instruction leaves the ledger untouched
        let mut accounts = self.accounts.lock().unwrap();
        let mut staged = accounts.clone();
        let message = &transaction.message;
        Self::debit(&mut staged, &message.account_keys[0], FAKE_FEE)?;
        for instruction in &message.instructions {
            let keys: Vec<Pubkey> = instruction
                .accounts
                .iter()
                .map(|i| message.account_keys[*i as usize])
                .collect();
            let program = message.account_keys[instruction.program_id_index as usize];
            Self::apply(&mut staged, program, &keys, &instruction.data)?;
        }
        *accounts = staged;

        self.sent.lock().unwrap().push(transaction.clone());
        Ok(transaction.signatures[0])
    }
}

/// Key file for a wallet-backed payer
pub fn wallet_file(keypair: &Keypair) -> tempfile::NamedTempFile {
    let file = tempfile::NamedTempFile::new().unwrap();
    write_keypair_file(keypair, file.path()).unwrap();
    file
}
