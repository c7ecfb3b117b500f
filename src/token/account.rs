use serde::Serialize;
use solana_sdk::{
    account::Account,
    instruction::Instruction,
    program_pack::Pack,
    pubkey::Pubkey,
    system_instruction,
};
use spl_token::state::{Account as TokenAccount, AccountState};

use crate::{
    error::{Result, WorkflowError},
    render::{opt_u64_as_string, u64_as_string},
    solana::client::NetworkClient,
    token::check_token_owner,
};

/// Decoded token account
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAccountSnapshot {
    pub address: String,
    pub mint: String,
    pub owner: String,
    #[serde(serialize_with = "u64_as_string")]
    pub amount: u64,
    pub delegate: Option<String>,
    pub state: String,
    /// Rent-exempt reserve for wrapped SOL accounts
    #[serde(serialize_with = "opt_u64_as_string")]
    pub is_native: Option<u64>,
    #[serde(serialize_with = "u64_as_string")]
    pub delegated_amount: u64,
    pub close_authority: Option<String>,
}

impl TokenAccountSnapshot {
    pub fn from_account(address: &Pubkey, account: &Account) -> Result<Self> {
        check_token_owner(address, account)?;
        if account.data.len() < TokenAccount::LEN {
            return Err(WorkflowError::InvalidAccountData(address.to_string()));
        }

        let token = TokenAccount::unpack(&account.data[..TokenAccount::LEN])?;
        let state = match token.state {
            AccountState::Uninitialized => "uninitialized",
            AccountState::Initialized => "initialized",
            AccountState::Frozen => "frozen",
        };

        Ok(Self {
            address: address.to_string(),
            mint: token.mint.to_string(),
            owner: token.owner.to_string(),
            amount: token.amount,
            delegate: Option::<Pubkey>::from(token.delegate).map(|k| k.to_string()),
            state: state.to_string(),
            is_native: token.is_native.into(),
            delegated_amount: token.delegated_amount,
            close_authority: Option::<Pubkey>::from(token.close_authority)
                .map(|k| k.to_string()),
        })
    }
}

pub async fn fetch_token_account<C: NetworkClient + ?Sized>(
    client: &C,
    address: &Pubkey,
) -> Result<TokenAccountSnapshot> {
    let account = client
        .get_account(address)
        .await?
        .ok_or_else(|| WorkflowError::AccountNotFound(address.to_string()))?;
    TokenAccountSnapshot::from_account(address, &account)
}

/// Allocate a token account at its own address and initialize it for `mint`.
pub fn create_token_account_instructions(
    payer: &Pubkey,
    account: &Pubkey,
    mint: &Pubkey,
    owner: &Pubkey,
    rent_lamports: u64,
) -> Result<Vec<Instruction>> {
    let create_account = system_instruction::create_account(
        payer,
        account,
        rent_lamports,
        TokenAccount::LEN as u64,
        &spl_token::id(),
    );
    let initialize_account =
        spl_token::instruction::initialize_account(&spl_token::id(), account, mint, owner)?;
    Ok(vec![create_account, initialize_account])
}

/// Associated token address of `owner` for `mint` and the instruction creating it
pub fn associated_token_account(
    payer: &Pubkey,
    owner: &Pubkey,
    mint: &Pubkey,
) -> (Pubkey, Instruction) {
    let address = spl_associated_token_account::get_associated_token_address(owner, mint);
    let instruction = spl_associated_token_account::instruction::create_associated_token_account(
        payer,
        owner,
        mint,
        &spl_token::id(),
    );
    (address, instruction)
}
