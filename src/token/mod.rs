pub mod account;
pub mod mint;

pub use account::{
    associated_token_account, create_token_account_instructions, fetch_token_account,
    TokenAccountSnapshot,
};
pub use mint::{create_mint, create_mint_instructions, fetch_mint, CreatedMint, MintSnapshot};

use solana_sdk::{account::Account, pubkey::Pubkey};

use crate::error::{Result, WorkflowError};

/// Reject accounts the token program does not own before unpacking them
pub(crate) fn check_token_owner(address: &Pubkey, account: &Account) -> Result<()> {
    if account.owner != spl_token::id() {
        return Err(WorkflowError::InvalidOwner {
            account: address.to_string(),
            expected: spl_token::id().to_string(),
            actual: account.owner.to_string(),
        });
    }
    Ok(())
}
