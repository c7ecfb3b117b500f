use serde::Serialize;
use solana_sdk::{
    account::Account,
    instruction::Instruction,
    program_pack::Pack,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    system_instruction,
};
use spl_token::state::Mint;
use tracing::info;

use crate::{
    error::{Result, WorkflowError},
    render::{bytes_as_hex, u64_as_string},
    solana::{client::NetworkClient, transaction::sign_and_submit},
    token::check_token_owner,
};

/// Decoded mint account
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MintSnapshot {
    pub address: String,
    pub mint_authority: Option<String>,
    #[serde(serialize_with = "u64_as_string")]
    pub supply: u64,
    pub decimals: u8,
    pub is_initialized: bool,
    pub freeze_authority: Option<String>,
    /// Bytes past the base mint layout. Always empty here: only accounts owned
    /// by the classic token program are accepted, and its mints are exactly
    /// `Mint::LEN` bytes.
    #[serde(serialize_with = "bytes_as_hex")]
    pub tlv_data: Vec<u8>,
}

impl MintSnapshot {
    pub fn from_account(address: &Pubkey, account: &Account) -> Result<Self> {
        check_token_owner(address, account)?;
        if account.data.len() < Mint::LEN {
            return Err(WorkflowError::InvalidAccountData(address.to_string()));
        }

        let mint = Mint::unpack(&account.data[..Mint::LEN])?;
        Ok(Self {
            address: address.to_string(),
            mint_authority: Option::<Pubkey>::from(mint.mint_authority).map(|k| k.to_string()),
            supply: mint.supply,
            decimals: mint.decimals,
            is_initialized: mint.is_initialized,
            freeze_authority: Option::<Pubkey>::from(mint.freeze_authority)
                .map(|k| k.to_string()),
            tlv_data: account.data[Mint::LEN..].to_vec(),
        })
    }
}

pub async fn fetch_mint<C: NetworkClient + ?Sized>(
    client: &C,
    address: &Pubkey,
) -> Result<MintSnapshot> {
    let account = client
        .get_account(address)
        .await?
        .ok_or_else(|| WorkflowError::AccountNotFound(address.to_string()))?;
    MintSnapshot::from_account(address, &account)
}

/// Allocate `Mint::LEN` bytes owned by the token program and initialize them
/// as a mint, with `payer` as both mint and freeze authority.
pub fn create_mint_instructions(
    payer: &Pubkey,
    mint: &Pubkey,
    rent_lamports: u64,
    decimals: u8,
) -> Result<Vec<Instruction>> {
    let create_account = system_instruction::create_account(
        payer,
        mint,
        rent_lamports,
        Mint::LEN as u64,
        &spl_token::id(),
    );
    let initialize_mint = spl_token::instruction::initialize_mint2(
        &spl_token::id(),
        mint,
        payer,
        Some(payer),
        decimals,
    )?;
    Ok(vec![create_account, initialize_mint])
}

pub struct CreatedMint {
    pub keypair: Keypair,
    pub rent_lamports: u64,
    pub signature: Signature,
}

/// Create and initialize a new mint in a single transaction signed by the
/// payer and the mint key.
pub async fn create_mint<C: NetworkClient + ?Sized>(
    client: &C,
    payer: &Keypair,
    decimals: u8,
) -> Result<CreatedMint> {
    let mint = Keypair::new();
    let rent_lamports = client
        .get_minimum_balance_for_rent_exemption(Mint::LEN)
        .await?;
    info!(
        "Creating mint {} ({} bytes, {} lamports rent, {} decimals)",
        mint.pubkey(),
        Mint::LEN,
        rent_lamports,
        decimals
    );

    let instructions =
        create_mint_instructions(&payer.pubkey(), &mint.pubkey(), rent_lamports, decimals)?;
    let signature = sign_and_submit(
        client,
        "create-mint",
        &instructions,
        &payer.pubkey(),
        &[payer, &mint],
    )
    .await?;

    Ok(CreatedMint {
        keypair: mint,
        rent_lamports,
        signature,
    })
}
