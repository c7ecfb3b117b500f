use serde::Serialize;
use solana_sdk::signature::Signer;
use std::path::Path;
use tracing::info;

use crate::{
    config::Config,
    error::{Result, WorkflowError},
    render::u64_as_string,
    solana::{
        client::NetworkClient,
        funding::{obtain_payer, FundedPayer},
        rent::RentCalculator,
    },
    token::{create_mint, MintSnapshot},
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MintReport {
    pub payer: String,
    pub airdrop_signature: Option<String>,
    pub mint_address: String,
    #[serde(serialize_with = "u64_as_string")]
    pub rent_lamports: u64,
    pub rent_exempt: bool,
    pub signature: String,
    pub mint: MintSnapshot,
}

/// Fund a payer, then create and initialize a mint it controls.
pub async fn run<C: NetworkClient + ?Sized>(
    client: &C,
    config: &Config,
    wallet: Option<&Path>,
) -> Result<MintReport> {
    let payer = obtain_payer(client, &config.funding, wallet).await?;
    create_for_payer(client, payer, config.token.decimals).await
}

pub async fn create_for_payer<C: NetworkClient + ?Sized>(
    client: &C,
    payer: FundedPayer,
    decimals: u8,
) -> Result<MintReport> {
    let created = create_mint(client, &payer.keypair, decimals).await?;
    let mint_address = created.keypair.pubkey();
    info!("Mint {} created", mint_address);

    let account = client
        .get_account(&mint_address)
        .await?
        .ok_or_else(|| WorkflowError::AccountNotFound(mint_address.to_string()))?;
    let mint = MintSnapshot::from_account(&mint_address, &account)?;

    Ok(MintReport {
        payer: payer.keypair.pubkey().to_string(),
        airdrop_signature: payer.airdrop_signature.map(|s| s.to_string()),
        mint_address: mint_address.to_string(),
        rent_lamports: created.rent_lamports,
        rent_exempt: RentCalculator::is_rent_exempt(&account, created.rent_lamports),
        signature: created.signature.to_string(),
        mint,
    })
}
