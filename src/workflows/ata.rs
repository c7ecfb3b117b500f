use serde::Serialize;
use solana_sdk::signature::Signer;
use std::path::Path;
use tracing::info;

use crate::{
    config::Config,
    error::Result,
    solana::{client::NetworkClient, funding::obtain_payer, transaction::sign_and_submit},
    token::{
        associated_token_account, create_mint, fetch_mint, fetch_token_account, MintSnapshot,
        TokenAccountSnapshot,
    },
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AtaReport {
    pub payer: String,
    pub mint_signature: String,
    pub mint: MintSnapshot,
    pub ata_signature: String,
    pub ata: TokenAccountSnapshot,
}

/// Create a mint, then the payer's associated token account for it.
pub async fn run<C: NetworkClient + ?Sized>(
    client: &C,
    config: &Config,
    wallet: Option<&Path>,
) -> Result<AtaReport> {
    let payer = obtain_payer(client, &config.funding, wallet).await?.keypair;
    let created = create_mint(client, &payer, config.token.decimals).await?;
    let mint_address = created.keypair.pubkey();
    let mint = fetch_mint(client, &mint_address).await?;

    // The associated token program allocates and initializes in one step
    let (ata_address, instruction) =
        associated_token_account(&payer.pubkey(), &payer.pubkey(), &mint_address);
    info!("Creating associated token account {}", ata_address);

    let signature = sign_and_submit(
        client,
        "create-ata",
        &[instruction],
        &payer.pubkey(),
        &[&payer],
    )
    .await?;
    let ata = fetch_token_account(client, &ata_address).await?;

    Ok(AtaReport {
        payer: payer.pubkey().to_string(),
        mint_signature: created.signature.to_string(),
        mint,
        ata_signature: signature.to_string(),
        ata,
    })
}
