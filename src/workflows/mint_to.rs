use serde::Serialize;
use solana_sdk::{
    program_pack::Pack,
    signature::{Keypair, Signer},
};
use spl_token::state::Mint;
use std::path::Path;
use tracing::info;

use crate::{
    config::Config,
    error::Result,
    render::u64_as_string,
    solana::{client::NetworkClient, funding::obtain_payer, transaction::sign_and_submit},
    token::{
        associated_token_account, create_mint_instructions, fetch_mint, fetch_token_account,
        MintSnapshot, TokenAccountSnapshot,
    },
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MintToReport {
    pub payer: String,
    pub setup_signature: String,
    pub mint_to_signature: String,
    #[serde(serialize_with = "u64_as_string")]
    pub amount: u64,
    pub mint_before: MintSnapshot,
    pub ata_before: TokenAccountSnapshot,
    pub mint_after: MintSnapshot,
    pub ata_after: TokenAccountSnapshot,
}

/// Create a mint and the payer's ATA in one transaction, then mint `amount`
/// base units into the ATA.
pub async fn run<C: NetworkClient + ?Sized>(
    client: &C,
    config: &Config,
    wallet: Option<&Path>,
) -> Result<MintToReport> {
    let payer = obtain_payer(client, &config.funding, wallet).await?.keypair;
    let amount = config.token.mint_to_amount;

    let mint = Keypair::new();
    let rent = client.get_minimum_balance_for_rent_exemption(Mint::LEN).await?;
    let (ata, create_ata) = associated_token_account(&payer.pubkey(), &payer.pubkey(), &mint.pubkey());

    let mut instructions =
        create_mint_instructions(&payer.pubkey(), &mint.pubkey(), rent, config.token.decimals)?;
    instructions.push(create_ata);
    let setup_signature = sign_and_submit(
        client,
        "create-mint-and-ata",
        &instructions,
        &payer.pubkey(),
        &[&payer, &mint],
    )
    .await?;

    let mint_before = fetch_mint(client, &mint.pubkey()).await?;
    let ata_before = fetch_token_account(client, &ata).await?;

    info!("Minting {} base units of {} into {}", amount, mint.pubkey(), ata);
    let mint_to = spl_token::instruction::mint_to(
        &spl_token::id(),
        &mint.pubkey(),
        &ata,
        &payer.pubkey(),
        &[],
        amount,
    )?;
    let mint_to_signature =
        sign_and_submit(client, "mint-to", &[mint_to], &payer.pubkey(), &[&payer]).await?;

    Ok(MintToReport {
        payer: payer.pubkey().to_string(),
        setup_signature: setup_signature.to_string(),
        mint_to_signature: mint_to_signature.to_string(),
        amount,
        mint_before,
        ata_before,
        mint_after: fetch_mint(client, &mint.pubkey()).await?,
        ata_after: fetch_token_account(client, &ata).await?,
    })
}
