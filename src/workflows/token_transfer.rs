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
pub struct TokenTransferReport {
    pub payer: String,
    pub recipient: String,
    pub setup_signature: String,
    pub transfer_signature: String,
    #[serde(serialize_with = "u64_as_string")]
    pub amount: u64,
    pub mint: MintSnapshot,
    pub source_before: TokenAccountSnapshot,
    pub destination_before: TokenAccountSnapshot,
    pub source_after: TokenAccountSnapshot,
    pub destination_after: TokenAccountSnapshot,
}

/// Mint tokens into the payer's ATA, then `transfer_checked` part of them to
/// a fresh recipient's ATA.
pub async fn run<C: NetworkClient + ?Sized>(
    client: &C,
    config: &Config,
    wallet: Option<&Path>,
) -> Result<TokenTransferReport> {
    let payer = obtain_payer(client, &config.funding, wallet).await?.keypair;
    let recipient = Keypair::new();
    let decimals = config.token.decimals;

    let mint = Keypair::new();
    let rent = client.get_minimum_balance_for_rent_exemption(Mint::LEN).await?;
    let (source, create_source) =
        associated_token_account(&payer.pubkey(), &payer.pubkey(), &mint.pubkey());
    // Payer funds the recipient's account too
    let (destination, create_destination) =
        associated_token_account(&payer.pubkey(), &recipient.pubkey(), &mint.pubkey());
    info!("Source ATA {} | Destination ATA {}", source, destination);

    let mut instructions =
        create_mint_instructions(&payer.pubkey(), &mint.pubkey(), rent, decimals)?;
    instructions.push(create_source);
    instructions.push(create_destination);
    instructions.push(spl_token::instruction::mint_to(
        &spl_token::id(),
        &mint.pubkey(),
        &source,
        &payer.pubkey(),
        &[],
        config.token.mint_to_amount,
    )?);
    let setup_signature = sign_and_submit(
        client,
        "token-setup",
        &instructions,
        &payer.pubkey(),
        &[&payer, &mint],
    )
    .await?;

    let source_before = fetch_token_account(client, &source).await?;
    let destination_before = fetch_token_account(client, &destination).await?;

    let amount = config.token.transfer_amount;
    let transfer = spl_token::instruction::transfer_checked(
        &spl_token::id(),
        &source,
        &mint.pubkey(),
        &destination,
        &payer.pubkey(),
        &[],
        amount,
        decimals,
    )?;
    let transfer_signature = sign_and_submit(
        client,
        "transfer-checked",
        &[transfer],
        &payer.pubkey(),
        &[&payer],
    )
    .await?;

    Ok(TokenTransferReport {
        payer: payer.pubkey().to_string(),
        recipient: recipient.pubkey().to_string(),
        setup_signature: setup_signature.to_string(),
        transfer_signature: transfer_signature.to_string(),
        amount,
        mint: fetch_mint(client, &mint.pubkey()).await?,
        source_before,
        destination_before,
        source_after: fetch_token_account(client, &source).await?,
        destination_after: fetch_token_account(client, &destination).await?,
    })
}
