use serde::Serialize;
use solana_sdk::{
    program_pack::Pack,
    signature::{Keypair, Signer},
};
use spl_token::state::Account as TokenAccount;
use std::path::Path;
use tracing::info;

use crate::{
    config::Config,
    error::Result,
    solana::{client::NetworkClient, funding::obtain_payer, transaction::sign_and_submit},
    token::{
        create_mint, create_token_account_instructions, fetch_mint, fetch_token_account,
        MintSnapshot, TokenAccountSnapshot,
    },
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAccountReport {
    pub payer: String,
    pub mint_signature: String,
    pub mint: MintSnapshot,
    pub token_account_signature: String,
    pub token_account: TokenAccountSnapshot,
}

/// Create a mint, then a token account for it at a fresh key pair's address.
pub async fn run<C: NetworkClient + ?Sized>(
    client: &C,
    config: &Config,
    wallet: Option<&Path>,
) -> Result<TokenAccountReport> {
    let payer = obtain_payer(client, &config.funding, wallet).await?.keypair;
    let created = create_mint(client, &payer, config.token.decimals).await?;
    let mint_address = created.keypair.pubkey();
    let mint = fetch_mint(client, &mint_address).await?;

    let token_keypair = Keypair::new();
    let rent = client
        .get_minimum_balance_for_rent_exemption(TokenAccount::LEN)
        .await?;
    info!(
        "Creating token account {} for mint {}",
        token_keypair.pubkey(),
        mint_address
    );

    let instructions = create_token_account_instructions(
        &payer.pubkey(),
        &token_keypair.pubkey(),
        &mint_address,
        &payer.pubkey(),
        rent,
    )?;
    let signature = sign_and_submit(
        client,
        "create-token-account",
        &instructions,
        &payer.pubkey(),
        &[&payer, &token_keypair],
    )
    .await?;
    let token_account = fetch_token_account(client, &token_keypair.pubkey()).await?;

    Ok(TokenAccountReport {
        payer: payer.pubkey().to_string(),
        mint_signature: created.signature.to_string(),
        mint,
        token_account_signature: signature.to_string(),
        token_account,
    })
}
