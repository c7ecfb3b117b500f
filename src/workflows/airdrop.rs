use serde::Serialize;
use solana_account_decoder::UiAccount;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signer},
};
use tracing::info;

use crate::{
    error::Result,
    render::account_view,
    solana::{client::NetworkClient, funding::fund_and_confirm},
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AirdropReport {
    pub address: String,
    pub airdrop_signature: String,
    pub lamports_requested: u64,
    /// `None` when the network has no account at the address
    pub account: Option<UiAccount>,
}

/// Generate a key pair, fund it, and read back its account.
pub async fn run<C: NetworkClient + ?Sized>(client: &C, lamports: u64) -> Result<AirdropReport> {
    let keypair = Keypair::new();
    info!("Generated key pair {}", keypair.pubkey());
    inspect_after_airdrop(client, &keypair.pubkey(), lamports).await
}

pub async fn inspect_after_airdrop<C: NetworkClient + ?Sized>(
    client: &C,
    pubkey: &Pubkey,
    lamports: u64,
) -> Result<AirdropReport> {
    let signature = fund_and_confirm(client, pubkey, lamports).await?;
    let account = client.get_account(pubkey).await?;

    Ok(AirdropReport {
        address: pubkey.to_string(),
        airdrop_signature: signature.to_string(),
        lamports_requested: lamports,
        account: account.map(|a| account_view(pubkey, &a)),
    })
}
