use solana_sdk::{
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair, Signature, Signer},
};
use std::path::Path;
use tracing::info;

use crate::{
    config::FundingConfig,
    error::{Result, WorkflowError},
    solana::{client::NetworkClient, rent::RentCalculator},
};

/// Request an airdrop and block until it is confirmed.
///
/// Funding an address is what allocates it on the network.
pub async fn fund_and_confirm<C: NetworkClient + ?Sized>(
    client: &C,
    pubkey: &Pubkey,
    lamports: u64,
) -> Result<Signature> {
    info!(
        "Requesting airdrop of {:.9} SOL for {}",
        RentCalculator::lamports_to_sol(lamports),
        pubkey
    );
    let signature = client.request_airdrop(pubkey, lamports).await?;
    client.confirm_signature(&signature).await?;
    info!("Airdrop confirmed | Signature: {}", signature);
    Ok(signature)
}

/// Top up a long-lived wallet only when it is below `min_balance`.
pub async fn ensure_funded<C: NetworkClient + ?Sized>(
    client: &C,
    pubkey: &Pubkey,
    min_balance: u64,
    top_up: u64,
) -> Result<Option<Signature>> {
    let balance = client.get_balance(pubkey).await?;
    info!("Wallet {} balance: {} lamports", pubkey, balance);

    if balance >= min_balance {
        return Ok(None);
    }
    fund_and_confirm(client, pubkey, top_up).await.map(Some)
}

pub fn load_keypair(path: &Path) -> Result<Keypair> {
    read_keypair_file(path)
        .map_err(|e| WorkflowError::Keypair(format!("{}: {}", path.display(), e)))
}

/// Payer used by a workflow along with the airdrop that funded it, if any
pub struct FundedPayer {
    pub keypair: Keypair,
    pub airdrop_signature: Option<Signature>,
}

/// Fresh airdropped key pair, or the wallet at `wallet_path` topped up when low
pub async fn obtain_payer<C: NetworkClient + ?Sized>(
    client: &C,
    funding: &FundingConfig,
    wallet_path: Option<&Path>,
) -> Result<FundedPayer> {
    match wallet_path {
        Some(path) => {
            let keypair = load_keypair(path)?;
            info!("Using wallet {} from {}", keypair.pubkey(), path.display());
            let airdrop_signature = ensure_funded(
                client,
                &keypair.pubkey(),
                funding.wallet_min_balance_lamports,
                funding.wallet_top_up_lamports,
            )
            .await?;
            Ok(FundedPayer {
                keypair,
                airdrop_signature,
            })
        }
        None => {
            let keypair = Keypair::new();
            let signature =
                fund_and_confirm(client, &keypair.pubkey(), funding.airdrop_lamports).await?;
            Ok(FundedPayer {
                keypair,
                airdrop_signature: Some(signature),
            })
        }
    }
}
