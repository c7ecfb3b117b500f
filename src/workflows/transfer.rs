use serde::Serialize;
use solana_sdk::{
    signature::{Keypair, Signer},
    system_instruction,
};
use solana_transaction_status::UiMessage;
use tracing::info;

use crate::{
    error::Result,
    render::{message_view, InstructionView},
    solana::{client::NetworkClient, funding::fund_and_confirm, transaction::PendingTransaction},
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferReport {
    pub sender: String,
    pub receiver: String,
    pub lamports: u64,
    pub instruction: InstructionView,
    pub message: UiMessage,
    pub signature: String,
    pub sender_before: u64,
    pub sender_after: u64,
    pub receiver_before: u64,
    pub receiver_after: u64,
}

/// Fund a fresh sender and move `lamports` to a fresh receiver.
pub async fn run<C: NetworkClient + ?Sized>(
    client: &C,
    airdrop_lamports: u64,
    lamports: u64,
) -> Result<TransferReport> {
    let sender = Keypair::new();
    let receiver = Keypair::new();
    info!("Sender {} | Receiver {}", sender.pubkey(), receiver.pubkey());

    fund_and_confirm(client, &sender.pubkey(), airdrop_lamports).await?;
    transfer_between(client, &sender, &receiver, lamports).await
}

pub async fn transfer_between<C: NetworkClient + ?Sized>(
    client: &C,
    sender: &Keypair,
    receiver: &Keypair,
    lamports: u64,
) -> Result<TransferReport> {
    let sender_before = client.get_balance(&sender.pubkey()).await?;
    let receiver_before = client.get_balance(&receiver.pubkey()).await?;

    let instruction = system_instruction::transfer(&sender.pubkey(), &receiver.pubkey(), lamports);
    let mut pending = PendingTransaction::new(
        "transfer",
        std::slice::from_ref(&instruction),
        &sender.pubkey(),
    );
    let blockhash = client.get_latest_blockhash().await?;
    pending.sign(&[sender], blockhash)?;
    let signature = pending.submit(client).await?;

    let sender_after = client.get_balance(&sender.pubkey()).await?;
    let receiver_after = client.get_balance(&receiver.pubkey()).await?;

    Ok(TransferReport {
        sender: sender.pubkey().to_string(),
        receiver: receiver.pubkey().to_string(),
        lamports,
        instruction: InstructionView::from(&instruction),
        message: message_view(pending.message()),
        signature: signature.to_string(),
        sender_before,
        sender_after,
        receiver_before,
        receiver_after,
    })
}
