use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    account::Account,
    commitment_config::CommitmentConfig,
    hash::Hash,
    pubkey::Pubkey,
    signature::Signature,
    transaction::Transaction,
};
use std::sync::Arc;
use tracing::debug;

use crate::error::Result;

/// The RPC calls the workflows depend on.
///
/// Every call runs at the commitment level the client was built with.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NetworkClient: Send + Sync {
    /// Ask the faucet to credit `pubkey`
    async fn request_airdrop(&self, pubkey: &Pubkey, lamports: u64) -> Result<Signature>;

    /// Block until the signature reaches the client's commitment level
    async fn confirm_signature(&self, signature: &Signature) -> Result<()>;

    /// Account snapshot, `None` if the address holds nothing
    async fn get_account(&self, pubkey: &Pubkey) -> Result<Option<Account>>;

    async fn get_balance(&self, pubkey: &Pubkey) -> Result<u64>;

    async fn get_latest_blockhash(&self) -> Result<Hash>;

    async fn get_minimum_balance_for_rent_exemption(&self, data_len: usize) -> Result<u64>;

    async fn send_and_confirm_transaction(&self, transaction: &Transaction) -> Result<Signature>;
}

#[derive(Clone)]
pub struct SolanaRpcClient {
    client: Arc<RpcClient>,
}

impl SolanaRpcClient {
    pub fn new(rpc_url: &str, commitment: CommitmentConfig) -> Self {
        let client = RpcClient::new_with_commitment(rpc_url.to_string(), commitment);
        Self {
            client: Arc::new(client),
        }
    }

    pub fn url(&self) -> String {
        self.client.url()
    }
}

#[async_trait]
impl NetworkClient for SolanaRpcClient {
    async fn request_airdrop(&self, pubkey: &Pubkey, lamports: u64) -> Result<Signature> {
        debug!("requestAirdrop {} lamports -> {}", lamports, pubkey);
        Ok(self.client.request_airdrop(pubkey, lamports).await?)
    }

    async fn confirm_signature(&self, signature: &Signature) -> Result<()> {
        debug!("Polling for {} at {:?}", signature, self.client.commitment().commitment);
        self.client
            .poll_for_signature_with_commitment(signature, self.client.commitment())
            .await?;
        Ok(())
    }

    async fn get_account(&self, pubkey: &Pubkey) -> Result<Option<Account>> {
        let response = self
            .client
            .get_account_with_commitment(pubkey, self.client.commitment())
            .await?;
        Ok(response.value)
    }

    async fn get_balance(&self, pubkey: &Pubkey) -> Result<u64> {
        Ok(self.client.get_balance(pubkey).await?)
    }

    async fn get_latest_blockhash(&self) -> Result<Hash> {
        Ok(self.client.get_latest_blockhash().await?)
    }

    async fn get_minimum_balance_for_rent_exemption(&self, data_len: usize) -> Result<u64> {
        Ok(self
            .client
            .get_minimum_balance_for_rent_exemption(data_len)
            .await?)
    }

    async fn send_and_confirm_transaction(&self, transaction: &Transaction) -> Result<Signature> {
        Ok(self.client.send_and_confirm_transaction(transaction).await?)
    }
}
