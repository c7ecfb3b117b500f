use serde::Serialize;
use solana_sdk::{
    hash::Hash,
    instruction::Instruction,
    message::Message,
    pubkey::Pubkey,
    signature::Signature,
    signer::signers::Signers,
    transaction::Transaction,
};
use tracing::{debug, info, warn};

use crate::{
    error::{Result, WorkflowError},
    solana::client::NetworkClient,
};

/// Lifecycle of a transaction built by this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TxState {
    Unsigned,
    Submitted,
    Confirmed,
    Failed,
}

/// A transaction plus where it is in `Unsigned -> Submitted -> Confirmed | Failed`
pub struct PendingTransaction {
    label: &'static str,
    transaction: Transaction,
    state: TxState,
}

impl PendingTransaction {
    pub fn new(label: &'static str, instructions: &[Instruction], payer: &Pubkey) -> Self {
        Self {
            label,
            transaction: Transaction::new_with_payer(instructions, Some(payer)),
            state: TxState::Unsigned,
        }
    }

    pub fn state(&self) -> TxState {
        self.state
    }

    pub fn message(&self) -> &Message {
        &self.transaction.message
    }

    /// Sign with every key the message requires.
    ///
    /// A missing signer fails here and the transaction is never submitted.
    pub fn sign<T: Signers + ?Sized>(&mut self, signers: &T, blockhash: Hash) -> Result<()> {
        if self.state != TxState::Unsigned {
            return Err(WorkflowError::TransactionState {
                state: self.state,
                action: "sign",
            });
        }

        if let Err(e) = self.transaction.try_sign(signers, blockhash) {
            warn!("{}: signing failed: {}", self.label, e);
            self.state = TxState::Failed;
            return Err(e.into());
        }

        debug!(
            "{}: signed by {} of {} required keys",
            self.label,
            signers.pubkeys().len(),
            self.transaction.message.header.num_required_signatures
        );
        Ok(())
    }

    /// Send and block until the client's commitment level is reached.
    pub async fn submit<C: NetworkClient + ?Sized>(&mut self, client: &C) -> Result<Signature> {
        if self.state != TxState::Unsigned || !self.transaction.is_signed() {
            return Err(WorkflowError::TransactionState {
                state: self.state,
                action: "submit",
            });
        }

        self.state = TxState::Submitted;
        info!("{}: submitted", self.label);

        match client.send_and_confirm_transaction(&self.transaction).await {
            Ok(signature) => {
                self.state = TxState::Confirmed;
                info!("{}: confirmed | Signature: {}", self.label, signature);
                Ok(signature)
            }
            Err(e) => {
                self.state = TxState::Failed;
                warn!("{}: failed: {}", self.label, e);
                Err(e)
            }
        }
    }
}

/// Fetch a blockhash, sign with `signers`, submit and confirm.
pub async fn sign_and_submit<C, T>(
    client: &C,
    label: &'static str,
    instructions: &[Instruction],
    payer: &Pubkey,
    signers: &T,
) -> Result<Signature>
where
    C: NetworkClient + ?Sized,
    T: Signers + ?Sized,
{
    let mut pending = PendingTransaction::new(label, instructions, payer);
    let blockhash = client.get_latest_blockhash().await?;
    pending.sign(signers, blockhash)?;
    pending.submit(client).await
}
