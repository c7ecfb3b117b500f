use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("Solana RPC error: {0}")]
    SolanaRpc(#[from] solana_client::client_error::ClientError),

    #[error("Signing failed: {0}")]
    Signer(#[from] solana_sdk::signer::SignerError),

    #[error("Instruction error: {0}")]
    Program(#[from] solana_sdk::program_error::ProgramError),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Account {account} is owned by {actual}, expected {expected}")]
    InvalidOwner {
        account: String,
        expected: String,
        actual: String,
    },

    #[error("Invalid account data for {0}")]
    InvalidAccountData(String),

    #[error("Keypair error: {0}")]
    Keypair(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Transaction is {state:?}, cannot {action}")]
    TransactionState {
        state: crate::solana::transaction::TxState,
        action: &'static str,
    },

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, WorkflowError>;
