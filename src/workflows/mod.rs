//! End-to-end workflows against a test network.
//!
//! Each one runs its RPC calls strictly in sequence and stops at the first
//! error. Nothing is retried and no balance is checked locally: an
//! underfunded transaction is left for the network to reject.

pub mod airdrop;
pub mod ata;
pub mod create_mint;
pub mod mint_to;
pub mod token_account;
pub mod token_transfer;
pub mod transfer;

pub use airdrop::AirdropReport;
pub use ata::AtaReport;
pub use create_mint::MintReport;
pub use mint_to::MintToReport;
pub use token_account::TokenAccountReport;
pub use token_transfer::TokenTransferReport;
pub use transfer::TransferReport;
