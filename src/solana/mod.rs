pub mod client;
pub mod funding;
pub mod rent;
pub mod transaction;

pub use client::{NetworkClient, SolanaRpcClient};
pub use funding::{ensure_funded, fund_and_confirm, obtain_payer, FundedPayer};
pub use rent::{RentCalculator, LAMPORTS_PER_SOL};
pub use transaction::{sign_and_submit, PendingTransaction, TxState};
