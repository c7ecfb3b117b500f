use solana_sdk::account::Account;

/// Lamports per SOL constant
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

pub struct RentCalculator;

impl RentCalculator {
    /// Check if account holds at least the rent-exempt minimum for its size
    pub fn is_rent_exempt(account: &Account, minimum_balance: u64) -> bool {
        account.lamports >= minimum_balance
    }

    /// Convert lamports to SOL (as f64)
    pub fn lamports_to_sol(lamports: u64) -> f64 {
        lamports as f64 / LAMPORTS_PER_SOL as f64
    }
}
