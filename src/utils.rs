use colored::Colorize;
use serde::Serialize;

use crate::{config::Network, error::Result, render::to_pretty_json, solana::rent::RentCalculator};

/// Format lamports as SOL string with color
pub fn format_sol(lamports: u64) -> String {
    format!("{:.9} SOL", RentCalculator::lamports_to_sol(lamports))
        .yellow()
        .to_string()
}

/// Format pubkey truncated for display
pub fn format_pubkey(pubkey: &str) -> String {
    if pubkey.len() <= 12 {
        pubkey.to_string()
    } else {
        format!("{}...{}", &pubkey[..6], &pubkey[pubkey.len() - 6..])
    }
}

/// Print a labelled, pretty-printed JSON block
pub fn print_json<T: Serialize + ?Sized>(label: &str, value: &T) -> Result<()> {
    println!("{}", label.cyan().bold());
    println!("{}", to_pretty_json(value)?);
    Ok(())
}

/// Print a signature with its explorer link
pub fn print_signature(label: &str, signature: &str, network: Network) {
    println!("{} {}", format!("{}:", label).green(), signature);
    println!("  {}", network.explorer_tx_url(signature).dimmed());
}

/// Print a formatted table border
pub fn print_table_border(width: usize) {
    println!("{}", "=".repeat(width));
}

/// Print a table row with columns
pub fn print_table_row(columns: &[&str], widths: &[usize]) {
    let mut row = String::new();
    for (i, col) in columns.iter().enumerate() {
        if i < widths.len() {
            row.push_str(&format!("{:<width$}  ", col, width = widths[i]));
        }
    }
    println!("{}", row.trim_end());
}
