use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "devnet-flow")]
#[command(about = "Fund, inspect, mint and transfer with throwaway accounts on a Solana test network")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, default_value = crate::config::DEFAULT_CONFIG_PATH)]
    pub config: String,

    /// RPC endpoint (overrides config)
    #[arg(short, long, global = true)]
    pub url: Option<String>,

    /// Cluster for explorer links: mainnet, devnet, testnet or localnet
    /// (inferred from --url when omitted)
    #[arg(short, long, global = true)]
    pub network: Option<String>,

    /// Commitment level for reads and confirmations (overrides config)
    #[arg(long, global = true)]
    pub commitment: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Airdrop to a new key pair and print its account
    Airdrop,

    /// Create and initialize a new token mint
    CreateMint {
        /// Pay from this key file instead of a fresh airdropped key pair
        #[arg(short, long)]
        wallet: Option<PathBuf>,
    },

    /// Transfer SOL between two new key pairs
    Transfer,

    /// Create a mint and a token account at its own address
    TokenAccount {
        #[arg(short, long)]
        wallet: Option<PathBuf>,
    },

    /// Create a mint and the payer's associated token account
    Ata {
        #[arg(short, long)]
        wallet: Option<PathBuf>,
    },

    /// Create a mint and ATA, then mint tokens into it
    MintTo {
        #[arg(short, long)]
        wallet: Option<PathBuf>,
    },

    /// Mint tokens and transfer some to a new recipient's ATA
    TokenTransfer {
        #[arg(short, long)]
        wallet: Option<PathBuf>,
    },
}

impl Commands {
    pub fn wallet(&self) -> Option<&PathBuf> {
        match self {
            Commands::CreateMint { wallet }
            | Commands::TokenAccount { wallet }
            | Commands::Ata { wallet }
            | Commands::MintTo { wallet }
            | Commands::TokenTransfer { wallet } => wallet.as_ref(),
            Commands::Airdrop | Commands::Transfer => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_subcommands() {
        let cli = Cli::parse_from(["devnet-flow", "airdrop"]);
        assert!(matches!(cli.command, Commands::Airdrop));
        assert_eq!(cli.config, crate::config::DEFAULT_CONFIG_PATH);

        let cli = Cli::parse_from([
            "devnet-flow",
            "--url",
            "http://localhost:8899",
            "token-transfer",
            "--wallet",
            "id.json",
        ]);
        assert_eq!(cli.url.as_deref(), Some("http://localhost:8899"));
        assert_eq!(cli.network, None);
        assert_eq!(cli.command.wallet(), Some(&PathBuf::from("id.json")));
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_network_flag_is_global() {
        let cli = Cli::parse_from(["devnet-flow", "transfer", "--network", "localnet"]);
        assert_eq!(cli.network.as_deref(), Some("localnet"));
    }
}
