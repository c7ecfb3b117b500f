use serde::Deserialize;
use solana_sdk::commitment_config::CommitmentConfig;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::solana::rent::LAMPORTS_PER_SOL;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub solana: SolanaConfig,
    pub funding: FundingConfig,
    pub transfer: TransferConfig,
    pub token: TokenConfig,
    #[serde(default)]
    pub wallet: WalletConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SolanaConfig {
    pub rpc_url: String,
    pub network: Network,
    pub commitment: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    #[serde(alias = "mainnet")]
    Mainnet,
    #[serde(alias = "devnet")]
    Devnet,
    #[serde(alias = "testnet")]
    Testnet,
    #[serde(alias = "localnet")]
    Localnet,
}

impl Network {
    /// Cluster behind a well-known RPC endpoint, if recognisable
    pub fn from_rpc_url(url: &str) -> Option<Self> {
        let url = url.to_ascii_lowercase();
        if url.contains("devnet") {
            Some(Network::Devnet)
        } else if url.contains("testnet") {
            Some(Network::Testnet)
        } else if url.contains("mainnet") {
            Some(Network::Mainnet)
        } else if url.contains("localhost") || url.contains("127.0.0.1") {
            Some(Network::Localnet)
        } else {
            None
        }
    }

    /// Explorer link for a transaction signature on this cluster
    pub fn explorer_tx_url(&self, signature: &str) -> String {
        let base = format!("https://explorer.solana.com/tx/{}", signature);
        match self {
            Network::Mainnet => base,
            Network::Devnet => format!("{}?cluster=devnet", base),
            Network::Testnet => format!("{}?cluster=testnet", base),
            Network::Localnet => format!(
                "{}?cluster=custom&customUrl=http%3A%2F%2Flocalhost%3A8899",
                base
            ),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct FundingConfig {
    /// Airdrop requested for freshly generated payers
    pub airdrop_lamports: u64,
    /// File wallets below this balance get topped up
    pub wallet_min_balance_lamports: u64,
    pub wallet_top_up_lamports: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TransferConfig {
    pub lamports: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TokenConfig {
    pub decimals: u8,
    pub mint_to_amount: u64,
    pub transfer_amount: u64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct WalletConfig {
    pub path: Option<String>,
}

impl Config {
    /// Defaults, then the TOML file at `path`, then `DEVNET_*` environment
    /// variables, then the command-line overrides. A `--url` without an
    /// explicit network picks the cluster from the endpoint when it can.
    pub fn load(
        path: &str,
        rpc_url: Option<&str>,
        network: Option<&str>,
        commitment: Option<&str>,
    ) -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let config = config::Config::builder()
            .set_default("solana.rpc_url", "https://api.devnet.solana.com")?
            .set_default("solana.network", "Devnet")?
            .set_default("solana.commitment", "confirmed")?
            .set_default("funding.airdrop_lamports", LAMPORTS_PER_SOL)?
            .set_default("funding.wallet_min_balance_lamports", LAMPORTS_PER_SOL)?
            .set_default("funding.wallet_top_up_lamports", 2 * LAMPORTS_PER_SOL)?
            .set_default("transfer.lamports", LAMPORTS_PER_SOL / 100)?
            .set_default("token.decimals", 2)?
            .set_default("token.mint_to_amount", 10_000u64)?
            .set_default("token.transfer_amount", 1_000u64)?
            .add_source(config::File::from(Path::new(path)).required(false))
            .add_source(
                config::Environment::with_prefix("DEVNET")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("solana.rpc_url", rpc_url)?
            .set_override_option("solana.network", network)?
            .set_override_option("solana.commitment", commitment)?
            .build()?;

        let mut config: Config = config.try_deserialize()?;
        if network.is_none() {
            if let Some(inferred) = rpc_url.and_then(Network::from_rpc_url) {
                config.solana.network = inferred;
            }
        }
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        self.commitment_config()?;
        if self.token.decimals > 9 {
            anyhow::bail!("token.decimals must be at most 9, got {}", self.token.decimals);
        }
        Ok(())
    }

    pub fn commitment_config(&self) -> crate::error::Result<CommitmentConfig> {
        CommitmentConfig::from_str(&self.solana.commitment).map_err(|e| {
            crate::error::WorkflowError::Config(format!(
                "Invalid commitment '{}': {}",
                self.solana.commitment, e
            ))
        })
    }

    /// Wallet key file, from config or the `WALLET_PATH` environment variable
    pub fn wallet_path(&self) -> Option<PathBuf> {
        self.wallet
            .path
            .clone()
            .filter(|p| !p.is_empty())
            .or_else(|| std::env::var("WALLET_PATH").ok())
            .map(PathBuf::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Mutex, MutexGuard};

    // Loading reads process-wide environment variables
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "{}", contents).unwrap();
        file
    }

    #[test]
    fn test_defaults_without_file() {
        let _guard = env_lock();
        let config = Config::load("does/not/exist.toml", None, None, None).unwrap();
        assert_eq!(config.solana.commitment, "confirmed");
        assert_eq!(config.funding.airdrop_lamports, LAMPORTS_PER_SOL);
        assert_eq!(config.transfer.lamports, 10_000_000);
        assert_eq!(config.token.decimals, 2);
        assert_eq!(config.commitment_config().unwrap(), CommitmentConfig::confirmed());
    }

    #[test]
    fn test_file_and_overrides() {
        let _guard = env_lock();
        let file = write_config(
            "[solana]\nrpc_url = \"http://localhost:8899\"\nnetwork = \"Localnet\"\n\n[token]\ndecimals = 6\nmint_to_amount = 5\ntransfer_amount = 1\n",
        );
        let path = file.path().to_str().unwrap();

        let config = Config::load(path, None, None, Some("finalized")).unwrap();
        assert_eq!(config.solana.rpc_url, "http://localhost:8899");
        assert_eq!(config.solana.network, Network::Localnet);
        assert_eq!(config.token.decimals, 6);
        assert_eq!(config.commitment_config().unwrap(), CommitmentConfig::finalized());

        let config = Config::load(path, Some("https://api.testnet.solana.com"), None, None).unwrap();
        assert_eq!(config.solana.rpc_url, "https://api.testnet.solana.com");
        assert_eq!(config.solana.network, Network::Testnet);
    }

    #[test]
    fn test_url_override_picks_matching_network() {
        let _guard = env_lock();

        let config = Config::load("does/not/exist.toml", Some("http://localhost:8899"), None, None)
            .unwrap();
        assert_eq!(config.solana.network, Network::Localnet);
        assert!(config
            .solana
            .network
            .explorer_tx_url("abc")
            .contains("cluster=custom"));

        // Explicit network wins over the endpoint
        let config = Config::load(
            "does/not/exist.toml",
            Some("http://localhost:8899"),
            Some("devnet"),
            None,
        )
        .unwrap();
        assert_eq!(config.solana.network, Network::Devnet);

        // Unrecognised endpoint keeps the configured network
        let config =
            Config::load("does/not/exist.toml", Some("https://rpc.example.com"), None, None)
                .unwrap();
        assert_eq!(config.solana.network, Network::Devnet);
    }

    #[test]
    fn test_environment_overrides_file() {
        let _guard = env_lock();
        let file = write_config("[solana]\nrpc_url = \"http://from-file:8899\"\n\n[token]\ndecimals = 4\nmint_to_amount = 5\ntransfer_amount = 1\n");
        let path = file.path().to_str().unwrap();

        std::env::set_var("DEVNET_SOLANA__RPC_URL", "http://from-env:8899");
        std::env::set_var("DEVNET_TOKEN__DECIMALS", "6");
        let loaded = Config::load(path, None, None, None);
        let overridden = Config::load(path, Some("http://from-cli:8899"), None, None);
        std::env::remove_var("DEVNET_SOLANA__RPC_URL");
        std::env::remove_var("DEVNET_TOKEN__DECIMALS");

        let config = loaded.unwrap();
        assert_eq!(config.solana.rpc_url, "http://from-env:8899");
        assert_eq!(config.token.decimals, 6);
        // Untouched keys still come from the file
        assert_eq!(config.token.mint_to_amount, 5);

        let config = overridden.unwrap();
        assert_eq!(config.solana.rpc_url, "http://from-cli:8899");
    }

    #[test]
    fn test_wallet_path_falls_back_to_environment() {
        let _guard = env_lock();
        let mut config = crate::testing::config();

        std::env::set_var("WALLET_PATH", "/keys/env.json");
        let unset = config.wallet_path();
        config.wallet.path = Some(String::new());
        let empty = config.wallet_path();
        config.wallet.path = Some("/keys/file.json".to_string());
        let configured = config.wallet_path();
        std::env::remove_var("WALLET_PATH");
        config.wallet.path = None;
        let neither = config.wallet_path();

        assert_eq!(unset, Some(PathBuf::from("/keys/env.json")));
        assert_eq!(empty, Some(PathBuf::from("/keys/env.json")));
        assert_eq!(configured, Some(PathBuf::from("/keys/file.json")));
        assert_eq!(neither, None);
    }

    #[test]
    fn test_invalid_commitment_rejected() {
        let _guard = env_lock();
        assert!(Config::load("does/not/exist.toml", None, None, Some("eventually")).is_err());
    }

    #[test]
    fn test_explorer_url() {
        assert_eq!(
            Network::Devnet.explorer_tx_url("abc"),
            "https://explorer.solana.com/tx/abc?cluster=devnet"
        );
        assert_eq!(
            Network::Mainnet.explorer_tx_url("abc"),
            "https://explorer.solana.com/tx/abc"
        );
    }
}
