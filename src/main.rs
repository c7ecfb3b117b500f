use clap::Parser;
use colored::*;
use devnet_workflows::{
    cli::{Cli, Commands},
    config::Config,
    error,
    solana::{self, NetworkClient},
    utils, workflows,
};
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("devnet_workflows=info,devnet_flow=info,warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match Config::load(
        &cli.config,
        cli.url.as_deref(),
        cli.network.as_deref(),
        cli.commitment.as_deref(),
    ) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let result = run(&cli.command, &config).await;

    if let Err(e) = result {
        error!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }
}

async fn run(command: &Commands, config: &Config) -> error::Result<()> {
    let rpc_client = solana::SolanaRpcClient::new(&config.solana.rpc_url, config.commitment_config()?);
    info!(
        "Connected to {} (commitment: {})",
        rpc_client.url(),
        config.solana.commitment
    );

    let wallet = command
        .wallet()
        .cloned()
        .or_else(|| config.wallet_path());
    let wallet = wallet.as_deref();

    match command {
        Commands::Airdrop => airdrop(&rpc_client, config).await,
        Commands::CreateMint { .. } => create_mint(&rpc_client, config, wallet).await,
        Commands::Transfer => transfer(&rpc_client, config).await,
        Commands::TokenAccount { .. } => token_account(&rpc_client, config, wallet).await,
        Commands::Ata { .. } => ata(&rpc_client, config, wallet).await,
        Commands::MintTo { .. } => mint_to(&rpc_client, config, wallet).await,
        Commands::TokenTransfer { .. } => token_transfer(&rpc_client, config, wallet).await,
    }
}

async fn airdrop(client: &dyn NetworkClient, config: &Config) -> error::Result<()> {
    println!("{}", "Requesting airdrop for a new key pair...".cyan());
    let report = workflows::airdrop::run(client, config.funding.airdrop_lamports).await?;

    println!("Keypair Public Address: {}", report.address);
    utils::print_signature("Airdrop Signature", &report.airdrop_signature, config.solana.network);
    utils::print_json("Account Info:", &report.account)?;
    Ok(())
}

async fn create_mint(
    client: &dyn NetworkClient,
    config: &Config,
    wallet: Option<&Path>,
) -> error::Result<()> {
    println!("{}", "Creating mint account...".cyan());
    let report = workflows::create_mint::run(client, config, wallet).await?;

    println!("Payer:        {}", report.payer);
    println!("Mint Address: {}", report.mint_address);
    println!(
        "Rent:         {} ({})",
        utils::format_sol(report.rent_lamports),
        if report.rent_exempt { "rent exempt".green() } else { "NOT rent exempt".red() }
    );
    utils::print_signature("Transaction Signature", &report.signature, config.solana.network);
    utils::print_json("Mint Account:", &report.mint)?;
    Ok(())
}

async fn transfer(client: &dyn NetworkClient, config: &Config) -> error::Result<()> {
    println!("{}", "Transferring SOL between new key pairs...".cyan());
    let report = workflows::transfer::run(
        client,
        config.funding.airdrop_lamports,
        config.transfer.lamports,
    )
    .await?;

    utils::print_json("Transfer Instruction:", &report.instruction)?;
    utils::print_json("Compiled Message:", &report.message)?;
    utils::print_signature("Transaction Signature", &report.signature, config.solana.network);

    println!("\n{}", "=== Balances ===".cyan().bold());
    utils::print_table_border(80);
    utils::print_table_row(&["Account", "Before", "After"], &[16, 28, 28]);
    utils::print_table_border(80);
    utils::print_table_row(
        &[
            &format!("Sender {}", utils::format_pubkey(&report.sender)),
            &report.sender_before.to_string(),
            &report.sender_after.to_string(),
        ],
        &[16, 28, 28],
    );
    utils::print_table_row(
        &[
            &format!("Receiver {}", utils::format_pubkey(&report.receiver)),
            &report.receiver_before.to_string(),
            &report.receiver_after.to_string(),
        ],
        &[16, 28, 28],
    );
    utils::print_table_border(80);
    println!("Sender's Balance:   {}", report.sender_after);
    println!("Receiver's Balance: {}", report.receiver_after);
    Ok(())
}

async fn token_account(
    client: &dyn NetworkClient,
    config: &Config,
    wallet: Option<&Path>,
) -> error::Result<()> {
    println!("{}", "Creating mint and token account...".cyan());
    let report = workflows::token_account::run(client, config, wallet).await?;

    println!("Payer: {}", report.payer);
    utils::print_signature("Mint Signature", &report.mint_signature, config.solana.network);
    utils::print_json("Mint Account:", &report.mint)?;
    utils::print_signature(
        "Token Account Signature",
        &report.token_account_signature,
        config.solana.network,
    );
    utils::print_json("Token Account:", &report.token_account)?;
    Ok(())
}

async fn ata(
    client: &dyn NetworkClient,
    config: &Config,
    wallet: Option<&Path>,
) -> error::Result<()> {
    println!("{}", "Creating mint and associated token account...".cyan());
    let report = workflows::ata::run(client, config, wallet).await?;

    println!("Payer: {}", report.payer);
    utils::print_signature("Mint Signature", &report.mint_signature, config.solana.network);
    utils::print_json("Mint Account:", &report.mint)?;
    utils::print_signature("ATA Signature", &report.ata_signature, config.solana.network);
    utils::print_json("Associated Token Account:", &report.ata)?;
    Ok(())
}

async fn mint_to(
    client: &dyn NetworkClient,
    config: &Config,
    wallet: Option<&Path>,
) -> error::Result<()> {
    println!("{}", "Minting tokens to a new associated token account...".cyan());
    let report = workflows::mint_to::run(client, config, wallet).await?;

    println!("Payer: {}", report.payer);
    utils::print_signature("Setup Signature", &report.setup_signature, config.solana.network);
    utils::print_json("Mint Account:", &report.mint_before)?;
    utils::print_json("ATA:", &report.ata_before)?;
    utils::print_signature("Mint-To Signature", &report.mint_to_signature, config.solana.network);
    println!("Minted {} base units", report.amount);
    utils::print_json("Mint Account (updated):", &report.mint_after)?;
    utils::print_json("ATA (updated):", &report.ata_after)?;
    Ok(())
}

async fn token_transfer(
    client: &dyn NetworkClient,
    config: &Config,
    wallet: Option<&Path>,
) -> error::Result<()> {
    println!("{}", "Transferring tokens between associated token accounts...".cyan());
    let report = workflows::token_transfer::run(client, config, wallet).await?;

    println!("Payer:     {}", report.payer);
    println!("Recipient: {}", report.recipient);
    utils::print_signature("Setup Signature", &report.setup_signature, config.solana.network);
    utils::print_json("Mint Account:", &report.mint)?;
    utils::print_json("Source ATA:", &report.source_before)?;
    utils::print_json("Destination ATA:", &report.destination_before)?;
    utils::print_signature("Transfer Signature", &report.transfer_signature, config.solana.network);
    utils::print_json("Source ATA (updated):", &report.source_after)?;
    utils::print_json("Destination ATA (updated):", &report.destination_after)?;
    Ok(())
}
