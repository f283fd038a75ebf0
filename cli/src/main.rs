//! lplock: create a liquidity pool and lock its LP tokens.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use lplock_amm::DynamicAmm;
use lplock_launcher::{create_pool_and_lock_liquidity, plan_launch, LaunchConfig, Session};
use lplock_rpc::RpcClient;
use lplock_types::{Keypair, Signer};
use lplock_utils::LogFormat;

/// Environment variable holding the operator keypair (base58, 64 bytes).
const PAYER_SECRET_KEY_ENV: &str = "PAYER_SECRET_KEY";

#[derive(Parser)]
#[command(name = "lplock", about = "Create a dynamic-AMM pool and lock its LP tokens")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON-RPC endpoint of the cluster.
    #[arg(long, env = "LPLOCK_RPC_URL")]
    rpc_url: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "LPLOCK_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "LPLOCK_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Subcommand.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Create the pool and lock liquidity. Not idempotent.
    Run,
    /// Print derived addresses and allocation weights without touching the network.
    Plan,
}

fn load_config(cli: &Cli) -> anyhow::Result<LaunchConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let path = path.to_str().context("config path is not valid UTF-8")?;
            LaunchConfig::from_toml_file(path)?
        }
        None => LaunchConfig::default(),
    };
    if let Some(url) = &cli.rpc_url {
        config.rpc_url = url.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    Ok(config)
}

fn load_payer(secret: Option<String>) -> anyhow::Result<Keypair> {
    let Some(secret) = secret else {
        bail!("{PAYER_SECRET_KEY_ENV} is not set");
    };
    lplock_crypto::keypair_from_base58(&secret)
        .with_context(|| format!("{PAYER_SECRET_KEY_ENV} is not a valid keypair"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    lplock_utils::init_logging(config.log_format, &config.log_level);

    if let Some(path) = &cli.config {
        tracing::info!("Loaded config from {}", path.display());
    }

    let payer = load_payer(std::env::var(PAYER_SECRET_KEY_ENV).ok())?;
    let amm = DynamicAmm::new(config.program_ids.clone());
    let plan = config.plan();

    match cli.command {
        Command::Plan => {
            tracing::info!(payer = %payer.pubkey(), "planning launch");
            let planned = plan_launch(&amm, &plan, &payer.pubkey())?;
            println!("{}", serde_json::to_string_pretty(&planned)?);
        }
        Command::Run => {
            tracing::info!(rpc = %config.rpc_url, payer = %payer.pubkey(), "starting launch");
            let network = RpcClient::new(config.rpc_url.clone(), config.rpc_client_config());
            let session = Session::new(network, amm, payer);
            let report = create_pool_and_lock_liquidity(&session, &plan)
                .await
                .context("launch aborted")?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
