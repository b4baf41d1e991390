use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::{info, LevelFilter};

use dexscreener_boost_bot::bot::{build_command_bot, run_command_handler};
use dexscreener_boost_bot::config::{Config, DEFAULT_CONFIG_PATH};
use dexscreener_boost_bot::services::{BoostMonitor, DexScreenerClient, TelegramNotifier};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, default_value = "info")]
    log_level: String,

    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Parse command line arguments and setup logging
    let args = Args::parse();
    let log_level = match args.log_level.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level.to_string())).init();

    // 2. Load and validate configuration before anything touches the network
    let config = Config::load(&args.config);
    config.validate().context("Invalid configuration")?;

    info!("Starting DexScreener boost monitor...");
    info!("Configuration loaded: {:?}", config);

    let source = DexScreenerClient::from_config(&config.dexscreener)
        .context("Failed to create DexScreener client")?;
    let notifier =
        TelegramNotifier::from_config(&config.telegram, config.dexscreener.request_timeout())
            .context("Failed to create Telegram notifier")?;

    let mut monitor = BoostMonitor::from_config(source, notifier, &config);

    if config.telegram.commands_enabled {
        let token = config.telegram.token.as_deref().unwrap_or_default();
        let bot = build_command_bot(token, config.dexscreener.request_timeout())
            .context("Failed to create Telegram command bot")?;
        tokio::spawn(run_command_handler(bot, monitor.status()));
    }

    tokio::select! {
        _ = monitor.run_forever() => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Received shutdown signal, stopping");
        }
    }

    Ok(())
}
