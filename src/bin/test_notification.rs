use dexscreener_boost_bot::{
    config::{Config, DEFAULT_CONFIG_PATH},
    models::{BoostLink, TokenBoost},
    services::{format_boost_message, BoostSource, DexScreenerClient, Notifier, TelegramNotifier},
};
use log::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));

    // Load configuration
    let config = Config::load(DEFAULT_CONFIG_PATH);
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}. Check your telegram configuration.", e);
        std::process::exit(1);
    }

    let notifier =
        TelegramNotifier::from_config(&config.telegram, config.dexscreener.request_timeout())?;
    let source = DexScreenerClient::from_config(&config.dexscreener)?;

    info!("Notification handler initialized successfully");

    // A real boost when the feed is reachable, a canned one otherwise
    let boost = match source.fetch_boosted_tokens().await {
        Ok(boosts) if !boosts.is_empty() => boosts[0].clone(),
        Ok(_) => create_test_boost(),
        Err(e) => {
            warn!("Failed to fetch live boosts, using a test boost: {}", e);
            create_test_boost()
        }
    };

    let info = match source
        .fetch_token_info(&boost.chain_id, &boost.token_address)
        .await
    {
        Ok(info) => info,
        Err(e) => {
            warn!("Failed to fetch token info: {}", e);
            None
        }
    };

    info!("Sending test notification for {}", boost.token_address);
    let message = format_boost_message(&boost, info.as_ref());
    notifier.send_message(&message).await?;

    info!("Test notification sent");

    Ok(())
}

fn create_test_boost() -> TokenBoost {
    TokenBoost {
        chain_id: "solana".to_string(),
        token_address: "So11111111111111111111111111111111111111112".to_string(),
        url: Some(
            "https://dexscreener.com/solana/So11111111111111111111111111111111111111112"
                .to_string(),
        ),
        amount: Some(10.0),
        total_amount: Some(500.0),
        description: Some("Test boost sent by test_notification".to_string()),
        links: vec![BoostLink {
            link_type: Some("twitter".to_string()),
            label: None,
            url: Some("https://twitter.com/dexscreener".to_string()),
        }],
    }
}
