use anyhow::{anyhow, Result};
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "config/config.toml";
pub const DEFAULT_DEXSCREENER_URL: &str = "https://api.dexscreener.com";
pub const DEFAULT_CHECK_INTERVAL_SECONDS: u64 = 60;
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub dexscreener: DexScreenerConfig,
    #[serde(default)]
    pub monitor: MonitorConfig,
}

#[derive(Serialize, Deserialize, Clone, Default)]
pub struct TelegramConfig {
    pub token: Option<String>,
    pub chat_id: Option<String>,
    #[serde(default)]
    pub commands_enabled: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DexScreenerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    #[serde(default = "default_true")]
    pub enrich_token_info: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MonitorConfig {
    #[serde(default = "default_check_interval")]
    pub check_interval_seconds: u64,
}

fn default_base_url() -> String {
    DEFAULT_DEXSCREENER_URL.to_string()
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECONDS
}

fn default_check_interval() -> u64 {
    DEFAULT_CHECK_INTERVAL_SECONDS
}

fn default_true() -> bool {
    true
}

impl Default for DexScreenerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_seconds: default_request_timeout(),
            enrich_token_info: true,
        }
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            check_interval_seconds: default_check_interval(),
        }
    }
}

// The bot token grants full control of the bot, keep it out of logs
impl fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("chat_id", &self.chat_id)
            .field("commands_enabled", &self.commands_enabled)
            .finish()
    }
}

impl TelegramConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        match &self.token {
            Some(token) if !token.trim().is_empty() => {}
            _ => return Err(anyhow!("Telegram bot token not configured")),
        }

        match &self.chat_id {
            Some(chat_id) if !chat_id.trim().is_empty() => {}
            _ => return Err(anyhow!("Telegram chat id not configured")),
        }

        Ok(())
    }
}

impl DexScreenerConfig {
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.base_url)
            .map_err(|e| anyhow!("Invalid DexScreener base url {}: {}", self.base_url, e))?;

        if self.request_timeout_seconds == 0 {
            return Err(anyhow!("DexScreener request timeout must be greater than zero"));
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl MonitorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.check_interval_seconds == 0 {
            return Err(anyhow!("Check interval must be greater than zero"));
        }
        Ok(())
    }

    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_seconds)
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        info!("Loading config from {}", path.display());
        match Self::load_from_file(path) {
            Ok(config) => {
                info!("Config loaded from file");
                config
            }
            Err(e) => {
                error!("Failed to load config from file: {}", e);
                info!("Falling back to environment variables or defaults");
                Self::from_env()
            }
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn from_env() -> Self {
        let mut config = Config::default();

        if let Ok(token) = std::env::var("TELEGRAM_BOT_TOKEN") {
            config.telegram.token = Some(token);
        }

        if let Ok(chat_id) = std::env::var("TELEGRAM_CHAT_ID") {
            config.telegram.chat_id = Some(chat_id);
        }

        if let Ok(enabled) = std::env::var("TELEGRAM_COMMANDS_ENABLED") {
            if let Ok(enabled) = enabled.parse::<bool>() {
                config.telegram.commands_enabled = enabled;
            }
        }

        if let Ok(base_url) = std::env::var("DEXSCREENER_BASE_URL") {
            config.dexscreener.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("DEXSCREENER_TIMEOUT_SECONDS") {
            if let Ok(timeout) = timeout.parse::<u64>() {
                config.dexscreener.request_timeout_seconds = timeout;
            }
        }

        if let Ok(interval) = std::env::var("CHECK_INTERVAL_SECONDS") {
            if let Ok(interval) = interval.parse::<u64>() {
                config.monitor.check_interval_seconds = interval;
            }
        }

        config
    }

    /// Checked once at startup, before the monitor loop is entered
    pub fn validate(&self) -> Result<()> {
        self.telegram.validate()?;
        self.dexscreener.validate()?;
        self.monitor.validate()?;
        Ok(())
    }
}
