use log::info;
use std::time::Duration;
use teloxide::{
    adaptors::throttle::{Limits, Throttle},
    prelude::*,
    sugar::request::RequestLinkPreviewExt,
    types::{ParseMode, Recipient},
    Bot,
};

use crate::config::TelegramConfig;
use crate::errors::BotError;

/// Outbound channel for formatted boost announcements
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    /// `text` must already be valid MarkdownV2
    async fn send_message(&self, text: &str) -> Result<(), BotError>;
}

pub struct TelegramNotifier {
    bot: Throttle<Bot>,
    chat_id: Recipient,
    chat_label: String,
}

impl TelegramNotifier {
    /// Must be called from within a tokio runtime, the throttle worker is spawned here
    pub fn new(bot: Bot, chat_id: &str) -> Self {
        Self {
            bot: bot.throttle(Limits::default()),
            chat_id: parse_recipient(chat_id),
            chat_label: chat_id.trim().to_string(),
        }
    }

    pub fn from_config(config: &TelegramConfig, timeout: Duration) -> Result<Self, BotError> {
        let (token, chat_id) = match (&config.token, &config.chat_id) {
            (Some(token), Some(chat_id)) if !token.is_empty() && !chat_id.is_empty() => {
                (token, chat_id)
            }
            _ => {
                return Err(BotError::Config(
                    "telegram token and chat id are required".to_string(),
                ))
            }
        };
        Ok(Self::new(build_bot(token, timeout)?, chat_id))
    }
}

#[async_trait::async_trait]
impl Notifier for TelegramNotifier {
    async fn send_message(&self, text: &str) -> Result<(), BotError> {
        self.bot
            .send_message(self.chat_id.clone(), text)
            .parse_mode(ParseMode::MarkdownV2)
            .disable_link_preview(true)
            .send()
            .await?;
        info!("Notification sent to {}", self.chat_label);
        Ok(())
    }
}

/// Bot with an explicit request timeout instead of the library default
pub fn build_bot(token: &str, timeout: Duration) -> Result<Bot, BotError> {
    let client = teloxide::net::default_reqwest_settings()
        .timeout(timeout)
        .build()
        .map_err(|e| BotError::Config(format!("failed to build telegram client: {}", e)))?;
    Ok(Bot::with_client(token, client))
}

/// Numeric ids (including `-100…` channel ids) or `@channelname`
pub fn parse_recipient(chat_id: &str) -> Recipient {
    let chat_id = chat_id.trim();
    match chat_id.parse::<i64>() {
        Ok(id) => Recipient::Id(ChatId(id)),
        Err(_) => Recipient::ChannelUsername(chat_id.to_string()),
    }
}
