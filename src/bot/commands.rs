use log::{info, warn};
use std::time::Duration;
use teloxide::{
    error_handlers::LoggingErrorHandler, prelude::*, update_listeners::Polling,
    utils::command::BotCommands,
};

use crate::errors::BotError;
use crate::models::{MonitorStatus, SharedStatus};
use crate::services::notification_handler::build_bot;

/// How long Telegram holds an idle `getUpdates` long poll open
pub const POLLING_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(
    rename_rule = "lowercase",
    description = "These commands are supported:"
)]
pub enum Command {
    #[command(description = "Display help message")]
    Help,
    #[command(description = "Show what this bot does")]
    Start,
    #[command(description = "Show the monitoring status")]
    Status,
}

/// A long poll is idle for the whole polling window before it returns, so the
/// client timeout has to outlast it
pub fn command_client_timeout(request_timeout: Duration) -> Duration {
    request_timeout + POLLING_TIMEOUT
}

pub fn build_command_bot(token: &str, request_timeout: Duration) -> Result<Bot, BotError> {
    build_bot(token, command_client_timeout(request_timeout))
}

/// Answers `/start`, `/status` and `/help` until the process stops.
///
/// Only reads the status snapshot, the monitor loop stays the sole owner of
/// the seen set.
pub async fn run_command_handler(bot: Bot, status: SharedStatus) {
    info!("Starting command handler...");
    if bot.set_my_commands(Command::bot_commands()).await.is_err() {
        warn!("Could not set up the commands.");
    }

    let handler = Update::filter_message()
        .filter_command::<Command>()
        .endpoint(answer);

    let listener = Polling::builder(bot.clone())
        .timeout(POLLING_TIMEOUT)
        .build();

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![status])
        .build()
        .dispatch_with_listener(
            listener,
            LoggingErrorHandler::with_custom_text("An error from the update listener"),
        )
        .await;
}

async fn answer(bot: Bot, msg: Message, cmd: Command, status: SharedStatus) -> ResponseResult<()> {
    let text = {
        let status = status.read().await;
        reply_text(&cmd, &status)
    };
    bot.send_message(msg.chat.id, text).await?;
    Ok(())
}

pub fn reply_text(cmd: &Command, status: &MonitorStatus) -> String {
    match cmd {
        Command::Help => Command::descriptions().to_string(),
        Command::Start => "🚀 DexScreener Boost Monitor started!\n\
             I'll notify you when new token boosts are detected.\n\
             Use /status to check the monitoring status."
            .to_string(),
        Command::Status => status.summary(),
    }
}
