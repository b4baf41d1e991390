use derive_more::Display;

#[derive(Debug, Display)]
pub enum BotError {
    #[display(fmt = "Configuration error: {}", _0)]
    Config(String),

    #[display(fmt = "HTTP error: {}", _0)]
    Http(String),

    #[display(fmt = "Unexpected status {}: {}", status, body)]
    Status { status: u16, body: String },

    #[display(fmt = "Parse error: {}", _0)]
    Parse(String),

    #[display(fmt = "Telegram error: {}", _0)]
    Telegram(String),
}

impl std::error::Error for BotError {}

impl From<reqwest::Error> for BotError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            return BotError::Parse(error.to_string());
        }
        BotError::Http(error.to_string())
    }
}

impl From<serde_json::Error> for BotError {
    fn from(error: serde_json::Error) -> Self {
        BotError::Parse(error.to_string())
    }
}

impl From<url::ParseError> for BotError {
    fn from(error: url::ParseError) -> Self {
        BotError::Config(format!("invalid url: {}", error))
    }
}

impl From<teloxide::RequestError> for BotError {
    fn from(error: teloxide::RequestError) -> Self {
        BotError::Telegram(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        let err = BotError::Status {
            status: 429,
            body: "rate limited".to_string(),
        };
        assert_eq!(err.to_string(), "Unexpected status 429: rate limited");
    }

    #[test]
    fn test_from_serde_json() {
        let err: BotError = serde_json::from_str::<Vec<u8>>("{").unwrap_err().into();
        assert!(matches!(err, BotError::Parse(_)));
    }
}
