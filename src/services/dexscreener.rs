use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use crate::config::DexScreenerConfig;
use crate::errors::BotError;
use crate::models::{decode_boosts, PairsResponse, TokenBoost, TokenInfo};

const LATEST_BOOSTS_PATH: &str = "token-boosts/latest/v1";
const TOKEN_PAIRS_PATH: &str = "latest/dex/tokens/";

/// Read-only source of boosted tokens
#[async_trait::async_trait]
pub trait BoostSource: Send + Sync {
    /// Current boosts, in the order the source lists them
    async fn fetch_boosted_tokens(&self) -> Result<Vec<TokenBoost>, BotError>;

    /// Market data for one token; `Ok(None)` when the token has no pairs yet
    async fn fetch_token_info(
        &self,
        chain_id: &str,
        token_address: &str,
    ) -> Result<Option<TokenInfo>, BotError>;
}

pub struct DexScreenerClient {
    client: Client,
    base_url: Url,
}

impl DexScreenerClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BotError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("dexscreener-boost-bot/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Self::with_client(client, base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self, BotError> {
        Ok(Self {
            client,
            base_url: normalize_base_url(base_url)?,
        })
    }

    pub fn from_config(config: &DexScreenerConfig) -> Result<Self, BotError> {
        Self::new(&config.base_url, config.request_timeout())
    }

    fn latest_boosts_url(&self) -> Result<Url, BotError> {
        Ok(self.base_url.join(LATEST_BOOSTS_PATH)?)
    }

    fn token_pairs_url(&self, token_address: &str) -> Result<Url, BotError> {
        let mut url = self.base_url.join(TOKEN_PAIRS_PATH)?;
        url.path_segments_mut()
            .map_err(|_| BotError::Config(format!("base url {} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .push(token_address);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, BotError> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BotError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait::async_trait]
impl BoostSource for DexScreenerClient {
    async fn fetch_boosted_tokens(&self) -> Result<Vec<TokenBoost>, BotError> {
        let payload: serde_json::Value = self.get_json(self.latest_boosts_url()?).await?;
        decode_boosts(payload)
    }

    async fn fetch_token_info(
        &self,
        chain_id: &str,
        token_address: &str,
    ) -> Result<Option<TokenInfo>, BotError> {
        let response: PairsResponse = self.get_json(self.token_pairs_url(token_address)?).await?;
        Ok(response.into_token_info(chain_id))
    }
}

// Url::join drops the last path segment unless the base ends with '/'
fn normalize_base_url(base_url: &str) -> Result<Url, BotError> {
    let trimmed = base_url.trim();
    if trimmed.ends_with('/') {
        Ok(Url::parse(trimmed)?)
    } else {
        Ok(Url::parse(&format!("{}/", trimmed))?)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX_BODY_CHARS: usize = 200;
    body.chars().take(MAX_BODY_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> DexScreenerClient {
        // local test servers must not be routed through an ambient HTTP_PROXY
        let http = Client::builder()
            .timeout(Duration::from_secs(5))
            .no_proxy()
            .build()
            .unwrap();
        DexScreenerClient::with_client(http, base_url).unwrap()
    }

    #[test]
    fn test_latest_boosts_url() {
        let url = client("https://api.dexscreener.com").latest_boosts_url().unwrap();
        assert_eq!(url.as_str(), "https://api.dexscreener.com/token-boosts/latest/v1");
    }

    #[test]
    fn test_base_url_with_path_prefix() {
        let url = client("http://localhost:8080/proxy/").latest_boosts_url().unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/proxy/token-boosts/latest/v1");
    }

    #[test]
    fn test_token_pairs_url_escapes_address() {
        let client = client("https://api.dexscreener.com");
        let url = client.token_pairs_url("0xAbC").unwrap();
        assert_eq!(url.as_str(), "https://api.dexscreener.com/latest/dex/tokens/0xAbC");

        let url = client.token_pairs_url("a/b?c").unwrap();
        assert_eq!(url.as_str(), "https://api.dexscreener.com/latest/dex/tokens/a%2Fb%3Fc");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(DexScreenerClient::new("not a url", Duration::from_secs(5)).is_err());
    }

    #[test]
    fn test_truncate_body() {
        assert_eq!(truncate_body(&"x".repeat(500)).len(), 200);
    }

    /// Serves one canned HTTP response on a local port and returns its base url
    async fn serve_once(status_line: &str, body: &str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_server_error_becomes_status_error() {
        let base_url = serve_once("500 Internal Server Error", &"e".repeat(500)).await;
        let result = client(&base_url).fetch_boosted_tokens().await;
        match result {
            Err(BotError::Status { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "e".repeat(200));
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_json_becomes_parse_error() {
        let base_url = serve_once("200 OK", "<html>not json</html>").await;
        let result = client(&base_url).fetch_boosted_tokens().await;
        assert!(matches!(result, Err(BotError::Parse(_))), "got {:?}", result);
    }

    #[tokio::test]
    async fn test_fetch_keeps_valid_entries_of_mixed_feed() {
        let body = r#"[
            { "chainId": "solana", "tokenAddress": "A", "links": [{ "type": "twitter" }] },
            { "chainId": "solana", "amount": 5 },
            { "chainId": "base", "tokenAddress": "B" }
        ]"#;
        let base_url = serve_once("200 OK", body).await;
        let boosts = client(&base_url).fetch_boosted_tokens().await.unwrap();
        let addresses: Vec<&str> = boosts.iter().map(|b| b.token_address.as_str()).collect();
        assert_eq!(addresses, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_token_info_not_found_is_status_error() {
        let base_url = serve_once("404 Not Found", "{}").await;
        let result = client(&base_url).fetch_token_info("solana", "A").await;
        assert!(matches!(result, Err(BotError::Status { status: 404, .. })));
    }
}
