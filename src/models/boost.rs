use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::BotError;

/// One entry of the DexScreener `token-boosts/latest/v1` feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBoost {
    pub chain_id: String,
    pub token_address: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub links: Vec<BoostLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoostLink {
    #[serde(rename = "type", default)]
    pub link_type: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl BoostLink {
    /// Display name: explicit label, else the capitalised link type, else "Link"
    pub fn display_name(&self) -> String {
        if let Some(label) = self.label.as_deref().filter(|l| !l.trim().is_empty()) {
            return label.trim().to_string();
        }
        match self.link_type.as_deref().filter(|t| !t.trim().is_empty()) {
            Some(link_type) => crate::utils::title_case(link_type.trim()),
            None => "Link".to_string(),
        }
    }
}

/// Decode the boost feed entry by entry.
///
/// The endpoint normally returns an array, but a lone object has been
/// observed. Entries that do not decode are logged and dropped so the rest of
/// the snapshot still gets announced; only a payload that is neither an array
/// nor an object is an error.
pub fn decode_boosts(payload: Value) -> Result<Vec<TokenBoost>, BotError> {
    let entries = match payload {
        Value::Array(entries) => entries,
        entry @ Value::Object(_) => vec![entry],
        other => {
            return Err(BotError::Parse(format!(
                "expected a list of boosts, got {}",
                json_kind(&other)
            )))
        }
    };

    let mut boosts = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let token_address = entry
            .get("tokenAddress")
            .and_then(Value::as_str)
            .unwrap_or("<missing>")
            .to_string();
        match serde_json::from_value::<TokenBoost>(entry) {
            Ok(boost) => boosts.push(boost),
            Err(e) => warn!(
                "Skipping malformed boost #{} (tokenAddress {}): {}",
                index, token_address, e
            ),
        }
    }
    Ok(boosts)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LATEST_BOOSTS: &str = r#"[
        {
            "url": "https://dexscreener.com/solana/abc",
            "chainId": "solana",
            "tokenAddress": "AbC123",
            "icon": "f00",
            "header": "https://cdn.dexscreener.com/header.png",
            "description": "The next big thing",
            "links": [
                { "type": "twitter", "url": "https://x.com/abc" },
                { "label": "Website", "url": "https://abc.xyz" }
            ],
            "amount": 10,
            "totalAmount": 40
        },
        {
            "chainId": "base",
            "tokenAddress": "0xdef"
        }
    ]"#;

    fn decode(json: &str) -> Result<Vec<TokenBoost>, BotError> {
        decode_boosts(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn test_parse_latest_boosts() {
        let boosts = decode(LATEST_BOOSTS).unwrap();
        assert_eq!(boosts.len(), 2);

        let first = &boosts[0];
        assert_eq!(first.chain_id, "solana");
        assert_eq!(first.token_address, "AbC123");
        assert_eq!(first.amount, Some(10.0));
        assert_eq!(first.total_amount, Some(40.0));
        assert_eq!(first.links.len(), 2);
        assert_eq!(first.links[0].display_name(), "Twitter");
        assert_eq!(first.links[1].display_name(), "Website");

        let second = &boosts[1];
        assert!(second.url.is_none());
        assert!(second.links.is_empty());
        assert!(second.amount.is_none());
    }

    #[test]
    fn test_parse_single_object_payload() {
        let boosts = decode(r#"{ "chainId": "ethereum", "tokenAddress": "0x1" }"#).unwrap();
        assert_eq!(boosts.len(), 1);
        assert_eq!(boosts[0].token_address, "0x1");
    }

    #[test]
    fn test_link_without_url_is_kept() {
        let boosts = decode(
            r#"[{ "chainId": "solana", "tokenAddress": "A", "links": [{ "type": "twitter" }] }]"#,
        )
        .unwrap();
        assert_eq!(boosts.len(), 1);
        assert!(boosts[0].links[0].url.is_none());
    }

    #[test]
    fn test_malformed_entry_does_not_drop_the_snapshot() {
        let boosts = decode(
            r#"[
                { "chainId": "solana" },
                { "chainId": "solana", "tokenAddress": "A", "amount": "lots" },
                { "chainId": "base", "tokenAddress": "B" },
                42
            ]"#,
        )
        .unwrap();
        assert_eq!(boosts.len(), 1);
        assert_eq!(boosts[0].token_address, "B");
    }

    #[test]
    fn test_non_list_payload_is_an_error() {
        assert!(matches!(decode(r#""rate limited""#), Err(BotError::Parse(_))));
        assert!(matches!(decode("null"), Err(BotError::Parse(_))));
    }
}
