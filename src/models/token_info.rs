use serde::{Deserialize, Deserializer, Serialize};

/// Response of `latest/dex/tokens/{address}`
#[derive(Debug, Clone, Deserialize)]
pub struct PairsResponse {
    #[serde(default)]
    pub pairs: Option<Vec<Pair>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pair {
    #[serde(default)]
    pub chain_id: Option<String>,
    pub base_token: BaseToken,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price_usd: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub fdv: Option<f64>,
    #[serde(default)]
    pub liquidity: Option<Liquidity>,
    #[serde(default)]
    pub info: Option<PairInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BaseToken {
    pub name: String,
    pub symbol: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Liquidity {
    #[serde(default)]
    pub usd: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PairInfo {
    #[serde(default)]
    pub websites: Vec<Website>,
    #[serde(default)]
    pub socials: Vec<Social>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Website {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Older payloads use `platform`/`handle`, current ones `type`/`url`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Social {
    #[serde(rename = "type", alias = "platform", default)]
    pub platform: Option<String>,
    #[serde(rename = "url", alias = "handle", default)]
    pub handle: Option<String>,
}

/// Market data for a boosted token, taken from its most relevant pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenInfo {
    pub name: String,
    pub symbol: String,
    pub market_cap: Option<f64>,
    pub fdv: Option<f64>,
    pub price_usd: Option<f64>,
    pub liquidity_usd: Option<f64>,
    pub websites: Vec<Website>,
    pub socials: Vec<Social>,
}

impl From<Pair> for TokenInfo {
    fn from(pair: Pair) -> Self {
        let info = pair.info.unwrap_or_default();
        Self {
            name: pair.base_token.name,
            symbol: pair.base_token.symbol,
            market_cap: pair.market_cap,
            fdv: pair.fdv,
            price_usd: pair.price_usd,
            liquidity_usd: pair.liquidity.and_then(|l| l.usd),
            websites: info.websites,
            socials: info.socials,
        }
    }
}

impl PairsResponse {
    /// Prefer a pair on the boost's chain; otherwise the first one listed
    pub fn into_token_info(self, chain_id: &str) -> Option<TokenInfo> {
        let mut pairs = self.pairs.unwrap_or_default();
        if pairs.is_empty() {
            return None;
        }
        let index = pairs
            .iter()
            .position(|p| p.chain_id.as_deref() == Some(chain_id))
            .unwrap_or(0);
        Some(pairs.swap_remove(index).into())
    }
}

// priceUsd arrives as a string, other metrics as numbers
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}
