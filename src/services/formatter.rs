use crate::models::{Social, TokenBoost, TokenInfo};
use crate::utils::{
    escape_markdownv2, escape_markdownv2_code, escape_markdownv2_url, format_number, format_price,
    title_case,
};

const MAX_DESCRIPTION_CHARS: usize = 500;

struct Link {
    icon: &'static str,
    label: String,
    url: String,
}

/// Render a boost as a Telegram MarkdownV2 message.
///
/// `info` is the optional pair enrichment. Every line whose data is missing is
/// left out, and a section header is only written when the section has lines.
pub fn format_boost_message(boost: &TokenBoost, info: Option<&TokenInfo>) -> String {
    let mut message = String::from("🔥 *NEW TOKEN BOOST DETECTED* 🔥\n\n");

    if let Some(info) = info {
        message += &format!(
            "*Token:* {} \\({}\\)\n",
            escape_markdownv2(&info.name),
            escape_markdownv2(&info.symbol)
        );
    }
    message += &format!("*Chain:* {}\n", escape_markdownv2(&boost.chain_id));
    message += &format!(
        "*Address:* `{}`\n",
        escape_markdownv2_code(&boost.token_address)
    );

    if let Some(info) = info {
        let metrics = metric_lines(info);
        push_section(&mut message, "*💰 Token Metrics:*", &metrics);
    }

    let mut boost_lines = Vec::new();
    if let Some(amount) = boost.amount {
        boost_lines.push(bullet("Boost Amount", &format_number(amount)));
    }
    if let Some(total) = boost.total_amount {
        boost_lines.push(bullet("Total Amount", &format_number(total)));
    }
    push_section(&mut message, "*🚀 Boost Details:*", &boost_lines);

    if let Some(description) = boost
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
    {
        let lines = vec![escape_markdownv2(&truncate(description, MAX_DESCRIPTION_CHARS))];
        push_section(&mut message, "*📝 Description:*", &lines);
    }

    let link_lines: Vec<String> = collect_links(boost, info)
        .into_iter()
        .map(|link| {
            format!(
                "{} [{}]({})",
                link.icon,
                escape_markdownv2(&link.label),
                escape_markdownv2_url(&link.url)
            )
        })
        .collect();
    push_section(&mut message, "*🔗 Links:*", &link_lines);

    message.trim_end().to_string()
}

fn metric_lines(info: &TokenInfo) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(market_cap) = info.market_cap {
        lines.push(bullet("Market Cap", &format_number(market_cap)));
    }
    if let Some(fdv) = info.fdv {
        lines.push(bullet("FDV", &format_number(fdv)));
    }
    if let Some(price) = info.price_usd {
        lines.push(bullet("Price", &format_price(price)));
    }
    if let Some(liquidity) = info.liquidity_usd {
        lines.push(bullet("Liquidity", &format_number(liquidity)));
    }
    lines
}

fn bullet(name: &str, value: &str) -> String {
    format!("• {}: {}", name, escape_markdownv2(value))
}

fn push_section(message: &mut String, header: &str, lines: &[String]) {
    if lines.is_empty() {
        return;
    }
    message.push('\n');
    message.push_str(header);
    message.push('\n');
    for line in lines {
        message.push_str(line);
        message.push('\n');
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_chars).collect();
    truncated.push('…');
    truncated
}

fn collect_links(boost: &TokenBoost, info: Option<&TokenInfo>) -> Vec<Link> {
    let mut links: Vec<Link> = Vec::new();
    let mut push = |link: Link| {
        if is_http_url(&link.url) && !links.iter().any(|l| l.url == link.url) {
            links.push(link);
        }
    };

    if let Some(url) = boost.url.as_deref() {
        push(Link {
            icon: "•",
            label: "DexScreener".to_string(),
            url: url.trim().to_string(),
        });
    }

    for link in &boost.links {
        if let Some(url) = link.url.as_deref() {
            push(Link {
                icon: icon_for(link.link_type.as_deref().unwrap_or_default()),
                label: link.display_name(),
                url: url.trim().to_string(),
            });
        }
    }

    if let Some(info) = info {
        for website in &info.websites {
            if let Some(url) = website.url.as_deref() {
                push(Link {
                    icon: "🌐",
                    label: "Website".to_string(),
                    url: url.trim().to_string(),
                });
            }
        }
        for social in &info.socials {
            if let Some(link) = social_link(social) {
                push(link);
            }
        }
    }

    links
}

fn social_link(social: &Social) -> Option<Link> {
    let platform = social.platform.as_deref()?.trim().to_lowercase();
    let handle = social.handle.as_deref()?.trim();
    if platform.is_empty() || handle.is_empty() {
        return None;
    }

    let (label, url) = match platform.as_str() {
        "twitter" | "x" => ("Twitter".to_string(), profile_url(handle, "https://twitter.com/")),
        "telegram" => ("Telegram".to_string(), profile_url(handle, "https://t.me/")),
        "discord" => ("Discord".to_string(), handle.to_string()),
        other => (title_case(other), handle.to_string()),
    };

    Some(Link {
        icon: icon_for(&platform),
        label,
        url,
    })
}

fn profile_url(handle: &str, base: &str) -> String {
    if is_http_url(handle) {
        handle.to_string()
    } else {
        format!("{}{}", base, handle.trim_start_matches('@'))
    }
}

fn icon_for(platform: &str) -> &'static str {
    match platform.to_lowercase().as_str() {
        "website" => "🌐",
        "twitter" | "x" => "🐦",
        "telegram" => "📱",
        "discord" => "💬",
        "medium" => "📝",
        "github" => "💻",
        _ => "🔗",
    }
}

// Telegram rejects the whole message when an inline link target is not a url
fn is_http_url(candidate: &str) -> bool {
    url::Url::parse(candidate)
        .map(|u| u.scheme() == "http" || u.scheme() == "https")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BoostLink, Website};

    fn bare_boost() -> TokenBoost {
        TokenBoost {
            chain_id: "solana".to_string(),
            token_address: "AbC123".to_string(),
            url: None,
            amount: None,
            total_amount: None,
            description: None,
            links: vec![],
        }
    }

    fn sample_info() -> TokenInfo {
        TokenInfo {
            name: "Abc 2.0".to_string(),
            symbol: "ABC".to_string(),
            market_cap: Some(1_234_567.0),
            fdv: None,
            price_usd: Some(0.00001234),
            liquidity_usd: Some(45_000.0),
            websites: vec![Website {
                label: Some("Website".to_string()),
                url: Some("https://abc.xyz".to_string()),
            }],
            socials: vec![
                Social {
                    platform: Some("twitter".to_string()),
                    handle: Some("abc_token".to_string()),
                },
                Social {
                    platform: Some("telegram".to_string()),
                    handle: Some("https://t.me/abc_chat".to_string()),
                },
                Social {
                    platform: Some("discord".to_string()),
                    handle: Some("not a url".to_string()),
                },
            ],
        }
    }

    #[test]
    fn test_bare_boost_omits_optional_sections() {
        let message = format_boost_message(&bare_boost(), None);
        assert!(message.starts_with("🔥 *NEW TOKEN BOOST DETECTED* 🔥"));
        assert!(message.contains("*Chain:* solana"));
        assert!(message.contains("*Address:* `AbC123`"));
        assert!(!message.contains("Token:"));
        assert!(!message.contains("Metrics"));
        assert!(!message.contains("Boost Details"));
        assert!(!message.contains("Description"));
        assert!(!message.contains("Links"));
        assert!(!message.contains("None"));
        assert!(!message.ends_with('\n'));
    }

    #[test]
    fn test_enriched_boost() {
        let mut boost = bare_boost();
        boost.url = Some("https://dexscreener.com/solana/abc".to_string());
        boost.amount = Some(10.0);
        boost.total_amount = Some(1500.0);
        boost.description = Some("To the moon!".to_string());
        boost.links = vec![BoostLink {
            link_type: Some("twitter".to_string()),
            label: None,
            url: Some("https://twitter.com/abc_token".to_string()),
        }];

        let message = format_boost_message(&boost, Some(&sample_info()));
        assert!(message.contains("*Token:* Abc 2\\.0 \\(ABC\\)"));
        assert!(message.contains("• Market Cap: $1\\.23M"));
        assert!(!message.contains("FDV"));
        assert!(message.contains("• Price: $0\\.00001234"));
        assert!(message.contains("• Liquidity: $45\\.00K"));
        assert!(message.contains("• Boost Amount: $10\\.00"));
        assert!(message.contains("• Total Amount: $1\\.50K"));
        assert!(message.contains("To the moon\\!"));
        assert!(message.contains("[DexScreener](https://dexscreener.com/solana/abc)"));
        assert!(message.contains("🌐 [Website](https://abc.xyz)"));
        assert!(message.contains("📱 [Telegram](https://t.me/abc_chat)"));
        // same url from the boost links and the pair socials is listed once
        assert_eq!(message.matches("https://twitter.com/abc_token").count(), 1);
        assert!(!message.contains("Discord"));
    }

    #[test]
    fn test_long_description_is_truncated() {
        let mut boost = bare_boost();
        boost.description = Some("a".repeat(MAX_DESCRIPTION_CHARS + 50));
        let message = format_boost_message(&boost, None);
        assert!(message.contains(&format!("{}…", "a".repeat(MAX_DESCRIPTION_CHARS))));
        assert!(!message.contains(&"a".repeat(MAX_DESCRIPTION_CHARS + 1)));
    }

    #[test]
    fn test_blank_description_is_omitted() {
        let mut boost = bare_boost();
        boost.description = Some("   ".to_string());
        let message = format_boost_message(&boost, None);
        assert!(!message.contains("Description"));
    }
}
