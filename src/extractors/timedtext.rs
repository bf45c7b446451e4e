use crate::core::{CaptionLine, CaptionProvider, VideoId};
use crate::transcript::decode_entities;
use anyhow::Result;
use async_trait::async_trait;
use regex::Regex;
use std::sync::LazyLock;

// Self-closing `<text .../>` elements carry no text and must not swallow the
// following element.
static TEXT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<text\b([^>]*?)(?:/>|>(.*?)</text>)"#).expect("valid regex")
});
static START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bstart="([0-9.]+)""#).expect("valid regex"));

/// Secondary provider: the legacy timedtext XML endpoint.
pub struct TimedTextProvider {
    client: reqwest::Client,
    base_url: String,
}

impl TimedTextProvider {
    pub const NAME: &'static str = "timedtext";
    pub const DEFAULT_BASE_URL: &'static str = "https://video.google.com/timedtext";

    pub fn new(client: reqwest::Client) -> Self {
        Self::with_base_url(client, Self::DEFAULT_BASE_URL)
    }

    pub fn with_base_url(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl CaptionProvider for TimedTextProvider {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn fetch(&self, video_id: &VideoId, lang: &str) -> Result<Vec<CaptionLine>> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("lang", lang), ("v", video_id.as_str())])
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("Failed to fetch timedtext: HTTP {}", response.status());
        }

        let body = response.text().await?;
        tracing::debug!("timedtext response length: {}", body.len());

        Ok(parse_timedtext(&body))
    }
}

/// Parses `<text start=".." dur="..">..</text>` elements. Text nodes are
/// often double-escaped (`&amp;#39;`), so they are decoded twice.
pub fn parse_timedtext(xml: &str) -> Vec<CaptionLine> {
    TEXT_RE
        .captures_iter(xml)
        .filter_map(|caps| {
            let start = START_RE
                .captures(&caps[1])
                .and_then(|s| s[1].parse::<f64>().ok());
            let body = caps.get(2)?.as_str();
            let text = decode_entities(&decode_entities(body));
            let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
            (!text.is_empty()).then_some((start, text))
        })
        .enumerate()
        .map(|(index, (start, text))| CaptionLine { start, text, index })
        .collect()
}
