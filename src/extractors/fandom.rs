use crate::core::{CaptionError, CaptionResult};
use crate::transcript::extract_transcript;
use crate::utils::{is_allowed_url, wiki_title};
use serde_json::Value;
use url::Url;

/// Builds the MediaWiki `action=parse` query for a `/wiki/<Title>` page URL.
pub fn content_api_url(page_url: &str) -> Option<String> {
    let title = wiki_title(page_url)?;
    let page = Url::parse(page_url).ok()?;

    let mut api = Url::parse(&format!("{}://{}/api.php", page.scheme(), page.host_str()?)).ok()?;
    api.query_pairs_mut()
        .append_pair("action", "parse")
        .append_pair("page", &title)
        .append_pair("prop", "text")
        .append_pair("format", "json")
        .append_pair("formatversion", "2");

    Some(api.to_string())
}

/// Pulls rendered HTML out of an `action=parse` response. Accepts both the
/// `formatversion=2` string and the older `{"*": ...}` shape.
pub fn parse_content_response(page_url: &str, body: &Value) -> Result<String, CaptionError> {
    if let Some(error) = body.get("error") {
        tracing::debug!("Content API error for {}: {}", page_url, error);
        return Err(CaptionError::PageNotResolvable {
            url: page_url.to_string(),
        });
    }

    let text = body.pointer("/parse/text");
    let html = text
        .and_then(Value::as_str)
        .or_else(|| text.and_then(|t| t.get("*")).and_then(Value::as_str));

    html.map(str::to_string)
        .ok_or_else(|| CaptionError::PageNotResolvable {
            url: page_url.to_string(),
        })
}

/// Guard -> content API -> transcript extraction for allow-listed wiki pages.
pub struct TranscriptFetcher {
    client: reqwest::Client,
    allowed_domains: Vec<String>,
}

impl TranscriptFetcher {
    pub fn new(client: reqwest::Client, allowed_domains: Vec<String>) -> Self {
        Self {
            client,
            allowed_domains,
        }
    }

    pub fn is_allowed(&self, page_url: &str) -> bool {
        is_allowed_url(page_url, &self.allowed_domains)
    }

    pub async fn fetch_transcript(&self, page_url: &str) -> Result<CaptionResult, CaptionError> {
        if !self.is_allowed(page_url) {
            tracing::warn!("Rejected transcript request for {}", page_url);
            return Err(CaptionError::DisallowedHost {
                url: page_url.to_string(),
            });
        }

        let api_url = content_api_url(page_url).ok_or_else(|| CaptionError::PageNotResolvable {
            url: page_url.to_string(),
        })?;

        tracing::info!("Fetching page content: {}", api_url);
        let body = self.fetch_json(&api_url).await.map_err(|e| CaptionError::PageFetch {
            url: page_url.to_string(),
            message: format!("{:#}", e),
        })?;

        let html = parse_content_response(page_url, &body)?;
        tracing::debug!("Rendered page length: {}", html.len());

        extract_transcript(page_url, |url: &str| self.is_allowed(url), &html)
    }

    async fn fetch_json(&self, api_url: &str) -> anyhow::Result<Value> {
        let response = self
            .client
            .get(api_url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("HTTP {}", response.status());
        }

        Ok(response.json::<Value>().await?)
    }
}
