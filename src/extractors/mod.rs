pub mod fandom;
pub mod timedtext;
pub mod youtube;

pub use fandom::{content_api_url, TranscriptFetcher};
pub use timedtext::TimedTextProvider;
pub use youtube::YouTubeCaptionProvider;

use crate::config::Config;
use crate::utils::is_allowed_url;
use anyhow::Result;
use reqwest::redirect::Policy;
use std::time::Duration;

const MAX_REDIRECTS: usize = 10;

fn client_builder(config: &Config) -> reqwest::ClientBuilder {
    reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout))
        .cookie_store(true)
}

/// HTTP client for the caption providers.
pub fn build_client(config: &Config) -> Result<reqwest::Client> {
    let client = client_builder(config)
        .redirect(Policy::limited(MAX_REDIRECTS))
        .build()?;

    Ok(client)
}

/// Whether a redirect hop may be followed by the allow-listed page fetcher.
pub fn redirect_allowed<S: AsRef<str>>(target: &str, hops: usize, allowed_domains: &[S]) -> bool {
    hops < MAX_REDIRECTS && is_allowed_url(target, allowed_domains)
}

/// HTTP client for [`TranscriptFetcher`]: redirects are only followed while
/// they stay on `config.allowed_domains`.
pub fn build_allowlisted_client(config: &Config) -> Result<reqwest::Client> {
    let allowed_domains = config.allowed_domains.clone();
    let policy = Policy::custom(move |attempt| {
        let target = attempt.url().as_str().to_string();
        if redirect_allowed(&target, attempt.previous().len(), &allowed_domains) {
            attempt.follow()
        } else {
            tracing::warn!("Refusing redirect to {}", target);
            attempt.error(format!("redirect to disallowed or too many hops: {}", target))
        }
    });

    let client = client_builder(config).redirect(policy).build()?;

    Ok(client)
}
