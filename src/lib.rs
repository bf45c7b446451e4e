pub mod cli;
pub mod config;
pub mod core;
pub mod extractors;
pub mod transcript;
pub mod utils;

pub use crate::core::{CaptionError, CaptionLine, CaptionResult, SourceFallbackEngine, VideoId};
pub use extractors::{TimedTextProvider, TranscriptFetcher, YouTubeCaptionProvider};

use config::Config;
use std::time::Duration;

/// Identifier extraction, language parsing and the provider fallback chain
/// in one call.
pub async fn resolve_captions(
    engine: &SourceFallbackEngine,
    raw_input: &str,
    raw_lang: Option<&str>,
) -> Result<CaptionResult, CaptionError> {
    let video_id = utils::extract_video_id(raw_input).ok_or_else(|| {
        CaptionError::InvalidIdentifier {
            input: raw_input.to_string(),
        }
    })?;
    let candidates = utils::parse_language_candidates(raw_lang);

    engine.resolve(&video_id, &candidates).await
}

/// Engine wired to the YouTube player (primary) and timedtext (secondary)
/// providers.
pub fn default_engine(config: &Config, client: reqwest::Client) -> SourceFallbackEngine {
    SourceFallbackEngine::new(
        Box::new(YouTubeCaptionProvider::new(client.clone())),
        Box::new(TimedTextProvider::new(client)),
        Duration::from_secs(config.timeout),
    )
}
