//! Heuristic transcript extraction from rendered wiki HTML.
//!
//! The pipeline is strip -> decode -> classify -> sequence. No stage performs
//! I/O; fetching and host checks happen in [`crate::extractors::fandom`].

pub mod classify;
pub mod markup;

pub use classify::classify_lines;
pub use markup::{decode_entities, strip_markup};

use crate::core::{CaptionError, CaptionLine, CaptionResult};
use crate::utils::wiki_title;

pub const SOURCE_NAME: &str = "fandom";

pub fn transcript_lines(html: &str) -> Vec<CaptionLine> {
    let text = decode_entities(&strip_markup(html));
    CaptionLine::sequence(classify_lines(&text))
}

/// Builds a transcript result for an already-fetched page. The host check and
/// the page-title lookup are repeated here so the function is safe to call
/// on its own.
pub fn extract_transcript<F>(
    page_url: &str,
    is_allowed: F,
    html: &str,
) -> Result<CaptionResult, CaptionError>
where
    F: Fn(&str) -> bool,
{
    if !is_allowed(page_url) {
        return Err(CaptionError::DisallowedHost {
            url: page_url.to_string(),
        });
    }

    if wiki_title(page_url).is_none() {
        return Err(CaptionError::PageNotResolvable {
            url: page_url.to_string(),
        });
    }

    let captions = transcript_lines(html);

    if captions.is_empty() {
        return Err(CaptionError::NoTranscriptFound {
            url: page_url.to_string(),
        });
    }

    Ok(CaptionResult {
        video_id: None,
        url: Some(page_url.to_string()),
        lang: None,
        requested_lang: None,
        captions,
        source: SOURCE_NAME.to_string(),
    })
}
