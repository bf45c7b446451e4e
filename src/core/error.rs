use crate::core::FetchAttemptError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaptionError {
    #[error("Could not find a video identifier in: {input:?}")]
    InvalidIdentifier { input: String },

    #[error("No captions found for languages [{}]: {}", .attempted.join(", "), format_attempts(.errors))]
    AllSourcesExhausted {
        attempted: Vec<String>,
        errors: Vec<FetchAttemptError>,
    },

    #[error("Host is not allowed: {url}")]
    DisallowedHost { url: String },

    #[error("Could not resolve a wiki page from: {url}")]
    PageNotResolvable { url: String },

    #[error("Failed to fetch page content for {url}: {message}")]
    PageFetch { url: String, message: String },

    #[error("No transcript found at: {url}")]
    NoTranscriptFound { url: String },
}

fn format_attempts(errors: &[FetchAttemptError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
