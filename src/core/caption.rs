use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical 11-character video identifier (`[A-Za-z0-9_-]{11}`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    pub const LEN: usize = 11;

    /// Accepts the token only if it is exactly an identifier, nothing more.
    pub fn parse(token: &str) -> Option<Self> {
        let valid = token.len() == Self::LEN
            && token
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');

        valid.then(|| Self(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered language preferences. Never empty; the first entry is the
/// requested language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageCandidates(Vec<String>);

impl LanguageCandidates {
    pub const DEFAULT: &'static str = "en";

    /// Trims each tag and drops blank ones.
    pub fn new(candidates: Vec<String>) -> Self {
        let candidates: Vec<String> = candidates
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();

        if candidates.is_empty() {
            Self(vec![Self::DEFAULT.to_string()])
        } else {
            Self(candidates)
        }
    }

    pub fn requested(&self) -> &str {
        &self.0[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionLine {
    /// Seconds from the start of the video; `None` for untimed transcripts.
    pub start: Option<f64>,
    pub text: String,
    pub index: usize,
}

impl CaptionLine {
    /// Numbers untimed lines by position.
    pub fn sequence<I>(lines: I) -> Vec<CaptionLine>
    where
        I: IntoIterator<Item = String>,
    {
        lines
            .into_iter()
            .enumerate()
            .map(|(index, text)| CaptionLine {
                start: None,
                text,
                index,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_id: Option<VideoId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_lang: Option<String>,
    pub captions: Vec<CaptionLine>,
    pub source: String,
}

/// One failed (language, source) attempt. Collected, never dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchAttemptError {
    pub lang: String,
    pub source: String,
    pub message: String,
}

impl fmt::Display for FetchAttemptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} / {}] {}", self.source, self.lang, self.message)
    }
}
