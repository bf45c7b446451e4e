use crate::core::{CaptionLine, VideoId};
use anyhow::Result;
use async_trait::async_trait;

/// A source of captions for a single (video, language) pair.
///
/// Implementations report failure through `Err` or an empty vector; both are
/// recorded by the engine and the next attempt is tried.
#[async_trait]
pub trait CaptionProvider: Send + Sync {
    fn name(&self) -> &'static str;
    async fn fetch(&self, video_id: &VideoId, lang: &str) -> Result<Vec<CaptionLine>>;
}
