use crate::core::{
    CaptionError, CaptionLine, CaptionProvider, CaptionResult, FetchAttemptError,
    LanguageCandidates, VideoId,
};
use std::time::Duration;
use tracing::{debug, info, warn};

/// A single planned (provider, language) call.
struct Attempt<'a> {
    provider: &'a dyn CaptionProvider,
    lang: &'a str,
}

/// Tries the primary provider for every language candidate, then the
/// secondary provider once with the first candidate. Stops at the first
/// non-empty result.
pub struct SourceFallbackEngine {
    primary: Box<dyn CaptionProvider>,
    secondary: Box<dyn CaptionProvider>,
    timeout: Duration,
}

impl SourceFallbackEngine {
    pub fn new(
        primary: Box<dyn CaptionProvider>,
        secondary: Box<dyn CaptionProvider>,
        timeout: Duration,
    ) -> Self {
        Self {
            primary,
            secondary,
            timeout,
        }
    }

    fn plan<'a>(&'a self, candidates: &'a LanguageCandidates) -> Vec<Attempt<'a>> {
        let mut attempts: Vec<Attempt<'a>> = candidates
            .iter()
            .map(|lang| Attempt {
                provider: self.primary.as_ref(),
                lang,
            })
            .collect();

        attempts.push(Attempt {
            provider: self.secondary.as_ref(),
            lang: candidates.requested(),
        });

        attempts
    }

    async fn run(
        &self,
        attempt: &Attempt<'_>,
        video_id: &VideoId,
    ) -> Result<Vec<CaptionLine>, String> {
        let call = attempt.provider.fetch(video_id, attempt.lang);

        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(captions)) if captions.is_empty() => Err("no captions returned".to_string()),
            Ok(Ok(captions)) => Ok(captions),
            Ok(Err(e)) => Err(format!("{:#}", e)),
            Err(_) => Err(format!("timed out after {:?}", self.timeout)),
        }
    }

    pub async fn resolve(
        &self,
        video_id: &VideoId,
        candidates: &LanguageCandidates,
    ) -> Result<CaptionResult, CaptionError> {
        let mut errors = Vec::new();

        for attempt in self.plan(candidates) {
            let source = attempt.provider.name();
            debug!("Trying {} for {} ({})", source, video_id, attempt.lang);

            match self.run(&attempt, video_id).await {
                Ok(captions) => {
                    info!(
                        "Found {} captions for {} via {} ({})",
                        captions.len(),
                        video_id,
                        source,
                        attempt.lang
                    );
                    return Ok(CaptionResult {
                        video_id: Some(video_id.clone()),
                        url: None,
                        lang: Some(attempt.lang.to_string()),
                        requested_lang: Some(candidates.requested().to_string()),
                        captions,
                        source: source.to_string(),
                    });
                }
                Err(message) => {
                    warn!("{} failed for {} ({}): {}", source, video_id, attempt.lang, message);
                    errors.push(FetchAttemptError {
                        lang: attempt.lang.to_string(),
                        source: source.to_string(),
                        message,
                    });
                }
            }
        }

        Err(CaptionError::AllSourcesExhausted {
            attempted: candidates.to_vec(),
            errors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;

    struct Slow;

    #[async_trait]
    impl CaptionProvider for Slow {
        fn name(&self) -> &'static str {
            "slow"
        }

        async fn fetch(&self, _video_id: &VideoId, _lang: &str) -> Result<Vec<CaptionLine>> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(CaptionLine::sequence(vec!["late".to_string()]))
        }
    }

    struct Empty;

    #[async_trait]
    impl CaptionProvider for Empty {
        fn name(&self) -> &'static str {
            "empty"
        }

        async fn fetch(&self, _video_id: &VideoId, _lang: &str) -> Result<Vec<CaptionLine>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_timeout_counts_as_failure() {
        let engine = SourceFallbackEngine::new(
            Box::new(Slow),
            Box::new(Empty),
            Duration::from_millis(10),
        );
        let video_id = VideoId::parse("dQw4w9WgXcQ").unwrap();
        let candidates = LanguageCandidates::new(vec!["en".to_string()]);

        let result = tokio_test::block_on(engine.resolve(&video_id, &candidates));

        match result {
            Err(CaptionError::AllSourcesExhausted { errors, .. }) => {
                assert_eq!(errors.len(), 2);
                assert!(errors[0].message.starts_with("timed out"));
                assert_eq!(errors[1].message, "no captions returned");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
