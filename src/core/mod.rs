pub mod caption;
pub mod error;
pub mod provider;
pub mod resolver;

pub use caption::{CaptionLine, CaptionResult, FetchAttemptError, LanguageCandidates, VideoId};
pub use error::CaptionError;
pub use provider::CaptionProvider;
pub use resolver::SourceFallbackEngine;
