use crate::core::{LanguageCandidates, VideoId};
use url::Url;

/// Normalizes a raw identifier or a YouTube URL into a [`VideoId`].
pub fn extract_video_id(input: &str) -> Option<VideoId> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Some(id) = VideoId::parse(input) {
        return Some(id);
    }

    let url = Url::parse(input).ok()?;
    let host = url.host_str()?;

    // Handle various YouTube URL formats
    if host == "youtu.be" || host == "www.youtu.be" {
        return url.path_segments()?.next().and_then(VideoId::parse);
    }

    if host == "youtube.com" || host.ends_with(".youtube.com") {
        if let Some((_, v)) = url.query_pairs().find(|(key, _)| key == "v") {
            return VideoId::parse(&v);
        }

        let mut segments = url.path_segments()?;
        return match segments.next() {
            Some("embed" | "shorts" | "live") => segments.next().and_then(VideoId::parse),
            _ => None,
        };
    }

    None
}

/// Splits a comma-separated language preference string, keeping order and
/// duplicates. Absent or blank input yields `["en"]`.
pub fn parse_language_candidates(raw: Option<&str>) -> LanguageCandidates {
    let candidates = raw
        .unwrap_or(LanguageCandidates::DEFAULT)
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    LanguageCandidates::new(candidates)
}

/// True only for absolute http(s) URLs whose host equals, or is a subdomain
/// of, one of `allowed_domains`.
pub fn is_allowed_url<S: AsRef<str>>(input: &str, allowed_domains: &[S]) -> bool {
    let Ok(url) = Url::parse(input) else {
        return false;
    };

    if !matches!(url.scheme(), "http" | "https") {
        return false;
    }

    let Some(host) = url.host_str() else {
        return false;
    };
    let host = host.to_ascii_lowercase();

    allowed_domains.iter().any(|domain| {
        let domain = domain.as_ref().trim().to_ascii_lowercase();
        !domain.is_empty()
            && (host == domain
                || host
                    .strip_suffix(domain.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.')))
    })
}

/// Percent-decoded page title following `/wiki/` in a wiki page URL.
pub fn wiki_title(page_url: &str) -> Option<String> {
    let url = Url::parse(page_url).ok()?;
    let (_, title) = url.path().split_once("/wiki/")?;
    let title = urlencoding::decode(title).ok()?;
    let title = title.trim();

    (!title.is_empty()).then(|| title.to_string())
}
