use crate::core::{CaptionLine, CaptionProvider, VideoId};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

const PLAYER_RESPONSE_MARKERS: &[&str] = &[
    "ytInitialPlayerResponse = ",
    "ytInitialPlayerResponse=",
    "\"ytInitialPlayerResponse\":",
];

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTrack {
    pub base_url: String,
    pub language_code: String,
    #[serde(default)]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Json3 {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Json3Event {
    t_start_ms: Option<u64>,
    #[serde(default)]
    segs: Vec<Json3Segment>,
}

#[derive(Debug, Deserialize)]
struct Json3Segment {
    #[serde(default)]
    utf8: String,
}

/// Primary provider: caption tracks advertised by the watch page player.
pub struct YouTubeCaptionProvider {
    client: reqwest::Client,
}

impl YouTubeCaptionProvider {
    pub const NAME: &'static str = "youtube-player";

    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn fetch_watch_page(&self, video_id: &VideoId) -> Result<String> {
        let url = format!("https://www.youtube.com/watch?v={}&hl=en", video_id);

        let response = self
            .client
            .get(&url)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .header("Accept-Language", "en-US,en;q=0.9")
            .header("Cache-Control", "max-age=0")
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("Failed to fetch YouTube page: HTTP {}", response.status());
        }

        let html = response.text().await?;
        if html.is_empty() {
            anyhow::bail!("Empty response from YouTube");
        }

        Ok(html)
    }

    async fn fetch_track(&self, track: &CaptionTrack) -> Result<Vec<CaptionLine>> {
        let url = format!("{}&fmt=json3", track.base_url);

        let response = self
            .client
            .get(&url)
            .header("Referer", "https://www.youtube.com/")
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("Failed to fetch caption track: HTTP {}", response.status());
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }

        parse_json3(&body)
    }
}

#[async_trait]
impl CaptionProvider for YouTubeCaptionProvider {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn fetch(&self, video_id: &VideoId, lang: &str) -> Result<Vec<CaptionLine>> {
        let html = self.fetch_watch_page(video_id).await?;
        let player_response = extract_player_response(&html)?;
        let tracks = caption_tracks(&player_response)?;

        tracing::debug!(
            "Available caption tracks: {:?}",
            tracks.iter().map(|t| t.language_code.as_str()).collect::<Vec<_>>()
        );

        let track = select_track(&tracks, lang)
            .ok_or_else(|| anyhow::anyhow!("No caption track for language {}", lang))?;

        self.fetch_track(track).await
    }
}

/// Reads the `ytInitialPlayerResponse` object embedded in a watch page.
pub fn extract_player_response(html: &str) -> Result<Value> {
    for marker in PLAYER_RESPONSE_MARKERS {
        let Some(pos) = html.find(marker) else {
            continue;
        };

        let rest = html[pos + marker.len()..].trim_start();
        // The object is followed by arbitrary script, so stop after one value.
        let mut stream = serde_json::Deserializer::from_str(rest).into_iter::<Value>();
        if let Some(Ok(parsed)) = stream.next() {
            if parsed.is_object() {
                return Ok(parsed);
            }
        }
    }

    anyhow::bail!("Could not find ytInitialPlayerResponse in HTML");
}

pub fn caption_tracks(player_response: &Value) -> Result<Vec<CaptionTrack>> {
    let tracks = player_response
        .pointer("/captions/playerCaptionsTracklistRenderer/captionTracks")
        .ok_or_else(|| anyhow::anyhow!("Video has no caption tracks"))?;

    serde_json::from_value(tracks.clone()).context("Malformed caption track list")
}

/// Exact language match first, then a shared primary subtag (`en` / `en-US`).
/// Manual tracks win over auto-generated ones at each level.
pub fn select_track<'a>(tracks: &'a [CaptionTrack], lang: &str) -> Option<&'a CaptionTrack> {
    let primary = |code: &str| code.split(['-', '_']).next().unwrap_or(code).to_ascii_lowercase();
    let wanted = primary(lang);

    let exact = |t: &&CaptionTrack| t.language_code.eq_ignore_ascii_case(lang);
    let related = |t: &&CaptionTrack| primary(&t.language_code) == wanted;
    let manual = |t: &&CaptionTrack| t.kind.as_deref() != Some("asr");

    tracks
        .iter()
        .filter(exact)
        .find(manual)
        .or_else(|| tracks.iter().find(exact))
        .or_else(|| tracks.iter().filter(related).find(manual))
        .or_else(|| tracks.iter().find(related))
}

pub fn parse_json3(body: &str) -> Result<Vec<CaptionLine>> {
    let parsed: Json3 = serde_json::from_str(body).context("Malformed json3 caption track")?;

    let lines = parsed
        .events
        .into_iter()
        .filter_map(|event| {
            let text: String = event.segs.iter().map(|s| s.utf8.as_str()).collect();
            let text = text.replace('\n', " ");
            let text = text.trim();
            (!text.is_empty()).then(|| (event.t_start_ms, text.to_string()))
        })
        .enumerate()
        .map(|(index, (start_ms, text))| CaptionLine {
            start: start_ms.map(|ms| ms as f64 / 1000.0),
            text,
            index,
        })
        .collect();

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(code: &str, kind: Option<&str>) -> CaptionTrack {
        CaptionTrack {
            base_url: format!("https://www.youtube.com/api/timedtext?lang={}", code),
            language_code: code.to_string(),
            kind: kind.map(str::to_string),
        }
    }

    #[test]
    fn test_extract_player_response() {
        let html = r#"<script>var ytInitialPlayerResponse = {"captions":{"playerCaptionsTracklistRenderer":{"captionTracks":[{"baseUrl":"https://x/t?v=1","languageCode":"en"}]}}};var meta = {};</script>"#;

        let player_response = extract_player_response(html).unwrap();
        let tracks = caption_tracks(&player_response).unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].language_code, "en");
        assert!(extract_player_response("<html></html>").is_err());
    }

    #[test]
    fn test_select_track_preference() {
        let tracks = vec![
            track("en", Some("asr")),
            track("en-GB", None),
            track("en", None),
            track("ru", None),
        ];

        assert_eq!(select_track(&tracks, "en").map(|t| t.kind.clone()), Some(None));
        assert_eq!(select_track(&tracks, "en-GB").unwrap().language_code, "en-GB");
        assert_eq!(select_track(&tracks, "en-US").unwrap().language_code, "en-GB");
        assert!(select_track(&tracks, "fr").is_none());
    }

    #[test]
    fn test_parse_json3_skips_blank_events() {
        let body = r#"{"events":[
            {"tStartMs":0,"dDurationMs":1000},
            {"tStartMs":1500,"segs":[{"utf8":"Hello"},{"utf8":" world"}]},
            {"tStartMs":2000,"segs":[{"utf8":"\n"}]},
            {"tStartMs":3250,"segs":[{"utf8":"again\nand again"}]}
        ]}"#;

        let lines = parse_json3(body).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "Hello world");
        assert_eq!(lines[0].start, Some(1.5));
        assert_eq!(lines[1].text, "again and again");
        assert_eq!(lines[1].index, 1);
    }
}
