use regex::Regex;
use std::sync::LazyLock;

static STRICT_SPEAKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Z' .\-]{2,25}:").expect("valid regex"));
static LOOSE_SPEAKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Za-z' .\-]{1,30}:").expect("valid regex"));

const STOPLIST: &[&str] = &[
    "transcript",
    "contents",
    "references",
    "see also",
    "navigation",
    "edit",
    "comments",
];

const MIN_FALLBACK_WORDS: usize = 3;

fn strip_speaker(re: &Regex, line: &str) -> Option<String> {
    let m = re.find(line)?;
    let rest = line[m.end()..].trim();
    (!rest.is_empty()).then(|| rest.to_string())
}

/// `MATT: Hello` -> `Hello`, for all-caps speaker names.
pub fn strict_speaker_line(line: &str) -> Option<String> {
    strip_speaker(&STRICT_SPEAKER_RE, line)
}

/// Mixed-case variant of [`strict_speaker_line`].
pub fn loose_speaker_line(line: &str) -> Option<String> {
    strip_speaker(&LOOSE_SPEAKER_RE, line)
}

/// Low-priority heuristic for pages without speaker labels.
pub fn is_prose_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    !STOPLIST.contains(&lower.as_str()) && line.split_whitespace().count() >= MIN_FALLBACK_WORDS
}

/// Keeps speaker-labelled lines; if none exist anywhere, keeps prose lines.
pub fn classify_lines(text: &str) -> Vec<String> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let spoken: Vec<String> = lines
        .iter()
        .filter_map(|line| strict_speaker_line(line).or_else(|| loose_speaker_line(line)))
        .collect();

    if !spoken.is_empty() {
        return spoken;
    }

    lines
        .into_iter()
        .filter(|line| is_prose_line(line))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_speaker() {
        assert_eq!(strict_speaker_line("MATT: Hello there."), Some("Hello there.".into()));
        assert_eq!(strict_speaker_line("O'BRIEN-SMITH: Hi"), Some("Hi".into()));
        assert_eq!(strict_speaker_line("MATT:   "), None);
        assert_eq!(strict_speaker_line("Matt: Hello"), None);
        assert_eq!(strict_speaker_line("AB: too short"), None);
    }

    #[test]
    fn test_loose_speaker() {
        assert_eq!(loose_speaker_line("Matt: Hello"), Some("Hello".into()));
        assert_eq!(loose_speaker_line("Al: Hi"), Some("Hi".into()));
        assert_eq!(loose_speaker_line("No colon here"), None);
        assert_eq!(loose_speaker_line("note: this page is a stub"), None);
    }

    #[test]
    fn test_speaker_name_length_limits() {
        // Counts exclude the leading capital.
        let strict_max = format!("M{}: hi", "A".repeat(25));
        let strict_over = format!("M{}: hi", "A".repeat(26));
        assert_eq!(strict_speaker_line(&strict_max), Some("hi".into()));
        assert_eq!(strict_speaker_line(&strict_over), None);
        assert_eq!(loose_speaker_line(&strict_over), Some("hi".into()));

        let loose_max = format!("M{}: hi", "a".repeat(30));
        let loose_over = format!("M{}: hi", "a".repeat(31));
        assert_eq!(loose_speaker_line(&loose_max), Some("hi".into()));
        assert_eq!(loose_speaker_line(&loose_over), None);
        assert!(classify_lines(&format!("{}\nshort", loose_over)).is_empty());
    }

    #[test]
    fn test_lowercase_label_does_not_block_prose() {
        let text = "note: this page is a stub\nThis is a three word line\nAnother prose line here\n";
        assert_eq!(
            classify_lines(text),
            vec![
                "note: this page is a stub",
                "This is a three word line",
                "Another prose line here"
            ]
        );
    }

    #[test]
    fn test_speaker_pass_wins_over_prose() {
        let text = "MATT: Hello there.\nRandom narration text here.\n";
        assert_eq!(classify_lines(text), vec!["Hello there."]);
    }

    #[test]
    fn test_prose_fallback() {
        let text = "Transcript\n\nThis is a three word line\nEdit\n  See Also  \nshort line\n";
        assert_eq!(classify_lines(text), vec!["This is a three word line"]);
    }
}
