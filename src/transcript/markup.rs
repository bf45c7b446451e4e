use regex::{Captures, Regex};
use std::sync::LazyLock;

static SCRIPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").expect("valid regex"));
static STYLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style\b[^>]*>.*?</style\s*>").expect("valid regex"));
static BLOCK_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</(?:p|li|div|tr|dd|dt)\s*>").expect("valid regex"));
static BR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\b[^>]*>").expect("valid regex"));
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));
static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:#(\d+)|#[xX]([0-9a-fA-F]+)|(nbsp|amp|lt|gt|quot));").expect("valid regex")
});

/// Drops script/style blocks, turns block ends and `<br>` into newlines and
/// removes every other tag.
pub fn strip_markup(html: &str) -> String {
    let text = SCRIPT_RE.replace_all(html, "");
    let text = STYLE_RE.replace_all(&text, "");
    let text = BLOCK_END_RE.replace_all(&text, "\n");
    let text = BR_RE.replace_all(&text, "\n");
    TAG_RE.replace_all(&text, "").into_owned()
}

/// Decodes the common named entities and numeric references in one pass, so
/// `&amp;lt;` becomes `&lt;` rather than `<`.
pub fn decode_entities(text: &str) -> String {
    ENTITY_RE
        .replace_all(text, |caps: &Captures| {
            let code = if let Some(dec) = caps.get(1) {
                dec.as_str().parse::<u32>().ok()
            } else if let Some(hex) = caps.get(2) {
                u32::from_str_radix(hex.as_str(), 16).ok()
            } else {
                None
            };

            if let Some(code) = code {
                return char::from_u32(code)
                    .map(String::from)
                    .unwrap_or_else(|| caps[0].to_string());
            }

            match caps.get(3).map(|m| m.as_str()) {
                Some("nbsp") => " ".to_string(),
                Some("amp") => "&".to_string(),
                Some("lt") => "<".to_string(),
                Some("gt") => ">".to_string(),
                Some("quot") => "\"".to_string(),
                _ => caps[0].to_string(),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_markup() {
        let html = "<div><script>var x = '<p>';</script><style>p { }</style>\
                    <p>One <b>bold</b></p>Two<br>Three<br/>Four</div>";
        assert_eq!(strip_markup(html), "One bold\nTwo\nThree\nFour\n");
    }

    #[test]
    fn test_br_with_attributes() {
        assert_eq!(
            strip_markup("MATT: Welcome back.<br clear=\"all\">LAURA: Hi.<BR class=\"x\" />Done"),
            "MATT: Welcome back.\nLAURA: Hi.\nDone"
        );
        assert_eq!(strip_markup("<bre>kept</bre>"), "kept");
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("Rogue&#39;s &amp; Ranger&#x27;s"), "Rogue's & Ranger's");
        assert_eq!(decode_entities("&lt;b&gt; &quot;hi&quot;&nbsp;"), "<b> \"hi\" ");
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
        assert_eq!(decode_entities("&unknown; &#xD800;"), "&unknown; &#xD800;");
    }
}
