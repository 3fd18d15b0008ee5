//! Image-link extraction from message text.
//!
//! Skype rewrites raw URLs into anchor markup before the bot sees
//! them, so a pasted image link arrives as `<a href="...">...</a>`.

use once_cell::sync::Lazy;
use regex::Regex;

static ANCHOR_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^<a href="([^"]*)">[^<]*</a>$"#).unwrap());

/// Pull the href back out of anchor markup, if the whole message is
/// a single anchor element.
pub fn parse_anchor_tag(text: &str) -> Option<&str> {
    ANCHOR_TAG_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Interpret free text as an image URL: anchor markup first, then a
/// bare http(s) URL. Anything else is not a link.
pub fn image_url_from_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if let Some(href) = parse_anchor_tag(trimmed) {
        return Some(href.to_string());
    }
    match trimmed.parse::<reqwest::Url>() {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Some(url.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_href_from_anchor() {
        let text = r#"<a href="https://example.com/pan.jpg">https://example.com/pan.jpg</a>"#;
        assert_eq!(parse_anchor_tag(text), Some("https://example.com/pan.jpg"));
    }

    #[test]
    fn rejects_partial_anchor() {
        assert_eq!(parse_anchor_tag(r#"see <a href="https://x.y">link</a>"#), None);
        assert_eq!(parse_anchor_tag("plain text"), None);
    }

    #[test]
    fn accepts_bare_http_url() {
        assert_eq!(
            image_url_from_text("  https://example.com/aadhar.png  ").as_deref(),
            Some("https://example.com/aadhar.png")
        );
    }

    #[test]
    fn rejects_non_urls() {
        assert!(image_url_from_text("restart").is_none());
        assert!(image_url_from_text("ABCDE1234F").is_none());
        assert!(image_url_from_text("ftp://example.com/file").is_none());
    }
}
