//! Pure classification and truncation helpers for search results.
//!
//! Deterministic by construction: the same URL and hint always produce the
//! same type, and truncation depends only on the input text. Everything
//! operates on chars, not bytes, so multi-byte text cannot split a
//! codepoint.

use crate::models::ResourceType;

/// Substrings that mark a URL as a video resource.
const VIDEO_MARKERS: [&str; 3] = ["youtube.com", "vimeo.com", "ted.com/talks"];
/// Substrings that mark a URL as interactive material.
const INTERACTIVE_MARKERS: [&str; 4] = ["interactive", "game", "quiz", "activity"];
/// Substrings that mark a URL as image material.
const IMAGE_MARKERS: [&str; 3] = ["image", "photo", "infographic"];

/// Infer the resource type from the URL, falling back to the caller-supplied
/// hint, falling back to `Other`.
///
/// Inference order: video hosts, then ".pdf" documents, then interactive
/// markers, then image markers. A youtube URL classifies as video no matter
/// what the hint says. The wildcard hint "all" never names a type.
pub fn classify_url(url: &str, hint: &str) -> ResourceType {
    let url = url.to_ascii_lowercase();

    if VIDEO_MARKERS.iter().any(|m| url.contains(m)) {
        return ResourceType::Video;
    }
    if url.contains(".pdf") {
        return ResourceType::Document;
    }
    if INTERACTIVE_MARKERS.iter().any(|m| url.contains(m)) {
        return ResourceType::Interactive;
    }
    if IMAGE_MARKERS.iter().any(|m| url.contains(m)) {
        return ResourceType::Image;
    }

    if hint != "all" {
        if let Some(from_hint) = ResourceType::from_hint(hint) {
            return from_hint;
        }
    }

    ResourceType::Other
}

/// Hostname of the URL with any "www." prefix stripped.
pub fn source_host(url: &str) -> String {
    let rest = url.split("://").nth(1).unwrap_or(url);
    let host = rest
        .split(|c| c == '/' || c == '?' || c == '#')
        .next()
        .unwrap_or(rest);
    let host = host.rsplit('@').next().unwrap_or(host);
    let host = host.split(':').next().unwrap_or(host);
    host.strip_prefix("www.")
        .unwrap_or(host)
        .to_ascii_lowercase()
}

/// Truncate a resource title to at most 100 chars (97 kept + ellipsis).
pub fn truncate_title(title: &str) -> String {
    let title = title.trim();
    if title.chars().count() <= 100 {
        return title.to_string();
    }
    let mut out: String = title.chars().take(97).collect();
    out.push('…');
    out
}

/// Truncate a resource description to roughly 200 chars.
///
/// Prefers the last sentence-ending punctuation mark found in the char
/// window [150, 250); failing that, hard-cuts at 197 chars plus an
/// ellipsis.
pub fn truncate_description(text: &str) -> String {
    let text = text.trim();
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= 200 {
        return text.to_string();
    }

    let window_end = chars.len().min(250);
    for i in (150..window_end).rev() {
        if matches!(chars[i], '.' | '!' | '?') {
            return chars[..=i].iter().collect();
        }
    }

    let mut out: String = chars[..197].iter().collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_hosts_win_over_hint() {
        assert_eq!(
            classify_url("https://www.youtube.com/watch?v=abc", "article"),
            ResourceType::Video
        );
        assert_eq!(
            classify_url("https://www.ted.com/talks/some_talk", "all"),
            ResourceType::Video
        );
        assert_eq!(
            classify_url("https://vimeo.com/12345", "document"),
            ResourceType::Video
        );
    }

    #[test]
    fn inference_order_pdf_interactive_image() {
        assert_eq!(
            classify_url("https://nasa.gov/files/report.pdf", "all"),
            ResourceType::Document
        );
        assert_eq!(
            classify_url("https://sciencebuddies.org/cell-game", "all"),
            ResourceType::Interactive
        );
        assert_eq!(
            classify_url("https://loc.gov/photo/lincoln", "all"),
            ResourceType::Image
        );
    }

    #[test]
    fn hint_applies_only_when_url_is_neutral() {
        assert_eq!(
            classify_url("https://britannica.com/plant/fern", "article"),
            ResourceType::Article
        );
        // Wildcard and unknown hints coerce to Other.
        assert_eq!(
            classify_url("https://britannica.com/plant/fern", "all"),
            ResourceType::Other
        );
        assert_eq!(
            classify_url("https://britannica.com/plant/fern", "podcast"),
            ResourceType::Other
        );
    }

    #[test]
    fn classification_is_deterministic() {
        let url = "https://www.youtube.com/watch?v=xyz";
        let first = classify_url(url, "image");
        for _ in 0..10 {
            assert_eq!(classify_url(url, "image"), first);
        }
    }

    #[test]
    fn source_host_strips_scheme_path_and_www() {
        assert_eq!(
            source_host("https://www.khanacademy.org/science/biology"),
            "khanacademy.org"
        );
        assert_eq!(source_host("http://nasa.gov:8080/page?q=1"), "nasa.gov");
        assert_eq!(source_host("britannica.com/plant"), "britannica.com");
    }

    #[test]
    fn short_title_and_description_pass_through() {
        assert_eq!(truncate_title("Cells"), "Cells");
        assert_eq!(truncate_description("A short description."), "A short description.");
    }

    #[test]
    fn long_title_keeps_97_chars_plus_ellipsis() {
        let long = "t".repeat(150);
        let out = truncate_title(&long);
        assert_eq!(out.chars().count(), 98);
        assert!(out.ends_with('…'));
    }

    #[test]
    fn description_prefers_sentence_boundary_in_window() {
        // 300 chars with a sentence break at char index 180.
        let mut text = "a".repeat(180);
        text.push('.');
        text.push_str(&"b".repeat(119));
        assert_eq!(text.chars().count(), 300);

        let out = truncate_description(&text);
        assert_eq!(out.chars().count(), 181);
        assert!(out.ends_with('.'));
    }

    #[test]
    fn description_without_punctuation_hard_cuts_at_197() {
        let text = "x".repeat(300);
        let out = truncate_description(&text);
        assert_eq!(out.chars().count(), 198);
        assert!(out.ends_with('…'));
        assert_eq!(out.chars().filter(|c| *c == 'x').count(), 197);
    }
}
