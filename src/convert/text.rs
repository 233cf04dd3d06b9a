//! Tertiary converter: lower-fidelity HTML-to-text rendering.

use anyhow::Result;

use super::Converter;

/// Render width passed to html2text. Wide enough that clipboard-sized
/// payloads never hit the wrapping path.
const NO_WRAP_WIDTH: usize = 100_000;

/// Last-resort conversion via html2text: keeps link targets and image
/// references, does not wrap lines, but makes no attempt at faithful
/// Markdown structure.
pub struct PlainTextConverter;

impl PlainTextConverter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlainTextConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter for PlainTextConverter {
    fn name(&self) -> &'static str {
        "html2text"
    }

    fn convert(&self, html: &str) -> Result<String> {
        Ok(html2text::from_read(html.as_bytes(), NO_WRAP_WIDTH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_nonempty_text() {
        let converter = PlainTextConverter::new();
        let out = converter
            .convert("<html><body><h1>Title</h1><p>body text</p></body></html>")
            .unwrap();
        assert!(out.contains("Title"));
        assert!(out.contains("body text"));
    }

    #[test]
    fn test_keeps_link_targets() {
        let converter = PlainTextConverter::new();
        let out = converter
            .convert("<p><a href=\"https://example.com\">link</a></p>")
            .unwrap();
        assert!(out.contains("https://example.com"));
    }

    #[test]
    fn test_does_not_wrap_long_lines() {
        let long = "word ".repeat(200);
        let converter = PlainTextConverter::new();
        let out = converter
            .convert(&format!("<p>{long}</p>"))
            .unwrap();
        let lines: Vec<&str> = out.lines().filter(|l| !l.trim().is_empty()).collect();
        assert_eq!(lines.len(), 1);
    }
}
