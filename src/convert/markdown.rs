//! Secondary converter: in-process conversion via htmd.

use anyhow::{Result, anyhow};
use htmd::HtmlToMarkdown;
use htmd::options::{BulletListMarker, HeadingStyle, Options};

use super::Converter;

/// Library-based HTML → Markdown conversion configured to match the
/// primary converter's output style: ATX headings, `-` bullets, and
/// `<style>`/`<script>` elements stripped.
pub struct MarkdownLibConverter {
    converter: HtmlToMarkdown,
}

impl MarkdownLibConverter {
    pub fn new() -> Self {
        let converter = HtmlToMarkdown::builder()
            .skip_tags(vec!["style", "script"])
            .options(Options {
                heading_style: HeadingStyle::Atx,
                bullet_list_marker: BulletListMarker::Dash,
                ..Default::default()
            })
            .build();
        Self { converter }
    }
}

impl Default for MarkdownLibConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter for MarkdownLibConverter {
    fn name(&self) -> &'static str {
        "htmd"
    }

    fn convert(&self, html: &str) -> Result<String> {
        self.converter
            .convert(html)
            .map_err(|e| anyhow!("htmd conversion failed: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::tidy_markdown;

    #[test]
    fn test_heading_and_list_fixture() {
        let converter = MarkdownLibConverter::new();
        let out = converter
            .convert("<html><body><h1>Title</h1><ul><li>Item</li></ul></body></html>")
            .unwrap();
        assert_eq!(tidy_markdown(&out), "# Title\n\n- Item");
    }

    #[test]
    fn test_style_and_script_stripped() {
        let converter = MarkdownLibConverter::new();
        let out = converter
            .convert("<html><body><style>b{color:red}</style><script>x()</script><p>kept</p></body></html>")
            .unwrap();
        assert!(out.contains("kept"));
        assert!(!out.contains("color:red"));
        assert!(!out.contains("x()"));
    }

    #[test]
    fn test_links_preserved() {
        let converter = MarkdownLibConverter::new();
        let out = converter
            .convert("<p><a href=\"https://example.com\">link</a></p>")
            .unwrap();
        assert!(out.contains("[link](https://example.com)"));
    }
}
