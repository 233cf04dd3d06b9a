//! HTML → Markdown conversion chain.
//!
//! An ordered list of converter strategies is tried in sequence, each with
//! local failure capture. Exhaustion never aborts: the chain degrades to
//! returning the raw input untouched.

mod markdown;
mod pandoc;
mod text;

pub use markdown::MarkdownLibConverter;
pub use pandoc::PandocConverter;
pub use text::PlainTextConverter;

use std::borrow::Cow;

use anyhow::Result;
use lazy_static::lazy_static;
use log::{info, warn};
use regex::Regex;

lazy_static! {
    /// Matches a top-level document wrapper anywhere in the payload.
    static ref HTML_WRAPPER: Regex = Regex::new(r"(?i)<html[\s>]").unwrap();
    /// A list marker followed by more than one space. htmd pads dash
    /// markers to `-   `, which downstream consumers render inconsistently.
    static ref LIST_MARKER: Regex = Regex::new(r"^(\s*(?:[-*+]|\d+\.)) {2,}").unwrap();
}

/// One HTML → Markdown conversion strategy.
pub trait Converter {
    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    fn convert(&self, html: &str) -> Result<String>;
}

/// Prioritized list of converters, tried in order until one succeeds.
pub struct ConverterChain {
    converters: Vec<Box<dyn Converter>>,
}

impl ConverterChain {
    pub fn new(converters: Vec<Box<dyn Converter>>) -> Self {
        Self { converters }
    }

    /// The standard chain: pandoc subprocess, then the in-process library,
    /// then the lower-fidelity text renderer.
    pub fn standard(pandoc_program: &str) -> Self {
        Self::new(vec![
            Box::new(PandocConverter::new(pandoc_program)),
            Box::new(MarkdownLibConverter::new()),
            Box::new(PlainTextConverter::new()),
        ])
    }

    /// Convert `html` to Markdown through the fallback chain.
    ///
    /// Each stage's failure is logged and triggers progression to the next
    /// stage; if every stage fails the raw input is returned unconverted
    /// rather than erroring.
    pub fn convert(&self, html: &str) -> String {
        let input = ensure_document(html);

        for converter in &self.converters {
            match converter.convert(&input) {
                Ok(markdown) => {
                    info!("converted with {}", converter.name());
                    return tidy_markdown(&markdown);
                }
                Err(err) => {
                    warn!("{} conversion failed: {err:#}", converter.name());
                }
            }
        }

        warn!("all converters failed, returning input unconverted");
        html.to_string()
    }
}

/// Wrap payloads lacking a top-level document wrapper in a minimal shell,
/// so downstream converters always see well-formed markup.
pub fn ensure_document(html: &str) -> Cow<'_, str> {
    if HTML_WRAPPER.is_match(html) {
        Cow::Borrowed(html)
    } else {
        Cow::Owned(format!("<html><body>{html}</body></html>"))
    }
}

/// Normalize converter output: trim trailing whitespace per line, reduce
/// list markers to a single trailing space, collapse consecutive blank
/// lines to at most one, and strip blank lines from both ends of the
/// document. Applying this twice equals applying it once.
pub fn tidy_markdown(markdown: &str) -> String {
    let mut lines: Vec<Cow<'_, str>> = Vec::new();
    for line in markdown.lines() {
        let line = LIST_MARKER.replace(line.trim_end(), "$1 ");
        if !line.is_empty() {
            lines.push(line);
        } else if lines.last().is_some_and(|last| !last.is_empty()) {
            lines.push(Cow::Borrowed(""));
        }
    }
    while lines.last().map(|line| line.as_ref()) == Some("") {
        lines.pop();
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;

    struct FailingConverter;

    impl Converter for FailingConverter {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn convert(&self, _html: &str) -> Result<String> {
            bail!("simulated failure")
        }
    }

    struct EchoConverter;

    impl Converter for EchoConverter {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn convert(&self, html: &str) -> Result<String> {
            Ok(html.to_string())
        }
    }

    #[test]
    fn test_ensure_document_wraps_fragments() {
        assert_eq!(
            ensure_document("<b>hi</b>"),
            "<html><body><b>hi</b></body></html>"
        );
    }

    #[test]
    fn test_ensure_document_keeps_full_documents() {
        let full = "<HTML><body>hi</body></HTML>";
        assert_eq!(ensure_document(full), full);
    }

    #[test]
    fn test_tidy_collapses_blank_lines() {
        let input = "# Title\n\n\n\ntext  \n\n\n";
        assert_eq!(tidy_markdown(input), "# Title\n\ntext");
    }

    #[test]
    fn test_tidy_strips_leading_blank_lines() {
        assert_eq!(tidy_markdown("\n\n# Title"), "# Title");
    }

    #[test]
    fn test_tidy_normalizes_list_marker_spacing() {
        let input = "-   Item\n*  starred\n+    plussed\n1.   ordered\n  -   nested";
        assert_eq!(
            tidy_markdown(input),
            "- Item\n* starred\n+ plussed\n1. ordered\n  - nested"
        );
    }

    #[test]
    fn test_tidy_leaves_prose_dashes_alone() {
        let input = "a dash -   mid-line stays";
        assert_eq!(tidy_markdown(input), input);
    }

    #[test]
    fn test_tidy_is_idempotent() {
        let inputs = [
            "# Title\n\n\n- Item   \n\n",
            "-   Item\n1.   ordered",
            "",
            "\n\n\n",
            "a\nb\n\n\nc",
            "trailing spaces   ",
        ];
        for input in inputs {
            let once = tidy_markdown(input);
            assert_eq!(tidy_markdown(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_chain_falls_through_to_next_converter() {
        let chain = ConverterChain::new(vec![
            Box::new(FailingConverter),
            Box::new(EchoConverter),
        ]);
        let out = chain.convert("<html><body>hi</body></html>");
        assert_eq!(out, "<html><body>hi</body></html>");
    }

    #[test]
    fn test_chain_exhaustion_returns_raw_input() {
        let chain = ConverterChain::new(vec![
            Box::new(FailingConverter),
            Box::new(FailingConverter),
        ]);
        let out = chain.convert("<b>still here</b>");
        assert_eq!(out, "<b>still here</b>");
        assert!(!out.is_empty());
    }

    #[test]
    fn test_chain_output_is_tidied() {
        struct MessyConverter;
        impl Converter for MessyConverter {
            fn name(&self) -> &'static str {
                "messy"
            }
            fn convert(&self, _html: &str) -> Result<String> {
                Ok("# Title   \n\n\n\n- Item\n\n\n".to_string())
            }
        }
        let chain = ConverterChain::new(vec![Box::new(MessyConverter)]);
        assert_eq!(chain.convert("<h1>x</h1>"), "# Title\n\n- Item");
    }
}
