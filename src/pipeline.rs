//! The conversion pipeline: format detection, the converter chain, and the
//! clipboard transaction, glued together behind one surface that the
//! trigger adapters drive.

use std::time::Duration;

use log::{info, warn};

use crate::clipboard::Pasteboard;
use crate::convert::ConverterChain;
use crate::detect::{self, RichTextPayload};
use crate::error::{PipelineError, Result};
use crate::paste::{KeyCombo, KeystrokeInjector};
use crate::transaction;

pub struct Pipeline<'a> {
    pasteboard: &'a mut dyn Pasteboard,
    injector: &'a dyn KeystrokeInjector,
    chain: ConverterChain,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        pasteboard: &'a mut dyn Pasteboard,
        injector: &'a dyn KeystrokeInjector,
        chain: ConverterChain,
    ) -> Self {
        Self {
            pasteboard,
            injector,
            chain,
        }
    }

    /// Detect the best clipboard representation and convert it to Markdown.
    /// Read-only; plain text passes through unchanged.
    pub fn convert_clipboard(&self) -> Result<String> {
        let payload = detect::detect(&*self.pasteboard)
            .map_err(PipelineError::Clipboard)?
            .ok_or(PipelineError::NothingToConvert)?;

        let markdown = match payload {
            RichTextPayload::Html(html) => self.chain.convert(&html),
            RichTextPayload::Rtf(rtf) => match detect::rtf_to_html(&rtf) {
                Ok(html) => self.chain.convert(&html),
                // RTF we cannot translate degrades to the plain-text
                // representation when one is present.
                Err(err) => {
                    warn!("RTF to HTML conversion failed: {err:#}");
                    self.pasteboard
                        .read_text()
                        .map_err(PipelineError::Clipboard)?
                        .ok_or(PipelineError::NothingToConvert)?
                }
            },
            RichTextPayload::Plain(text) => text,
        };

        Ok(markdown)
    }

    /// Full cycle: convert, substitute the clipboard, inject a synthetic
    /// paste, and restore the original contents.
    pub fn paste_as_markdown(&mut self, paste_settle: Duration) -> Result<()> {
        let markdown = self.convert_clipboard()?;
        transaction::substitute(&mut *self.pasteboard, self.injector, &markdown, paste_settle)
    }

    /// Convert and leave the Markdown on the clipboard, replacing the
    /// original contents. Used by the selection-copy trigger.
    pub fn replace_with_markdown(&mut self) -> Result<String> {
        let markdown = self.convert_clipboard()?;
        self.pasteboard
            .write_text(&markdown)
            .map_err(PipelineError::Clipboard)?;
        info!("clipboard replaced with markdown ({} bytes)", markdown.len());
        Ok(markdown)
    }

    /// Current plain-text clipboard content, if any.
    pub fn plain_text(&self) -> Result<Option<String>> {
        self.pasteboard.read_text().map_err(PipelineError::Clipboard)
    }

    /// Inject a synthetic keystroke through the pipeline's injector.
    pub fn tap(&self, combo: KeyCombo) -> anyhow::Result<()> {
        self.injector.tap(combo)
    }
}
