//! System pasteboard backend.
//!
//! Wraps `clipboard-rs`, which exposes the format enumeration and raw
//! per-type buffers the snapshot/restore discipline needs. All errors from
//! the underlying context are boxed trait objects, so they are re-wrapped
//! into `anyhow` errors at this boundary.

use anyhow::{Result, anyhow};
use clipboard_rs::{Clipboard, ClipboardContent, ClipboardContext};

use super::{ClipboardSnapshot, Pasteboard};

pub struct SystemPasteboard {
    ctx: ClipboardContext,
}

impl SystemPasteboard {
    pub fn new() -> Result<Self> {
        let ctx = ClipboardContext::new()
            .map_err(|e| anyhow!("failed to open system pasteboard: {e}"))?;
        Ok(Self { ctx })
    }
}

impl Pasteboard for SystemPasteboard {
    fn formats(&self) -> Result<Vec<String>> {
        self.ctx
            .available_formats()
            .map_err(|e| anyhow!("failed to enumerate pasteboard formats: {e}"))
    }

    fn read(&self, format: &str) -> Result<Option<Vec<u8>>> {
        // An advertised format can still yield no data; that is not an error.
        match self.ctx.get_buffer(format) {
            Ok(data) if data.is_empty() => Ok(None),
            Ok(data) => Ok(Some(data)),
            Err(_) => Ok(None),
        }
    }

    fn read_text(&self) -> Result<Option<String>> {
        match self.ctx.get_text() {
            Ok(text) if text.is_empty() => Ok(None),
            Ok(text) => Ok(Some(text)),
            Err(_) => Ok(None),
        }
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        self.ctx
            .clear()
            .map_err(|e| anyhow!("failed to clear pasteboard: {e}"))?;
        self.ctx
            .set_text(text.to_string())
            .map_err(|e| anyhow!("failed to write text to pasteboard: {e}"))
    }

    fn clear(&mut self) -> Result<()> {
        self.ctx
            .clear()
            .map_err(|e| anyhow!("failed to clear pasteboard: {e}"))
    }

    fn restore(&mut self, snapshot: &ClipboardSnapshot) -> Result<()> {
        let contents: Vec<ClipboardContent> = snapshot
            .entries()
            .iter()
            .map(|(format, data)| ClipboardContent::Other(format.clone(), data.clone()))
            .collect();
        self.ctx
            .clear()
            .map_err(|e| anyhow!("failed to clear pasteboard: {e}"))?;
        if contents.is_empty() {
            return Ok(());
        }
        self.ctx
            .set(contents)
            .map_err(|e| anyhow!("failed to restore pasteboard contents: {e}"))
    }
}
