//! Pasteboard abstraction and point-in-time snapshots.
//!
//! The pipeline never talks to the system pasteboard directly; it goes
//! through the [`Pasteboard`] trait so the whole conversion path can be
//! exercised against an in-memory backend without touching real hardware.

mod macos;
mod memory;

pub use macos::SystemPasteboard;
pub use memory::MemoryPasteboard;

use anyhow::Result;

/// macOS UTI for HTML pasteboard content.
pub const TYPE_HTML: &str = "public.html";
/// macOS UTI for RTF pasteboard content.
pub const TYPE_RTF: &str = "public.rtf";
/// macOS UTI for plain UTF-8 text.
pub const TYPE_PLAIN: &str = "public.utf8-plain-text";

/// Read/write access to a pasteboard holding multiple typed representations.
pub trait Pasteboard {
    /// Format identifiers currently advertised, in pasteboard order.
    fn formats(&self) -> Result<Vec<String>>;

    /// Raw payload for one format, or `None` if the format advertises no
    /// data. Absence of data is not an error.
    fn read(&self, format: &str) -> Result<Option<Vec<u8>>>;

    /// Current plain-text representation, if any.
    fn read_text(&self) -> Result<Option<String>>;

    /// Clear the pasteboard and write `text` as the sole plain-text content.
    fn write_text(&mut self, text: &str) -> Result<()>;

    /// Remove all contents.
    fn clear(&mut self) -> Result<()>;

    /// Clear the pasteboard and rewrite every entry of `snapshot`,
    /// reinstating the pre-transaction state.
    fn restore(&mut self, snapshot: &ClipboardSnapshot) -> Result<()>;
}

/// All pasteboard representations captured at one point in time.
///
/// Immutable once taken. Owned by the transaction manager for the duration
/// of one conversion transaction and discarded after restoration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClipboardSnapshot {
    entries: Vec<(String, Vec<u8>)>,
}

impl ClipboardSnapshot {
    /// Capture every advertised format that currently yields data.
    /// Formats whose read returns no data are omitted, not errors.
    pub fn capture(pasteboard: &dyn Pasteboard) -> Result<Self> {
        let mut entries = Vec::new();
        for format in pasteboard.formats()? {
            if let Some(data) = pasteboard.read(&format)? {
                entries.push((format, data));
            }
        }
        Ok(Self { entries })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Captured `(format, payload)` pairs in pasteboard order.
    pub fn entries(&self) -> &[(String, Vec<u8>)] {
        &self.entries
    }
}
