//! In-memory pasteboard backend.
//!
//! Implements the same contract as the system pasteboard over a plain
//! vector of typed entries, so the detector, transaction manager, and
//! trigger adapters can be tested without real clipboard hardware.

use anyhow::Result;

use super::{ClipboardSnapshot, Pasteboard, TYPE_PLAIN};

#[derive(Clone, Debug, Default)]
pub struct MemoryPasteboard {
    entries: Vec<(String, Vec<u8>)>,
    write_count: usize,
}

impl MemoryPasteboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a payload on the pasteboard under `format`, replacing any
    /// existing entry for that format.
    pub fn insert(&mut self, format: &str, data: Vec<u8>) {
        self.entries.retain(|(f, _)| f != format);
        self.entries.push((format.to_string(), data));
    }

    /// Advertise a format that yields no data when read. Real pasteboards
    /// do this for lazily-promised types whose owner has gone away.
    pub fn advertise_empty(&mut self, format: &str) {
        self.insert(format, Vec::new());
    }

    /// Number of mutating operations performed since construction.
    pub fn write_count(&self) -> usize {
        self.write_count
    }
}

impl Pasteboard for MemoryPasteboard {
    fn formats(&self) -> Result<Vec<String>> {
        Ok(self.entries.iter().map(|(f, _)| f.clone()).collect())
    }

    fn read(&self, format: &str) -> Result<Option<Vec<u8>>> {
        Ok(self
            .entries
            .iter()
            .find(|(f, _)| f == format)
            .map(|(_, d)| d.clone())
            .filter(|d| !d.is_empty()))
    }

    fn read_text(&self) -> Result<Option<String>> {
        Ok(self
            .read(TYPE_PLAIN)?
            .map(|d| String::from_utf8_lossy(&d).into_owned()))
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        self.write_count += 1;
        self.entries.clear();
        self.entries
            .push((TYPE_PLAIN.to_string(), text.as_bytes().to_vec()));
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.write_count += 1;
        self.entries.clear();
        Ok(())
    }

    fn restore(&mut self, snapshot: &ClipboardSnapshot) -> Result<()> {
        self.write_count += 1;
        self.entries = snapshot.entries().to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_text_replaces_all_formats() {
        let mut pb = MemoryPasteboard::new();
        pb.insert("public.html", b"<b>x</b>".to_vec());
        pb.write_text("plain").unwrap();

        assert_eq!(pb.formats().unwrap(), vec![TYPE_PLAIN.to_string()]);
        assert_eq!(pb.read_text().unwrap().as_deref(), Some("plain"));
    }

    #[test]
    fn test_reads_do_not_count_as_writes() {
        let mut pb = MemoryPasteboard::new();
        pb.insert(TYPE_PLAIN, b"x".to_vec());
        let _ = pb.formats().unwrap();
        let _ = pb.read_text().unwrap();
        assert_eq!(pb.write_count(), 0);
    }
}
