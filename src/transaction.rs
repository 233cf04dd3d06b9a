//! Clipboard transaction manager.
//!
//! Performs one atomic-appearing clipboard substitution: snapshot every
//! advertised format, write the Markdown result as plain text, inject a
//! synthetic paste, then restore the snapshot. Restoration is
//! unconditional once the clipboard has been mutated, so a failed paste
//! never leaves the clipboard stuck on intermediate Markdown content.

use std::thread;
use std::time::Duration;

use anyhow::Result;
use log::{error, info};

use crate::clipboard::{ClipboardSnapshot, Pasteboard};
use crate::error::PipelineError;
use crate::paste::{KeyCombo, KeystrokeInjector};

/// Substitute the clipboard with `markdown`, inject a synthetic paste, and
/// restore the original contents.
///
/// `paste_settle` pauses before injection (so the target application
/// observes the clipboard change) and again after it (so the paste
/// consumes the Markdown rather than the restored original). It is a
/// best-effort accommodation for the target's event loop, not a
/// correctness guarantee.
///
/// Aborts before any mutation when the clipboard is empty. Once mutation
/// has begun, the snapshot is restored even if the write or the injection
/// fails.
pub fn substitute(
    pasteboard: &mut dyn Pasteboard,
    injector: &dyn KeystrokeInjector,
    markdown: &str,
    paste_settle: Duration,
) -> std::result::Result<(), PipelineError> {
    let snapshot = ClipboardSnapshot::capture(pasteboard).map_err(PipelineError::Clipboard)?;
    if snapshot.is_empty() {
        return Err(PipelineError::NothingToConvert);
    }

    let result = mutate(pasteboard, injector, markdown, paste_settle);

    let restored = pasteboard.restore(&snapshot).map_err(PipelineError::Clipboard);
    if restored.is_ok() {
        info!("original clipboard restored");
    }

    result.map_err(PipelineError::from).and(restored)
}

fn mutate(
    pasteboard: &mut dyn Pasteboard,
    injector: &dyn KeystrokeInjector,
    markdown: &str,
    paste_settle: Duration,
) -> Result<()> {
    pasteboard.write_text(markdown)?;
    info!("clipboard updated with markdown ({} bytes)", markdown.len());

    thread::sleep(paste_settle);
    // A rejected keystroke is logged but must not block restoration.
    match injector.tap(KeyCombo::Paste) {
        Ok(()) => info!("synthetic paste injected"),
        Err(err) => error!("paste injection failed: {err:#}"),
    }
    thread::sleep(paste_settle);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::{MemoryPasteboard, TYPE_HTML, TYPE_PLAIN, TYPE_RTF};
    use crate::paste::testing::RecordingInjector;

    fn rich_pasteboard() -> MemoryPasteboard {
        let mut pb = MemoryPasteboard::new();
        pb.insert(TYPE_HTML, b"<b>hi</b>".to_vec());
        pb.insert(TYPE_RTF, b"{\\rtf1 hi}".to_vec());
        pb.insert(TYPE_PLAIN, b"hi".to_vec());
        pb
    }

    #[test]
    fn test_round_trip_restoration() {
        let mut pb = rich_pasteboard();
        let before = ClipboardSnapshot::capture(&pb).unwrap();
        let injector = RecordingInjector::default();

        substitute(&mut pb, &injector, "# hi", Duration::ZERO).unwrap();

        let after = ClipboardSnapshot::capture(&pb).unwrap();
        assert_eq!(before, after);
        assert_eq!(*injector.taps.borrow(), vec![KeyCombo::Paste]);
    }

    #[test]
    fn test_restoration_survives_injection_failure() {
        let mut pb = rich_pasteboard();
        let before = ClipboardSnapshot::capture(&pb).unwrap();
        let injector = RecordingInjector::failing();

        // Injection failure is absorbed; the transaction still succeeds.
        substitute(&mut pb, &injector, "# hi", Duration::ZERO).unwrap();

        let after = ClipboardSnapshot::capture(&pb).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_empty_clipboard_aborts_without_writes() {
        let mut pb = MemoryPasteboard::new();
        let injector = RecordingInjector::default();

        let err = substitute(&mut pb, &injector, "# hi", Duration::ZERO).unwrap_err();
        assert!(matches!(err, PipelineError::NothingToConvert));
        assert_eq!(pb.write_count(), 0);
        assert!(injector.taps.borrow().is_empty());
    }

    #[test]
    fn test_paste_consumer_sees_markdown() {
        use std::cell::RefCell;
        use std::rc::Rc;

        use anyhow::Result;

        // Pasteboard handle shareable between the transaction and the
        // injector, standing in for the target application observing the
        // clipboard at paste time.
        struct SharedPasteboard(Rc<RefCell<MemoryPasteboard>>);

        impl Pasteboard for SharedPasteboard {
            fn formats(&self) -> Result<Vec<String>> {
                self.0.borrow().formats()
            }
            fn read(&self, format: &str) -> Result<Option<Vec<u8>>> {
                self.0.borrow().read(format)
            }
            fn read_text(&self) -> Result<Option<String>> {
                self.0.borrow().read_text()
            }
            fn write_text(&mut self, text: &str) -> Result<()> {
                self.0.borrow_mut().write_text(text)
            }
            fn clear(&mut self) -> Result<()> {
                self.0.borrow_mut().clear()
            }
            fn restore(&mut self, snapshot: &ClipboardSnapshot) -> Result<()> {
                self.0.borrow_mut().restore(snapshot)
            }
        }

        struct SnoopingInjector {
            pb: Rc<RefCell<MemoryPasteboard>>,
            seen: RefCell<Option<String>>,
        }

        impl KeystrokeInjector for SnoopingInjector {
            fn tap(&self, _combo: KeyCombo) -> Result<()> {
                *self.seen.borrow_mut() = self.pb.borrow().read_text()?;
                Ok(())
            }
        }

        let inner = Rc::new(RefCell::new(rich_pasteboard()));
        let mut pb = SharedPasteboard(inner.clone());
        let injector = SnoopingInjector {
            pb: inner,
            seen: RefCell::new(None),
        };

        substitute(&mut pb, &injector, "# hi", Duration::ZERO).unwrap();
        assert_eq!(injector.seen.borrow().as_deref(), Some("# hi"));
    }

}
