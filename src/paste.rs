//! Synthetic keystroke injection.
//!
//! Posts a single keycode press/release pair carrying the Command modifier
//! through the Quartz event system. Event posting does not require the
//! Accessibility permission, unlike event taps.

use std::time::Duration;

use anyhow::Result;

/// Key combinations the pipeline synthesizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCombo {
    /// Cmd+C, used by the selection-copy trigger.
    Copy,
    /// Cmd+V, used after clipboard substitution.
    Paste,
}

impl KeyCombo {
    /// macOS virtual key code for the letter key of this combination.
    fn key_code(self) -> u16 {
        match self {
            KeyCombo::Copy => 0x08,  // kVK_ANSI_C
            KeyCombo::Paste => 0x09, // kVK_ANSI_V
        }
    }
}

/// Injects synthetic keystrokes into the session's input stream.
pub trait KeystrokeInjector {
    fn tap(&self, combo: KeyCombo) -> Result<()>;
}

/// Quartz-backed injector posting CGEvents at the HID tap point.
pub struct QuartzInjector {
    /// Gap between the key-down and key-up events, letting the target
    /// application's event loop observe both halves.
    tap_gap: Duration,
}

impl QuartzInjector {
    pub fn new(tap_gap: Duration) -> Self {
        Self { tap_gap }
    }
}

#[cfg(target_os = "macos")]
impl KeystrokeInjector for QuartzInjector {
    fn tap(&self, combo: KeyCombo) -> Result<()> {
        use anyhow::anyhow;
        use core_graphics::event::{CGEvent, CGEventFlags, CGEventTapLocation};
        use core_graphics::event_source::{CGEventSource, CGEventSourceStateID};

        let source = CGEventSource::new(CGEventSourceStateID::CombinedSessionState)
            .map_err(|_| anyhow!("failed to create CGEventSource"))?;

        let key_down = CGEvent::new_keyboard_event(source.clone(), combo.key_code(), true)
            .map_err(|_| anyhow!("failed to create key-down event"))?;
        let key_up = CGEvent::new_keyboard_event(source, combo.key_code(), false)
            .map_err(|_| anyhow!("failed to create key-up event"))?;

        key_down.set_flags(CGEventFlags::CGEventFlagCommand);
        key_up.set_flags(CGEventFlags::CGEventFlagCommand);

        key_down.post(CGEventTapLocation::HID);
        std::thread::sleep(self.tap_gap);
        key_up.post(CGEventTapLocation::HID);

        Ok(())
    }
}

#[cfg(not(target_os = "macos"))]
impl KeystrokeInjector for QuartzInjector {
    fn tap(&self, _combo: KeyCombo) -> Result<()> {
        let _ = self.tap_gap;
        anyhow::bail!("keystroke injection is only supported on macOS")
    }
}
