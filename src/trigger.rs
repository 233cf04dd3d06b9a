//! Trigger adapters.
//!
//! The two invocation modes of the original tool are one pipeline behind
//! two thin adapters: an externally-invoked one-shot convert-and-paste
//! cycle (Karabiner calls the binary with no arguments) and an interactive
//! selection-copy mode that captures the current selection first.

use std::thread;
use std::time::Duration;

use anyhow::Context;
use log::info;

use crate::error::{PipelineError, Result};
use crate::paste::KeyCombo;
use crate::pipeline::Pipeline;

/// Something that drives one pipeline invocation to completion.
pub trait TriggerSource {
    fn fire(&self, pipeline: &mut Pipeline) -> Result<()>;
}

/// One-shot convert-substitute-paste-restore cycle, invoked externally by
/// a system-level remapping utility. With `no_paste` the Markdown is left
/// on the clipboard instead: no injection, no restore.
pub struct ExternalTrigger {
    no_paste: bool,
    paste_settle: Duration,
}

impl ExternalTrigger {
    pub fn new(no_paste: bool, paste_settle: Duration) -> Self {
        Self {
            no_paste,
            paste_settle,
        }
    }
}

impl TriggerSource for ExternalTrigger {
    fn fire(&self, pipeline: &mut Pipeline) -> Result<()> {
        if self.no_paste {
            info!("external trigger: leaving markdown on the clipboard");
            pipeline.replace_with_markdown()?;
            Ok(())
        } else {
            info!("external trigger: converting clipboard to markdown");
            pipeline.paste_as_markdown(self.paste_settle)
        }
    }
}

/// Captures the current selection with a synthetic Cmd+C, verifies the
/// clipboard actually changed, then converts in place. The Markdown
/// replaces the clipboard contents; there is nothing to restore in this
/// mode, replacement is the point.
pub struct SelectionCopyTrigger {
    settle: Duration,
}

impl SelectionCopyTrigger {
    pub fn new(settle: Duration) -> Self {
        Self { settle }
    }
}

impl TriggerSource for SelectionCopyTrigger {
    fn fire(&self, pipeline: &mut Pipeline) -> Result<()> {
        let before = pipeline.plain_text()?;

        pipeline
            .tap(KeyCombo::Copy)
            .context("failed to synthesize copy keystroke")?;
        // Give the frontmost application time to service the copy.
        thread::sleep(self.settle);

        let after = pipeline.plain_text()?;
        if before == after {
            return Err(PipelineError::NoSelection);
        }

        let markdown = pipeline.replace_with_markdown()?;
        info!("selection converted to markdown ({} bytes)", markdown.len());
        notify("Copied as markdown");
        Ok(())
    }
}

/// Post a user notification through osascript. Best-effort: failures are
/// logged and never surface.
#[cfg(target_os = "macos")]
fn notify(message: &str) {
    use std::process::Command;

    use log::warn;

    let script = format!("display notification {message:?} with title \"pastemark\"");
    match Command::new("osascript").arg("-e").arg(&script).status() {
        Ok(status) if status.success() => {}
        Ok(status) => warn!("notification helper exited with {status}"),
        Err(err) => warn!("notification helper failed to start: {err}"),
    }
}

#[cfg(not(target_os = "macos"))]
fn notify(_message: &str) {}
