//! Clipboard format detection.
//!
//! Picks the best rich-text representation currently on the pasteboard,
//! in priority order HTML → RTF → plain text. Detection is strictly
//! read-only; the RTF → HTML hop is a separate step the pipeline invokes
//! so the chain only ever sees one input format.

use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::{Context, Result, bail};
use log::{debug, info};

use crate::clipboard::{Pasteboard, TYPE_HTML, TYPE_PLAIN, TYPE_RTF};

/// The best rich-text representation found on the pasteboard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RichTextPayload {
    Html(String),
    Rtf(Vec<u8>),
    /// Plain text bypasses Markdown conversion entirely.
    Plain(String),
}

/// Return the first available representation in priority order
/// HTML → RTF → plain text, or `None` if the clipboard holds none of the
/// three. Formats that advertise a type but yield no data are skipped.
pub fn detect(pasteboard: &dyn Pasteboard) -> Result<Option<RichTextPayload>> {
    let formats = pasteboard.formats()?;
    debug!("available clipboard formats: {formats:?}");

    if formats.iter().any(|f| f == TYPE_HTML)
        && let Some(data) = pasteboard.read(TYPE_HTML)?
    {
        info!("found HTML content ({} bytes)", data.len());
        return Ok(Some(RichTextPayload::Html(
            String::from_utf8_lossy(&data).into_owned(),
        )));
    }

    if formats.iter().any(|f| f == TYPE_RTF)
        && let Some(data) = pasteboard.read(TYPE_RTF)?
    {
        info!("found RTF content ({} bytes)", data.len());
        return Ok(Some(RichTextPayload::Rtf(data)));
    }

    if formats.iter().any(|f| f == TYPE_PLAIN)
        && let Some(text) = pasteboard.read_text()?
    {
        info!("only plain text found on clipboard");
        return Ok(Some(RichTextPayload::Plain(text)));
    }

    Ok(None)
}

/// Convert RTF bytes to an HTML intermediate using the OS document
/// converter (`textutil`). A missing executable or non-zero exit is a
/// recoverable error; the pipeline decides how to degrade.
pub fn rtf_to_html(rtf: &[u8]) -> Result<String> {
    let mut child = Command::new("textutil")
        .args(["-convert", "html", "-stdin", "-stdout"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .context("failed to spawn textutil")?;

    child
        .stdin
        .take()
        .context("textutil stdin unavailable")?
        .write_all(rtf)
        .context("failed to write RTF to textutil")?;

    let output = child
        .wait_with_output()
        .context("failed to read textutil output")?;
    if !output.status.success() {
        bail!("textutil exited with {}", output.status);
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
