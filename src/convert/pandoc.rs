//! Primary converter: the external pandoc process.

use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::{Context, Result, bail};

use super::Converter;

/// High-fidelity HTML → Markdown conversion via pandoc. Absence of the
/// executable or a non-zero exit is a recoverable condition the chain
/// handles by moving to the next strategy.
pub struct PandocConverter {
    program: String,
}

impl PandocConverter {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }
}

impl Converter for PandocConverter {
    fn name(&self) -> &'static str {
        "pandoc"
    }

    fn convert(&self, html: &str) -> Result<String> {
        let mut child = Command::new(&self.program)
            .args(["-f", "html", "-t", "markdown", "--wrap=none"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("failed to spawn {}", self.program))?;

        child
            .stdin
            .take()
            .context("pandoc stdin unavailable")?
            .write_all(html.as_bytes())
            .context("failed to write HTML to pandoc")?;

        let output = child
            .wait_with_output()
            .context("failed to read pandoc output")?;
        if !output.status.success() {
            bail!("pandoc exited with {}", output.status);
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
