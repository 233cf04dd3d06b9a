//! Error taxonomy for the conversion pipeline.

use thiserror::Error;

/// Errors surfaced by the pipeline and its trigger adapters.
///
/// Converter failures never appear here: they are absorbed inside the
/// converter chain, which always yields some output. Only conditions that
/// abort an invocation before (or instead of) producing a result are errors.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The clipboard held neither HTML, RTF, nor plain text.
    /// No mutation has been performed when this is returned.
    #[error("nothing to convert: clipboard has no HTML, RTF, or plain text")]
    NothingToConvert,

    /// The selection-copy trigger saw no clipboard change after Cmd+C.
    #[error("no text selected")]
    NoSelection,

    /// Pasteboard access failed in a way the pipeline cannot work around.
    #[error("clipboard access failed: {0}")]
    Clipboard(#[source] anyhow::Error),

    /// Any other unexpected fault, carried with context.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
