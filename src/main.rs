//! pastemark: paste rich text as Markdown on macOS.
//!
//! Detects the richest representation on the clipboard (HTML, RTF, or
//! plain text), converts it to Markdown through a best-effort converter
//! chain, substitutes the clipboard, optionally injects a synthetic Cmd+V,
//! and restores the original clipboard contents byte-for-byte.

mod clipboard;
mod config;
mod convert;
mod detect;
mod error;
mod logging;
mod paste;
mod pipeline;
mod transaction;
mod trigger;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{error, warn};

use crate::clipboard::SystemPasteboard;
use crate::config::Config;
use crate::convert::ConverterChain;
use crate::error::PipelineError;
use crate::paste::QuartzInjector;
use crate::pipeline::Pipeline;
use crate::trigger::{ExternalTrigger, SelectionCopyTrigger, TriggerSource};

#[derive(Parser)]
#[command(name = "pastemark", version, about = "Paste rich text as Markdown")]
struct Cli {
    /// Path to an alternate config file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Echo debug logging to stderr.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert the clipboard to Markdown, paste it into the frontmost
    /// application, and restore the original clipboard. This is the mode
    /// Karabiner-Elements invokes.
    Paste {
        /// Leave the Markdown on the clipboard instead of injecting Cmd+V.
        #[arg(long)]
        no_paste: bool,
    },
    /// Copy the current selection (synthetic Cmd+C) and convert it to
    /// Markdown in place.
    Copy,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = logging::init(cli.verbose) {
        // Degraded but functional: the pipeline still runs without a log file.
        eprintln!("warning: logging unavailable: {err:#}");
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err @ (PipelineError::NothingToConvert | PipelineError::NoSelection)) => {
            warn!("{err}");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
        Err(err) => {
            error!("operation aborted: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), PipelineError> {
    let config = Config::load(cli.config.as_deref())?;

    let mut pasteboard = SystemPasteboard::new().map_err(PipelineError::Clipboard)?;
    let injector = QuartzInjector::new(config.key_tap_gap());
    let chain = ConverterChain::standard(&config.pandoc_program);
    let mut pipeline = Pipeline::new(&mut pasteboard, &injector, chain);

    let trigger: Box<dyn TriggerSource> = match cli.command {
        Command::Paste { no_paste } => {
            Box::new(ExternalTrigger::new(no_paste, config.paste_settle()))
        }
        Command::Copy => Box::new(SelectionCopyTrigger::new(config.copy_settle())),
    };

    trigger.fire(&mut pipeline)
}
