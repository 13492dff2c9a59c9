//! Tracing setup.
//!
//! `TRIVIA_LOG` overrides the configured filter. Output goes to the
//! configured log file only; without one no subscriber is installed.

use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LogSettings};

pub const LOG_ENV: &str = "TRIVIA_LOG";

/// Returns `Ok(false)` when logging stays off.
pub fn init_tracing(settings: &LogSettings) -> io::Result<bool> {
    let Some(path) = settings.file.as_ref() else {
        return Ok(false);
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&settings.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true);

    match settings.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }

    Ok(true)
}
