use anyhow::Result;
use catalog_config::LoggingConfig;
use std::io;
use std::io::IsTerminal;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::{self, time::ChronoUtc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Set up the global subscriber.
///
/// Level precedence: `-q`, then `RUST_LOG`, then `-v` count, then the
/// configured level. JSON when `RUST_LOG_JSON=true`, when configured, or when
/// stdout is not a terminal.
pub fn init_logging(verbose_level: u8, quiet: bool, settings: Option<&LoggingConfig>) -> Result<()> {
    let configured_level = settings.map(|s| s.level.as_str()).unwrap_or("info");

    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        let fallback = match verbose_level {
            0 => configured_level,
            // -v: debug, keep the HTTP stack quiet
            1 => "debug,hyper=warn,reqwest=info,rustls=warn",
            _ => "trace",
        };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
    };

    let json = match std::env::var("RUST_LOG_JSON") {
        Ok(v) => v == "true",
        Err(_) => settings.is_some_and(|s| s.json) || !io::stdout().is_terminal(),
    };

    let log_file = settings.and_then(|s| s.file.as_deref());
    let (writer, ansi) = match log_file {
        Some(path) => (BoxMakeWriter::new(daily_appender(path)?), false),
        None => (BoxMakeWriter::new(io::stderr), io::stderr().is_terminal()),
    };

    let (json_layer, text_layer) = if json {
        let layer = fmt::layer()
            .json()
            .with_timer(ChronoUtc::rfc_3339())
            .with_writer(writer);
        (Some(layer), None)
    } else {
        let layer = fmt::layer()
            .with_timer(ChronoUtc::rfc_3339())
            .with_ansi(ansi)
            .with_writer(writer);
        (None, Some(layer))
    };

    Registry::default()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .try_init()?;

    Ok(())
}

/// Files are named after the configured one without its extension:
/// `marquee.log` rotates as `marquee.2026-01-17`, ...
fn daily_appender(log_path: &Path) -> Result<RollingFileAppender> {
    let log_dir = log_path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("Log file path has no parent directory"))?;
    std::fs::create_dir_all(log_dir)?;

    let log_filename = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid log filename"))?;
    let log_prefix = log_filename
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(log_filename);

    Ok(RollingFileAppender::new(Rotation::DAILY, log_dir, log_prefix))
}
