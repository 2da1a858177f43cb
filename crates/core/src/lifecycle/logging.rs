//! Logging initialization: stderr or daily-rotated file, text or JSON lines.

use crate::config::Config;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Where and how log lines are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogOutput {
    pub to_file: bool,
    pub dir: Option<String>,
    pub json: bool,
}

impl LogOutput {
    pub fn from_config(config: &Config) -> Self {
        Self {
            to_file: config.logging_to_file,
            dir: config.log_dir.clone(),
            json: config.log_json,
        }
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `level`. File output rotates daily under
/// `dir` (default `./logs`) through a non-blocking writer.
///
/// The returned guard **must be held** for the lifetime of the process so
/// buffered lines are flushed on shutdown.
pub fn init_logging(level: &str, output: &LogOutput) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter);

    if output.to_file {
        let dir = output.dir.as_deref().unwrap_or("./logs");
        let file_appender = tracing_appender::rolling::daily(dir, "assistant-relay.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        let builder = builder.with_writer(non_blocking).with_ansi(false);

        if output.json {
            builder.json().init();
        } else {
            builder.init();
        }
        Some(guard)
    } else {
        if output.json {
            builder.json().init();
        } else {
            builder.init();
        }
        None
    }
}
