//! File-based logging for the terminal front-end
//!
//! The TUI occupies the terminal, so tracing output goes to a daily-rotated
//! file instead of stdout.

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

pub const DEFAULT_LOG_DIR: &str = ".logs";
const LOG_FILE_PREFIX: &str = "now-playing";

/// Initialize the logging system.
///
/// Logs are written to `<log_dir>/now-playing.YYYY-MM-DD.log`. The level can be
/// controlled via the `RUST_LOG` environment variable; the default is DEBUG for
/// this crate and WARN for everything else.
///
/// The returned guard flushes buffered lines when dropped, so keep it alive for
/// the lifetime of the program.
pub fn init_logging(log_dir: &Path) -> anyhow::Result<WorkerGuard> {
    if !log_dir.exists() {
        std::fs::create_dir_all(log_dir)?;
    }

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("now_playing=debug,warn"));

    let fmt_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::info!("Logging initialized - logs written to {}/", log_dir.display());

    Ok(guard)
}
