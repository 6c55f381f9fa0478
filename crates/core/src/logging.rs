use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Where diagnostics go. The core only emits `tracing` events; the host
/// decides the sink by calling [`init_logging`] (or installing its own
/// subscriber).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter directive, overridden by `RUST_LOG`.
    pub level: String,
    pub to_stderr: bool,
    /// Directory for daily-rolled log files. `None` disables the file layer.
    pub log_dir: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            to_stderr: true,
            log_dir: None,
        }
    }
}

impl LogConfig {
    /// `~/.rubyscope/logs`, falling back to the working directory.
    pub fn default_log_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".rubyscope/logs")
    }

    pub fn with_file_sink(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level))
    }
}

/// Install a global subscriber for `component`. The returned guard flushes
/// the file sink when dropped and must be held for the life of the process.
pub fn init_logging(component: &str, config: &LogConfig) -> Option<WorkerGuard> {
    let (file_layer, guard) = match &config.log_dir {
        Some(dir) => {
            let _ = std::fs::create_dir_all(dir);
            // Files like fragment.log.2024-01-21
            let file_appender = tracing_appender::rolling::daily(dir, component);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let stderr_layer = config.to_stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false)
    });

    let result = tracing_subscriber::registry()
        .with(config.filter())
        .with(file_layer)
        .with(stderr_layer)
        .try_init();
    if let Err(e) = result {
        eprintln!("logging already initialized: {e}");
    }

    guard
}
