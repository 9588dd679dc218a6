//! Structured logging for Geophagia.
//!
//! Installs a `tracing` subscriber with human-readable console output and,
//! in debug builds, a JSON log file for post-mortem analysis. The level comes
//! from `RUST_LOG` when set, otherwise from the config's `debug.log_level`.

use std::path::Path;
use std::sync::Mutex;

use geophagia_config::Config;
use tracing::Subscriber;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config names a level.
pub const DEFAULT_FILTER: &str = "info,wgpu=warn,naga=warn";

/// Name of the JSON log file inside the log directory.
pub const LOG_FILE_NAME: &str = "geophagia.log";

/// Initialize the global tracing subscriber.
///
/// * `log_dir` - directory for the JSON log file (debug builds only)
/// * `debug_build` - enables the file layer
/// * `config` - supplies `debug.log_level` when `RUST_LOG` is unset
///
/// Returns `false` if a global subscriber was already installed.
///
/// ```no_run
/// use geophagia_config::Config;
/// use geophagia_log::init_logging;
///
/// let config = Config::default();
/// init_logging(Some(std::path::Path::new("./logs")), true, Some(&config));
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) -> bool {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(config)));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_names(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && let Some(file_layer) = json_file_layer(log_dir)
    {
        return subscriber.with(file_layer).try_init().is_ok();
    }

    subscriber.try_init().is_ok()
}

/// Filter directives derived from the config, falling back to [`DEFAULT_FILTER`].
pub fn filter_directives(config: Option<&Config>) -> String {
    match config {
        Some(config) if !config.debug.log_level.trim().is_empty() => {
            config.debug.log_level.clone()
        }
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// An `EnvFilter` built from [`DEFAULT_FILTER`].
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}

/// JSON layer writing to `<log_dir>/geophagia.log`, truncating any previous run.
///
/// `None` if the directory or file cannot be created; logging then stays
/// console-only.
fn json_file_layer<S>(log_dir: &Path) -> Option<impl Layer<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    std::fs::create_dir_all(log_dir).ok()?;
    let log_file = std::fs::File::create(log_dir.join(LOG_FILE_NAME)).ok()?;
    Some(
        fmt::layer()
            .with_writer(Mutex::new(log_file))
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json(),
    )
}
