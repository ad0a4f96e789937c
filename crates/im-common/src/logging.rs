use std::panic;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Logging settings read from the environment.
///
/// - `RUST_LOG`: filter directives (falls back to `default_filter`)
/// - `IM_LOG_DIR`: write daily-rotated `<app>.log` files there instead of stdout
/// - `IM_LOG_FORMAT`: `text` (default) or `json`
/// - `IM_LOG_INCLUDE_BACKTRACE`: also run the default panic hook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub default_filter: String,
    pub log_dir: Option<PathBuf>,
    pub format: LogFormat,
    pub include_backtrace: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default_filter: "info".into(),
            log_dir: None,
            format: LogFormat::Text,
            include_backtrace: false,
        }
    }
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let format = match lookup("IM_LOG_FORMAT").as_deref().map(str::trim) {
            Some(value) if value.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Self {
            log_dir: lookup("IM_LOG_DIR")
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from),
            format,
            include_backtrace: lookup("IM_LOG_INCLUDE_BACKTRACE")
                .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            ..Self::default()
        }
    }
}

/// Routes panics through `tracing::error!` with thread and location context.
/// Installed once per process; later calls are no-ops.
pub fn install_tracing_panic_hook(app_name: &'static str, include_backtrace: bool) {
    static INSTALLED: OnceLock<()> = OnceLock::new();

    INSTALLED.get_or_init(|| {
        let default_hook = panic::take_hook();

        panic::set_hook(Box::new(move |info| {
            let thread = std::thread::current();
            let thread_name = thread.name().unwrap_or("unknown");

            let location = info
                .location()
                .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()));
            let message = info
                .payload()
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| info.payload().downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "panic payload not string".into());

            tracing::error!(
                application = app_name,
                %thread_name,
                location = location.as_deref().unwrap_or("unknown"),
                panic_message = %message,
                "panic captured"
            );

            if include_backtrace {
                default_hook(info);
            }
        }));
    });
}

fn rotating_file_writer(app_name: &'static str, dir: &Path) -> Option<BoxMakeWriter> {
    if let Err(err) = std::fs::create_dir_all(dir) {
        tracing::warn!(error = %err, "failed to create IM_LOG_DIR; falling back to stdout");
        return None;
    }

    let appender = tracing_appender::rolling::daily(dir, format!("{app_name}.log"));
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);
    let _ = LOG_GUARD.set(guard);
    Some(BoxMakeWriter::new(non_blocking))
}

/// Installs the global subscriber and panic hook. Repeated calls keep the
/// first subscriber.
pub fn init_logging(app_name: &'static str, config: &LoggingConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_filter.as_str()));

    let writer = config
        .log_dir
        .as_ref()
        .and_then(|dir| rotating_file_writer(app_name, dir))
        .unwrap_or_else(|| BoxMakeWriter::new(std::io::stdout));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer);

    let _ = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };

    install_tracing_panic_hook(app_name, config.include_backtrace);
}
