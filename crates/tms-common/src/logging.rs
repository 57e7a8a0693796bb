use std::any::Any;
use std::ffi::OsString;
use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

pub const LOG_DIR_ENV: &str = "TMS_LOG_DIR";
pub const LOG_BACKTRACE_ENV: &str = "TMS_LOG_INCLUDE_BACKTRACE";

/// Keeps the non-blocking file writer flushing until process exit.
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Where log lines end up. stdout is never a target: the CLI prints its JSON there.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LogTarget {
    Stderr,
    DailyFile { dir: PathBuf },
}

impl LogTarget {
    fn from_dir(dir: Option<OsString>) -> Self {
        match dir {
            Some(dir) if !dir.is_empty() => LogTarget::DailyFile { dir: dir.into() },
            _ => LogTarget::Stderr,
        }
    }
}

fn daily_file_writer(dir: &Path, app_name: &str) -> io::Result<BoxMakeWriter> {
    std::fs::create_dir_all(dir)?;
    let appender = tracing_appender::rolling::daily(dir, format!("{app_name}.log"));
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let _ = FILE_GUARD.set(guard);
    Ok(BoxMakeWriter::new(writer))
}

/// Install the global subscriber, filtered by `RUST_LOG` (default `info`).
///
/// Logs go to stderr unless `TMS_LOG_DIR` names a directory, in which case they
/// rotate daily in `<TMS_LOG_DIR>/<app>.log`. If that directory cannot be
/// created the subscriber falls back to stderr and says so once it is up.
pub fn init_tracing_subscriber(app_name: &'static str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter);

    let fallback = match LogTarget::from_dir(std::env::var_os(LOG_DIR_ENV)) {
        LogTarget::DailyFile { dir } => match daily_file_writer(&dir, app_name) {
            Ok(writer) => {
                let _ = builder.with_ansi(false).with_writer(writer).try_init();
                return;
            }
            Err(err) => Some((dir, err)),
        },
        LogTarget::Stderr => None,
    };

    if builder.with_writer(io::stderr).try_init().is_ok() {
        if let Some((dir, err)) = fallback {
            tracing::warn!(dir = %dir.display(), error = %err, "log directory unusable; logging to stderr");
        }
    }
}

/// Send panics to `tracing` as one structured event. Idempotent.
///
/// The default hook, which prints the backtrace, still runs when
/// `TMS_LOG_INCLUDE_BACKTRACE` is `1` or `true`.
pub fn install_tracing_panic_hook(app_name: &'static str) {
    static INSTALLED: OnceLock<()> = OnceLock::new();

    INSTALLED.get_or_init(|| {
        let previous = panic::take_hook();
        let chain_default = env_flag(std::env::var(LOG_BACKTRACE_ENV).ok().as_deref());

        panic::set_hook(Box::new(move |info| {
            let thread = std::thread::current();
            let location = info
                .location()
                .map(|loc| format!("{}:{}", loc.file(), loc.line()))
                .unwrap_or_else(|| "unknown".into());

            tracing::error!(
                application = app_name,
                thread = thread.name().unwrap_or("unnamed"),
                %location,
                message = panic_message(info.payload()),
                "panic"
            );

            if chain_default {
                previous(info);
            }
        }));
    });
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}

fn env_flag(value: Option<&str>) -> bool {
    matches!(value.map(str::trim), Some(v) if v == "1" || v.eq_ignore_ascii_case("true"))
}
