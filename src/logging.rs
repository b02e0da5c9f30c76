//! Tracing subscriber setup for the binary.
//!
//! Filter precedence: `TASKBOARD_LOG` if set, else `debug` with `--verbose`,
//! else `warn`. Output goes to stderr so it never mixes with rendered boards
//! on stdout. With `log_to_file` a daily-rolling file under the data
//! directory receives the same events.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

pub const ENV_LOG: &str = "TASKBOARD_LOG";
pub const LOG_FILE_PREFIX: &str = "taskboard.log";

/// Filter directive used when `TASKBOARD_LOG` is unset.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "taskboard=debug,warn" } else { "warn" }
}

pub fn build_filter(env_value: Option<&str>, verbose: bool) -> EnvFilter {
    match env_value.filter(|v| !v.trim().is_empty()) {
        Some(directives) => EnvFilter::try_new(directives)
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose))),
        None => EnvFilter::new(default_directive(verbose)),
    }
}

/// Install the global subscriber. Keep the returned guard alive for the
/// lifetime of the process so buffered file output is flushed.
pub fn init(verbose: bool, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let env_value = std::env::var(ENV_LOG).ok();

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(build_filter(env_value.as_deref(), verbose));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .json()
                .with_writer(writer)
                .with_filter(build_filter(env_value.as_deref(), true));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    // A subscriber may already be installed (tests, embedding); that's fine.
    let _ = tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    guard
}
