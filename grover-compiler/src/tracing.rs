//! Subscribers for the compiler's console and file logs.
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use tracing::Level;
use tracing_appender::non_blocking;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::prelude::__tracing_subscriber_SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;
use xc_grover::log::{LOG_TARGET, PROGRESS_TARGET};

/// Keeps the log file writer alive. Pending events are flushed on drop.
#[derive(Debug)]
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

/// Install the global subscriber.
///
/// Library events go to stderr, so that JSON written to stdout stays
/// parseable: `info` and above, or `debug` and above when `verbose`. The
/// optional log file also receives the per-iteration progress events.
pub fn init_logging(logfile: Option<&Path>, verbose: bool) -> io::Result<LogGuard> {
    let console_level = if verbose { Level::DEBUG } else { Level::INFO };
    let console = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .with_filter(Targets::new().with_target(LOG_TARGET, console_level));

    let (file, guard) = match logfile {
        Some(path) => {
            let (writer, guard) = non_blocking(BufWriter::new(File::create(path)?));
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(
                    Targets::new()
                        .with_target(LOG_TARGET, Level::TRACE)
                        .with_target(PROGRESS_TARGET, Level::TRACE),
                );
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry().with(console).with(file).init();
    Ok(LogGuard { _file: guard })
}
