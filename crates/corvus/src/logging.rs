//! Logging — level-colored console output with optional file persistence.

use std::fmt::Write as _;
use std::path::PathBuf;

use colored::Colorize;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Knobs for [`init`].
#[derive(Debug, Clone)]
pub struct LogOptions {
    /// Default filter when `RUST_LOG` is unset.
    pub level: String,
    /// Persist log lines under this directory (daily-rolling files).
    pub dir: Option<PathBuf>,
    /// Filename prefix for persisted logs.
    pub file_prefix: String,
    /// Console output goes to stdout instead of stderr.
    pub to_stdout: bool,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            level: "debug".to_string(),
            dir: None,
            file_prefix: "corvus".to_string(),
            to_stdout: false,
        }
    }
}

/// Paint a formatted log line according to its level: warnings yellow,
/// errors red, everything else untouched.
pub fn paint_line(level: Level, line: &str) -> String {
    match level {
        Level::WARN => line.yellow().to_string(),
        Level::ERROR => line.red().to_string(),
        _ => line.to_string(),
    }
}

/// Event formatter that renders with the default format, then colors the
/// whole line by level.
#[derive(Default)]
struct LevelColored {
    inner: tracing_subscriber::fmt::format::Format,
}

impl<S, N> FormatEvent<S, N> for LevelColored
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let mut buf = String::new();
        self.inner.format_event(ctx, Writer::new(&mut buf), event)?;

        let painted = paint_line(*event.metadata().level(), buf.trim_end());
        writeln!(writer, "{painted}")
    }
}

/// Install the global subscriber: an `EnvFilter` (`RUST_LOG` wins over
/// `opts.level`), a level-colored console layer, and — when `dir` is set —
/// a non-blocking daily-rolling plain file layer.
///
/// The returned guard must be held for the program lifetime so buffered
/// file writes are flushed.  Call once, at startup.
pub fn init(opts: &LogOptions) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&opts.level));

    let to_stdout = opts.to_stdout;
    let console = tracing_subscriber::fmt::layer()
        .event_format(LevelColored::default())
        .with_writer(move || -> Box<dyn std::io::Write> {
            if to_stdout {
                Box::new(std::io::stdout())
            } else {
                Box::new(std::io::stderr())
            }
        });

    let (file_layer, guard) = match &opts.dir {
        Some(dir) => {
            let _ = std::fs::create_dir_all(dir);
            let appender =
                tracing_appender::rolling::daily(dir, format!("{}.log", opts.file_prefix));
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .init();

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_options_defaults() {
        let opts = LogOptions::default();
        assert_eq!(opts.level, "debug");
        assert!(opts.dir.is_none());
        assert_eq!(opts.file_prefix, "corvus");
        assert!(!opts.to_stdout);
    }

    #[test]
    fn test_paint_line_by_level() {
        // Force colors on — the test runner is not a tty.
        colored::control::set_override(true);

        let warn = paint_line(Level::WARN, "careful");
        assert!(warn.starts_with('\u{1b}'), "WARN should be painted: {warn:?}");
        assert!(warn.contains("careful"));

        let error = paint_line(Level::ERROR, "boom");
        assert!(error.starts_with('\u{1b}'), "ERROR should be painted: {error:?}");
        assert_ne!(warn.replace("careful", "x"), error.replace("boom", "x"));

        let info = paint_line(Level::INFO, "fine");
        assert_eq!(info, "fine");

        colored::control::unset_override();
    }
}
