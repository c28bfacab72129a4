use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, SecondsFormat, Utc};
use tracing::{Event, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Target used for HTTP access lines; rendered with the `HTTP` level label.
pub const ACCESS_TARGET: &str = "access";

const LOG_FILE_PREFIX: &str = "app-logs";

/// Keeps the non-blocking file writer alive. Must be held for the program's lifetime.
pub struct LogGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Formats each event as `[timestamp] [LEVEL] message`.
pub struct LineFormat;

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        if meta.target() == ACCESS_TARGET {
            write!(writer, "[{timestamp}] [HTTP] ")?;
        } else {
            write!(writer, "[{timestamp}] [{}] ", meta.level())?;
        }
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Appends to `<dir>/app-logs-YYYY-MM-DD.log`, switching files when the UTC date changes.
pub struct DailyLogFile {
    dir: PathBuf,
    current: Option<(NaiveDate, File)>,
}

impl DailyLogFile {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), current: None }
    }

    pub fn path_for(dir: &Path, date: NaiveDate) -> PathBuf {
        dir.join(format!("{LOG_FILE_PREFIX}-{}.log", date.format("%Y-%m-%d")))
    }

    fn file_for_today(&mut self) -> io::Result<&mut File> {
        let today = Utc::now().date_naive();
        let stale = !matches!(&self.current, Some((date, _)) if *date == today);
        if stale {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(Self::path_for(&self.dir, today))?;
            self.current = Some((today, file));
        }
        match self.current.as_mut() {
            Some((_, file)) => Ok(file),
            None => Err(io::Error::other("log file not open")),
        }
    }
}

impl Write for DailyLogFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file_for_today()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.current.as_mut() {
            Some((_, file)) => file.flush(),
            None => Ok(()),
        }
    }
}

/// Initialises console logging and, when `log_dir` is set, the daily log file.
pub fn init_logging(log_dir: Option<&Path>) -> LogGuard {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "gemini_chat=info,access=info".into());

    let mut layers = vec![tracing_subscriber::fmt::layer().boxed()];
    let mut file_guard = None;

    if let Some(dir) = log_dir {
        match std::fs::create_dir_all(dir) {
            Ok(()) => {
                let (non_blocking, guard) = tracing_appender::non_blocking(DailyLogFile::new(dir));
                file_guard = Some(guard);
                layers.push(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .event_format(LineFormat)
                        .with_writer(non_blocking)
                        .boxed(),
                );
            }
            Err(e) => eprintln!("Failed to create log directory {}: {e}", dir.display()),
        }
    }

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(layers)
        .try_init();

    LogGuard { _file_guard: file_guard }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use tracing::{error, info};
    use tracing_subscriber::fmt;

    use super::*;

    #[test]
    fn events_land_in_todays_file_as_bracketed_lines() {
        let dir = tempfile::tempdir().unwrap();
        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_ansi(false)
                .event_format(LineFormat)
                .with_writer(Mutex::new(DailyLogFile::new(dir.path()))),
        );

        tracing::subscriber::with_default(subscriber, || {
            info!("Server ready on http://localhost:3000");
            error!("[Chat Error] quota exceeded");
            info!(target: ACCESS_TARGET, "POST /api/chat 500");
        });

        let path = DailyLogFile::path_for(dir.path(), Utc::now().date_naive());
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("app-logs-") && name.ends_with(".log"), "{name}");

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with("] [INFO] Server ready on http://localhost:3000"));
        assert!(lines[1].ends_with("] [ERROR] [Chat Error] quota exceeded"));
        assert!(lines[2].ends_with("] [HTTP] POST /api/chat 500"));
    }

    #[test]
    fn path_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(
            DailyLogFile::path_for(Path::new("logs"), date),
            PathBuf::from("logs/app-logs-2026-03-07.log")
        );
    }
}
