use std::{
    fmt::Display,
    fs::File,
    io::{self, IsTerminal, Write},
    path::Path,
    sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError},
};

use anyhow::{Context, Result, anyhow, bail};
use chrono::Local;
use tracing::{Event, Level, Subscriber, error};
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        FmtContext, MakeWriter,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    reload,
    util::SubscriberInitExt,
};

use crate::config::LoggingSection;

/// Writes `value` wrapped in the ANSI sequence `code` when `ansi` is set.
fn paint(
    writer: &mut Writer<'_>,
    ansi: bool,
    code: &str,
    value: impl Display,
) -> std::fmt::Result {
    if ansi {
        write!(writer, "\x1b[{code}m{value}\x1b[0m ")
    } else {
        write!(writer, "{value} ")
    }
}

/// One line per event: `<local time> <LEVEL> <target> <fields>`.
struct LineFormat;

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
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let ansi = writer.has_ansi_escapes();

        let now = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        paint(&mut writer, ansi, "2", now)?;

        let level_code = match *meta.level() {
            Level::ERROR => "1;31",
            Level::WARN => "1;33",
            Level::INFO => "1;32",
            Level::DEBUG => "1;34",
            Level::TRACE => "1;35",
        };
        paint(&mut writer, ansi, level_code, format_args!("{:>5}", meta.level()))?;
        paint(&mut writer, ansi, "36", meta.target())?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Log file that can be opened after the subscriber is installed.
/// Writes are dropped until then.
#[derive(Clone, Default)]
struct LogFile(Arc<Mutex<Option<File>>>);

impl LogFile {
    fn guard(&self) -> MutexGuard<'_, Option<File>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

struct LogFileWriter<'a>(MutexGuard<'a, Option<File>>);

impl Write for LogFileWriter<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        self.0.as_mut().map_or(Ok(buf.len()), |file| file.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.as_mut().map_or(Ok(()), |file| file.flush())
    }
}

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = LogFileWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LogFileWriter(self.guard())
    }
}

type ReloadFn = Box<dyn Fn(EnvFilter) -> Result<(), reload::Error> + Send + Sync>;

static RELOAD_FILTER: OnceLock<ReloadFn> = OnceLock::new();
static LOG_FILE: OnceLock<LogFile> = OnceLock::new();

/// `RUST_LOG` takes precedence over `level`.
fn initial_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Swaps the active filter. `level` is a bare level such as `debug` or a
/// full directive such as `mtd_core=trace,info`.
pub fn set_log_level(level: &str) -> Result<()> {
    let reload = RELOAD_FILTER
        .get()
        .ok_or_else(|| anyhow!("logging is not initialized"))?;
    let filter =
        EnvFilter::try_new(level).with_context(|| format!("invalid log level '{level}'"))?;
    reload(filter).context("failed to reload log filter")
}

/// Appends log output to `path` from now on, replacing any earlier file.
pub fn enable_file_logging(path: &Path) -> Result<()> {
    let Some(log_file) = LOG_FILE.get() else {
        bail!("logging is not initialized");
    };
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))?;
    *log_file.guard() = Some(file);
    Ok(())
}

/// Installs the global subscriber: stdout (coloured on a terminal) plus a
/// log file that stays closed until [`enable_file_logging`]. Only the first
/// call has any effect.
pub fn init_logging(level: &str) {
    let log_file = LOG_FILE.get_or_init(LogFile::default).clone();
    let (filter, handle) = reload::Layer::new(initial_filter(level));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(LineFormat)
                .with_ansi(io::stdout().is_terminal()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(LineFormat)
                .with_ansi(false)
                .with_writer(log_file),
        )
        .try_init()
        .is_ok();

    if installed {
        let _ = RELOAD_FILTER.set(Box::new(move |filter| handle.reload(filter)));
    }
}

/// Sets up logging from the `[logging]` config section.
pub fn init_from_config(config: &LoggingSection) -> Result<()> {
    init_logging(&config.level);
    match &config.file {
        Some(path) => enable_file_logging(path),
        None => Ok(()),
    }
}

/// Logs the failure of a detached task; success is silent.
pub fn log_task_error<E: Display>(
    task: &'static str,
    result: Result<(), E>,
) {
    if let Err(error) = result {
        error!(task, %error, "background task failed");
    }
}
