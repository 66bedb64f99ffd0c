//! Bridge into the `log` facade.

use std::fmt;

use log::kv::{self, Key, Source, VisitSource};
use log::{Log, Metadata, Record};
use namedlog_template::{Number, Value};

use super::{Entry, Sink};
use crate::level::Level;
use crate::state::NamedValuesExt;

/// Target used when none is configured.
const DEFAULT_TARGET: &str = "namedlog";

/// Forwards to whatever logger is installed with `log::set_logger`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalLogger;

impl Log for GlobalLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level() && log::logger().enabled(metadata)
    }

    fn log(&self, record: &Record<'_>) {
        log::logger().log(record)
    }

    fn flush(&self) {
        log::logger().flush()
    }
}

/// Sends entries to a [`log::Log`] implementation.
///
/// The rendered message becomes the record's arguments. Every named value
/// becomes a key/value pair, followed by `event_id` and, when present,
/// `error`. [`Level::Critical`] maps to [`log::Level::Error`].
///
/// ```rust,no_run
/// use namedlog::{Level, LogMessage, LogSink};
///
/// env_logger::init();
/// let sink = LogSink::new().with_target("my_app::auth");
/// let denied = LogMessage::<(&str,)>::define(Level::Warn, 3, "Access denied for {user}", &[])?;
/// denied.log(&sink, ("mallory",), None);
/// # Ok::<(), namedlog::Error>(())
/// ```
pub struct LogSink<L = GlobalLogger> {
    logger: L,
    target: String,
}

impl LogSink<GlobalLogger> {
    pub fn new() -> Self {
        Self::with_logger(GlobalLogger)
    }
}

impl Default for LogSink<GlobalLogger> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Log> LogSink<L> {
    /// A sink writing to `logger` instead of the global logger.
    pub fn with_logger(logger: L) -> Self {
        Self {
            logger,
            target: DEFAULT_TARGET.to_string(),
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn logger(&self) -> &L {
        &self.logger
    }
}

impl<L: Log> Sink for LogSink<L> {
    fn is_enabled(&self, level: Level) -> bool {
        self.logger.enabled(
            &Metadata::builder()
                .level(level.into())
                .target(&self.target)
                .build(),
        )
    }

    fn log(&self, entry: &Entry<'_>) {
        let source = EntrySource { entry };
        self.logger.log(
            &Record::builder()
                .args(format_args!("{}", entry.message))
                .level(entry.level.into())
                .target(&self.target)
                .key_values(&source)
                .build(),
        );
    }
}

impl<L> fmt::Debug for LogSink<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogSink")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

struct EntrySource<'a> {
    entry: &'a Entry<'a>,
}

impl Source for EntrySource<'_> {
    fn visit<'kvs>(&'kvs self, visitor: &mut dyn VisitSource<'kvs>) -> Result<(), kv::Error> {
        for pair in self.entry.state.pairs() {
            visitor.visit_pair(Key::from_str(pair.name), to_kv(pair.value))?;
        }
        visitor.visit_pair(
            Key::from_str("event_id"),
            kv::Value::from(self.entry.event_id.id()),
        )?;
        if let Some(error) = self.entry.error {
            visitor.visit_pair(Key::from_str("error"), kv::Value::from_dyn_error(error))?;
        }
        Ok(())
    }
}

fn to_kv(value: Value<'_>) -> kv::Value<'_> {
    match value {
        Value::Str(s) => kv::Value::from(s),
        Value::Number(Number::I64(n)) => kv::Value::from(n),
        Value::Number(Number::U64(n)) => kv::Value::from(n),
        Value::Number(Number::F64(n)) => kv::Value::from(n),
        Value::Bool(b) => kv::Value::from(b),
        Value::Char(c) => kv::Value::from(c),
        Value::Display(d) => kv::Value::from_dyn_display(d),
        Value::Null => kv::Value::null(),
    }
}
