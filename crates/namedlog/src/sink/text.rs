//! Plain text sink.

use std::fmt::{self, Write as _};
use std::io;
use std::sync::{Mutex, PoisonError};

use super::{lock, Entry, ScopeGuard, ScopeStack, Sink};
use crate::level::Level;
use crate::state::{NamedValues, NamedValuesExt};

/// Writes one line per entry:
///
/// ```text
/// LEVEL [event] message: error => scope => scope
/// ```
///
/// The event part is omitted when event ids are turned off, the error part
/// when there is no error and the scope parts when no scope is open. Each
/// line goes out in a single write. Write failures are dropped.
pub struct TextSink<W> {
    writer: Mutex<W>,
    min_level: Level,
    event_ids: bool,
    scopes: ScopeStack<String>,
}

impl<W: io::Write + Send> TextSink<W> {
    /// A sink writing to `writer` at [`Level::Info`] and above.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            min_level: Level::default(),
            event_ids: true,
            scopes: ScopeStack::new(),
        }
    }

    pub fn with_min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    pub fn with_event_ids(mut self, enabled: bool) -> Self {
        self.event_ids = enabled;
        self
    }

    pub fn min_level(&self) -> Level {
        self.min_level
    }

    /// Returns the writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn format_line(&self, entry: &Entry<'_>) -> Result<String, fmt::Error> {
        let mut line = String::new();
        line.push_str(entry.level.label());
        if self.event_ids {
            write!(line, " [{}]", entry.event_id)?;
        }
        line.push(' ');
        entry.write_message(&mut line)?;
        if let Some(error) = entry.error {
            write!(line, ": {}", error)?;
        }
        self.scopes.with(|open| {
            for scope in open {
                line.push_str(" => ");
                line.push_str(scope);
            }
        });
        line.push('\n');
        Ok(line)
    }
}

impl<W: io::Write + Send> Sink for TextSink<W> {
    fn is_enabled(&self, level: Level) -> bool {
        level >= self.min_level
    }

    fn log(&self, entry: &Entry<'_>) {
        if !self.is_enabled(entry.level) {
            return;
        }
        if let Ok(line) = self.format_line(entry) {
            let _ = lock(&self.writer).write_all(line.as_bytes());
        }
    }

    fn begin_scope(&self, state: &dyn NamedValues) -> ScopeGuard<'_> {
        self.scopes.open(describe(state))
    }
}

/// `name: value, name: value`
fn describe(state: &dyn NamedValues) -> String {
    let mut out = String::new();
    for (i, pair) in state.pairs().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{}: {}", pair.name, pair.value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::EventId;
    use crate::state::Pair;
    use namedlog_template::Value;

    fn log_line(sink: &TextSink<Vec<u8>>, level: Level, message: &str) {
        let pairs: [Pair; 0] = [];
        sink.log(&Entry {
            level,
            event_id: EventId::named(9, "Nine"),
            state: &pairs,
            message: &message,
            error: None,
        });
    }

    #[test]
    fn writes_label_event_and_message() {
        let sink = TextSink::new(Vec::new());
        log_line(&sink, Level::Error, "boom");
        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(text, "ERROR [9:Nine] boom\n");
    }

    #[test]
    fn event_ids_can_be_hidden() {
        let sink = TextSink::new(Vec::new()).with_event_ids(false);
        log_line(&sink, Level::Info, "hello");
        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(text, "INFO  hello\n");
    }

    #[test]
    fn filters_below_min_level() {
        let sink = TextSink::new(Vec::new()).with_min_level(Level::Warn);
        assert!(!sink.is_enabled(Level::Info));
        log_line(&sink, Level::Info, "quiet");
        log_line(&sink, Level::Critical, "loud");
        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(text, "CRIT  [9:Nine] loud\n");
    }

    #[test]
    fn appends_open_scopes() {
        let sink = TextSink::new(Vec::new()).with_event_ids(false);
        let outer = [Pair::new("request", Value::Str("r-1"))];
        let inner = [
            Pair::new("user", Value::Str("eve")),
            Pair::new("attempt", Value::from(2u8)),
        ];
        {
            let _outer = sink.begin_scope(&outer);
            let _inner = sink.begin_scope(&inner);
            log_line(&sink, Level::Info, "inside");
        }
        log_line(&sink, Level::Info, "outside");
        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(
            text,
            "INFO  inside => request: r-1 => user: eve, attempt: 2\nINFO  outside\n"
        );
    }
}
