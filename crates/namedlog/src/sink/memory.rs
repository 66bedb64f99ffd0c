//! In-memory capturing sink for tests.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use namedlog_template::{Number, Value};

use super::{lock, Entry, ScopeGuard, Sink};
use crate::level::{EventId, Level};
use crate::state::{NamedValues, NamedValuesExt, ORIGINAL_FORMAT};

/// Owned copy of a [`Value`], kept after the logging call returns.
#[derive(Debug, Clone, PartialEq)]
pub enum CapturedValue {
    Str(String),
    Number(Number),
    Bool(bool),
    Char(char),
    /// Rendered text of a `Display` value.
    Display(String),
    Null,
}

impl From<Value<'_>> for CapturedValue {
    fn from(value: Value<'_>) -> Self {
        match value {
            Value::Str(s) => CapturedValue::Str(s.to_string()),
            Value::Number(n) => CapturedValue::Number(n),
            Value::Bool(b) => CapturedValue::Bool(b),
            Value::Char(c) => CapturedValue::Char(c),
            Value::Display(d) => CapturedValue::Display(d.to_string()),
            Value::Null => CapturedValue::Null,
        }
    }
}

impl fmt::Display for CapturedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapturedValue::Str(s) | CapturedValue::Display(s) => f.write_str(s),
            CapturedValue::Number(n) => fmt::Display::fmt(n, f),
            CapturedValue::Bool(b) => fmt::Display::fmt(b, f),
            CapturedValue::Char(c) => fmt::Display::fmt(c, f),
            CapturedValue::Null => f.write_str("null"),
        }
    }
}

fn capture_pairs(state: &dyn NamedValues) -> Vec<(String, CapturedValue)> {
    state
        .pairs()
        .map(|pair| (pair.name.to_string(), CapturedValue::from(pair.value)))
        .collect()
}

/// An entry as recorded by [`MemorySink`].
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedEntry {
    pub level: Level,
    pub event_id: EventId,
    /// Every pair of the state, in order.
    pub pairs: Vec<(String, CapturedValue)>,
    /// Rendered message, or `None` when rendering is turned off.
    pub message: Option<String>,
    pub error: Option<String>,
}

impl CapturedEntry {
    /// Value of the first pair named `name`.
    pub fn get(&self, name: &str) -> Option<&CapturedValue> {
        self.pairs
            .iter()
            .find(|(pair_name, _)| pair_name == name)
            .map(|(_, value)| value)
    }

    pub fn names(&self) -> Vec<&str> {
        self.pairs.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn original_format(&self) -> Option<&str> {
        match self.get(ORIGINAL_FORMAT) {
            Some(CapturedValue::Str(s)) => Some(s),
            _ => None,
        }
    }
}

/// A scope as recorded by [`MemorySink`].
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedScope {
    pub pairs: Vec<(String, CapturedValue)>,
    pub closed: bool,
}

#[derive(Default)]
struct Captured {
    entries: Vec<CapturedEntry>,
    /// Never reset, so guards from before a `clear` match nothing.
    next_scope_id: u64,
    scopes: Vec<(u64, CapturedScope)>,
}

/// Records everything it is given.
///
/// Enablement is configurable, and every [`is_enabled`](Sink::is_enabled)
/// query is counted, so tests can check that disabled messages stop at the
/// query.
pub struct MemorySink {
    /// `None` disables every level.
    min_level: Option<Level>,
    render: bool,
    queries: AtomicUsize,
    captured: Mutex<Captured>,
}

impl MemorySink {
    /// A sink enabled for every level.
    pub fn new() -> Self {
        Self::with_min_level(Level::Trace)
    }

    /// A sink enabled for nothing.
    pub fn disabled() -> Self {
        Self::build(None)
    }

    /// A sink enabled for `level` and above.
    pub fn with_min_level(level: Level) -> Self {
        Self::build(Some(level))
    }

    fn build(min_level: Option<Level>) -> Self {
        Self {
            min_level,
            render: true,
            queries: AtomicUsize::new(0),
            captured: Mutex::new(Captured::default()),
        }
    }

    /// Stops rendering messages; captured entries keep only their pairs.
    pub fn without_rendering(mut self) -> Self {
        self.render = false;
        self
    }

    /// Number of enablement queries so far.
    pub fn enabled_queries(&self) -> usize {
        self.queries.load(Ordering::Relaxed)
    }

    pub fn entries(&self) -> Vec<CapturedEntry> {
        lock(&self.captured).entries.clone()
    }

    pub fn scopes(&self) -> Vec<CapturedScope> {
        lock(&self.captured)
            .scopes
            .iter()
            .map(|(_, scope)| scope.clone())
            .collect()
    }

    /// Scopes whose guard has not been dropped yet.
    pub fn open_scopes(&self) -> Vec<CapturedScope> {
        lock(&self.captured)
            .scopes
            .iter()
            .filter(|(_, scope)| !scope.closed)
            .map(|(_, scope)| scope.clone())
            .collect()
    }

    pub fn clear(&self) {
        let mut captured = lock(&self.captured);
        captured.entries.clear();
        captured.scopes.clear();
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for MemorySink {
    fn is_enabled(&self, level: Level) -> bool {
        self.queries.fetch_add(1, Ordering::Relaxed);
        self.min_level.is_some_and(|min| level >= min)
    }

    fn log(&self, entry: &Entry<'_>) {
        let captured = CapturedEntry {
            level: entry.level,
            event_id: entry.event_id,
            pairs: capture_pairs(entry.state),
            message: self.render.then(|| entry.message()),
            error: entry.error.map(|e| e.to_string()),
        };
        lock(&self.captured).entries.push(captured);
    }

    fn begin_scope(&self, state: &dyn NamedValues) -> ScopeGuard<'_> {
        let id = {
            let mut captured = lock(&self.captured);
            let id = captured.next_scope_id;
            captured.next_scope_id += 1;
            captured.scopes.push((
                id,
                CapturedScope {
                    pairs: capture_pairs(state),
                    closed: false,
                },
            ));
            id
        };
        ScopeGuard::new(move || {
            let mut captured = lock(&self.captured);
            if let Some((_, scope)) = captured.scopes.iter_mut().find(|(open, _)| *open == id) {
                scope.closed = true;
            }
        })
    }
}

impl fmt::Debug for MemorySink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let captured = lock(&self.captured);
        f.debug_struct("MemorySink")
            .field("min_level", &self.min_level)
            .field("entries", &captured.entries.len())
            .field("scopes", &captured.scopes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Pair;

    fn entry_with<'a, const N: usize>(
        pairs: &'a [Pair<'a>; N],
        message: &'a dyn fmt::Display,
    ) -> Entry<'a> {
        Entry {
            level: Level::Warn,
            event_id: EventId::new(3),
            state: pairs,
            message,
            error: None,
        }
    }

    #[test]
    fn enablement_modes() {
        let all = MemorySink::new();
        assert!(all.is_enabled(Level::Trace));

        let none = MemorySink::disabled();
        assert!(!none.is_enabled(Level::Critical));

        let warn = MemorySink::with_min_level(Level::Warn);
        assert!(!warn.is_enabled(Level::Info));
        assert!(warn.is_enabled(Level::Error));
        assert_eq!(warn.enabled_queries(), 2);
    }

    #[test]
    fn log_copies_pairs_and_message() {
        let sink = MemorySink::new();
        let pairs = [Pair::new("n", Value::from(4u8)), Pair::new("flag", Value::Null)];
        sink.log(&entry_with(&pairs, &"four"));

        let entries = sink.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].names(), ["n", "flag"]);
        assert_eq!(entries[0].get("n"), Some(&CapturedValue::Number(Number::U64(4))));
        assert_eq!(entries[0].get("flag"), Some(&CapturedValue::Null));
        assert_eq!(entries[0].message.as_deref(), Some("four"));
        assert_eq!(entries[0].original_format(), None);
    }

    #[test]
    fn without_rendering_skips_message() {
        let sink = MemorySink::new().without_rendering();
        let pairs = [Pair::new("n", Value::from(1i8))];
        sink.log(&entry_with(&pairs, &"unused"));
        assert_eq!(sink.entries()[0].message, None);
    }

    #[test]
    fn scopes_close_on_drop() {
        let sink = MemorySink::new();
        let pairs = [Pair::new("request", Value::Str("r-1"))];
        let guard = sink.begin_scope(&pairs);
        assert_eq!(sink.open_scopes().len(), 1);
        drop(guard);
        assert!(sink.open_scopes().is_empty());
        assert!(sink.scopes()[0].closed);
    }

    #[test]
    fn clear_forgets_everything() {
        let sink = MemorySink::new();
        let pairs = [Pair::new("x", Value::Bool(true))];
        sink.log(&entry_with(&pairs, &"x"));
        sink.clear();
        assert!(sink.entries().is_empty());
    }

    #[test]
    fn guard_from_before_clear_leaves_newer_scopes_open() {
        let sink = MemorySink::new();
        let old = [Pair::new("scope", Value::Str("old"))];
        let new = [Pair::new("scope", Value::Str("new"))];

        let old_guard = sink.begin_scope(&old);
        sink.clear();
        let new_guard = sink.begin_scope(&new);
        drop(old_guard);

        let open = sink.open_scopes();
        assert_eq!(open.len(), 1);
        assert_eq!(
            open[0].pairs,
            vec![("scope".to_string(), CapturedValue::Str("new".into()))]
        );

        drop(new_guard);
        assert!(sink.open_scopes().is_empty());
    }
}
