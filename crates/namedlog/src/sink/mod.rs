//! The sink contract and reference sinks.
//!
//! A [`Sink`] is the consumer of log entries. Messages ask
//! [`Sink::is_enabled`] first and only build an [`Entry`] when it says yes.
//! The entry borrows everything, so a sink that keeps anything past
//! [`Sink::log`] must copy it out.
//!
//! Reference implementations:
//!
//! - [`MemorySink`]: captures entries and scopes for tests
//! - [`TextSink`]: one rendered line per entry
//! - [`JsonSink`]: one JSON object per entry, built from the named values
//! - [`LogSink`]: forwards to the `log` facade (feature `log`)

#[cfg(feature = "log")]
mod facade;
mod json;
mod memory;
mod text;

use std::error::Error as StdError;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::level::{EventId, Level};
use crate::state::{NamedValues, NamedValuesExt, Pair, ORIGINAL_FORMAT};

#[cfg(feature = "log")]
pub use facade::{GlobalLogger, LogSink};
pub use json::JsonSink;
pub use memory::{CapturedEntry, CapturedScope, CapturedValue, MemorySink};
pub use text::TextSink;

/// A consumer of log entries.
///
/// Sinks are shared across threads, so every method takes `&self`.
pub trait Sink: Send + Sync {
    /// Whether entries at `level` would be recorded.
    ///
    /// Called before any entry is built; keep it cheap and side-effect free.
    fn is_enabled(&self, level: Level) -> bool;

    /// Accepts one entry. Must not retain borrows from it.
    fn log(&self, entry: &Entry<'_>);

    /// Opens a nested scope carrying `state`. The scope lasts until the
    /// returned guard is dropped.
    ///
    /// The default implementation ignores scopes.
    fn begin_scope(&self, state: &dyn NamedValues) -> ScopeGuard<'_> {
        let _ = state;
        ScopeGuard::noop()
    }
}

impl<S: Sink + ?Sized> Sink for &S {
    fn is_enabled(&self, level: Level) -> bool {
        (**self).is_enabled(level)
    }

    fn log(&self, entry: &Entry<'_>) {
        (**self).log(entry)
    }

    fn begin_scope(&self, state: &dyn NamedValues) -> ScopeGuard<'_> {
        (**self).begin_scope(state)
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn is_enabled(&self, level: Level) -> bool {
        (**self).is_enabled(level)
    }

    fn log(&self, entry: &Entry<'_>) {
        (**self).log(entry)
    }

    fn begin_scope(&self, state: &dyn NamedValues) -> ScopeGuard<'_> {
        (**self).begin_scope(state)
    }
}

impl<S: Sink + ?Sized> Sink for Arc<S> {
    fn is_enabled(&self, level: Level) -> bool {
        (**self).is_enabled(level)
    }

    fn log(&self, entry: &Entry<'_>) {
        (**self).log(entry)
    }

    fn begin_scope(&self, state: &dyn NamedValues) -> ScopeGuard<'_> {
        (**self).begin_scope(state)
    }
}

/// One log entry, valid for the duration of a [`Sink::log`] call.
#[derive(Clone, Copy)]
pub struct Entry<'a> {
    pub level: Level,
    pub event_id: EventId,
    /// The named values, ending with the [`ORIGINAL_FORMAT`] pair for
    /// entries produced by a message.
    pub state: &'a dyn NamedValues,
    /// Renders the message text on demand.
    pub message: &'a dyn fmt::Display,
    pub error: Option<&'a (dyn StdError + 'static)>,
}

impl<'a> Entry<'a> {
    /// Renders the message into a new `String`.
    pub fn message(&self) -> String {
        self.message.to_string()
    }

    /// Renders the message into `out` without an intermediate allocation.
    pub fn write_message<W: fmt::Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        write!(out, "{}", self.message)
    }

    /// The template text, if the state carries it.
    pub fn original_format(&self) -> Option<&'a str> {
        self.state.get(ORIGINAL_FORMAT).and_then(|value| value.as_str())
    }

    /// The named values without the [`ORIGINAL_FORMAT`] pair.
    pub fn fields(&self) -> impl Iterator<Item = Pair<'a>> + 'a {
        self.state
            .pairs()
            .filter(|pair| pair.name != ORIGINAL_FORMAT)
    }
}

impl fmt::Debug for Entry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("level", &self.level)
            .field("event_id", &self.event_id)
            .field("state", &self.state.pairs().collect::<Vec<_>>())
            .field("error", &self.error.map(|e| e.to_string()))
            .finish_non_exhaustive()
    }
}

/// Closes a scope when dropped.
#[must_use = "the scope closes as soon as the guard is dropped"]
pub struct ScopeGuard<'a> {
    close: Option<Box<dyn FnOnce() + 'a>>,
}

impl<'a> ScopeGuard<'a> {
    /// A guard with nothing to close.
    pub fn noop() -> Self {
        Self { close: None }
    }

    /// A guard that runs `close` exactly once, on drop.
    pub fn new(close: impl FnOnce() + 'a) -> Self {
        Self {
            close: Some(Box::new(close)),
        }
    }

    pub fn is_noop(&self) -> bool {
        self.close.is_none()
    }
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        if let Some(close) = self.close.take() {
            close();
        }
    }
}

impl fmt::Debug for ScopeGuard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeGuard")
            .field("noop", &self.is_noop())
            .finish()
    }
}

/// Locks `mutex`, recovering the data if a previous holder panicked.
pub(crate) fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Open scopes of a sink, innermost last.
///
/// Scopes are tracked per sink, not per thread.
pub(crate) struct ScopeStack<T> {
    inner: Mutex<ScopeStackInner<T>>,
}

struct ScopeStackInner<T> {
    next_id: u64,
    open: Vec<(u64, T)>,
}

impl<T> ScopeStack<T> {
    pub(crate) fn new() -> Self {
        Self {
            inner: Mutex::new(ScopeStackInner {
                next_id: 0,
                open: Vec::new(),
            }),
        }
    }

    /// Opens a scope and returns a guard that removes it again.
    pub(crate) fn open(&self, value: T) -> ScopeGuard<'_> {
        let id = {
            let mut inner = lock(&self.inner);
            let id = inner.next_id;
            inner.next_id += 1;
            inner.open.push((id, value));
            id
        };
        ScopeGuard::new(move || {
            lock(&self.inner).open.retain(|(open_id, _)| *open_id != id);
        })
    }

    pub(crate) fn with<R>(&self, f: impl FnOnce(&mut dyn Iterator<Item = &T>) -> R) -> R {
        let inner = lock(&self.inner);
        f(&mut inner.open.iter().map(|(_, value)| value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use namedlog_template::Value;
    use std::cell::Cell;

    #[test]
    fn guard_runs_close_once_on_drop() {
        let closed = Cell::new(0);
        {
            let guard = ScopeGuard::new(|| closed.set(closed.get() + 1));
            assert!(!guard.is_noop());
            assert_eq!(closed.get(), 0);
        }
        assert_eq!(closed.get(), 1);
    }

    #[test]
    fn noop_guard() {
        assert!(ScopeGuard::noop().is_noop());
    }

    #[test]
    fn scope_stack_removes_out_of_order() {
        let stack = ScopeStack::new();
        let outer = stack.open("outer");
        let inner = stack.open("inner");
        assert_eq!(stack.with(|it| it.copied().collect::<Vec<_>>()), ["outer", "inner"]);
        drop(outer);
        assert_eq!(stack.with(|it| it.copied().collect::<Vec<_>>()), ["inner"]);
        drop(inner);
        assert_eq!(stack.with(|it| it.count()), 0);
    }

    #[test]
    fn entry_helpers() {
        let pairs = [
            Pair::new("user", Value::Str("dan")),
            Pair::new(ORIGINAL_FORMAT, Value::Str("hi {user}")),
        ];
        let entry = Entry {
            level: Level::Info,
            event_id: EventId::new(1),
            state: &pairs,
            message: &"hi dan",
            error: None,
        };
        assert_eq!(entry.message(), "hi dan");
        assert_eq!(entry.original_format(), Some("hi {user}"));
        let fields: Vec<&str> = entry.fields().map(|p| p.name).collect();
        assert_eq!(fields, ["user"]);

        let mut out = String::new();
        entry.write_message(&mut out).unwrap();
        assert_eq!(out, "hi dan");
    }
}
