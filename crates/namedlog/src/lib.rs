//! Namedlog - define-once structured log messages.
//!
//! A log message is defined once, from a level, an event id, a template with
//! named placeholders and optionally some extra ("unformatted") value names.
//! Definition compiles the template and checks that the names line up with
//! the message's argument tuple. Logging afterwards is cheap:
//!
//! - a disabled sink costs one [`Sink::is_enabled`] query and nothing else
//! - an enabled sink gets an [`Entry`] that borrows the arguments, exposes
//!   them as ordered name/value pairs, and renders text only if asked
//!
//! # Quick Start
//!
//! ```rust
//! use namedlog::{EventId, Level, LogMessage, MemorySink, ORIGINAL_FORMAT};
//!
//! const CACHE_MISS: EventId = EventId::named(40, "CacheMiss");
//!
//! let miss = LogMessage::<(&str, u64, &str)>::define(
//!     Level::Debug,
//!     CACHE_MISS,
//!     "Cache miss for {key} after {elapsed_us}us",
//!     &["region"],
//! )?;
//!
//! let sink = MemorySink::new();
//! miss.log(&sink, ("user:42", 180, "eu-west"), None);
//!
//! let entry = &sink.entries()[0];
//! assert_eq!(entry.message.as_deref(), Some("Cache miss for user:42 after 180us"));
//! assert_eq!(entry.names(), ["key", "elapsed_us", "region", ORIGINAL_FORMAT]);
//! # Ok::<(), namedlog::Error>(())
//! ```
//!
//! # Arity
//!
//! The argument tuple fixes the arity: `LogMessage<(A,)>` through
//! `LogMessage<(A, B, C, D, E, F)>`. Placeholders bind to the leading
//! values in order and unformatted names to the rest, so
//! `placeholders + unformatted` must equal the tuple length.
//!
//! # Sinks
//!
//! | Sink | Output |
//! |------|--------|
//! | [`MemorySink`] | Captured entries and scopes, for tests |
//! | [`TextSink`] | `LEVEL [event] message => scopes` lines |
//! | [`JsonSink`] | One JSON object per entry, typed fields |
//! | [`LogSink`] | The `log` facade, values as key/value pairs |
//!
//! [`SinkConfig`] builds a text or JSON sink from YAML.
//!
//! # Feature Flags
//!
//! - `log` (default): [`LogSink`] and `From<Level> for log::Level`

mod args;
mod config;
mod error;
mod level;
mod message;
mod names;
mod scope;
mod sink;
mod state;

// Re-export public API
pub use args::Args;
pub use config::{OutputFormat, SinkConfig, LEVEL_ENV};
pub use error::{Error, ErrorKind, Result};
pub use level::{EventId, Level};
pub use message::{LogMessage, MessageState};
pub use names::combine_names;
pub use scope::{ScopeData, ScopeState};
pub use sink::{
    CapturedEntry, CapturedScope, CapturedValue, Entry, JsonSink, MemorySink, ScopeGuard, Sink,
    TextSink,
};
#[cfg(feature = "log")]
pub use sink::{GlobalLogger, LogSink};
pub use state::{NamedValues, NamedValuesExt, Pair, Pairs, ValuesOf, ORIGINAL_FORMAT};

pub use namedlog_template::{CompiledTemplate, Number, TemplateError, ToValue, Value, ValueSource};
