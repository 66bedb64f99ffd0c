//! Define-once log messages.
//!
//! A [`LogMessage`] compiles its template and validates its names exactly
//! once, when it is defined. Logging through it afterwards does no parsing
//! and, when the sink is disabled for the message's level, no work at all
//! beyond the enablement query.

use std::error::Error as StdError;
use std::fmt;
use std::marker::PhantomData;

use namedlog_template::{CompiledTemplate, Value};

use crate::args::Args;
use crate::error::{Error, Result};
use crate::level::{EventId, Level};
use crate::names::combine_names;
use crate::sink::{Entry, Sink};
use crate::state::{NamedValues, NamedValuesExt, Pair, ORIGINAL_FORMAT};

/// The validated, arity-independent part of a message.
#[derive(Debug, Clone)]
struct Definition {
    level: Level,
    event_id: EventId,
    template: CompiledTemplate,
    names: Vec<String>,
}

/// A reusable log message taking the argument tuple `A`.
///
/// `A` is a tuple of one to six [`ToValue`](namedlog_template::ToValue)
/// types. Template placeholders bind to the leading values in order;
/// any unformatted names bind to the rest.
///
/// # Example
///
/// ```rust
/// use namedlog::{Level, LogMessage, MemorySink};
///
/// let login = LogMessage::<(&str, u16, &str)>::define(
///     Level::Info,
///     7,
///     "User {user} logged in from port {port}",
///     &["session"],
/// )?;
///
/// let sink = MemorySink::new();
/// login.log(&sink, ("alice", 8080, "s-1"), None);
///
/// let entries = sink.entries();
/// assert_eq!(entries[0].message.as_deref(), Some("User alice logged in from port 8080"));
/// assert_eq!(entries[0].get("session").map(|v| v.to_string()), Some("s-1".into()));
/// # Ok::<(), namedlog::Error>(())
/// ```
///
/// # Thread Safety
///
/// `LogMessage<A>` holds no values of `A` and is `Send + Sync` for every
/// `A`, so it can live in a `static` and be used from any thread.
pub struct LogMessage<A> {
    definition: Definition,
    _args: PhantomData<fn(A)>,
}

impl<A: Args> LogMessage<A> {
    /// Compiles `template` and binds its placeholders plus `unformatted`
    /// to the `A::ARITY` argument positions.
    ///
    /// # Errors
    ///
    /// - [`Error::Template`] if the template is malformed.
    /// - [`Error::ArityMismatch`] if placeholders plus unformatted names do
    ///   not add up to `A::ARITY`.
    /// - [`Error::DuplicateName`] if any name is used twice.
    pub fn define(
        level: Level,
        event_id: impl Into<EventId>,
        template: &str,
        unformatted: &[&str],
    ) -> Result<Self> {
        let template = CompiledTemplate::compile(template)?;
        let formatted = template.placeholder_names();

        if formatted.len() + unformatted.len() != A::ARITY {
            return Err(Error::ArityMismatch {
                expected: A::ARITY,
                formatted: formatted.len(),
                unformatted: unformatted.len(),
            });
        }
        let names = combine_names(formatted, unformatted)?;

        Ok(Self {
            definition: Definition {
                level,
                event_id: event_id.into(),
                template,
                names,
            },
            _args: PhantomData,
        })
    }

    /// Logs `args` to `sink` if it is enabled for this message's level.
    pub fn log<S: Sink + ?Sized>(
        &self,
        sink: &S,
        args: A,
        error: Option<&(dyn StdError + 'static)>,
    ) {
        if !sink.is_enabled(self.definition.level) {
            return;
        }
        let state = MessageState {
            definition: &self.definition,
            args: &args,
        };
        sink.log(&Entry {
            level: self.definition.level,
            event_id: self.definition.event_id,
            state: &state,
            message: &state,
            error,
        });
    }

    /// Builds the per-call view without logging it.
    pub fn state<'a>(&'a self, args: &'a A) -> MessageState<'a, A> {
        MessageState {
            definition: &self.definition,
            args,
        }
    }
}

impl<A> LogMessage<A> {
    pub fn level(&self) -> Level {
        self.definition.level
    }

    pub fn event_id(&self) -> EventId {
        self.definition.event_id
    }

    pub fn template(&self) -> &CompiledTemplate {
        &self.definition.template
    }

    /// Combined value names: placeholders first, then unformatted names.
    pub fn names(&self) -> &[String] {
        &self.definition.names
    }
}

impl<A> Clone for LogMessage<A> {
    fn clone(&self) -> Self {
        Self {
            definition: self.definition.clone(),
            _args: PhantomData,
        }
    }
}

impl<A> fmt::Debug for LogMessage<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogMessage")
            .field("level", &self.definition.level)
            .field("event_id", &self.definition.event_id)
            .field("template", &self.definition.template.original())
            .field("names", &self.definition.names)
            .finish()
    }
}

/// The per-call view of a message: one pair per argument, then the
/// [`ORIGINAL_FORMAT`] pair holding the template text.
///
/// Displaying it renders the template over the arguments.
pub struct MessageState<'a, A> {
    definition: &'a Definition,
    args: &'a A,
}

impl<A: Args> NamedValues for MessageState<'_, A> {
    fn count(&self) -> usize {
        A::ARITY + 1
    }

    fn pair(&self, index: usize) -> Option<Pair<'_>> {
        if index < A::ARITY {
            let name = self.definition.names.get(index)?;
            Some(Pair::new(name, self.args.value_at(index)?))
        } else if index == A::ARITY {
            Some(Pair::new(
                ORIGINAL_FORMAT,
                Value::Str(self.definition.template.original()),
            ))
        } else {
            None
        }
    }
}

impl<A: Args> fmt::Display for MessageState<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.definition.template.write_to(f, &self.values())
    }
}

impl<A: Args> fmt::Debug for MessageState<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.pairs()).finish()
    }
}
