//! Scope data: raw named values attached to a nested sink scope.
//!
//! Unlike a [`LogMessage`](crate::LogMessage) there is no template and no
//! synthetic pair; the state is just the names zipped with the arguments.

use std::fmt;
use std::marker::PhantomData;

use namedlog_template::Value;

use crate::args::Args;
use crate::error::{Error, Result};
use crate::sink::{ScopeGuard, Sink};
use crate::state::{NamedValues, NamedValuesExt, Pair};

/// A reusable scope definition taking the argument tuple `A`.
///
/// ```rust
/// use namedlog::{MemorySink, ScopeData};
///
/// let request = ScopeData::<(&str, u32)>::define(&["path", "attempt"])?;
/// let sink = MemorySink::new();
/// {
///     let _scope = request.begin(&sink, ("/health", 2));
///     assert_eq!(sink.open_scopes().len(), 1);
/// }
/// assert!(sink.open_scopes().is_empty());
/// # Ok::<(), namedlog::Error>(())
/// ```
pub struct ScopeData<A> {
    names: Vec<String>,
    _args: PhantomData<fn(A)>,
}

impl<A: Args> ScopeData<A> {
    /// Binds `names` to the argument positions of `A`.
    ///
    /// Names are taken as given; repeats are allowed.
    ///
    /// # Errors
    ///
    /// [`Error::ScopeArity`] if `names.len()` differs from `A::ARITY`.
    pub fn define(names: &[&str]) -> Result<Self> {
        if names.len() != A::ARITY {
            return Err(Error::ScopeArity {
                expected: A::ARITY,
                actual: names.len(),
            });
        }
        Ok(Self {
            names: names.iter().map(|name| name.to_string()).collect(),
            _args: PhantomData,
        })
    }

    /// Opens a scope on `sink`. It closes when the guard is dropped.
    pub fn begin<'s, S: Sink + ?Sized>(&self, sink: &'s S, args: A) -> ScopeGuard<'s> {
        let state = self.state(&args);
        sink.begin_scope(&state)
    }

    /// Builds the per-call view without opening a scope.
    pub fn state<'a>(&'a self, args: &'a A) -> ScopeState<'a, A> {
        ScopeState {
            names: &self.names,
            args,
        }
    }
}

impl<A> ScopeData<A> {
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl<A> Clone for ScopeData<A> {
    fn clone(&self) -> Self {
        Self {
            names: self.names.clone(),
            _args: PhantomData,
        }
    }
}

impl<A> fmt::Debug for ScopeData<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeData").field("names", &self.names).finish()
    }
}

/// Per-call scope view: exactly one pair per argument.
pub struct ScopeState<'a, A> {
    names: &'a [String],
    args: &'a A,
}

impl<A: Args> NamedValues for ScopeState<'_, A> {
    fn count(&self) -> usize {
        A::ARITY
    }

    fn pair(&self, index: usize) -> Option<Pair<'_>> {
        let name = self.names.get(index)?;
        let value: Value<'_> = self.args.value_at(index)?;
        Some(Pair::new(name, value))
    }
}

impl<A: Args> fmt::Display for ScopeState<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, pair) in self.pairs().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", pair.name, pair.value)?;
        }
        Ok(())
    }
}
