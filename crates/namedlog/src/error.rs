//! Error types for message definitions and sinks.

use namedlog_template::TemplateError;
use thiserror::Error;

/// Errors that can occur when defining messages or configuring sinks.
///
/// Definition errors are raised once, when a message is defined, never on
/// the logging path. Use [`Error::kind`] to tell caller-input defects apart.
#[derive(Debug, Error)]
pub enum Error {
    /// The template failed to compile or render.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Placeholder plus unformatted name count differs from the declared arity.
    #[error(
        "the number of named log values is incorrect: expected a total of {expected}, \
         but got {formatted} formatted and {unformatted} unformatted"
    )]
    ArityMismatch {
        expected: usize,
        formatted: usize,
        unformatted: usize,
    },

    /// A value name appears more than once across template and unformatted names.
    #[error("a log value named {0} was defined more than once")]
    DuplicateName(String),

    /// Scope data was defined with the wrong number of names.
    #[error("the number of scope value names is incorrect: expected {expected}, got {actual}")]
    ScopeArity { expected: usize, actual: usize },

    /// A level name could not be parsed.
    #[error("unknown log level: {0:?}")]
    InvalidLevel(String),

    /// Sink configuration could not be deserialized.
    #[error("invalid sink configuration: {0}")]
    Config(#[from] serde_yaml::Error),

    /// Reading configuration failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The template text is malformed.
    MalformedTemplate,
    /// Arity, value count or name uniqueness was violated.
    InvalidArgument,
    /// Configuration could not be understood.
    Config,
    /// An I/O operation failed.
    Io,
}

impl Error {
    /// Returns the broad kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Template(TemplateError::Malformed { .. }) => ErrorKind::MalformedTemplate,
            Error::Template(_)
            | Error::ArityMismatch { .. }
            | Error::DuplicateName(_)
            | Error::ScopeArity { .. } => ErrorKind::InvalidArgument,
            Error::InvalidLevel(_) | Error::Config(_) => ErrorKind::Config,
            Error::Io(_) => ErrorKind::Io,
        }
    }
}

/// Result type for namedlog operations.
pub type Result<T> = std::result::Result<T, Error>;
