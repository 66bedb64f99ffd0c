//! Sink configuration.
//!
//! A [`SinkConfig`] picks one of the writer-backed sinks and its options.
//! It deserializes from YAML, and the `NAMEDLOG_LEVEL` environment variable
//! can override the minimum level:
//!
//! ```yaml
//! min_level: debug
//! format: json
//! event_ids: true
//! messages: false
//! ```
//!
//! Every key is optional; missing keys take their defaults and unknown keys
//! are rejected.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::level::Level;
use crate::sink::{JsonSink, Sink, TextSink};

/// Environment variable overriding [`SinkConfig::min_level`].
pub const LEVEL_ENV: &str = "NAMEDLOG_LEVEL";

/// Output format of a configured sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One rendered line per entry ([`TextSink`]).
    #[default]
    Text,
    /// One JSON object per entry ([`JsonSink`]).
    Json,
}

/// Configuration for a writer-backed sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SinkConfig {
    /// Least severe level that is written.
    pub min_level: Level,
    pub format: OutputFormat,
    /// Include event ids in text output.
    pub event_ids: bool,
    /// Include the rendered message in JSON output.
    pub messages: bool,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            min_level: Level::Info,
            format: OutputFormat::Text,
            event_ids: true,
            messages: true,
        }
    }
}

impl SinkConfig {
    /// Parses a YAML document. An empty document yields the defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Reads and parses a YAML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let yaml = fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    /// Applies `NAMEDLOG_LEVEL` if it is set.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidLevel`](crate::Error::InvalidLevel) if the variable
    /// holds an unknown level name.
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(level) = std::env::var(LEVEL_ENV) {
            self.min_level = level.parse()?;
        }
        Ok(())
    }

    /// Same as [`apply_env`](Self::apply_env), by value.
    pub fn with_env(mut self) -> Result<Self> {
        self.apply_env()?;
        Ok(self)
    }

    /// Builds the configured sink over `writer`.
    pub fn build<W>(&self, writer: W) -> Box<dyn Sink>
    where
        W: io::Write + Send + 'static,
    {
        match self.format {
            OutputFormat::Text => Box::new(
                TextSink::new(writer)
                    .with_min_level(self.min_level)
                    .with_event_ids(self.event_ids),
            ),
            OutputFormat::Json => Box::new(
                JsonSink::new(writer)
                    .with_min_level(self.min_level)
                    .with_messages(self.messages),
            ),
        }
    }
}
