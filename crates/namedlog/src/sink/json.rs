//! Structured JSON sink.

use std::io;
use std::sync::{Mutex, PoisonError};

use namedlog_template::{Number, Value};
use serde_json::map::Entry as Slot;
use serde_json::{json, Map, Value as JsonValue};

use super::{lock, Entry, ScopeGuard, ScopeStack, Sink};
use crate::level::Level;
use crate::state::{NamedValues, NamedValuesExt, Pair};

/// Writes one JSON object per line, built from the entry's named values:
///
/// ```json
/// {"level":"info","event_id":7,"event_name":"Login","message":"...",
///  "template":"...","fields":{"user":"alice"},"scopes":[{"request":"r-1"}]}
/// ```
///
/// Field values keep their type: numbers stay numbers and `null` stays
/// `null`. A name that appears more than once maps to an array of its values
/// in order, so `{"tag":["a","b"]}` for a scope named `tag, tag`. Only the `message` member renders the template, and it can be
/// turned off, in which case no value is ever stringified except opaque
/// `Display` values.
pub struct JsonSink<W> {
    writer: Mutex<W>,
    min_level: Level,
    messages: bool,
    scopes: ScopeStack<Map<String, JsonValue>>,
}

impl<W: io::Write + Send> JsonSink<W> {
    /// A sink writing to `writer` at [`Level::Info`] and above.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            min_level: Level::default(),
            messages: true,
            scopes: ScopeStack::new(),
        }
    }

    pub fn with_min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    /// Whether to include the rendered `message` member.
    pub fn with_messages(mut self, enabled: bool) -> Self {
        self.messages = enabled;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    /// Builds the JSON object for `entry`.
    pub fn to_json(&self, entry: &Entry<'_>) -> JsonValue {
        let mut object = Map::new();
        object.insert("level".into(), json!(entry.level));
        object.insert("event_id".into(), json!(entry.event_id.id()));
        if let Some(name) = entry.event_id.name() {
            object.insert("event_name".into(), json!(name));
        }
        if self.messages {
            object.insert("message".into(), json!(entry.message()));
        }
        if let Some(template) = entry.original_format() {
            object.insert("template".into(), json!(template));
        }
        object.insert("fields".into(), JsonValue::Object(fields(entry.fields())));
        let scopes: Vec<JsonValue> = self
            .scopes
            .with(|open| open.map(|scope| JsonValue::Object(scope.clone())).collect());
        if !scopes.is_empty() {
            object.insert("scopes".into(), JsonValue::Array(scopes));
        }
        if let Some(error) = entry.error {
            object.insert("error".into(), json!(error.to_string()));
        }
        JsonValue::Object(object)
    }
}

impl<W: io::Write + Send> Sink for JsonSink<W> {
    fn is_enabled(&self, level: Level) -> bool {
        level >= self.min_level
    }

    fn log(&self, entry: &Entry<'_>) {
        if !self.is_enabled(entry.level) {
            return;
        }
        let Ok(mut line) = serde_json::to_vec(&self.to_json(entry)) else {
            return;
        };
        line.push(b'\n');
        let _ = lock(&self.writer).write_all(&line);
    }

    fn begin_scope(&self, state: &dyn NamedValues) -> ScopeGuard<'_> {
        self.scopes.open(fields(state.pairs()))
    }
}

/// Collects pairs into an object. Repeated names collect into an array.
fn fields<'a>(pairs: impl Iterator<Item = Pair<'a>>) -> Map<String, JsonValue> {
    let mut object = Map::new();
    for pair in pairs {
        let value = to_json_value(pair.value);
        match object.entry(pair.name) {
            Slot::Vacant(slot) => {
                slot.insert(value);
            }
            // Single values are never arrays, so an array here came from a repeat.
            Slot::Occupied(mut slot) => {
                let existing = slot.get_mut();
                if let JsonValue::Array(values) = existing {
                    values.push(value);
                } else {
                    let first = existing.take();
                    *existing = JsonValue::Array(vec![first, value]);
                }
            }
        }
    }
    object
}

/// Converts a borrowed value to JSON, keeping its type where JSON has one.
fn to_json_value(value: Value<'_>) -> JsonValue {
    match value {
        Value::Str(s) => JsonValue::String(s.to_string()),
        Value::Number(Number::I64(n)) => json!(n),
        Value::Number(Number::U64(n)) => json!(n),
        // Non-finite floats have no JSON form.
        Value::Number(Number::F64(n)) => serde_json::Number::from_f64(n)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        Value::Bool(b) => JsonValue::Bool(b),
        Value::Char(c) => JsonValue::String(c.to_string()),
        Value::Display(d) => JsonValue::String(d.to_string()),
        Value::Null => JsonValue::Null,
    }
}
