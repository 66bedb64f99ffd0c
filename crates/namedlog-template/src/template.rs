//! Compiled templates and rendering.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TemplateError};
use crate::scan::{scan, Segment};
use crate::value::ValueSource;

/// A template scanned once and ready to render any number of times.
///
/// Compilation records the placeholder names in occurrence order together
/// with a segment list, so rendering is a straight walk over pre-computed
/// pieces and never rescans the text.
///
/// Placeholders are positional at render time: the n-th placeholder
/// occurrence takes the n-th value, whatever its name. Duplicate names are
/// accepted here; callers that need unique names enforce it themselves.
///
/// # Thread Safety
///
/// `CompiledTemplate` is immutable after construction and is `Send + Sync`.
///
/// # Example
///
/// ```rust
/// use namedlog_template::CompiledTemplate;
///
/// let template = CompiledTemplate::compile("User {userId} logged in {{from}} {host}")?;
/// assert_eq!(template.placeholder_names(), ["userId", "host"]);
///
/// let text = template.render(&["alice", "10.0.0.1"])?;
/// assert_eq!(text, "User alice logged in {from} 10.0.0.1");
/// # Ok::<(), namedlog_template::TemplateError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledTemplate {
    original: String,
    names: Vec<String>,
    segments: Vec<Segment>,
}

impl CompiledTemplate {
    /// Scans `template` and returns its compiled form.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Malformed`] with the exact character index of
    /// the first malformation.
    pub fn compile(template: impl Into<String>) -> Result<Self> {
        let original = template.into();
        let scanned = scan(&original)?;
        Ok(Self {
            original,
            names: scanned.names,
            segments: scanned.segments,
        })
    }

    /// The template text exactly as supplied.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Placeholder names in occurrence order.
    pub fn placeholder_names(&self) -> &[String] {
        &self.names
    }

    /// Number of placeholders, and so the number of values rendering consumes.
    pub fn placeholder_count(&self) -> usize {
        self.names.len()
    }

    /// Checks that `values` holds enough values to render this template.
    ///
    /// Extra values are fine; they are ignored.
    pub fn check_values<S: ValueSource + ?Sized>(&self, values: &S) -> Result<()> {
        let actual = values.count();
        if actual < self.names.len() {
            return Err(TemplateError::NotEnoughValues {
                expected: self.names.len(),
                actual,
            });
        }
        Ok(())
    }

    /// Renders the template, substituting the n-th placeholder with `values[n]`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::NotEnoughValues`] if `values` is shorter than
    /// [`placeholder_count`](Self::placeholder_count), or
    /// [`TemplateError::Format`] if a value's `Display` impl fails.
    pub fn render<S: ValueSource + ?Sized>(&self, values: &S) -> Result<String> {
        self.check_values(values)?;
        let mut out = String::with_capacity(self.original.len());
        // Writing into a String only fails if a value's Display impl does.
        self.write_segments(&mut out, values)
            .map_err(|_| TemplateError::Format)?;
        Ok(out)
    }

    /// Renders into any [`fmt::Write`] without an intermediate `String`.
    ///
    /// Fails with [`fmt::Error`] if there are not enough values; use
    /// [`check_values`](Self::check_values) for a descriptive error.
    pub fn write_to<W, S>(&self, out: &mut W, values: &S) -> fmt::Result
    where
        W: fmt::Write + ?Sized,
        S: ValueSource + ?Sized,
    {
        if self.check_values(values).is_err() {
            return Err(fmt::Error);
        }
        self.write_segments(out, values)
    }

    /// Returns a [`Display`](fmt::Display) adapter that renders on demand.
    ///
    /// Nothing is formatted until the adapter itself is displayed.
    pub fn display<'a, S: ValueSource + ?Sized>(&'a self, values: &'a S) -> Rendered<'a, S> {
        Rendered {
            template: self,
            values,
        }
    }

    fn write_segments<W, S>(&self, out: &mut W, values: &S) -> fmt::Result
    where
        W: fmt::Write + ?Sized,
        S: ValueSource + ?Sized,
    {
        for segment in &self.segments {
            match segment {
                Segment::Literal(range) => out.write_str(&self.original[range.clone()])?,
                Segment::Placeholder(n) => match values.value_at(*n) {
                    Some(value) => write!(out, "{}", value)?,
                    None => return Err(fmt::Error),
                },
            }
        }
        Ok(())
    }
}

impl FromStr for CompiledTemplate {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self> {
        Self::compile(s)
    }
}

/// Deferred rendering of a template over borrowed values.
///
/// Created by [`CompiledTemplate::display`].
pub struct Rendered<'a, S: ?Sized> {
    template: &'a CompiledTemplate,
    values: &'a S,
}

impl<S: ValueSource + ?Sized> fmt::Display for Rendered<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.template.write_to(f, self.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn compile_keeps_original_text() {
        let template = CompiledTemplate::compile("Start {name} End").unwrap();
        assert_eq!(template.original(), "Start {name} End");
        assert_eq!(template.placeholder_names(), ["name"]);
        assert_eq!(template.placeholder_count(), 1);
    }

    #[test]
    fn render_substitutes_in_order() {
        let template = CompiledTemplate::compile("{b} then {a}").unwrap();
        assert_eq!(template.render(&["1", "2"]).unwrap(), "1 then 2");
    }

    #[test]
    fn render_reuses_duplicate_names_positionally() {
        let template = CompiledTemplate::compile("{x}-{x}").unwrap();
        assert_eq!(template.render(&[1, 2]).unwrap(), "1-2");
    }

    #[test]
    fn render_unescapes_braces() {
        let template = CompiledTemplate::compile("{{literal}} {value}").unwrap();
        assert_eq!(template.render(&["v"]).unwrap(), "{literal} v");
    }

    #[test]
    fn not_enough_values() {
        let template = CompiledTemplate::compile("Start{name1}Middle{name2}End").unwrap();
        let err = template.render(&["only"]).unwrap_err();
        assert_eq!(
            err,
            TemplateError::NotEnoughValues {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn write_to_reports_missing_values_as_fmt_error() {
        let template = CompiledTemplate::compile("{a}").unwrap();
        let empty: [Value; 0] = [];
        let mut out = String::new();
        assert!(template.write_to(&mut out, &empty).is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn display_adapter_is_lazy_and_repeatable() {
        let template = CompiledTemplate::compile("n={n}").unwrap();
        let values = [Value::from(5u8)];
        let rendered = template.display(&values);
        assert_eq!(rendered.to_string(), "n=5");
        assert_eq!(format!("[{}]", rendered), "[n=5]");
    }

    #[test]
    fn from_str_compiles() {
        let template: CompiledTemplate = "a {b}".parse().unwrap();
        assert_eq!(template.placeholder_names(), ["b"]);
        assert!("{".parse::<CompiledTemplate>().is_err());
    }
}
