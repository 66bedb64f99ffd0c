//! Compile-once named message templates.
//!
//! A template such as `"User {userId} logged in"` is scanned once into a
//! [`CompiledTemplate`], which records the placeholder names in occurrence
//! order and can then render any number of value sequences without
//! rescanning.
//!
//! # Syntax
//!
//! - `{name}` - Placeholder, substituted positionally at render time
//! - `{{` and `}}` - Escaped braces (render as `{` and `}`)
//!
//! There are no positional indices, format specifiers, nesting or
//! conditionals.
//!
//! # Example
//!
//! ```rust
//! use namedlog_template::{CompiledTemplate, Value};
//!
//! let template = CompiledTemplate::compile("Copied {count} files in {ms}ms")?;
//! assert_eq!(template.placeholder_names(), ["count", "ms"]);
//!
//! let values = [Value::from(12u32), Value::from(3.5f64)];
//! assert_eq!(template.render(&values)?, "Copied 12 files in 3.5ms");
//! # Ok::<(), namedlog_template::TemplateError>(())
//! ```
//!
//! # Errors
//!
//! Malformed templates fail at compile time with the exact character index of
//! the problem:
//!
//! ```rust
//! use namedlog_template::CompiledTemplate;
//!
//! let err = CompiledTemplate::compile("One{Two}Three{Four{Five}Six").unwrap_err();
//! assert_eq!(err.index(), Some(18));
//! ```
//!
//! Rendering with fewer values than placeholders fails with
//! [`TemplateError::NotEnoughValues`]; extra values are ignored.

mod error;
mod scan;
mod template;
mod value;

pub use error::{Result, TemplateError};
pub use template::{CompiledTemplate, Rendered};
pub use value::{Number, ToValue, Value, ValueSource};
