//! Single-pass scanner for named templates.
//!
//! The grammar is small:
//!
//! - `{{` and `}}` are escapes for a literal `{` and `}`. They are matched
//!   before anything else, including inside a placeholder name, and always
//!   consume two bytes.
//! - `{name}` is a placeholder. The name runs up to the next single `}` and
//!   must not be empty.
//!
//! Malformations are located by byte offset while scanning and reported as a
//! character index:
//!
//! - a single `{` while a placeholder is already open: the offset of that `{`
//! - a single `}` with no open placeholder, or closing an empty name: the
//!   offset of that `}`
//! - end of input inside a placeholder: the template length

use std::ops::Range;

use crate::error::{Result, TemplateError};

/// One piece of a compiled template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    /// Literal text, as a byte range into the original template.
    Literal(Range<usize>),
    /// The n-th placeholder occurrence.
    Placeholder(usize),
}

/// Output of a successful scan.
#[derive(Debug, Default)]
pub(crate) struct Scanned {
    pub(crate) segments: Vec<Segment>,
    pub(crate) names: Vec<String>,
}

/// State of a placeholder that has been opened but not yet closed.
struct OpenName {
    name: String,
    /// Start of the name bytes not yet copied into `name`.
    run_start: usize,
}

pub(crate) fn scan(template: &str) -> Result<Scanned> {
    let bytes = template.as_bytes();
    let mut out = Scanned::default();
    let mut literal_start = 0;
    let mut open: Option<OpenName> = None;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        match b {
            b'{' | b'}' if bytes.get(i + 1) == Some(&b) => {
                match open.as_mut() {
                    Some(pending) => {
                        pending.name.push_str(&template[pending.run_start..i]);
                        pending.name.push(b as char);
                        pending.run_start = i + 2;
                    }
                    None => {
                        // Keep the first brace of the pair as literal text.
                        push_literal(&mut out.segments, literal_start..i + 1);
                        literal_start = i + 2;
                    }
                }
                i += 2;
            }
            b'{' => {
                if open.is_some() {
                    return Err(TemplateError::malformed(template, i));
                }
                push_literal(&mut out.segments, literal_start..i);
                open = Some(OpenName {
                    name: String::new(),
                    run_start: i + 1,
                });
                i += 1;
            }
            b'}' => {
                let Some(mut pending) = open.take() else {
                    return Err(TemplateError::malformed(template, i));
                };
                pending.name.push_str(&template[pending.run_start..i]);
                if pending.name.is_empty() {
                    return Err(TemplateError::malformed(template, i));
                }
                out.segments.push(Segment::Placeholder(out.names.len()));
                out.names.push(pending.name);
                literal_start = i + 1;
                i += 1;
            }
            _ => i += 1,
        }
    }

    if open.is_some() {
        return Err(TemplateError::malformed(template, bytes.len()));
    }
    push_literal(&mut out.segments, literal_start..bytes.len());

    Ok(out)
}

fn push_literal(segments: &mut Vec<Segment>, range: Range<usize>) {
    if !range.is_empty() {
        segments.push(Segment::Literal(range));
    }
}
