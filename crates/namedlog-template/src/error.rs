//! Error types for template compilation and rendering.

use thiserror::Error;

/// Errors that can occur when compiling or rendering a template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// The template text could not be scanned.
    ///
    /// `index` counts characters, not bytes, from the start of the template
    /// to the point where the malformation was detected.
    #[error("template is malformed at index {index}: {template:?}")]
    Malformed { template: String, index: usize },

    /// Fewer values were supplied than the template has placeholders.
    #[error("not enough values to render template: expected {expected}, got {actual}")]
    NotEnoughValues { expected: usize, actual: usize },

    /// A value's `Display` implementation returned an error.
    #[error("a template value failed to format")]
    Format,
}

impl TemplateError {
    /// Returns the malformation character index, if this is a
    /// [`TemplateError::Malformed`].
    pub fn index(&self) -> Option<usize> {
        match self {
            TemplateError::Malformed { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// Returns the offending template text, if this is a [`TemplateError::Malformed`].
    pub fn template(&self) -> Option<&str> {
        match self {
            TemplateError::Malformed { template, .. } => Some(template),
            _ => None,
        }
    }

    /// Returns the malformation position as a byte offset into
    /// [`TemplateError::template`], suitable for slicing.
    pub fn byte_index(&self) -> Option<usize> {
        match self {
            TemplateError::Malformed { template, index } => Some(
                template
                    .char_indices()
                    .nth(*index)
                    .map_or(template.len(), |(offset, _)| offset),
            ),
            _ => None,
        }
    }

    /// Builds a malformation error from the scanner's byte offset.
    pub(crate) fn malformed(template: &str, byte_offset: usize) -> Self {
        Self::Malformed {
            template: template.to_string(),
            index: template[..byte_offset].chars().count(),
        }
    }
}

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;
