//! Combining template names with unformatted names.

use std::collections::HashSet;

use crate::error::{Error, Result};

/// Concatenates `formatted` then `unformatted`, failing on the first repeat.
///
/// Order is preserved and nothing is deduplicated: the result is exactly the
/// two lists back to back, or an error naming the first duplicate seen.
///
/// ```
/// use namedlog::combine_names;
///
/// assert_eq!(combine_names(&["a"], &["b"]).unwrap(), ["a", "b"]);
/// assert!(combine_names(&["a"], &["a"]).is_err());
/// ```
pub fn combine_names<F, U>(formatted: &[F], unformatted: &[U]) -> Result<Vec<String>>
where
    F: AsRef<str>,
    U: AsRef<str>,
{
    let mut seen = HashSet::with_capacity(formatted.len() + unformatted.len());
    let mut names = Vec::with_capacity(formatted.len() + unformatted.len());

    let all = formatted
        .iter()
        .map(AsRef::as_ref)
        .chain(unformatted.iter().map(AsRef::as_ref));
    for name in all {
        if !seen.insert(name) {
            return Err(Error::DuplicateName(name.to_string()));
        }
        names.push(name.to_string());
    }

    Ok(names)
}
