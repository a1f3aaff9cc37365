//! Path template resolution
//!
//! Substitutes `{name}` placeholders with percent-encoded values.

use crate::error::{Error, Result};

/// Resolve every `{name}` placeholder in `template` through `lookup`.
///
/// Substituted values are percent-encoded so that a `/` or a space inside a
/// value never adds a path segment. Empty, `.` and `..` values are rejected:
/// URL parsing collapses them (encoded or not) and the request would address
/// a parent resource. A `{` without a closing `}` is copied through literally.
pub fn resolve_path<F>(template: &str, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut resolved = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}').map(|i| open + i) else {
            break;
        };

        resolved.push_str(&rest[..open]);
        let name = &rest[open + 1..close];
        let value = lookup(name).ok_or_else(|| Error::MissingParameter {
            name: name.to_string(),
        })?;
        if is_dot_or_empty(&value) {
            return Err(Error::InvalidInput(format!(
                "path parameter {name} cannot be {value:?}"
            )));
        }
        resolved.push_str(&urlencoding::encode(&value));
        rest = &rest[close + 1..];
    }

    resolved.push_str(rest);
    Ok(resolved)
}

fn is_dot_or_empty(value: &str) -> bool {
    matches!(value, "" | "." | "..")
}

/// Placeholder names in order of appearance
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}').map(|i| open + i) else {
            break;
        };
        names.push(&rest[open + 1..close]);
        rest = &rest[close + 1..];
    }
    names
}
