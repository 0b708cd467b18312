//! Value identity and shape-tolerant equality.
//!
//! Shared by both reconcilers. Cloning is plain [`Clone`]: every model type
//! owns its data, so a clone is always a deep copy.

use std::borrow::Cow;

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::model::{LocalizedText, OptionValue, Template};

/// Identity of a bank option used for de-duplication.
///
/// Text options are their own identity. Structured options are identified by
/// their JSON serialization with object keys sorted at every level, so two
/// options that differ only in key order share an identity.
///
/// # Errors
///
/// Returns `Error::Serialization` if the structured value cannot be
/// serialized.
pub fn option_identity(option: &OptionValue) -> Result<Cow<'_, str>> {
    match option {
        OptionValue::Text(text) => Ok(Cow::Borrowed(text)),
        OptionValue::Structured(value) => serde_json::to_string(&canonicalize(value))
            .map(Cow::Owned)
            .map_err(|err| Error::Serialization {
                message: format!("Failed to serialize option value: {}", err),
            }),
    }
}

/// Rebuild `value` with object keys in sorted order.
fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, inner)| (key.clone(), canonicalize(inner)))
                    .collect::<Map<String, Value>>(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}

/// Structural equality of two display texts.
///
/// Texts of the same shape compare by value. A bare string never equals a
/// per-locale map, even if every locale carries the same string; this is the
/// same outcome as comparing the serialized forms. Malformed shapes compare
/// as raw values and never cause an error.
pub fn same_text(a: &LocalizedText, b: &LocalizedText) -> bool {
    match (a, b) {
        (LocalizedText::Plain(x), LocalizedText::Plain(y)) => x == y,
        (LocalizedText::Localized(x), LocalizedText::Localized(y)) => x == y,
        (LocalizedText::Other(x), LocalizedText::Other(y)) => x == y,
        _ => false,
    }
}

/// Whether two templates carry the same user-visible content.
///
/// Only `name` and `content` take part; selections, tags and every other
/// field are ignored. A missing field only equals another missing field.
pub fn same_template_content(a: &Template, b: &Template) -> bool {
    same_optional_text(a.name.as_ref(), b.name.as_ref())
        && same_optional_text(a.content.as_ref(), b.content.as_ref())
}

fn same_optional_text(a: Option<&LocalizedText>, b: Option<&LocalizedText>) -> bool {
    match (a, b) {
        (Some(x), Some(y)) => same_text(x, y),
        (None, None) => true,
        _ => false,
    }
}
