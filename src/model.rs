//! # Content Model
//!
//! Typed records for the two kinds of distributable content: templates
//! (parametrized prompt text) and banks (option lists used to fill template
//! placeholders), plus the per-bank default selection map.
//!
//! All records deserialize leniently. Missing or `null` collections become
//! empty, and fields this crate does not know about are kept in an `extra`
//! map so they survive a reconciliation pass untouched.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Banks keyed by their unique bank key.
pub type BankMap = BTreeMap<String, Bank>;

/// Currently selected default option per bank key.
pub type DefaultMap = BTreeMap<String, OptionValue>;

/// Locale used when a localized value has no entry for the requested one.
const FALLBACK_LOCALES: [&str; 2] = ["cn", "en"];

/// Display text that is either a bare string or a per-locale map.
///
/// The `Other` variant catches any shape that is neither, so a malformed
/// record still loads and can still be compared.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalizedText {
    /// A single string shared by every locale.
    Plain(String),
    /// Locale code (`cn`, `en`, ...) to string.
    Localized(BTreeMap<String, String>),
    /// Anything else found in the input.
    Other(Value),
}

impl Default for LocalizedText {
    fn default() -> Self {
        LocalizedText::Plain(String::new())
    }
}

impl From<&str> for LocalizedText {
    fn from(text: &str) -> Self {
        LocalizedText::Plain(text.to_string())
    }
}

impl From<String> for LocalizedText {
    fn from(text: String) -> Self {
        LocalizedText::Plain(text)
    }
}

impl LocalizedText {
    /// Build a localized text from `(locale, text)` pairs.
    pub fn localized<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        LocalizedText::Localized(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Resolve the text for `locale`.
    ///
    /// Falls back to `cn`, then `en`, then whichever locale sorts first.
    /// Unrecognized shapes resolve to the empty string.
    pub fn localize(&self, locale: &str) -> &str {
        match self {
            LocalizedText::Plain(text) => text,
            LocalizedText::Localized(map) => std::iter::once(locale)
                .chain(FALLBACK_LOCALES)
                .find_map(|code| map.get(code))
                .or_else(|| map.values().next())
                .map(String::as_str)
                .unwrap_or(""),
            LocalizedText::Other(_) => "",
        }
    }

    /// Return a copy with `suffix` appended to every locale string.
    ///
    /// In an unrecognized map, string entries get the suffix and other
    /// entries are kept as they are. Any other shape is returned unchanged.
    pub fn with_suffix(&self, suffix: &str) -> Self {
        match self {
            LocalizedText::Plain(text) => LocalizedText::Plain(format!("{text}{suffix}")),
            LocalizedText::Localized(map) => LocalizedText::Localized(
                map.iter()
                    .map(|(locale, text)| (locale.clone(), format!("{text}{suffix}")))
                    .collect(),
            ),
            LocalizedText::Other(Value::Object(map)) => LocalizedText::Other(Value::Object(
                map.iter()
                    .map(|(locale, value)| {
                        let value = match value {
                            Value::String(text) => Value::String(format!("{text}{suffix}")),
                            other => other.clone(),
                        };
                        (locale.clone(), value)
                    })
                    .collect(),
            )),
            LocalizedText::Other(value) => LocalizedText::Other(value.clone()),
        }
    }
}

/// One entry of a bank's option list.
///
/// Options are usually strings, but structured options (for example an
/// option carrying per-locale labels) are compared by their canonical JSON
/// serialization; see [`crate::value::option_identity`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Text(String),
    Structured(Value),
}

impl From<&str> for OptionValue {
    fn from(text: &str) -> Self {
        OptionValue::Text(text.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(text: String) -> Self {
        OptionValue::Text(text)
    }
}

impl From<Value> for OptionValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => OptionValue::Text(text),
            other => OptionValue::Structured(other),
        }
    }
}

/// A parametrized prompt template.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// Unique template id.
    pub id: String,
    /// Display name. `None` when the record has no name, so an absent field
    /// stays absent when written back.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<LocalizedText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<LocalizedText>,
    /// Placeholder name to the value the user picked for it.
    #[serde(default, deserialize_with = "null_as_default")]
    pub selections: BTreeMap<String, Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_urls: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub language: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sort_order: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Fields not modelled above, carried through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Template {
    /// Create a template with the given id, name and content.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<LocalizedText>,
        content: impl Into<LocalizedText>,
    ) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            content: Some(content.into()),
            ..Default::default()
        }
    }

    /// Set a placeholder selection, returning the updated template.
    pub fn with_selection(mut self, placeholder: impl Into<String>, value: impl Into<Value>) -> Self {
        self.selections.insert(placeholder.into(), value.into());
        self
    }
}

/// A named option list used to fill placeholders.
///
/// The bank key is the key under which the bank is stored in a [`BankMap`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Bank {
    #[serde(default)]
    pub label: LocalizedText,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub options: Vec<OptionValue>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Bank {
    /// Create a bank with a plain label and the given options.
    pub fn new<I, O>(label: impl Into<LocalizedText>, options: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<OptionValue>,
    {
        Self {
            label: label.into(),
            options: options.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }
}

/// Deserialize `null` the same way as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
