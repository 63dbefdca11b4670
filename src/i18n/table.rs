use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use super::error::LocaleError;
use crate::logging::{operations, services, status};

/// Flat mapping from translation key to template
///
/// A table is either built from a complete JSON object or empty; a file that
/// fails to parse never contributes any entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringTable {
    entries: HashMap<String, String>,
}

impl StringTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and parse a locale file
    ///
    /// Valid JSON whose top level is not an object yields an empty table
    /// rather than an error.
    pub fn load(path: &Path) -> Result<Self, LocaleError> {
        let bytes = fs::read(path).map_err(|e| LocaleError::from_io(path, e))?;

        let text = String::from_utf8(bytes).map_err(|source| LocaleError::InvalidEncoding {
            path: path.to_path_buf(),
            source,
        })?;

        let value: Value = serde_json::from_str(&text).map_err(|source| LocaleError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;

        let table = Self::from_value(value);
        debug!(
            service = services::LOCALIZATION,
            operation = operations::LOAD,
            status = status::SUCCESS,
            path = %path.display(),
            entry_count = table.len(),
            "locale file loaded"
        );
        Ok(table)
    }

    /// Build from a parsed JSON document
    ///
    /// String values keep their contents; any other value is stored as its
    /// compact JSON text, so booleans and null read `true`, `false` and
    /// `null` rather than a language-specific spelling such as `True` or
    /// `None`. Nested arrays and objects keep JSON syntax (`[1,2]`).
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => map
                .into_iter()
                .map(|(key, value)| {
                    let value = match value {
                        Value::String(s) => s,
                        other => other.to_string(),
                    };
                    (key, value)
                })
                .collect(),
            other => {
                debug!(
                    kind = json_kind(&other),
                    "locale document is not an object, ignoring"
                );
                Self::new()
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl FromIterator<(String, String)> for StringTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
