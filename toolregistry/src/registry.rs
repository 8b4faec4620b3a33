//! The registry document
//!
//! A registry is a JSON object with a `version` string and a `tools` array.
//! Documents read from disk are repaired into that shape before use; any
//! other top-level keys are carried through untouched.

use crate::entry::{json_kind, ToolEntry, ID_KEY, VERSION_KEY};
use crate::error::{RegistryError, Result};
use serde::Serialize;
use serde_json::{Map, Value};

/// Document version written when none (or an unusable one) is present
pub const DEFAULT_REGISTRY_VERSION: &str = "1.0";

const TOOLS_KEY: &str = "tools";

/// Result of inserting an entry into the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No entry had the same (id, version); the new one was appended
    Inserted {
        /// Position of the new entry
        index: usize,
    },
    /// An entry with the same (id, version) was replaced in place
    Replaced {
        /// Position of the replaced entry
        index: usize,
    },
}

impl UpsertOutcome {
    /// Position of the upserted entry in `tools`
    pub fn index(&self) -> usize {
        match self {
            Self::Inserted { index } | Self::Replaced { index } => *index,
        }
    }
}

/// A normalized registry document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Registry {
    document: Map<String, Value>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Create the default document, `{"version": "1.0", "tools": []}`
    pub fn new() -> Self {
        let mut document = Map::new();
        document.insert(
            VERSION_KEY.to_string(),
            Value::String(DEFAULT_REGISTRY_VERSION.to_string()),
        );
        document.insert(TOOLS_KEY.to_string(), Value::Array(Vec::new()));
        Self { document }
    }

    /// Repair an arbitrary JSON value into a registry.
    ///
    /// A non-object value is replaced by the default document. For an object,
    /// `tools` and `version` are checked independently and only the field that
    /// fails its check is reset.
    pub fn from_value(value: Value) -> Self {
        let mut document = match value {
            Value::Object(document) => document,
            other => {
                tracing::debug!(
                    "Registry document is a {}, starting from the default document",
                    json_kind(&other)
                );
                return Self::new();
            }
        };

        if !matches!(document.get(TOOLS_KEY), Some(Value::Array(_))) {
            tracing::debug!("Registry has no usable tools array, resetting it");
            document.insert(TOOLS_KEY.to_string(), Value::Array(Vec::new()));
        }

        let version_ok = matches!(
            document.get(VERSION_KEY),
            Some(Value::String(version)) if !version.trim().is_empty()
        );
        if !version_ok {
            tracing::debug!(
                "Registry has no usable version, resetting it to {}",
                DEFAULT_REGISTRY_VERSION
            );
            document.insert(
                VERSION_KEY.to_string(),
                Value::String(DEFAULT_REGISTRY_VERSION.to_string()),
            );
        }

        Self { document }
    }

    /// Parse registry text, naming `label` in the error if it is not valid JSON
    pub fn parse(content: &str, label: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(content).map_err(|e| RegistryError::parse(label, e))?;
        Ok(Self::from_value(value))
    }

    /// The document version
    pub fn version(&self) -> &str {
        self.document
            .get(VERSION_KEY)
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_REGISTRY_VERSION)
    }

    /// The stored tool entries, in registry order
    pub fn tools(&self) -> &[Value] {
        match self.document.get(TOOLS_KEY) {
            Some(Value::Array(tools)) => tools,
            _ => &[],
        }
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.tools().len()
    }

    /// Whether the registry holds no entries
    pub fn is_empty(&self) -> bool {
        self.tools().is_empty()
    }

    /// Find the stored entry for `id`@`version`
    pub fn find(&self, id: &str, version: &str) -> Option<&Value> {
        self.tools().iter().find(|tool| {
            tool.get(ID_KEY).and_then(Value::as_str) == Some(id)
                && tool.get(VERSION_KEY).and_then(Value::as_str) == Some(version)
        })
    }

    /// Look up a top-level key of the document
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.document.get(key)
    }

    /// Replace the entry with the same (id, version) in place, or append it
    pub fn upsert(&mut self, entry: ToolEntry) -> UpsertOutcome {
        let tools = self.tools_mut();

        match tools.iter().position(|tool| entry.matches(tool)) {
            Some(index) => {
                tools[index] = entry.into_value();
                UpsertOutcome::Replaced { index }
            }
            None => {
                tools.push(entry.into_value());
                UpsertOutcome::Inserted {
                    index: tools.len() - 1,
                }
            }
        }
    }

    /// Serialize with two-space indentation and a trailing newline
    pub fn to_pretty_json(&self) -> Result<String> {
        let mut content = serde_json::to_string_pretty(self).map_err(RegistryError::Serialize)?;
        content.push('\n');
        Ok(content)
    }

    fn tools_mut(&mut self) -> &mut Vec<Value> {
        let tools = self
            .document
            .entry(TOOLS_KEY)
            .or_insert_with(|| Value::Array(Vec::new()));
        if !tools.is_array() {
            *tools = Value::Array(Vec::new());
        }
        match tools {
            Value::Array(tools) => tools,
            _ => unreachable!("tools was just reset to an array"),
        }
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    fn upsert_key(registry: &mut Registry, id: &str, version: &str) -> UpsertOutcome {
        let time = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        registry.upsert(ToolEntry::new(id, version, time, None))
    }

    proptest! {
        #[test]
        fn upsert_keeps_keys_unique_and_first_seen_order(
            keys in prop::collection::vec(("[a-c]", "[1-3]"), 0..40)
        ) {
            let mut registry = Registry::new();
            let mut expected: Vec<(String, String)> = Vec::new();

            for (id, version) in &keys {
                let outcome = upsert_key(&mut registry, id, version);
                match expected.iter().position(|k| k.0 == *id && k.1 == *version) {
                    Some(index) => prop_assert_eq!(outcome, UpsertOutcome::Replaced { index }),
                    None => {
                        expected.push((id.clone(), version.clone()));
                        prop_assert_eq!(outcome, UpsertOutcome::Inserted { index: expected.len() - 1 });
                    }
                }
            }

            let actual: Vec<(String, String)> = registry
                .tools()
                .iter()
                .map(|t| (t["id"].as_str().unwrap().to_string(), t["version"].as_str().unwrap().to_string()))
                .collect();
            prop_assert_eq!(actual, expected);
        }
    }
}
