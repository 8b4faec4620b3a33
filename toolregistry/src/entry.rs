//! Registry entries
//!
//! An entry is an open JSON object: the three fields the updater owns
//! (`id`, `version`, `updated_at`) followed by whatever metadata the build
//! pipeline attached to the tool.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// Key holding the tool identifier
pub const ID_KEY: &str = "id";
/// Key holding the tool version
pub const VERSION_KEY: &str = "version";
/// Key holding the time the entry was last written
pub const UPDATED_AT_KEY: &str = "updated_at";

/// Format a timestamp the way entries record it, e.g. `2024-05-01T12:00:00.000Z`
pub fn format_timestamp(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// One tool's recorded state
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ToolEntry {
    fields: Map<String, Value>,
}

impl ToolEntry {
    /// Build an entry for `id`@`version` stamped with `updated_at`.
    ///
    /// Only a metadata *object* contributes fields. Its own `id`, `version`
    /// and `updated_at` keys are ignored so the caller's values always win.
    pub fn new(
        id: impl Into<String>,
        version: impl Into<String>,
        updated_at: DateTime<Utc>,
        metadata: Option<&Value>,
    ) -> Self {
        let mut fields = Map::new();
        fields.insert(ID_KEY.to_string(), Value::String(id.into()));
        fields.insert(VERSION_KEY.to_string(), Value::String(version.into()));
        fields.insert(
            UPDATED_AT_KEY.to_string(),
            Value::String(format_timestamp(updated_at)),
        );

        match metadata {
            Some(Value::Object(extra)) => {
                for (key, value) in extra {
                    if !fields.contains_key(key) {
                        fields.insert(key.clone(), value.clone());
                    }
                }
            }
            Some(Value::Null) | None => {}
            Some(other) => {
                tracing::debug!(
                    "Ignoring tool metadata that is not a JSON object: {}",
                    json_kind(other)
                );
            }
        }

        Self { fields }
    }

    /// The tool identifier
    pub fn id(&self) -> &str {
        self.str_field(ID_KEY)
    }

    /// The tool version
    pub fn version(&self) -> &str {
        self.str_field(VERSION_KEY)
    }

    /// The formatted `updated_at` timestamp
    pub fn updated_at(&self) -> &str {
        self.str_field(UPDATED_AT_KEY)
    }

    /// Look up any field of the entry, metadata included
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Whether a stored registry element carries the same (id, version) key
    pub fn matches(&self, candidate: &Value) -> bool {
        let Value::Object(fields) = candidate else {
            return false;
        };
        let same = |key: &str, expected: &str| {
            matches!(fields.get(key), Some(Value::String(actual)) if actual == expected)
        };
        same(ID_KEY, self.id()) && same(VERSION_KEY, self.version())
    }

    /// Convert the entry into the JSON value stored in the registry
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }

    // The constructor always sets these keys to strings.
    fn str_field(&self, key: &str) -> &str {
        self.fields.get(key).and_then(Value::as_str).unwrap_or_default()
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
