//! Structured context attached to a log call

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Context for structured logging: string keys, arbitrary JSON values.
///
/// Keys serialize in sorted order, so the same context always renders the
/// same JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogContext {
    fields: Map<String, Value>,
}

impl LogContext {
    /// Create a new empty log context
    pub fn new() -> Self {
        Self { fields: Map::new() }
    }

    /// Add a field to the context
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Add a field to the context (mutable version)
    pub fn add_field<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Get all fields
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Check if context has any fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Compact JSON rendering, as written after `Context: `
    pub fn to_json(&self) -> String {
        Value::Object(self.fields.clone()).to_string()
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl From<Map<String, Value>> for LogContext {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl<K, V> FromIterator<(K, V)> for LogContext
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_context_json_is_compact() {
        let ctx = LogContext::new().with_field("a", 1);
        assert_eq!(ctx.to_json(), r#"{"a":1}"#);
    }

    #[test]
    fn test_context_keys_sorted() {
        let ctx = LogContext::new()
            .with_field("zeta", true)
            .with_field("alpha", "x")
            .with_field("nested", json!({"k": [1, 2]}));
        assert_eq!(
            ctx.to_json(),
            r#"{"alpha":"x","nested":{"k":[1,2]},"zeta":true}"#
        );
    }

    #[test]
    fn test_context_from_iter_and_mutation() {
        let mut ctx: LogContext = vec![("user", json!(42))].into_iter().collect();
        ctx.add_field("action", "login");
        assert_eq!(ctx.get("user"), Some(&json!(42)));
        assert_eq!(ctx.fields().len(), 2);
        assert!(!ctx.is_empty());
        assert!(LogContext::new().is_empty());
    }
}
