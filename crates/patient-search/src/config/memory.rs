//! In-memory configuration provider.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use serde_json::Value as JsonValue;

use super::ConfigurationProvider;
use crate::error::ConfigError;

/// A thread-safe, runtime-updatable property map.
///
/// Readers never observe a half-applied update: each lookup takes the read
/// lock for the duration of a single key.
#[derive(Debug, Default)]
pub struct InMemoryConfiguration {
    properties: RwLock<HashMap<String, String>>,
    case_sensitive_store: AtomicBool,
}

impl InMemoryConfiguration {
    /// Creates an empty configuration; every lookup yields its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`set`](Self::set).
    pub fn with_property(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Builder form of [`set_case_sensitive_store`](Self::set_case_sensitive_store).
    pub fn with_case_sensitive_store(self, case_sensitive: bool) -> Self {
        self.set_case_sensitive_store(case_sensitive);
        self
    }

    /// Sets or replaces a property.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.write().insert(key.into(), value.into());
    }

    /// Removes a property, returning its previous value.
    pub fn remove(&self, key: &str) -> Option<String> {
        self.properties.write().remove(key)
    }

    /// Records whether the backing store compares strings case-sensitively.
    pub fn set_case_sensitive_store(&self, case_sensitive: bool) {
        self.case_sensitive_store
            .store(case_sensitive, Ordering::Relaxed);
    }

    /// Returns the number of properties set.
    pub fn len(&self) -> usize {
        self.properties.read().len()
    }

    /// Returns true if no properties are set.
    pub fn is_empty(&self) -> bool {
        self.properties.read().is_empty()
    }

    /// Seeds a configuration from a flat JSON object.
    ///
    /// String, number and boolean members become properties. Any other member
    /// type is rejected.
    pub fn from_json(value: &JsonValue) -> Result<Self, ConfigError> {
        let object = value.as_object().ok_or_else(|| ConfigError::Malformed {
            key: "<root>".to_string(),
            value: value.to_string(),
            reason: "expected a JSON object".to_string(),
        })?;

        let config = Self::new();
        for (key, member) in object {
            let text = match member {
                JsonValue::String(s) => s.clone(),
                JsonValue::Number(n) => n.to_string(),
                JsonValue::Bool(b) => b.to_string(),
                other => {
                    return Err(ConfigError::Malformed {
                        key: key.clone(),
                        value: other.to_string(),
                        reason: "expected a string, number or boolean".to_string(),
                    });
                }
            };
            config.set(key.clone(), text);
        }
        Ok(config)
    }
}

impl ConfigurationProvider for InMemoryConfiguration {
    fn get_string(&self, key: &str, default: &str) -> Result<String, ConfigError> {
        Ok(match self.properties.read().get(key) {
            Some(value) if !value.is_empty() => value.clone(),
            _ => default.to_string(),
        })
    }

    fn get_int(&self, key: &str, default: i64) -> Result<i64, ConfigError> {
        let properties = self.properties.read();
        match properties.get(key).map(|v| v.trim()) {
            Some(value) if !value.is_empty() => {
                value.parse::<i64>().map_err(|e| ConfigError::Malformed {
                    key: key.to_string(),
                    value: value.to_string(),
                    reason: e.to_string(),
                })
            }
            _ => Ok(default),
        }
    }

    fn is_store_comparison_case_sensitive(&self) -> Result<bool, ConfigError> {
        Ok(self.case_sensitive_store.load(Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_when_unset_or_empty() {
        let config = InMemoryConfiguration::new().with_property("identifier-prefix", "");
        assert_eq!(config.get_string("identifier-prefix", "x").unwrap(), "x");
        assert_eq!(config.get_string("missing", "y").unwrap(), "y");
        assert_eq!(config.get_int("missing", 7).unwrap(), 7);
    }

    #[test]
    fn test_int_parsing() {
        let config = InMemoryConfiguration::new()
            .with_property("good", " 5 ")
            .with_property("bad", "five");
        assert_eq!(config.get_int("good", 0).unwrap(), 5);

        let err = config.get_int("bad", 0).unwrap_err();
        assert!(matches!(err, ConfigError::Malformed { ref key, .. } if key == "bad"));
    }

    #[test]
    fn test_runtime_update_is_visible() {
        let config = InMemoryConfiguration::new();
        assert_eq!(config.get_string("search-match-mode", "start").unwrap(), "start");

        config.set("search-match-mode", "anywhere");
        assert_eq!(config.get_string("search-match-mode", "start").unwrap(), "anywhere");

        assert_eq!(config.remove("search-match-mode").as_deref(), Some("anywhere"));
        assert!(config.is_empty());
    }

    #[test]
    fn test_case_sensitive_flag() {
        let config = InMemoryConfiguration::new();
        assert!(!config.is_store_comparison_case_sensitive().unwrap());
        config.set_case_sensitive_store(true);
        assert!(config.is_store_comparison_case_sensitive().unwrap());
    }

    #[test]
    fn test_from_json() {
        let config = InMemoryConfiguration::from_json(&json!({
            "min-search-characters": 2,
            "search-match-mode": "anywhere",
            "flag": true
        }))
        .unwrap();
        assert_eq!(config.len(), 3);
        assert_eq!(config.get_int("min-search-characters", 3).unwrap(), 2);
        assert_eq!(config.get_string("flag", "").unwrap(), "true");
    }

    #[test]
    fn test_from_json_rejects_nested() {
        let err = InMemoryConfiguration::from_json(&json!({"a": [1, 2]})).unwrap_err();
        assert_eq!(err.key(), "a");

        assert!(InMemoryConfiguration::from_json(&json!("flat")).is_err());
    }
}
