//! Error types for patient search predicate construction.
//!
//! Predicate building can fail for exactly two reasons: a caller handed an
//! absent value to an operation that requires one, or the configuration
//! provider could not answer a lookup. Both are reported immediately; nothing
//! in this crate retries.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type for all search predicate operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// An argument was absent or otherwise unusable.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// A configuration lookup failed, so the match policy is unknown.
    #[error("configuration unavailable for '{key}': {message}")]
    ConfigurationUnavailable { key: String, message: String },
}

impl SearchError {
    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        SearchError::InvalidArgument {
            message: message.into(),
        }
    }

    /// Returns the configuration key involved, if any.
    pub fn config_key(&self) -> Option<&str> {
        match self {
            SearchError::ConfigurationUnavailable { key, .. } => Some(key),
            SearchError::InvalidArgument { .. } => None,
        }
    }
}

/// Failure reported by a [`ConfigurationProvider`](crate::config::ConfigurationProvider).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A numeric setting held a value that does not parse.
    #[error("malformed value '{value}' for '{key}': {reason}")]
    Malformed {
        key: String,
        value: String,
        reason: String,
    },

    /// The backing store could not be reached.
    #[error("configuration store unavailable while reading '{key}': {message}")]
    Unavailable { key: String, message: String },
}

impl ConfigError {
    /// Returns the key whose lookup failed.
    pub fn key(&self) -> &str {
        match self {
            ConfigError::Malformed { key, .. } | ConfigError::Unavailable { key, .. } => key,
        }
    }
}

impl From<ConfigError> for SearchError {
    fn from(err: ConfigError) -> Self {
        SearchError::ConfigurationUnavailable {
            key: err.key().to_string(),
            message: err.to_string(),
        }
    }
}

/// Result type for search predicate operations.
pub type SearchResult<T> = Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let err = SearchError::invalid_argument("query must not be null");
        assert_eq!(err.to_string(), "invalid argument: query must not be null");
        assert!(err.config_key().is_none());
    }

    #[test]
    fn test_config_error_converts_with_key() {
        let err: SearchError = ConfigError::Malformed {
            key: "min-search-characters".to_string(),
            value: "three".to_string(),
            reason: "invalid digit found in string".to_string(),
        }
        .into();

        assert_eq!(err.config_key(), Some("min-search-characters"));
        assert!(err.to_string().contains("three"));
    }

    #[test]
    fn test_unavailable_display() {
        let err = ConfigError::Unavailable {
            key: "identifier-regex".to_string(),
            message: "connection refused".to_string(),
        };
        assert_eq!(err.key(), "identifier-regex");
        assert!(err.to_string().contains("connection refused"));
    }
}
