//! Backing store traits that shape the generated predicates.

use serde::{Deserialize, Serialize};

/// What the executing store can and cannot do with string comparisons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreDialect {
    /// Escape sequence placed before literal `%` and `_` in LIKE values.
    pub search_string_escape: String,
    /// Whether the store evaluates native regex restrictions.
    pub supports_regex: bool,
}

impl Default for StoreDialect {
    fn default() -> Self {
        Self {
            search_string_escape: "\\".to_string(),
            supports_regex: true,
        }
    }
}

impl StoreDialect {
    /// A store without a `REGEXP` operator, such as an embedded test database.
    pub fn without_regex() -> Self {
        Self {
            supports_regex: false,
            ..Default::default()
        }
    }

    /// Escapes LIKE wildcards so user input is matched literally.
    ///
    /// The escape sequence itself is doubled first, so input that already
    /// contains it cannot re-enable a wildcard. Blank input is returned
    /// untouched.
    pub fn escape_wildcards(&self, text: &str) -> String {
        let escape = self.search_string_escape.as_str();
        if text.trim().is_empty() || escape.is_empty() {
            return text.to_string();
        }

        text.replace(escape, &escape.repeat(2))
            .replace('%', &format!("{}%", escape))
            .replace('_', &format!("{}_", escape))
    }
}
