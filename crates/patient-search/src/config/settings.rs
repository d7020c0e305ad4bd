//! Search settings from command line arguments and environment variables.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PATIENT_SEARCH_MIN_CHARS` | 3 | Minimum characters for fuzzy name matching |
//! | `PATIENT_SEARCH_MATCH_MODE` | start | Name match mode (`start` or `anywhere`) |
//! | `PATIENT_SEARCH_IDENTIFIER_REGEX` | | Identifier regex template |
//! | `PATIENT_SEARCH_IDENTIFIER_PATTERN` | | Comma separated identifier templates |
//! | `PATIENT_SEARCH_IDENTIFIER_PREFIX` | | Simple identifier match prefix |
//! | `PATIENT_SEARCH_IDENTIFIER_SUFFIX` | | Simple identifier match suffix |
//! | `PATIENT_SEARCH_ATTRIBUTE_MATCH_MODE` | exact | Attribute match mode (`exact` or `anywhere`) |
//! | `PATIENT_SEARCH_CASE_SENSITIVE_STORE` | false | Store compares strings case-sensitively |
//! | `PATIENT_SEARCH_LOG_LEVEL` | info | Log level |
//!
//! # Example
//!
//! ```rust
//! use helios_patient_search::config::{ConfigurationProvider, SearchSettings};
//!
//! let settings = SearchSettings {
//!     min_search_characters: 2,
//!     match_mode: "anywhere".to_string(),
//!     ..Default::default()
//! };
//! assert!(settings.validate().is_ok());
//!
//! let config = settings.into_configuration();
//! assert_eq!(config.get_int("min-search-characters", 3).unwrap(), 2);
//! ```

use clap::Args;

use super::{InMemoryConfiguration, keys};

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Search settings that seed an [`InMemoryConfiguration`].
///
/// Flattened into a binary's own `clap::Parser`, or built programmatically.
#[derive(Debug, Clone, Args)]
pub struct SearchSettings {
    /// Names shorter than this are matched exactly.
    #[arg(long, env = "PATIENT_SEARCH_MIN_CHARS", default_value = "3", allow_negative_numbers = true)]
    pub min_search_characters: i64,

    /// Fuzzy name match mode (start, anywhere).
    #[arg(long, env = "PATIENT_SEARCH_MATCH_MODE", default_value = "start")]
    pub match_mode: String,

    /// Identifier regex template.
    #[arg(long, env = "PATIENT_SEARCH_IDENTIFIER_REGEX")]
    pub identifier_regex: Option<String>,

    /// Comma separated identifier search templates.
    #[arg(long, env = "PATIENT_SEARCH_IDENTIFIER_PATTERN")]
    pub identifier_search_pattern: Option<String>,

    /// Prefix for the simple identifier match.
    #[arg(long, env = "PATIENT_SEARCH_IDENTIFIER_PREFIX")]
    pub identifier_prefix: Option<String>,

    /// Suffix for the simple identifier match.
    #[arg(long, env = "PATIENT_SEARCH_IDENTIFIER_SUFFIX")]
    pub identifier_suffix: Option<String>,

    /// Person attribute match mode (exact, anywhere).
    #[arg(long, env = "PATIENT_SEARCH_ATTRIBUTE_MATCH_MODE", default_value = "exact")]
    pub attribute_match_mode: String,

    /// The backing store compares strings case-sensitively.
    #[arg(long, env = "PATIENT_SEARCH_CASE_SENSITIVE_STORE", default_value = "false")]
    pub case_sensitive_store: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "PATIENT_SEARCH_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            min_search_characters: keys::DEFAULT_MIN_SEARCH_CHARACTERS,
            match_mode: keys::MATCH_START.to_string(),
            identifier_regex: None,
            identifier_search_pattern: None,
            identifier_prefix: None,
            identifier_suffix: None,
            attribute_match_mode: keys::MATCH_EXACT.to_string(),
            case_sensitive_store: false,
            log_level: "info".to_string(),
        }
    }
}

impl SearchSettings {
    /// Validates the settings and returns every problem found.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.min_search_characters < 0 {
            errors.push("Minimum search characters cannot be negative".to_string());
        }

        if !is_one_of(&self.match_mode, &[keys::MATCH_START, keys::MATCH_ANYWHERE]) {
            errors.push(format!(
                "Match mode must be 'start' or 'anywhere', got '{}'",
                self.match_mode
            ));
        }

        if !is_one_of(
            &self.attribute_match_mode,
            &[keys::MATCH_EXACT, keys::MATCH_ANYWHERE],
        ) {
            errors.push(format!(
                "Attribute match mode must be 'exact' or 'anywhere', got '{}'",
                self.attribute_match_mode
            ));
        }

        if !is_one_of(&self.log_level, &LOG_LEVELS) {
            errors.push(format!("Unknown log level '{}'", self.log_level));
        }

        if let Some(pattern) = &self.identifier_search_pattern {
            if pattern.split(',').all(|p| p.trim().is_empty()) {
                errors.push("Identifier search pattern has no templates".to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Converts the settings into a provider.
    pub fn into_configuration(self) -> InMemoryConfiguration {
        let config = InMemoryConfiguration::new()
            .with_property(
                keys::MIN_SEARCH_CHARACTERS,
                self.min_search_characters.to_string(),
            )
            .with_property(keys::SEARCH_MATCH_MODE, self.match_mode)
            .with_property(keys::ATTRIBUTE_SEARCH_MATCH_MODE, self.attribute_match_mode)
            .with_case_sensitive_store(self.case_sensitive_store);

        let optional = [
            (keys::IDENTIFIER_REGEX, self.identifier_regex),
            (keys::IDENTIFIER_SEARCH_PATTERN, self.identifier_search_pattern),
            (keys::IDENTIFIER_PREFIX, self.identifier_prefix),
            (keys::IDENTIFIER_SUFFIX, self.identifier_suffix),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                config.set(key, value);
            }
        }

        config
    }
}

fn is_one_of(value: &str, allowed: &[&str]) -> bool {
    allowed.iter().any(|a| a.eq_ignore_ascii_case(value))
}
