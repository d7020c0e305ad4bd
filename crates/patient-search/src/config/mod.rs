//! Administrator-configurable search settings.
//!
//! Search behaviour is driven by a handful of global properties read through a
//! [`ConfigurationProvider`]. The provider is an injected dependency and is
//! consulted afresh on every predicate build, so an administrator's change is
//! picked up by the next search without a restart.
//!
//! # Properties
//!
//! | Key | Default | Effect |
//! |-----|---------|--------|
//! | `min-search-characters` | 3 | Name tokens shorter than this are matched exactly |
//! | `search-match-mode` | start | `start` or `anywhere` fuzzy name matching |
//! | `identifier-regex` | | Regex template with `@SEARCH@`, `@SEARCH-1@`, `@CHECKDIGIT@` |
//! | `identifier-search-pattern` | | Comma separated exact-match templates |
//! | `identifier-prefix` | | Decoration before the identifier in the simple fallback |
//! | `identifier-suffix` | | Decoration after the identifier in the simple fallback |
//! | `attribute-search-match-mode` | exact | `exact` or `anywhere` attribute matching |

mod memory;
mod settings;
mod store;

pub use memory::InMemoryConfiguration;
pub use settings::SearchSettings;
pub use store::StoreDialect;

use tracing::warn;

use crate::error::{ConfigError, SearchResult};
use crate::predicate::MatchMode;

/// Well-known configuration keys.
pub mod keys {
    /// Minimum length of a name token before fuzzy matching is used.
    pub const MIN_SEARCH_CHARACTERS: &str = "min-search-characters";
    /// Fuzzy name match mode.
    pub const SEARCH_MATCH_MODE: &str = "search-match-mode";
    /// Identifier regex template.
    pub const IDENTIFIER_REGEX: &str = "identifier-regex";
    /// Comma separated identifier exact-match templates.
    pub const IDENTIFIER_SEARCH_PATTERN: &str = "identifier-search-pattern";
    /// Literal prefix for the simple identifier match.
    pub const IDENTIFIER_PREFIX: &str = "identifier-prefix";
    /// Literal suffix for the simple identifier match.
    pub const IDENTIFIER_SUFFIX: &str = "identifier-suffix";
    /// Person attribute match mode.
    pub const ATTRIBUTE_SEARCH_MATCH_MODE: &str = "attribute-search-match-mode";

    /// Default for [`MIN_SEARCH_CHARACTERS`].
    pub const DEFAULT_MIN_SEARCH_CHARACTERS: i64 = 3;
    /// Value selecting prefix matching.
    pub const MATCH_START: &str = "start";
    /// Value selecting substring matching.
    pub const MATCH_ANYWHERE: &str = "anywhere";
    /// Value selecting exact attribute matching.
    pub const MATCH_EXACT: &str = "exact";
}

/// Source of global search settings.
///
/// Implementations are shared between concurrent searches and only ever read
/// by this crate.
pub trait ConfigurationProvider: Send + Sync {
    /// Returns the string setting for `key`, or `default` when it is unset or empty.
    fn get_string(&self, key: &str, default: &str) -> Result<String, ConfigError>;

    /// Returns the integer setting for `key`, or `default` when it is unset.
    fn get_int(&self, key: &str, default: i64) -> Result<i64, ConfigError>;

    /// Returns true if the backing store compares strings case-sensitively by default.
    fn is_store_comparison_case_sensitive(&self) -> Result<bool, ConfigError>;
}

/// Name matching policy, read once per predicate build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchPolicy {
    /// Tokens with fewer characters than this are matched exactly.
    pub min_search_chars: usize,
    /// Anchoring used for fuzzy name matches.
    pub match_mode: MatchMode,
}

impl MatchPolicy {
    /// Reads the policy from the provider.
    pub fn load(config: &dyn ConfigurationProvider) -> SearchResult<Self> {
        let min = config.get_int(
            keys::MIN_SEARCH_CHARACTERS,
            keys::DEFAULT_MIN_SEARCH_CHARACTERS,
        )?;
        let mode = config.get_string(keys::SEARCH_MATCH_MODE, keys::MATCH_START)?;

        Ok(Self {
            min_search_chars: usize::try_from(min).unwrap_or(0),
            match_mode: parse_name_match_mode(&mode),
        })
    }

    /// Returns true if `name` is shorter than the configured minimum.
    pub fn is_short_name(&self, name: &str) -> bool {
        name.chars().count() < self.min_search_chars
    }
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            min_search_chars: keys::DEFAULT_MIN_SEARCH_CHARACTERS as usize,
            match_mode: MatchMode::Start,
        }
    }
}

/// Maps a `search-match-mode` value onto a [`MatchMode`].
///
/// Only `anywhere` (any case) selects substring matching; everything else is
/// prefix matching.
pub fn parse_name_match_mode(value: &str) -> MatchMode {
    if value.eq_ignore_ascii_case(keys::MATCH_ANYWHERE) {
        MatchMode::Anywhere
    } else {
        if !value.eq_ignore_ascii_case(keys::MATCH_START) {
            warn!(value = %value, "Unrecognised search match mode, using start");
        }
        MatchMode::Start
    }
}

/// Identifier matching policy, read once per predicate build.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IdentifierSearchPolicy {
    /// Regex template, if configured.
    pub regex_template: Option<String>,
    /// Comma separated exact-match templates, if configured.
    pub pattern_template: Option<String>,
    /// Literal decoration placed before the identifier in the simple match.
    pub prefix: String,
    /// Literal decoration placed after the identifier in the simple match.
    pub suffix: String,
    /// The caller asked for an exact identifier match.
    pub exact_match_requested: bool,
    /// The backing store compares strings case-sensitively.
    pub case_sensitive_store: bool,
}

impl IdentifierSearchPolicy {
    /// Reads the policy from the provider.
    ///
    /// Exact matches only need the store's case sensitivity; pattern matches
    /// only need the templates and decorations.
    pub fn load(config: &dyn ConfigurationProvider, exact_match_requested: bool) -> SearchResult<Self> {
        if exact_match_requested {
            return Ok(Self {
                exact_match_requested,
                case_sensitive_store: config.is_store_comparison_case_sensitive()?,
                ..Default::default()
            });
        }

        Ok(Self {
            regex_template: non_empty(config.get_string(keys::IDENTIFIER_REGEX, "")?),
            pattern_template: non_empty(config.get_string(keys::IDENTIFIER_SEARCH_PATTERN, "")?),
            prefix: config.get_string(keys::IDENTIFIER_PREFIX, "")?,
            suffix: config.get_string(keys::IDENTIFIER_SUFFIX, "")?,
            exact_match_requested,
            case_sensitive_store: false,
        })
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}
