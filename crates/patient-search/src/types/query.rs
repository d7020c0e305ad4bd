//! Patient search input types and search mode classification.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Reference to a patient identifier type (e.g. "OpenMRS ID", "MRN").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdentifierTypeRef {
    /// Stable identifier of the type, compared by the store.
    pub uuid: String,
    /// Display name, for logging only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl IdentifierTypeRef {
    /// Creates a reference by uuid.
    pub fn new(uuid: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            name: None,
        }
    }

    /// Attaches a display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// The strategy chosen for a patient search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Restrict on names only.
    ByName,
    /// Restrict on identifiers (value and/or type) only.
    ByIdentifier,
    /// Match either names or identifiers.
    ByNameOrIdentifier,
    /// Match both names and identifiers.
    ByNameAndIdentifier,
}

impl SearchMode {
    /// Selects the search strategy for the given inputs.
    ///
    /// The combine flag wins outright. A lone name searches names, a lone
    /// identifier or type filter searches identifiers, and everything else
    /// (including all-blank input) restricts on both.
    pub fn classify(
        name: Option<&str>,
        identifier: Option<&str>,
        identifier_types: &[IdentifierTypeRef],
        combine_name_or_identifier: bool,
    ) -> Self {
        if combine_name_or_identifier {
            return SearchMode::ByNameOrIdentifier;
        }

        let no_identifier = is_blank(identifier) && identifier_types.is_empty();

        if !is_blank(name) && no_identifier {
            return SearchMode::ByName;
        }

        if is_blank(name) && !no_identifier {
            return SearchMode::ByIdentifier;
        }

        SearchMode::ByNameAndIdentifier
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::ByName => write!(f, "name"),
            SearchMode::ByIdentifier => write!(f, "identifier"),
            SearchMode::ByNameOrIdentifier => write!(f, "name-or-identifier"),
            SearchMode::ByNameAndIdentifier => write!(f, "name-and-identifier"),
        }
    }
}

impl FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(SearchMode::ByName),
            "identifier" => Ok(SearchMode::ByIdentifier),
            "name-or-identifier" => Ok(SearchMode::ByNameOrIdentifier),
            "name-and-identifier" => Ok(SearchMode::ByNameAndIdentifier),
            _ => Err(format!("unknown search mode: {}", s)),
        }
    }
}

/// Returns true for an absent value or one made only of whitespace.
pub fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

/// Returns `source` when `target` is blank and `source` is not; otherwise `target`.
pub fn copy_search_parameter(source: Option<&str>, target: Option<&str>) -> Option<String> {
    if !is_blank(source) && is_blank(target) {
        source.map(str::to_string)
    } else {
        target.map(str::to_string)
    }
}

/// A patient search request.
///
/// Created per invocation and never modified by the predicate builders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientSearchQuery {
    /// Free text name, possibly several words.
    #[serde(default)]
    pub name: Option<String>,
    /// Identifier text.
    #[serde(default)]
    pub identifier: Option<String>,
    /// Identifier types to restrict to.
    #[serde(default)]
    pub identifier_types: Vec<IdentifierTypeRef>,
    /// Match the identifier exactly instead of by pattern.
    #[serde(default)]
    pub match_identifier_exactly: bool,
    /// Find patients matching the name or the identifier rather than both.
    #[serde(default)]
    pub combine_name_or_identifier: bool,
}

impl PatientSearchQuery {
    /// Creates an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the name text.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the identifier text.
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Sets the identifier type filter.
    pub fn with_identifier_types(mut self, types: impl IntoIterator<Item = IdentifierTypeRef>) -> Self {
        self.identifier_types = types.into_iter().collect();
        self
    }

    /// Requests an exact identifier match.
    pub fn match_identifier_exactly(mut self, exact: bool) -> Self {
        self.match_identifier_exactly = exact;
        self
    }

    /// Searches names or identifiers instead of names and identifiers.
    pub fn search_names_or_identifiers(mut self, combine: bool) -> Self {
        self.combine_name_or_identifier = combine;
        self
    }

    /// Classifies this query.
    pub fn search_mode(&self) -> SearchMode {
        SearchMode::classify(
            self.name.as_deref(),
            self.identifier.as_deref(),
            &self.identifier_types,
            self.combine_name_or_identifier,
        )
    }

    /// Returns the `(name, identifier)` pair used in name-or-identifier mode.
    ///
    /// A single supplied term is searched as both a name and an identifier.
    /// The identifier is filled from the name first, then the name from the
    /// identifier.
    pub fn mirrored_terms(&self) -> (Option<String>, Option<String>) {
        let identifier = copy_search_parameter(self.name.as_deref(), self.identifier.as_deref());
        let name = copy_search_parameter(identifier.as_deref(), self.name.as_deref());
        (name, identifier)
    }
}
