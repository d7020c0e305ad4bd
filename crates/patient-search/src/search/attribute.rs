//! Person attribute restrictions for free-text patient search.

use crate::config::{ConfigurationProvider, keys};
use crate::error::SearchResult;
use crate::predicate::{Field, MatchMode, Predicate};

use super::tokenizer::query_parts;

/// Builds the restriction for one word against searchable person attributes.
pub trait AttributeCriteria: Send + Sync {
    /// Reads the attribute match mode from configuration.
    fn match_mode(&self, config: &dyn ConfigurationProvider) -> SearchResult<MatchMode>;

    /// Restriction matching one word against the searchable attributes.
    fn criterion_for_attribute(&self, value: &str, mode: MatchMode) -> Predicate;
}

/// Matches words against the values of a fixed set of attribute types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchableAttributes {
    attribute_types: Vec<String>,
}

impl SearchableAttributes {
    /// Creates the collaborator for the given attribute type uuids.
    ///
    /// An empty list matches values of any attribute type.
    pub fn new(attribute_types: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            attribute_types: attribute_types.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the attribute types searched.
    pub fn attribute_types(&self) -> &[String] {
        &self.attribute_types
    }
}

impl AttributeCriteria for SearchableAttributes {
    fn match_mode(&self, config: &dyn ConfigurationProvider) -> SearchResult<MatchMode> {
        let mode = config.get_string(keys::ATTRIBUTE_SEARCH_MATCH_MODE, keys::MATCH_EXACT)?;
        Ok(if mode.eq_ignore_ascii_case(keys::MATCH_ANYWHERE) {
            MatchMode::Anywhere
        } else {
            MatchMode::Exact
        })
    }

    fn criterion_for_attribute(&self, value: &str, mode: MatchMode) -> Predicate {
        let mut conjuncts = vec![Predicate::not_voided(Field::AttributeVoided)];

        if !self.attribute_types.is_empty() {
            conjuncts.push(Predicate::in_values(
                Field::AttributeType,
                self.attribute_types.iter().map(String::as_str),
            ));
        }

        conjuncts.push(match mode {
            MatchMode::Exact => Predicate::eq_ignore_case(Field::AttributeValue, value),
            _ => Predicate::ilike(Field::AttributeValue, value, mode),
        });

        Predicate::And(conjuncts)
    }
}

/// Requires every word of an escaped query to match an attribute.
///
/// A blank query yields the empty conjunction.
pub fn attribute_predicate(
    attributes: &dyn AttributeCriteria,
    query: &str,
    mode: MatchMode,
) -> Predicate {
    let parts = query_parts(Some(query)).unwrap_or_default();
    Predicate::and(
        parts
            .into_iter()
            .map(|part| attributes.criterion_for_attribute(part, mode)),
    )
}
