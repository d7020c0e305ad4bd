//! Identifier predicate construction.
//!
//! Identifier search is driven by administrator templates. A template may use
//! three markers, replaced with parts of the searched identifier:
//!
//! | Marker | Replacement |
//! |--------|-------------|
//! | `@SEARCH@` | the whole identifier |
//! | `@SEARCH-1@` | all but the last character |
//! | `@CHECKDIGIT@` | the last character |
//!
//! For one-character identifiers `@SEARCH-1@` and `@CHECKDIGIT@` are empty.
//!
//! A regex template starting with `^<c>*` declares `<c>` as padding: leading
//! runs of `<c>` are stripped from the identifier before substitution.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{trace, warn};

use crate::config::{IdentifierSearchPolicy, StoreDialect};
use crate::predicate::{Field, MatchMode, Predicate};
use crate::types::IdentifierTypeRef;

/// Marker for the whole identifier.
pub const SEARCH: &str = "@SEARCH@";
/// Marker for the identifier without its check digit.
pub const SEARCH_MINUS_ONE: &str = "@SEARCH-1@";
/// Marker for the check digit.
pub const CHECK_DIGIT: &str = "@CHECKDIGIT@";

static PAD_ANCHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\^(.)\*").expect("invalid pad anchor regex"));

/// Builds identifier restrictions under a fixed [`IdentifierSearchPolicy`].
#[derive(Debug, Clone)]
pub struct IdentifierCriteria<'a> {
    policy: IdentifierSearchPolicy,
    dialect: &'a StoreDialect,
}

impl<'a> IdentifierCriteria<'a> {
    /// Creates a builder for one predicate build.
    pub fn new(policy: IdentifierSearchPolicy, dialect: &'a StoreDialect) -> Self {
        Self { policy, dialect }
    }

    /// Builds the restriction for an identifier and type filter.
    ///
    /// Always requires a non-voided identifier. A blank identifier adds no
    /// value restriction; a non-empty type list is applied either way.
    pub fn build(&self, identifier: Option<&str>, identifier_types: &[IdentifierTypeRef]) -> Predicate {
        let mut conjuncts = vec![Predicate::not_voided(Field::IdentifierVoided)];

        if let Some(identifier) = identifier.filter(|i| !i.trim().is_empty()) {
            let escaped = self.dialect.escape_wildcards(identifier);
            conjuncts.push(if self.policy.exact_match_requested {
                self.exact_criterion(&escaped)
            } else {
                self.pattern_criterion(&escaped)
            });
        }

        if !identifier_types.is_empty() {
            conjuncts.push(Predicate::in_values(
                Field::IdentifierType,
                identifier_types.iter().map(|t| t.uuid.as_str()),
            ));
        }

        Predicate::And(conjuncts)
    }

    /// Equality on the identifier value.
    ///
    /// `identifier` arrives LIKE-escaped (`MRN_001` compares as `MRN\_001`),
    /// the same as template list values; executors that compare these
    /// values with `=` or `IN` must strip the store escape first.
    ///
    /// Case is only folded when the store would otherwise compare
    /// case-sensitively, so native case-insensitive collations stay in charge.
    fn exact_criterion(&self, identifier: &str) -> Predicate {
        Predicate::Eq {
            field: Field::IdentifierValue,
            value: identifier.into(),
            ignore_case: self.policy.case_sensitive_store,
        }
    }

    fn pattern_criterion(&self, identifier: &str) -> Predicate {
        let policy = &self.policy;

        let identifier = match policy.regex_template.as_deref() {
            Some(regex) => remove_padding(identifier, regex),
            None => Cow::Borrowed(identifier),
        };

        if let Some(patterns) = policy.pattern_template.as_deref() {
            let values: Vec<String> = split_templates(patterns)
                .into_iter()
                .map(|template| replace_search_string(template, &identifier))
                .collect();
            trace!(patterns = ?values, "Expanded identifier search patterns");
            return Predicate::in_values(Field::IdentifierValue, values);
        }

        match policy.regex_template.as_deref() {
            Some(regex) if self.dialect.supports_regex => {
                let pattern = replace_search_string(regex, &identifier);
                trace!(pattern = %pattern, "Expanded identifier regex");
                Predicate::raw_pattern(Field::IdentifierValue, pattern)
            }
            _ => Predicate::ilike(
                Field::IdentifierValue,
                format!("{}{}{}", policy.prefix, identifier, policy.suffix),
                MatchMode::Anywhere,
            ),
        }
    }
}

/// Replaces the template markers with parts of `identifier`.
pub fn replace_search_string(template: &str, identifier: &str) -> String {
    let replaced = template.replace(SEARCH, identifier);

    let (body, check_digit) = match identifier.char_indices().last() {
        Some((last, _)) if last > 0 => identifier.split_at(last),
        _ => ("", ""),
    };

    replaced
        .replace(SEARCH_MINUS_ONE, body)
        .replace(CHECK_DIGIT, check_digit)
}

/// Returns the padding character declared by a `^<c>*` regex template.
pub fn padding_char(regex: &str) -> Option<char> {
    PAD_ANCHOR
        .captures(regex)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().chars().next())
}

/// Strips the leading padding declared by `regex` from `identifier`.
///
/// Templates without a pad anchor leave the identifier untouched.
pub fn remove_padding<'a>(identifier: &'a str, regex: &str) -> Cow<'a, str> {
    let Some(pad) = padding_char(regex) else {
        return Cow::Borrowed(identifier);
    };

    match Regex::new(&format!("^(?:{})+", regex::escape(&pad.to_string()))) {
        Ok(leading) => {
            let stripped = leading.replace(identifier, "");
            trace!(identifier = %identifier, stripped = %stripped, pad = %pad, "Removed identifier padding");
            stripped
        }
        Err(e) => {
            warn!(pad = %pad, error = %e, "Skipping identifier padding removal");
            Cow::Borrowed(identifier)
        }
    }
}

/// Splits a comma separated template list, dropping trailing empty entries.
pub fn split_templates(patterns: &str) -> Vec<&str> {
    let mut templates: Vec<&str> = patterns.split(',').collect();
    while templates.last().is_some_and(|t| t.is_empty()) {
        templates.pop();
    }
    templates
}
