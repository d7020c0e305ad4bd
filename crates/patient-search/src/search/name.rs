//! Name predicate construction.

use crate::config::MatchPolicy;
use crate::predicate::{Field, Predicate};

use super::tokenizer::query_parts;

/// Builds name restrictions under a fixed [`MatchPolicy`].
#[derive(Debug, Clone, Copy)]
pub struct NameCriteria {
    policy: MatchPolicy,
}

impl NameCriteria {
    /// Creates a builder for one predicate build.
    pub fn new(policy: MatchPolicy) -> Self {
        Self { policy }
    }

    /// Returns the policy in use.
    pub fn policy(&self) -> &MatchPolicy {
        &self.policy
    }

    /// Builds the restriction for an already escaped name.
    ///
    /// Every word must match one of the name parts. From the second word on,
    /// a word may instead match as the tail of the phrase typed so far, so
    /// "mary ann" also finds a given name stored as "Mary Ann".
    /// A blank name yields the empty conjunction.
    pub fn build(&self, name: &str) -> Predicate {
        let parts = query_parts(Some(name)).unwrap_or_default();
        let mut conjuncts = Vec::with_capacity(parts.len());
        let mut multi_name = String::new();

        for (i, single) in parts.iter().enumerate() {
            let single_criterion = self.criterion_for_name(single);

            if i == 0 {
                multi_name.push_str(single);
                conjuncts.push(single_criterion);
            } else {
                multi_name.push(' ');
                multi_name.push_str(single);
                let multi_criterion = self.criterion_for_name(&multi_name);
                conjuncts.push(Predicate::or([single_criterion, multi_criterion]));
            }
        }

        Predicate::And(conjuncts)
    }

    /// Compares `name` against every name part of a non-voided name.
    ///
    /// Short names are matched exactly (ignoring case); longer ones use the
    /// configured match mode.
    pub fn criterion_for_name(&self, name: &str) -> Predicate {
        let comparisons = if self.policy.is_short_name(name) {
            Field::NAME_PARTS
                .iter()
                .map(|field| Predicate::eq_ignore_case(*field, name))
                .collect::<Vec<_>>()
        } else {
            Field::NAME_PARTS
                .iter()
                .map(|field| Predicate::like(*field, name, self.policy.match_mode))
                .collect()
        };

        Predicate::and([
            Predicate::not_voided(Field::NameVoided),
            Predicate::Or(comparisons),
        ])
    }
}
