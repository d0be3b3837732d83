use std::cmp::Ordering;

use serde::Serialize;
use tracing::debug;

use super::rules::Rule;
use crate::models::Catalog;

/// One ranked answer to a "readers of X also endorsed" query
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Recommendation {
    pub title: String,
    pub confidence: f64,
}

/// Query surface over an immutable catalog and mined rule set.
///
/// Nothing here is mutated after construction, so one `Recommender` can
/// serve any number of concurrent queries without synchronization. Every
/// query recomputes from the full rule set; there is no cursor state.
#[derive(Debug, Clone)]
pub struct Recommender {
    catalog: Catalog,
    rules: Vec<Rule>,
}

impl Recommender {
    pub fn new(catalog: Catalog, rules: Vec<Rule>) -> Self {
        Self { catalog, rules }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Returns up to `top_n` recommendations for a book title, ranked by
    /// confidence.
    ///
    /// The title match is case-insensitive and exact; an unknown title
    /// yields an empty list, not an error. Rules whose antecedent contains
    /// the resolved book are sorted by confidence descending with a stable
    /// sort, so equal-confidence rules keep their discovery order and
    /// repeated queries are deterministic. Of the first `top_n` rules, any
    /// whose consequent contains an id missing from the catalog is dropped
    /// (the catalog and rule set may come from different snapshots); the
    /// reported title is the lowest-id member of the consequent.
    pub fn recommend(&self, title: &str, top_n: usize) -> Vec<Recommendation> {
        let Some(book_id) = self.catalog.resolve_title(title) else {
            debug!(title, "Query title not found in catalog");
            return Vec::new();
        };

        let mut matching: Vec<&Rule> = self
            .rules
            .iter()
            .filter(|rule| rule.antecedent.binary_search(&book_id).is_ok())
            .collect();
        if matching.is_empty() {
            debug!(title, book_id, "No rules cover the queried book");
            return Vec::new();
        }

        // Stable sort keeps rule discovery order as the tie-break.
        matching.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
        });

        matching
            .into_iter()
            .take(top_n)
            .filter_map(|rule| self.resolve_consequent(rule))
            .collect()
    }

    fn resolve_consequent(&self, rule: &Rule) -> Option<Recommendation> {
        if !rule.consequent.iter().all(|id| self.catalog.contains(*id)) {
            debug!(?rule.consequent, "Dropping rule with unresolvable consequent");
            return None;
        }
        let title = self.catalog.title_of(rule.consequent[0])?;
        Some(Recommendation {
            title: title.to_string(),
            confidence: rule.confidence,
        })
    }
}
