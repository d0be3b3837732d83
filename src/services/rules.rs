use std::collections::HashMap;

use serde::Serialize;
use tracing::info;

use super::miner::ItemSet;

/// A directional association rule: users endorsing every book in
/// `antecedent` tend to endorse every book in `consequent`.
///
/// Both sides are canonical sorted id sequences, disjoint and non-empty;
/// their union is one of the mined frequent itemsets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    pub antecedent: Vec<u32>,
    pub consequent: Vec<u32>,
    /// Support of antecedent ∪ consequent
    pub support: f64,
    /// support(antecedent ∪ consequent) / support(antecedent)
    pub confidence: f64,
}

/// Expands frequent itemsets into rules meeting `min_confidence`.
///
/// Every non-empty proper subset of each itemset of size >= 2 becomes an
/// antecedent; the remainder is the consequent. Both supports are looked up
/// in the mined results — the antecedent is itself frequent by
/// anti-monotonicity, so nothing is recounted against the matrix.
///
/// The enumeration order (itemsets in mined order, antecedents in ascending
/// bitmask order) is deterministic and serves as the stable tie-break for
/// equal-confidence rules at query time. An empty itemset list yields an
/// empty rule list.
pub fn generate_rules(itemsets: &[ItemSet], min_confidence: f64) -> Vec<Rule> {
    let supports: HashMap<&[u32], f64> = itemsets
        .iter()
        .map(|s| (s.items.as_slice(), s.support))
        .collect();

    let mut rules = Vec::new();
    for itemset in itemsets.iter().filter(|s| s.items.len() >= 2) {
        let k = itemset.items.len();
        // Masks 1 .. 2^k-1 exclusive: every non-empty proper subset.
        for mask in 1u32..((1 << k) - 1) {
            let (antecedent, consequent) = split_by_mask(&itemset.items, mask);

            let Some(&antecedent_support) = supports.get(antecedent.as_slice()) else {
                continue;
            };
            let confidence = itemset.support / antecedent_support;
            if confidence >= min_confidence {
                rules.push(Rule {
                    antecedent,
                    consequent,
                    support: itemset.support,
                    confidence,
                });
            }
        }
    }

    info!(
        rules = rules.len(),
        min_confidence, "Generated association rules"
    );
    rules
}

/// Splits a sorted itemset into (mask members, the rest), keeping order, so
/// both halves stay canonical.
fn split_by_mask(items: &[u32], mask: u32) -> (Vec<u32>, Vec<u32>) {
    let mut inside = Vec::new();
    let mut outside = Vec::new();
    for (i, id) in items.iter().enumerate() {
        if mask & (1 << i) != 0 {
            inside.push(*id);
        } else {
            outside.push(*id);
        }
    }
    (inside, outside)
}
