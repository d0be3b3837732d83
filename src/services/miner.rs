use std::collections::{BTreeSet, HashSet};

use tracing::{debug, info};

use super::binarizer::IncidenceMatrix;

/// A frequent set of books with its support.
///
/// `items` is the canonical representation: sorted, deduplicated book ids.
/// All equality and subset reasoning in the pipeline goes through this
/// sorted sequence, never through any native set ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSet {
    pub items: Vec<u32>,
    /// Fraction of users endorsing every book in `items`, in [0, 1]
    pub support: f64,
}

/// Mines all itemsets with support >= `min_support` using a level-wise
/// Apriori search.
///
/// Level 1 scores every book present in the matrix. Each later level k
/// generates candidates only by joining surviving (k-1)-itemsets that share
/// a common prefix, then discards any candidate with an infrequent
/// (k-1)-subset before counting: by anti-monotonicity such a candidate
/// cannot be frequent, so it is never tested against the matrix. Candidate
/// support comes from intersecting the user sets of the two generating
/// subsets.
///
/// An empty matrix or an unreachable threshold yields an empty result, not
/// an error. Output order is deterministic: ascending by size, then
/// lexicographically by item ids.
pub fn mine(matrix: &IncidenceMatrix, min_support: f64) -> Vec<ItemSet> {
    let total = matrix.user_count();
    if total == 0 {
        info!("Incidence matrix is empty; no frequent itemsets");
        return Vec::new();
    }
    let total = total as f64;

    // Level 1: one candidate per book, user sets straight from the matrix
    // transpose. The transpose comes out sorted, and the join below
    // preserves lexicographic order, so every level stays sorted.
    let mut current: Vec<(Vec<u32>, BTreeSet<u32>)> = matrix
        .item_users()
        .into_iter()
        .filter(|(_, users)| users.len() as f64 / total >= min_support)
        .map(|(book_id, users)| (vec![book_id], users))
        .collect();

    let mut frequent = Vec::new();
    let mut level = 1;
    while !current.is_empty() {
        debug!(level, count = current.len(), "Frequent itemsets at level");
        frequent.extend(current.iter().map(|(items, users)| ItemSet {
            items: items.clone(),
            support: users.len() as f64 / total,
        }));
        current = next_level(&current, total, min_support);
        level += 1;
    }

    info!(
        itemsets = frequent.len(),
        min_support, "Frequent itemset mining finished"
    );
    frequent
}

/// Joins surviving k-itemsets into (k+1)-candidates and keeps the frequent
/// ones.
fn next_level(
    current: &[(Vec<u32>, BTreeSet<u32>)],
    total: f64,
    min_support: f64,
) -> Vec<(Vec<u32>, BTreeSet<u32>)> {
    let survivors: HashSet<&[u32]> = current.iter().map(|(items, _)| items.as_slice()).collect();

    let mut next = Vec::new();
    for (i, (left, left_users)) in current.iter().enumerate() {
        let k = left.len();
        for (right, right_users) in &current[i + 1..] {
            // Join step: two sorted k-itemsets produce a candidate only if
            // they differ in their last member alone. `current` is sorted,
            // so once the prefix diverges no later partner can match.
            if left[..k - 1] != right[..k - 1] {
                break;
            }
            let mut candidate = left.clone();
            candidate.push(right[k - 1]);

            if !all_subsets_frequent(&candidate, &survivors) {
                continue;
            }

            let users: BTreeSet<u32> = left_users.intersection(right_users).copied().collect();
            if users.len() as f64 / total >= min_support {
                next.push((candidate, users));
            }
        }
    }
    next
}

/// Prune check: every (k-1)-subset of the candidate must itself be frequent.
fn all_subsets_frequent(candidate: &[u32], survivors: &HashSet<&[u32]>) -> bool {
    (0..candidate.len()).all(|skip| {
        let subset: Vec<u32> = candidate
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != skip)
            .map(|(_, id)| *id)
            .collect();
        survivors.contains(subset.as_slice())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn support_of(itemsets: &[ItemSet], items: &[u32]) -> Option<f64> {
        itemsets
            .iter()
            .find(|s| s.items == items)
            .map(|s| s.support)
    }

    /// Five users; 1, 2 and 3 endorse both 10 and 20.
    fn shared_pair_matrix() -> IncidenceMatrix {
        IncidenceMatrix::from_endorsements([
            (1, 10),
            (1, 20),
            (2, 10),
            (2, 20),
            (3, 10),
            (3, 20),
            (4, 30),
            (5, 40),
        ])
    }

    #[test]
    fn test_shared_pair_is_frequent() {
        let itemsets = mine(&shared_pair_matrix(), 0.5);
        assert_eq!(support_of(&itemsets, &[10, 20]), Some(0.6));
        assert_eq!(support_of(&itemsets, &[10]), Some(0.6));
        assert_eq!(support_of(&itemsets, &[20]), Some(0.6));
        // 30 and 40 each reach only 0.2
        assert_eq!(support_of(&itemsets, &[30]), None);
    }

    #[test]
    fn test_empty_matrix_yields_empty_result() {
        let matrix = IncidenceMatrix::from_endorsements([]);
        assert!(mine(&matrix, 0.05).is_empty());
    }

    #[test]
    fn test_unreachable_support_yields_empty_result() {
        // min_support above 1 can never be met; still not an error
        assert!(mine(&shared_pair_matrix(), 1.1).is_empty());
    }

    #[test]
    fn test_all_singletons_qualify_at_low_support() {
        let itemsets = mine(&shared_pair_matrix(), 0.05);
        for book_id in [10, 20, 30, 40] {
            assert!(support_of(&itemsets, &[book_id]).is_some());
        }
    }

    #[test]
    fn test_triple_found_through_levels() {
        // Three users all endorse {1, 2, 3}; the search must reach level 3.
        let matrix = IncidenceMatrix::from_endorsements([
            (1, 1),
            (1, 2),
            (1, 3),
            (2, 1),
            (2, 2),
            (2, 3),
            (3, 1),
            (3, 2),
            (3, 3),
        ]);
        let itemsets = mine(&matrix, 1.0);
        assert_eq!(support_of(&itemsets, &[1, 2, 3]), Some(1.0));
        assert_eq!(itemsets.len(), 7);
    }

    #[test]
    fn test_anti_monotonicity_on_fixed_matrix() {
        let itemsets = mine(&shared_pair_matrix(), 0.05);
        for set in &itemsets {
            for skip in 0..set.items.len() {
                let subset: Vec<u32> = set
                    .items
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != skip)
                    .map(|(_, id)| *id)
                    .collect();
                if subset.is_empty() {
                    continue;
                }
                let subset_support = support_of(&itemsets, &subset)
                    .expect("every subset of a frequent itemset must be frequent");
                assert!(set.support <= subset_support);
            }
        }
    }

    #[test]
    fn test_output_order_is_size_then_lexicographic() {
        let itemsets = mine(&shared_pair_matrix(), 0.05);
        let keys: Vec<(usize, Vec<u32>)> = itemsets
            .iter()
            .map(|s| (s.items.len(), s.items.clone()))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }
}
