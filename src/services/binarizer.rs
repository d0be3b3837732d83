use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::models::Rating;

/// Rating at or above which a rating counts as a positive endorsement
pub const DEFAULT_ENDORSEMENT_THRESHOLD: u8 = 4;

/// Sparse boolean user-book matrix: which users positively endorsed which
/// books.
///
/// Only present (user, book) cells are stored; everything else is implicitly
/// false. A user with no qualifying rating has no row at all. Built once per
/// mining run and read-only afterward.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncidenceMatrix {
    endorsements: BTreeMap<u32, BTreeSet<u32>>,
}

impl IncidenceMatrix {
    /// Builds a matrix directly from (user_id, book_id) endorsement pairs.
    ///
    /// Duplicates collapse; input order is irrelevant.
    pub fn from_endorsements(pairs: impl IntoIterator<Item = (u32, u32)>) -> Self {
        let mut endorsements: BTreeMap<u32, BTreeSet<u32>> = BTreeMap::new();
        for (user_id, book_id) in pairs {
            endorsements.entry(user_id).or_default().insert(book_id);
        }
        Self { endorsements }
    }

    /// Number of users with at least one endorsement (the support
    /// denominator)
    pub fn user_count(&self) -> usize {
        self.endorsements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endorsements.is_empty()
    }

    /// The books a user endorsed, if the user appears in the matrix
    pub fn endorsed_by(&self, user_id: u32) -> Option<&BTreeSet<u32>> {
        self.endorsements.get(&user_id)
    }

    /// Transposes the matrix: for each book, the set of endorsing users.
    ///
    /// This is the shape the miner's level-1 pass consumes.
    pub fn item_users(&self) -> BTreeMap<u32, BTreeSet<u32>> {
        let mut items: BTreeMap<u32, BTreeSet<u32>> = BTreeMap::new();
        for (user_id, books) in &self.endorsements {
            for book_id in books {
                items.entry(*book_id).or_default().insert(*user_id);
            }
        }
        items
    }
}

/// Converts the ratings table into an [`IncidenceMatrix`].
///
/// Ratings below `threshold` are discarded; the rest mark their (user, book)
/// cell. The result is a pure function of the rating *set*, independent of
/// row order.
pub fn binarize(ratings: &[Rating], threshold: u8) -> IncidenceMatrix {
    let matrix = IncidenceMatrix::from_endorsements(
        ratings
            .iter()
            .filter(|r| r.rating >= threshold)
            .map(|r| (r.user_id, r.book_id)),
    );
    debug!(
        users = matrix.user_count(),
        threshold, "Built user-book incidence matrix"
    );
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rating(user_id: u32, book_id: u32, rating: u8) -> Rating {
        Rating {
            user_id,
            book_id,
            rating,
        }
    }

    #[test]
    fn test_only_endorsements_survive() {
        let ratings = vec![rating(1, 10, 5), rating(1, 20, 3), rating(2, 10, 4)];
        let matrix = binarize(&ratings, DEFAULT_ENDORSEMENT_THRESHOLD);
        assert_eq!(matrix.user_count(), 2);
        assert_eq!(
            matrix.endorsed_by(1),
            Some(&BTreeSet::from([10]))
        );
        assert_eq!(
            matrix.endorsed_by(2),
            Some(&BTreeSet::from([10]))
        );
    }

    #[test]
    fn test_user_with_no_endorsement_is_absent() {
        let ratings = vec![rating(1, 10, 4), rating(2, 10, 1), rating(2, 20, 2)];
        let matrix = binarize(&ratings, 4);
        assert_eq!(matrix.user_count(), 1);
        assert_eq!(matrix.endorsed_by(2), None);
    }

    #[test]
    fn test_row_order_is_irrelevant() {
        let mut ratings = vec![rating(1, 10, 5), rating(2, 20, 4), rating(1, 30, 4)];
        let forward = binarize(&ratings, 4);
        ratings.reverse();
        let backward = binarize(&ratings, 4);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_duplicate_pairs_collapse() {
        let ratings = vec![rating(1, 10, 4), rating(1, 10, 5)];
        let matrix = binarize(&ratings, 4);
        assert_eq!(matrix.endorsed_by(1).unwrap().len(), 1);
    }

    #[test]
    fn test_custom_threshold() {
        let ratings = vec![rating(1, 10, 3)];
        assert!(binarize(&ratings, 4).is_empty());
        assert_eq!(binarize(&ratings, 3).user_count(), 1);
    }

    #[test]
    fn test_item_users_transpose() {
        let matrix = IncidenceMatrix::from_endorsements([(1, 10), (2, 10), (2, 20)]);
        let items = matrix.item_users();
        assert_eq!(items[&10], BTreeSet::from([1, 2]));
        assert_eq!(items[&20], BTreeSet::from([2]));
    }
}
