use serde::{Deserialize, Serialize};

/// A single rating a user gave a book, on a 1-5 scale.
///
/// Immutable once loaded; the source of truth for endorsement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rating {
    pub user_id: u32,
    pub book_id: u32,
    pub rating: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_deserializes_from_csv_row() {
        let mut reader = csv::Reader::from_reader("user_id,book_id,rating\n7,42,5\n".as_bytes());
        let ratings: Vec<Rating> = reader.deserialize().collect::<Result<_, _>>().unwrap();
        assert_eq!(
            ratings,
            vec![Rating {
                user_id: 7,
                book_id: 42,
                rating: 5
            }]
        );
    }
}
