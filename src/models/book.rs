use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// A catalog entry for a book
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Book {
    /// Unique identifier, referenced by ratings and mined rules
    pub id: u32,
    pub title: String,
    /// Missing in some source exports; never a placeholder string
    #[serde(default)]
    pub author: Option<String>,
}

/// Read-only book lookup built once from the books table.
///
/// Resolves ids to books and titles to ids (case-insensitive exact match).
/// Never mutated after construction, so it can be shared freely by
/// concurrent queries.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    books: BTreeMap<u32, Book>,
    title_index: HashMap<String, u32>,
}

impl Catalog {
    /// Builds the catalog and its title index.
    ///
    /// When two books share a title (ignoring case), the first one wins the
    /// title lookup.
    pub fn new(books: Vec<Book>) -> Self {
        let mut title_index = HashMap::with_capacity(books.len());
        let mut by_id = BTreeMap::new();
        for book in books {
            title_index
                .entry(book.title.to_lowercase())
                .or_insert(book.id);
            by_id.insert(book.id, book);
        }
        Self {
            books: by_id,
            title_index,
        }
    }

    /// Resolves a title to a book id, ignoring case. `None` if absent.
    pub fn resolve_title(&self, title: &str) -> Option<u32> {
        self.title_index.get(&title.to_lowercase()).copied()
    }

    pub fn get(&self, id: u32) -> Option<&Book> {
        self.books.get(&id)
    }

    pub fn title_of(&self, id: u32) -> Option<&str> {
        self.books.get(&id).map(|b| b.title.as_str())
    }

    pub fn contains(&self, id: u32) -> bool {
        self.books.contains_key(&id)
    }

    /// Title of the lowest-id book, used as the demo query fallback
    pub fn first_title(&self) -> Option<&str> {
        self.books.values().next().map(|b| b.title.as_str())
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
