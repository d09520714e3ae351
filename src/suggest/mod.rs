//! Search suggestions.
//!
//! - Provider: stable case-insensitive substring filter over a fixed corpus.
//! - [`debounce`]: the per-input controller that decides when to fetch.

pub mod debounce;

/// Minimum normalized query length before any suggestions are produced.
pub const MIN_QUERY_LEN: usize = 2;

/// A single dropdown entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Suggestion {
    pub label: String,
}

impl Suggestion {
    fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
        }
    }
}

/// Ordered corpus of known product names, matched by containment.
#[derive(Clone, Debug)]
pub struct SuggestionProvider {
    corpus: Vec<String>,
}

impl SuggestionProvider {
    pub fn new(corpus: Vec<String>) -> Self {
        Self { corpus }
    }

    /// The stock catalog shipped with the demo host.
    pub fn default_catalog() -> Self {
        Self::new(
            [
                "iPhone 15",
                "Samsung Galaxy",
                "Nike shoes",
                "Adidas sneakers",
                "Laptop Dell",
                "MacBook Pro",
                "Milk Amul",
                "Bread Britannia",
                "Jeans Levi's",
                "T-shirt Nike",
                "Headphones Sony",
                "Watch Apple",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        )
    }

    /// Case-insensitive substring matches in corpus order, at most `limit`.
    /// Queries shorter than [`MIN_QUERY_LEN`] after trimming produce nothing.
    /// An empty result means "render no dropdown".
    pub fn suggest(&self, query: &str, limit: usize) -> Vec<Suggestion> {
        let needle = query.trim().to_lowercase();
        if needle.chars().count() < MIN_QUERY_LEN {
            return Vec::new();
        }
        self.corpus
            .iter()
            .filter(|entry| entry.to_lowercase().contains(&needle))
            .take(limit)
            .map(|entry| Suggestion::new(entry))
            .collect()
    }
}
