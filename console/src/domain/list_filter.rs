//! Client-side filtering shared by the users and courses screens.
//!
//! The visible subset is always derived from `(collection, filter state)` on
//! demand. Nothing here caches a filtered copy, so there is no stale view to
//! invalidate when either input changes.

/// An entity the list screens can search and categorise.
pub trait Filterable {
    /// Identity used to address one item (edit, delete).
    type Id: PartialEq;
    /// Exact-match categorical field (course level, user role).
    type Category: Copy + PartialEq;

    fn id(&self) -> &Self::Id;

    /// Text fields matched by the free-text search.
    fn search_fields(&self) -> Vec<&str>;

    fn category(&self) -> Self::Category;
}

/// Current search term and optional category filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState<C> {
    search_term: String,
    category: Option<C>,
}

impl<C> Default for FilterState<C> {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            category: None,
        }
    }
}

impl<C: Copy + PartialEq> FilterState<C> {
    pub fn search_term(&self) -> &str {
        self.search_term.as_str()
    }

    pub fn category(&self) -> Option<C> {
        self.category
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn set_category(&mut self, category: Option<C>) {
        self.category = category;
    }

    /// Whether `item` passes both the search and the category filter.
    pub fn matches<T>(&self, item: &T) -> bool
    where
        T: Filterable<Category = C>,
    {
        self.matches_search(item) && self.matches_category(item)
    }

    fn matches_search<T: Filterable>(&self, item: &T) -> bool {
        if self.search_term.is_empty() {
            return true;
        }
        let needle = self.search_term.to_lowercase();
        item.search_fields()
            .into_iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    fn matches_category<T>(&self, item: &T) -> bool
    where
        T: Filterable<Category = C>,
    {
        self.category
            .is_none_or(|category| item.category() == category)
    }
}

/// Derive the visible subset of `items`, preserving collection order.
pub fn visible_items<'a, T: Filterable>(
    items: &'a [T],
    filter: &FilterState<T::Category>,
) -> Vec<&'a T> {
    items.iter().filter(|item| filter.matches(*item)).collect()
}
