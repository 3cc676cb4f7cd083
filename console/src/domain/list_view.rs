//! List view model shared by the users and courses screens.
//!
//! A [`ListViewModel`] owns the last successfully fetched collection, the
//! filter inputs, the filter panel flag, and the load state. It never talks
//! to a Gateway itself; screen controllers feed it fetch results.

use super::list_filter::{FilterState, Filterable, visible_items};

/// Progress of the most recent collection fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing requested yet.
    #[default]
    Idle,
    Loading,
    Ready,
    /// The last fetch failed; `message` is the localised banner text.
    Failed { message: String },
}

/// Collection, filter inputs, and load state of one list screen visit.
#[derive(Debug, Clone)]
pub struct ListViewModel<T: Filterable> {
    items: Option<Vec<T>>,
    filter: FilterState<T::Category>,
    state: LoadState,
    filters_visible: bool,
}

impl<T: Filterable> Default for ListViewModel<T> {
    fn default() -> Self {
        Self {
            items: None,
            filter: FilterState::default(),
            state: LoadState::Idle,
            filters_visible: false,
        }
    }
}

impl<T: Filterable> ListViewModel<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a fetch as started. Previously loaded items stay visible.
    pub fn begin_load(&mut self) {
        self.state = LoadState::Loading;
    }

    /// Replace the collection with a fresh fetch result and clear any error.
    pub fn apply_loaded(&mut self, items: Vec<T>) {
        self.items = Some(items);
        self.state = LoadState::Ready;
    }

    /// Record a failed fetch while keeping the previous collection.
    pub fn apply_failure(&mut self, message: impl Into<String>) {
        self.state = LoadState::Failed {
            message: message.into(),
        };
    }

    /// Hide the error banner without refetching.
    pub fn dismiss_error(&mut self) {
        if matches!(self.state, LoadState::Failed { .. }) {
            self.state = if self.items.is_some() {
                LoadState::Ready
            } else {
                LoadState::Idle
            };
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading)
    }

    /// Banner text of the last failed fetch, if any.
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Failed { message } => Some(message.as_str()),
            _ => None,
        }
    }

    /// Every loaded item, ignoring the filter.
    pub fn all_items(&self) -> &[T] {
        self.items.as_deref().unwrap_or_default()
    }

    /// Items passing the current filter, in collection order.
    pub fn visible_items(&self) -> Vec<&T> {
        visible_items(self.all_items(), &self.filter)
    }

    /// Whether a collection has arrived and the filter leaves nothing to show.
    pub fn is_empty_view(&self) -> bool {
        self.items.is_some() && self.visible_items().is_empty()
    }

    pub fn find(&self, id: &T::Id) -> Option<&T> {
        self.all_items().iter().find(|item| item.id() == id)
    }

    /// Drop one item locally. Returns whether anything was removed.
    pub fn remove(&mut self, id: &T::Id) -> bool {
        let Some(items) = self.items.as_mut() else {
            return false;
        };
        let before = items.len();
        items.retain(|item| item.id() != id);
        items.len() != before
    }

    pub fn filter(&self) -> &FilterState<T::Category> {
        &self.filter
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.filter.set_search_term(term);
    }

    pub fn set_category(&mut self, category: Option<T::Category>) {
        self.filter.set_category(category);
    }

    pub fn filters_visible(&self) -> bool {
        self.filters_visible
    }

    pub fn toggle_filter_panel(&mut self) {
        self.filters_visible = !self.filters_visible;
    }

    /// Close the filter panel. Filtering is already live, so nothing else
    /// changes.
    pub fn apply_filters(&mut self) {
        self.filters_visible = false;
    }

    /// Clear the category filter. The search term is left untouched.
    pub fn reset_filters(&mut self) {
        self.filter.set_category(None);
    }
}
