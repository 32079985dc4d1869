//! Live search filter over table records
//!
//! The filter never touches the source collection: a [`FilteredView`] keeps
//! the full record list and recomputes the visible subset every time the
//! query changes.

use crate::core::entity::Data;

/// Check whether a record should be visible for `query`.
///
/// An empty query matches everything. Otherwise the query is lowercased and
/// the record matches when any rendered column contains it; the first
/// matching column short-circuits the scan.
pub fn matches<T: Data>(record: &T, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let needle = query.to_lowercase();
    T::columns().iter().any(|column| {
        record
            .field_value(column)
            .is_some_and(|value| value.render().to_lowercase().contains(&needle))
    })
}

/// A record collection with a live text filter applied on top.
#[derive(Debug, Clone)]
pub struct FilteredView<T> {
    source: Vec<T>,
    query: String,
}

impl<T> Default for FilteredView<T> {
    fn default() -> Self {
        Self {
            source: Vec::new(),
            query: String::new(),
        }
    }
}

impl<T: Data> FilteredView<T> {
    /// Create a view over `source` with an empty query
    pub fn new(source: Vec<T>) -> Self {
        Self {
            source,
            query: String::new(),
        }
    }

    /// Replace the backing collection, keeping the current query
    pub fn set_source(&mut self, source: Vec<T>) {
        self.source = source;
    }

    /// Change the query; the visible subset follows on the next read
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// The full, unfiltered collection
    pub fn source(&self) -> &[T] {
        &self.source
    }

    /// Records passing the current query, in source order
    pub fn visible(&self) -> Vec<&T> {
        self.source
            .iter()
            .filter(|record| matches(*record, &self.query))
            .collect()
    }

    /// The `index`-th visible record
    pub fn visible_at(&self, index: usize) -> Option<&T> {
        self.source
            .iter()
            .filter(|record| matches(*record, &self.query))
            .nth(index)
    }

    pub fn visible_len(&self) -> usize {
        self.source
            .iter()
            .filter(|record| matches(*record, &self.query))
            .count()
    }
}
