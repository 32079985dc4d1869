//! The category table: a filtered view plus row selection

use crate::core::{Data, Entity, FilteredView};
use crate::entities::Category;

/// Column headers in display order
pub const HEADERS: [&str; 6] = ["Category ID", "Brand", "Type", "Size", "Weight", "Unit"];

/// Table bound to the loaded categories.
///
/// Selection is tracked by storage key, so it survives query changes as long
/// as the selected row stays visible.
#[derive(Debug, Clone, Default)]
pub struct CategoryTable {
    view: FilteredView<Category>,
    selected: Option<i64>,
}

impl CategoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every row with a fresh load; clears the selection
    pub fn reload(&mut self, records: Vec<Category>) {
        self.view.set_source(records);
        self.selected = None;
    }

    /// Apply a new search query
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.view.set_query(query);
        if self.selected().is_none() {
            self.selected = None;
        }
    }

    pub fn query(&self) -> &str {
        self.view.query()
    }

    /// Select the `index`-th visible row, or clear the selection
    pub fn select(&mut self, index: Option<usize>) -> Option<&Category> {
        self.selected = index
            .and_then(|i| self.view.visible_at(i))
            .and_then(|record| record.key());
        self.selected()
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// The selected row, if it is still visible
    pub fn selected(&self) -> Option<&Category> {
        let key = self.selected?;
        self.view
            .visible()
            .into_iter()
            .find(|record| record.key() == Some(key))
    }

    /// Every loaded record, ignoring the query
    pub fn records(&self) -> &[Category] {
        self.view.source()
    }

    /// Visible records in display order
    pub fn visible(&self) -> Vec<&Category> {
        self.view.visible()
    }

    /// Visible rows rendered as cell text
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.view
            .visible()
            .into_iter()
            .map(|record| record.render_row())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<Category> {
        vec![
            Category::stored(1, "CAT-001", "Nike", "Shoes", "M", 0.8, "kg"),
            Category::stored(2, "CAT-002", "Adidas", "Shorts", "S", 0.3, "kg"),
            Category::stored(3, "CAT-003", "Nike", "Socks", "L", 0.1, "g"),
        ]
    }

    #[test]
    fn test_select_by_visible_index() {
        let mut table = CategoryTable::new();
        table.reload(records());
        table.set_query("nike");

        let selected = table.select(Some(1)).unwrap();
        assert_eq!(selected.category_id, "CAT-003");
    }

    #[test]
    fn test_select_out_of_range_clears() {
        let mut table = CategoryTable::new();
        table.reload(records());
        table.select(Some(0));
        assert!(table.select(Some(10)).is_none());
        assert!(table.selected().is_none());
    }

    #[test]
    fn test_selection_dropped_when_filtered_out() {
        let mut table = CategoryTable::new();
        table.reload(records());
        table.select(Some(1));
        assert_eq!(table.selected().unwrap().brand, "Adidas");

        table.set_query("nike");
        assert!(table.selected().is_none());

        table.set_query("");
        assert!(table.selected().is_none());
    }

    #[test]
    fn test_selection_survives_matching_query() {
        let mut table = CategoryTable::new();
        table.reload(records());
        table.select(Some(0));

        table.set_query("CAT-001");
        assert_eq!(table.selected().unwrap().id, Some(1));
    }

    #[test]
    fn test_reload_clears_selection_and_keeps_query() {
        let mut table = CategoryTable::new();
        table.reload(records());
        table.set_query("adidas");
        table.select(Some(0));

        table.reload(records());
        assert!(table.selected().is_none());
        assert_eq!(table.query(), "adidas");
        assert_eq!(table.rows(), vec![vec!["CAT-002", "Adidas", "Shorts", "S", "0.3", "kg"]]);
        assert_eq!(table.records().len(), 3);
    }
}
