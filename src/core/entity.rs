//! Entity traits defining the core abstraction for catalog records

use crate::core::field::FieldValue;

/// Base trait for all persisted records.
///
/// Every record carries two identities:
/// - a surrogate key assigned by the storage backend (`None` until saved)
/// - a human-readable business id (e.g. `CAT-042`) generated client-side
///
/// Neither changes once the record is persisted.
pub trait Entity: Clone + Send + Sync + 'static {
    /// The plural resource name (e.g., "categories")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "category")
    fn resource_name_singular() -> &'static str;

    /// Surrogate storage key, `None` for transient records
    fn key(&self) -> Option<i64>;

    /// Return a copy of this record stamped with a storage key
    fn with_key(self, key: i64) -> Self;

    /// Business-facing unique identifier
    fn business_id(&self) -> &str;
}

/// Trait for records that are displayed in a table and searched.
///
/// Columns are exposed through explicit typed accessors, one per column,
/// so no field is ever looked up by reflection.
pub trait Data: Entity {
    /// Column names in display order
    fn columns() -> &'static [&'static str];

    /// Get the value of a specific column by name
    fn field_value(&self, column: &str) -> Option<FieldValue>;

    /// Render every column in display order
    fn render_row(&self) -> Vec<String> {
        Self::columns()
            .iter()
            .map(|column| {
                self.field_value(column)
                    .map(|value| value.render())
                    .unwrap_or_default()
            })
            .collect()
    }
}
