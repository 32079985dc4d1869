//! Field value types used by table cells and the live filter

/// A polymorphic column value
///
/// Every column of a record is exposed through one of these so the table and
/// the search filter can treat heterogeneous columns uniformly.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Float(f64),
}

impl FieldValue {
    /// Render the value as the text shown in a table cell.
    ///
    /// Whole floats keep one fractional digit (`12.0`), so the rendered text
    /// is also what the user types into the search box.
    pub fn render(&self) -> String {
        match self {
            FieldValue::String(s) => s.clone(),
            FieldValue::Float(f) => render_float(*f),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

/// Format a float the way weights are displayed.
///
/// Whole values always carry `.0`, however large; values are written out in
/// plain decimal, never in exponent form (`10000000.0`, not `1.0E7`).
pub fn render_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}
