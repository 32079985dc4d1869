//! The category form: inputs, bound table and the controller tying them to storage

pub mod controller;
pub mod fields;
pub mod table;

pub use controller::{FormAction, FormController, FormState, Outcome};
pub use fields::{ComboField, FormFields};
pub use table::{CategoryTable, HEADERS};
