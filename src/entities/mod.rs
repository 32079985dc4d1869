//! Catalog record types

pub mod category;

pub use category::{Category, CategoryDraft, parse_weight};
