//! Shared test harness for storage backend testing
//!
//! Provides category fixtures and the `data_service_tests!` contract suite.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod data_service_tests;

use category_desk::entities::Category;

// ---------------------------------------------------------------------------
// Helper functions — Category creation
// ---------------------------------------------------------------------------

/// Create a transient `Category` with the given business id and brand.
pub fn create_test_category(category_id: &str, brand: &str) -> Category {
    Category::draft(category_id, brand, "Shoes", "M", 0.8, "kg")
}

/// Create a transient `Category` with every column set.
pub fn create_full_category(
    category_id: &str,
    brand: &str,
    kind: &str,
    size: &str,
    weight: f64,
    unit: &str,
) -> Category {
    Category::draft(category_id, brand, kind, size, weight, unit)
}

/// Generate a batch of `n` distinct categories (`CAT-000`, `CAT-001`, ...).
pub fn sample_batch(n: usize) -> Vec<Category> {
    let brands = ["Nike", "Adidas", "Puma", "Reebok", "Under Armour"];
    let kinds = ["Shoes", "T-shirt", "Shorts", "Jacket", "Socks"];
    let sizes = ["XS", "S", "M", "L", "XL", "XXL"];
    let units = ["kg", "g", "lb", "oz"];

    (0..n)
        .map(|i| {
            create_full_category(
                &format!("CAT-{:03}", i),
                brands[i % brands.len()],
                kinds[i % kinds.len()],
                sizes[i % sizes.len()],
                0.5 + i as f64,
                units[i % units.len()],
            )
        })
        .collect()
}
