//! The Category catalog record

use crate::core::error::ValidationError;
use crate::core::{Data, Entity, FieldValue};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A catalog category: brand, product type, size, weight and unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Surrogate key assigned by storage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Business id (`CAT-NNN`)
    pub category_id: String,

    pub brand: String,

    #[serde(rename = "type")]
    pub kind: String,

    pub size: String,

    pub weight: f64,

    pub unit: String,
}

impl Category {
    /// A transient record, not yet saved
    pub fn draft(
        category_id: impl Into<String>,
        brand: impl Into<String>,
        kind: impl Into<String>,
        size: impl Into<String>,
        weight: f64,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            category_id: category_id.into(),
            brand: brand.into(),
            kind: kind.into(),
            size: size.into(),
            weight,
            unit: unit.into(),
        }
    }

    /// A record carrying a storage key
    pub fn stored(
        key: i64,
        category_id: impl Into<String>,
        brand: impl Into<String>,
        kind: impl Into<String>,
        size: impl Into<String>,
        weight: f64,
        unit: impl Into<String>,
    ) -> Self {
        Self::draft(category_id, brand, kind, size, weight, unit).with_key(key)
    }
}

impl Entity for Category {
    fn resource_name() -> &'static str {
        "categories"
    }

    fn resource_name_singular() -> &'static str {
        "category"
    }

    fn key(&self) -> Option<i64> {
        self.id
    }

    fn with_key(mut self, key: i64) -> Self {
        self.id = Some(key);
        self
    }

    fn business_id(&self) -> &str {
        &self.category_id
    }
}

impl Data for Category {
    fn columns() -> &'static [&'static str] {
        &["category_id", "brand", "type", "size", "weight", "unit"]
    }

    fn field_value(&self, column: &str) -> Option<FieldValue> {
        match column {
            "category_id" => Some(self.category_id.as_str().into()),
            "brand" => Some(self.brand.as_str().into()),
            "type" => Some(self.kind.as_str().into()),
            "size" => Some(self.size.as_str().into()),
            "weight" => Some(self.weight.into()),
            "unit" => Some(self.unit.as_str().into()),
            _ => None,
        }
    }
}

/// The editable part of a category, as read from the form.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct CategoryDraft {
    #[validate(length(min = 1))]
    pub brand: String,

    #[validate(length(min = 1))]
    pub kind: String,

    #[validate(length(min = 1))]
    pub size: String,

    #[validate(range(min = 0.0))]
    pub weight: f64,

    #[validate(length(min = 1))]
    pub unit: String,
}

impl CategoryDraft {
    /// Run field validation, reporting the first failing field
    pub fn check(&self) -> Result<(), ValidationError> {
        let Err(errors) = self.validate() else {
            return Ok(());
        };

        let failed: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();

        if failed.iter().any(|field| field == "weight") {
            return Err(ValidationError::InvalidWeight {
                input: self.weight.to_string(),
            });
        }

        let field = [
            ("brand", "brand"),
            ("kind", "type"),
            ("size", "size"),
            ("unit", "unit"),
        ]
        .into_iter()
        .find(|(name, _)| failed.iter().any(|field| field == name))
        .map_or("category", |(_, label)| label);

        Err(ValidationError::MissingField { field })
    }

    /// Build a full record from this draft
    pub fn into_category(self, category_id: impl Into<String>, key: Option<i64>) -> Category {
        Category {
            id: key,
            category_id: category_id.into(),
            brand: self.brand,
            kind: self.kind,
            size: self.size,
            weight: self.weight,
            unit: self.unit,
        }
    }
}

/// Parse the weight text box.
///
/// Accepts surrounding whitespace; rejects anything that is not a finite,
/// non-negative number.
pub fn parse_weight(input: &str) -> Result<f64, ValidationError> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|weight| weight.is_finite() && *weight >= 0.0)
        .ok_or_else(|| ValidationError::InvalidWeight {
            input: input.to_string(),
        })
}
