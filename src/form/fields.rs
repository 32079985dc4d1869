//! Form input fields and the field-reset utility

use crate::config::OptionSets;
use crate::core::error::ValidationError;
use crate::core::field::render_float;
use crate::entities::{Category, CategoryDraft, parse_weight};

/// The four combo boxes of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComboField {
    Brand,
    Type,
    Size,
    Unit,
}

impl ComboField {
    pub const ALL: [ComboField; 4] = [
        ComboField::Brand,
        ComboField::Type,
        ComboField::Size,
        ComboField::Unit,
    ];

    /// Field name as used in config and messages
    pub fn label(self) -> &'static str {
        match self {
            ComboField::Brand => "brand",
            ComboField::Type => "type",
            ComboField::Size => "size",
            ComboField::Unit => "unit",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.label() == label)
    }
}

/// Current contents of the form inputs.
///
/// The business id is display-only: it is filled by id generation or row
/// selection, never typed by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormFields {
    category_id: String,
    brand: Option<String>,
    kind: Option<String>,
    size: Option<String>,
    weight: String,
    unit: Option<String>,
}

impl FormFields {
    pub fn category_id(&self) -> &str {
        &self.category_id
    }

    pub(crate) fn set_category_id(&mut self, id: impl Into<String>) {
        self.category_id = id.into();
    }

    pub fn choice(&self, field: ComboField) -> Option<&str> {
        match field {
            ComboField::Brand => self.brand.as_deref(),
            ComboField::Type => self.kind.as_deref(),
            ComboField::Size => self.size.as_deref(),
            ComboField::Unit => self.unit.as_deref(),
        }
    }

    /// Set a combo value, rejecting values outside the option set
    pub fn choose(
        &mut self,
        field: ComboField,
        value: Option<String>,
        options: &OptionSets,
    ) -> Result<(), ValidationError> {
        if let Some(v) = &value {
            check_option(field, v, options)?;
        }
        *self.slot(field) = value;
        Ok(())
    }

    pub fn weight_text(&self) -> &str {
        &self.weight
    }

    pub fn set_weight_text(&mut self, text: impl Into<String>) {
        self.weight = text.into();
    }

    /// Copy every column of a record into the inputs
    pub fn fill_from(&mut self, record: &Category) {
        self.category_id = record.category_id.clone();
        self.brand = Some(record.brand.clone());
        self.kind = Some(record.kind.clone());
        self.size = Some(record.size.clone());
        self.weight = render_float(record.weight);
        self.unit = Some(record.unit.clone());
    }

    /// Reset every input to its empty state
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Read and validate the editable inputs
    pub fn read_draft(&self, options: &OptionSets) -> Result<CategoryDraft, ValidationError> {
        let brand = self.required(ComboField::Brand, options)?;
        let kind = self.required(ComboField::Type, options)?;
        let size = self.required(ComboField::Size, options)?;
        let unit = self.required(ComboField::Unit, options)?;
        let weight = parse_weight(&self.weight)?;

        let draft = CategoryDraft {
            brand,
            kind,
            size,
            weight,
            unit,
        };
        draft.check()?;
        Ok(draft)
    }

    fn required(&self, field: ComboField, options: &OptionSets) -> Result<String, ValidationError> {
        let value = self
            .choice(field)
            .filter(|v| !v.is_empty())
            .ok_or(ValidationError::MissingField {
                field: field.label(),
            })?;
        check_option(field, value, options)?;
        Ok(value.to_string())
    }

    fn slot(&mut self, field: ComboField) -> &mut Option<String> {
        match field {
            ComboField::Brand => &mut self.brand,
            ComboField::Type => &mut self.kind,
            ComboField::Size => &mut self.size,
            ComboField::Unit => &mut self.unit,
        }
    }
}

fn check_option(
    field: ComboField,
    value: &str,
    options: &OptionSets,
) -> Result<(), ValidationError> {
    let allowed = options
        .for_field(field.label())
        .is_some_and(|values| values.iter().any(|v| v == value));

    if allowed {
        Ok(())
    } else {
        Err(ValidationError::UnknownOption {
            field: field.label(),
            value: value.to_string(),
        })
    }
}
