//! # Category Desk
//!
//! The data side of a category catalog form: records with a brand, type,
//! size, weight and unit, a table with live search, and a controller that
//! turns button presses into storage calls.
//!
//! ## Features
//!
//! - **Business ids**: random `CAT-NNN` identifiers, unique across the catalog
//! - **Live filter**: case-insensitive search over every column, applied
//!   without touching the loaded records
//! - **Pluggable storage**: in-memory or SQLite behind one `DataService` trait
//! - **Configuration-Based**: storage and combo-box option sets via YAML
//! - **Typed errors**: input problems become alerts, storage failures are
//!   logged and reported without taking the host down
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use category_desk::prelude::*;
//!
//! let config = CatalogConfig::load()?;
//! let service = connect::<Category>(&config.storage).await?;
//! let repository = Repository::new(service, config.id_prefix.clone());
//!
//! let mut form = FormController::from_config(repository, &config, TracingNotifier);
//! form.initialize().await?;
//!
//! form.dispatch(FormAction::Choose(ComboField::Brand, Some("Nike".into()))).await;
//! form.dispatch(FormAction::SetWeight("0.8".into())).await;
//! form.dispatch(FormAction::Save).await;
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod form;
pub mod storage;
pub mod telemetry;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        CatalogError, CatalogResult, Data, DataService, Entity, FieldValue, FilteredView,
        IdGenerator, Notifier, RecordingNotifier, Repository, TracingNotifier, ValidationError,
    };

    // === Entities ===
    pub use crate::entities::{Category, CategoryDraft};

    // === Form ===
    pub use crate::form::{
        CategoryTable, ComboField, FormAction, FormController, FormFields, FormState, Outcome,
    };

    // === Storage ===
    pub use crate::storage::{InMemoryDataService, connect};
    #[cfg(feature = "sqlite")]
    pub use crate::storage::SqliteDataService;

    // === Config ===
    pub use crate::config::{CatalogConfig, OptionSets, StorageConfig};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
}
