//! Core module containing fundamental traits and types for the catalog

pub mod entity;
pub mod error;
pub mod field;
pub mod filter;
pub mod id;
pub mod notify;
pub mod service;

pub use entity::{Data, Entity};
pub use error::{
    CatalogError, CatalogResult, ConfigError, EntityError, StorageError, ValidationError,
};
pub use field::FieldValue;
pub use filter::FilteredView;
pub use id::IdGenerator;
pub use notify::{Notifier, RecordingNotifier, TracingNotifier};
pub use service::{DataService, Repository};
