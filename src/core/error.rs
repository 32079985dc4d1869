//! Typed error handling for the catalog
//!
//! Storage backends return `anyhow::Result` like any other service; the form
//! controller lifts those failures into [`CatalogError`] so a host can tell a
//! user mistake from a broken database.
//!
//! # Error Categories
//!
//! - [`ValidationError`]: user input problems, recovered with an alert
//! - [`EntityError`]: a record the operation needs does not exist
//! - [`StorageError`]: the backend failed (constraint, connection, ...)
//! - [`ConfigError`]: configuration could not be loaded or is inconsistent

use thiserror::Error;

/// The main error type for the catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Entity(#[from] EntityError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl CatalogError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            CatalogError::Validation(_) => "VALIDATION_ERROR",
            CatalogError::Entity(e) => e.error_code(),
            CatalogError::Storage(_) => "STORAGE_ERROR",
            CatalogError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Whether the error came from user input rather than the system
    pub fn is_validation(&self) -> bool {
        matches!(self, CatalogError::Validation(_))
    }

    /// Lift a backend failure, keeping typed entity errors intact.
    pub fn from_backend(err: anyhow::Error) -> Self {
        match err.downcast::<EntityError>() {
            Ok(entity) => CatalogError::Entity(entity),
            Err(other) => CatalogError::Storage(StorageError::Backend(other)),
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors caused by the current form contents or selection
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// An action that needs a selected row was triggered without one
    #[error("Please select a category to {action}.")]
    NoSelection { action: &'static str },

    /// The business id in the form is already taken
    #[error("Category ID already exists. Please try again.")]
    DuplicateBusinessId { business_id: String },

    /// The weight text is not a usable number
    #[error("Weight must be a non-negative number, got '{input}'.")]
    InvalidWeight { input: String },

    /// A required combo value was left empty
    #[error("Please choose a {field}.")]
    MissingField { field: &'static str },

    /// A combo value outside the configured option set
    #[error("'{value}' is not a valid {field}.")]
    UnknownOption { field: &'static str, value: String },

    /// Every id of the form `PREFIX-NNN` is already in use
    #[error("No free identifiers left for prefix '{prefix}' ({capacity} in use).")]
    IdSpaceExhausted { prefix: String, capacity: usize },
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to a specific record
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EntityError {
    /// No record with this surrogate key
    #[error("{entity_type} with key '{key}' not found")]
    NotFound { entity_type: String, key: i64 },

    /// The operation needs a persisted record but got a transient one
    #[error("{entity_type} '{business_id}' has not been saved yet")]
    NotPersisted {
        entity_type: String,
        business_id: String,
    },

    /// Business id already stored (unique constraint)
    #[error("{entity_type} with id '{business_id}' already exists")]
    AlreadyExists {
        entity_type: String,
        business_id: String,
    },
}

impl EntityError {
    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::NotPersisted { .. } => "ENTITY_NOT_PERSISTED",
            EntityError::AlreadyExists { .. } => "ENTITY_ALREADY_EXISTS",
        }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors raised by a storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    /// Backend call failed
    #[error("storage failure: {0}")]
    Backend(anyhow::Error),

    /// Backend could not be reached or opened
    #[error("failed to connect to {backend}: {message}")]
    Connection { backend: String, message: String },
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
