//! Form controller: keeps the inputs, the table and storage in sync
//!
//! Every operation runs to completion before the next one starts; the
//! controller is driven from a single event loop. After each mutation the
//! table is reloaded from storage in full.

use crate::config::{CatalogConfig, OptionSets};
use crate::core::error::{CatalogError, CatalogResult, EntityError, ValidationError};
use crate::core::{IdGenerator, Notifier, Repository};
use crate::entities::Category;
use crate::form::fields::{ComboField, FormFields};
use crate::form::table::CategoryTable;
use crate::storage::connect;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Where the form is in its edit cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    /// No row selected; the id field holds a freshly drawn id
    Idle,
    /// Inputs hold the selected row
    Editing,
}

/// A user gesture the host forwards to the controller
#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    Select(Option<usize>),
    Search(String),
    Choose(ComboField, Option<String>),
    SetWeight(String),
    Save,
    Update,
    Delete,
    Edit,
    Clear,
    Reload,
}

/// What became of a dispatched action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// Input problem, reported to the user
    Rejected,
    /// Storage problem, reported to the user and logged
    Failed,
}

/// Controller behind the category form.
///
/// All collaborators are passed in: the repository, the option sets for the
/// combo boxes, the id generator, the alert surface and the random source.
pub struct FormController<N: Notifier> {
    repository: Repository<Category>,
    options: OptionSets,
    ids: IdGenerator,
    notifier: N,
    rng: StdRng,
    fields: FormFields,
    table: CategoryTable,
    state: FormState,
    fresh_id: Option<String>,
}

impl<N: Notifier> FormController<N> {
    pub fn new(
        repository: Repository<Category>,
        options: OptionSets,
        ids: IdGenerator,
        notifier: N,
    ) -> Self {
        Self::with_rng(repository, options, ids, notifier, StdRng::from_entropy())
    }

    /// Build a controller from configuration, using the repository's prefix
    pub fn from_config(
        repository: Repository<Category>,
        config: &CatalogConfig,
        notifier: N,
    ) -> Self {
        let ids = IdGenerator::with_width(repository.key_prefix(), config.id_width);
        Self::new(repository, config.options.clone(), ids, notifier)
    }

    /// Load configuration from the environment, connect storage and
    /// initialize the form
    pub async fn open(notifier: N) -> CatalogResult<Self> {
        let config = CatalogConfig::load()?;
        let service = connect::<Category>(&config.storage).await?;
        let repository = Repository::new(service, config.id_prefix.clone());

        let mut form = Self::from_config(repository, &config, notifier);
        form.initialize().await?;
        Ok(form)
    }

    pub fn with_rng(
        repository: Repository<Category>,
        options: OptionSets,
        ids: IdGenerator,
        notifier: N,
        rng: StdRng,
    ) -> Self {
        Self {
            repository,
            options,
            ids,
            notifier,
            rng,
            fields: FormFields::default(),
            table: CategoryTable::new(),
            state: FormState::Idle,
            fresh_id: None,
        }
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn table(&self) -> &CategoryTable {
        &self.table
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn options(&self) -> &OptionSets {
        &self.options
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Load the table and put a fresh id in the form
    pub async fn initialize(&mut self) -> CatalogResult<()> {
        self.reload().await?;
        self.assign_fresh_id().await?;
        self.state = FormState::Idle;
        tracing::info!(records = self.table.records().len(), "category form ready");
        Ok(())
    }

    /// Replace the table contents with everything in storage
    pub async fn reload(&mut self) -> CatalogResult<()> {
        let records = self
            .repository
            .find_all()
            .await
            .map_err(CatalogError::from_backend)?;
        self.table.reload(records);
        Ok(())
    }

    /// Draw an id unused by any stored record and show it in the form
    pub async fn assign_fresh_id(&mut self) -> CatalogResult<String> {
        let records = self
            .repository
            .find_all()
            .await
            .map_err(CatalogError::from_backend)?;
        let id = self
            .ids
            .generate_unique(records.iter().map(|r| r.category_id.as_str()), &mut self.rng)?;
        self.fields.set_category_id(id.clone());
        self.fresh_id = Some(id.clone());
        Ok(id)
    }

    /// Select a visible row and copy it into the form.
    ///
    /// `None` or an index past the visible rows drops the selection.
    pub fn select_row(&mut self, index: Option<usize>) {
        match self.table.select(index) {
            Some(record) => {
                self.fields.fill_from(record);
                self.state = FormState::Editing;
            }
            None => self.leave_editing(),
        }
    }

    /// Re-filter the table for a new search text
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.table.set_query(query);
        if self.table.selected().is_none() {
            self.leave_editing();
        }
    }

    pub fn choose(&mut self, field: ComboField, value: Option<String>) -> CatalogResult<()> {
        self.fields.choose(field, value, &self.options)?;
        Ok(())
    }

    pub fn set_weight_text(&mut self, text: impl Into<String>) {
        self.fields.set_weight_text(text);
    }

    /// Persist the form as a new record
    pub async fn save(&mut self) -> CatalogResult<Category> {
        let category_id = self.fields.category_id().to_string();
        let existing = self
            .repository
            .find_all()
            .await
            .map_err(CatalogError::from_backend)?;

        if category_id.is_empty() || existing.iter().any(|r| r.category_id == category_id) {
            return Err(self.reject_duplicate(category_id).await);
        }

        let draft = self.fields.read_draft(&self.options)?;
        let record = draft.into_category(category_id.clone(), None);

        let saved = match self.repository.save(record).await {
            Ok(saved) => saved,
            Err(err) => match CatalogError::from_backend(err) {
                CatalogError::Entity(EntityError::AlreadyExists { .. }) => {
                    return Err(self.reject_duplicate(category_id).await);
                }
                other => return Err(other),
            },
        };

        tracing::info!(key = ?saved.id, category_id = %saved.category_id, "category saved");
        self.finish_mutation().await?;
        Ok(saved)
    }

    /// Write the form back over the selected record
    pub async fn update(&mut self) -> CatalogResult<Category> {
        let selected = self.require_selection("update")?;
        let draft = self.fields.read_draft(&self.options)?;
        let record = draft.into_category(selected.category_id, selected.id);

        let updated = self
            .repository
            .update(record)
            .await
            .map_err(CatalogError::from_backend)?;

        tracing::info!(key = ?updated.id, category_id = %updated.category_id, "category updated");
        self.finish_mutation().await?;
        Ok(updated)
    }

    /// Remove the selected record
    pub async fn delete(&mut self) -> CatalogResult<Category> {
        let selected = self.require_selection("delete")?;

        self.repository
            .delete(&selected)
            .await
            .map_err(CatalogError::from_backend)?;

        tracing::info!(key = ?selected.id, category_id = %selected.category_id, "category deleted");
        self.finish_mutation().await?;
        Ok(selected)
    }

    /// Copy the selected record into the form without touching storage
    pub fn edit(&mut self) -> CatalogResult<()> {
        let selected = self.require_selection("edit")?;
        self.fields.fill_from(&selected);
        self.state = FormState::Editing;
        Ok(())
    }

    /// Empty the inputs and draw a new id
    pub async fn clear(&mut self) -> CatalogResult<()> {
        self.fields.clear();
        self.table.clear_selection();
        self.state = FormState::Idle;
        self.fresh_id = None;
        self.assign_fresh_id().await?;
        Ok(())
    }

    /// Run an action and report any failure through the notifier.
    ///
    /// Input problems become their own alert text. Storage failures are
    /// logged and shown as a generic failure; the table is then reloaded so
    /// it reflects what storage actually holds.
    pub async fn dispatch(&mut self, action: FormAction) -> Outcome {
        tracing::debug!(?action, "dispatching form action");

        let result = match action {
            FormAction::Select(index) => {
                self.select_row(index);
                Ok(())
            }
            FormAction::Search(query) => {
                self.set_search_query(query);
                Ok(())
            }
            FormAction::Choose(field, value) => self.choose(field, value),
            FormAction::SetWeight(text) => {
                self.set_weight_text(text);
                Ok(())
            }
            FormAction::Save => self.save().await.map(|_| ()),
            FormAction::Update => self.update().await.map(|_| ()),
            FormAction::Delete => self.delete().await.map(|_| ()),
            FormAction::Edit => self.edit(),
            FormAction::Clear => self.clear().await,
            FormAction::Reload => self.reload().await,
        };

        match result {
            Ok(()) => Outcome::Done,
            Err(err) if err.is_validation() => {
                self.notifier.show_alert(&err.to_string());
                Outcome::Rejected
            }
            Err(err) => {
                tracing::error!(code = err.error_code(), error = %err, "form action failed");
                self.notifier
                    .show_alert(&format!("Operation failed: {}", err));
                if let Err(reload_err) = self.reload().await {
                    tracing::error!(error = %reload_err, "failed to reload categories");
                }
                Outcome::Failed
            }
        }
    }

    fn require_selection(&self, action: &'static str) -> CatalogResult<Category> {
        self.table
            .selected()
            .cloned()
            .ok_or_else(|| ValidationError::NoSelection { action }.into())
    }

    /// Regenerate the id after a collision and build the error to report.
    async fn reject_duplicate(&mut self, business_id: String) -> CatalogError {
        tracing::warn!(category_id = %business_id, "category id already taken");
        if let Err(err) = self.assign_fresh_id().await {
            return err;
        }
        ValidationError::DuplicateBusinessId { business_id }.into()
    }

    /// Back to Idle after the selection went away; the other inputs stay.
    fn leave_editing(&mut self) {
        if self.state != FormState::Editing {
            return;
        }
        self.state = FormState::Idle;
        if let Some(id) = &self.fresh_id {
            self.fields.set_category_id(id.clone());
        }
    }

    /// Reload and reset the form once a mutation is stored.
    ///
    /// The write already happened, so a fresh id that cannot be drawn is
    /// reported on its own and does not fail the operation.
    async fn finish_mutation(&mut self) -> CatalogResult<()> {
        self.reload().await?;
        match self.clear().await {
            Err(err) if err.is_validation() => {
                tracing::warn!(error = %err, "no fresh category id after write");
                self.notifier.show_alert(&err.to_string());
                Ok(())
            }
            other => other,
        }
    }
}
