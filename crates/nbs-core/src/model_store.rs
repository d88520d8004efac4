//! Process-wide, load-once model store.
//!
//! The model is resolved and validated on first use and then shared
//! read-only for the life of the process. Nothing here ever reloads or
//! mutates a model.

use std::sync::OnceLock;

use crate::config::{load_model, ConfigError, LoadOptions, LoadedModel};
use crate::logging::event_names;

static GLOBAL: ModelStore = ModelStore::new();

/// One-time-initialized holder for a [`LoadedModel`].
#[derive(Debug, Default)]
pub struct ModelStore {
    cell: OnceLock<LoadedModel>,
}

impl ModelStore {
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// The process-wide store.
    pub fn global() -> &'static ModelStore {
        &GLOBAL
    }

    /// Return the stored model, loading it on the first call.
    ///
    /// A failed load leaves the store empty, so a later call may retry with
    /// different options. Once a model is stored, `options` are ignored.
    pub fn get_or_load(&self, options: &LoadOptions) -> Result<&LoadedModel, ConfigError> {
        if let Some(loaded) = self.cell.get() {
            tracing::debug!(target: event_names::MODEL_REUSED, "reusing loaded model");
            return Ok(loaded);
        }

        let loaded = load_model(options)?;
        // A concurrent caller may have won the race; keep whichever landed first.
        Ok(self.cell.get_or_init(|| loaded))
    }

    /// Seed the store with an already-built model.
    ///
    /// Returns the model back if the store was already initialized.
    pub fn install(&self, loaded: LoadedModel) -> Result<(), LoadedModel> {
        self.cell.set(loaded)
    }

    /// The stored model, if any.
    pub fn get(&self) -> Option<&LoadedModel> {
        self.cell.get()
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}
