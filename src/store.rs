//! Store Module
//!
//! The record store that owns the collection and its backing file.
//!
//! ## Responsibilities
//! - Load the collection once at startup
//! - Validate input before touching any state
//! - Persist the whole collection after every mutation
//! - Keep memory and disk identical after each successful operation

use std::path::Path;

use crate::config::Config;
use crate::error::{Result, RosterError};
use crate::record::{RecordCollection, RecordUpdate, StudentRecord};
use crate::storage::{JsonFileStorage, LoadOutcome};

/// Result of a delete request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The caller confirmed and the record was removed
    Deleted(StudentRecord),

    /// The caller declined; nothing changed and nothing was written
    Kept,
}

/// The in-memory collection plus the adapter that persists it
///
/// ## Write Model
///
/// Mutations are staged on a copy of the collection. The copy is saved, and
/// only once the save succeeds does it replace the live collection. A failed
/// save therefore leaves memory exactly as it was before the call.
pub struct RecordStore {
    /// Session configuration
    config: Config,

    /// Backing file adapter
    storage: JsonFileStorage,

    /// Live collection, identical to disk after every successful mutation
    records: RecordCollection,
}

impl RecordStore {
    /// Open the store described by `config`
    ///
    /// The load outcome is returned alongside the store so the caller can
    /// report a corrupt file.
    pub fn open(config: Config) -> Result<(Self, LoadOutcome)> {
        let storage = JsonFileStorage::from_config(&config);
        let outcome = storage.load()?;
        let records = outcome.clone().into_collection();

        Ok((
            Self {
                config,
                storage,
                records,
            },
            outcome,
        ))
    }

    /// Open with a data file path (convenience method)
    ///
    /// Uses default config with the specified backing file
    pub fn open_path(path: &Path) -> Result<(Self, LoadOutcome)> {
        Self::open(Config::builder().data_file(path).build())
    }

    // =========================================================================
    // CRUD Operations
    // =========================================================================

    /// Add a new student
    ///
    /// Fails with `DuplicateKey` if the id exists, `InvalidAge` if the age
    /// text does not parse. Neither failure writes anything.
    pub fn add(&mut self, id: &str, name: &str, age_text: &str, grade: &str) -> Result<StudentRecord> {
        let id = id.trim();
        if self.records.contains(id) {
            return Err(RosterError::DuplicateKey(id.to_string()));
        }

        let record = StudentRecord::from_input(name, age_text, grade)?;

        self.commit(|records| {
            records.insert(id, record.clone());
        })?;

        tracing::debug!("Added student {}", id);
        Ok(record)
    }

    /// The full collection, in insertion order
    pub fn view(&self) -> &RecordCollection {
        &self.records
    }

    /// Look up one student
    pub fn search(&self, id: &str) -> Result<&StudentRecord> {
        let id = id.trim();
        self.records
            .get(id)
            .ok_or_else(|| RosterError::NotFound(id.to_string()))
    }

    /// Update a student from raw console input
    ///
    /// Blank fields keep their current value. All input is resolved before
    /// the record changes, so an invalid age leaves every field untouched.
    pub fn update(&mut self, id: &str, name: &str, age_text: &str, grade: &str) -> Result<StudentRecord> {
        self.search(id)?;
        let update = RecordUpdate::from_input(name, age_text, grade)?;
        self.apply_update(id, &update)
    }

    /// Update a student from already-resolved overrides
    ///
    /// Persists even when `update` keeps every field.
    pub fn apply_update(&mut self, id: &str, update: &RecordUpdate) -> Result<StudentRecord> {
        let id = id.trim();
        let replacement = update.apply_to(self.search(id)?);

        self.commit(|records| {
            records.insert(id, replacement.clone());
        })?;

        tracing::debug!("Updated student {}", id);
        Ok(replacement)
    }

    /// Delete a student after confirmation
    ///
    /// `confirm` sees the record about to be removed. Only `true` deletes
    /// and persists.
    pub fn delete<F>(&mut self, id: &str, confirm: F) -> Result<DeleteOutcome>
    where
        F: FnOnce(&StudentRecord) -> bool,
    {
        let id = id.trim();
        if !confirm(self.search(id)?) {
            tracing::debug!("Delete of {} declined", id);
            return Ok(DeleteOutcome::Kept);
        }

        let mut removed = None;
        self.commit(|records| {
            removed = records.remove(id);
        })?;

        tracing::debug!("Deleted student {}", id);
        removed
            .map(DeleteOutcome::Deleted)
            .ok_or_else(|| RosterError::NotFound(id.to_string()))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains(id.trim())
    }

    /// Get the backing file path
    pub fn data_file(&self) -> &Path {
        self.storage.path()
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Stage a mutation, persist it, then make it live
    fn commit<F>(&mut self, mutate: F) -> Result<()>
    where
        F: FnOnce(&mut RecordCollection),
    {
        let mut staged = self.records.clone();
        mutate(&mut staged);

        if let Err(e) = self.storage.save(&staged) {
            tracing::warn!("Save to {} failed: {}", self.storage.path().display(), e);
            return Err(e);
        }

        self.records = staged;
        Ok(())
    }
}
