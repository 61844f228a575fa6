//! The student record store.
//!
//! An ordered list of [`StudentRecord`]s backed by a JSON array file. The
//! file is loaded once when the store is opened and rewritten in full after
//! every successful mutation.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::models::{StudentForm, StudentRecord, Summary};
use crate::storage;
use crate::utils;

pub struct RecordStore {
    path: PathBuf,
    records: Vec<StudentRecord>,
    /// Largest ID number loaded or issued by this process.
    high_water: u64,
}

impl RecordStore {
    /// Opens the store at `path`. A missing or corrupt file gives an empty
    /// store rather than an error.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let records: Vec<StudentRecord> = storage::load_or_default(&path);
        let high_water = Self::highest_number(&records);
        info!(path = %path.display(), count = records.len(), "opened record store");
        RecordStore { path, records, high_water }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-reads the backing file, dropping anything not saved.
    pub fn reload(&mut self) {
        self.records = storage::load_or_default(&self.path);
        self.high_water = self.high_water.max(Self::highest_number(&self.records));
        debug!(count = self.records.len(), "reloaded record store");
    }

    pub fn save(&self) -> Result<()> {
        storage::save_pretty(&self.path, &self.records)
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&StudentRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// The ID the next successful add will receive, or `None` once the
    /// store has issued the largest number it can represent.
    ///
    /// IDs without the `STD<number>` shape are ignored for numbering.
    pub fn next_id(&self) -> Option<String> {
        let highest = Self::highest_number(&self.records).max(self.high_water);
        highest.checked_add(1).map(utils::format_student_id)
    }

    pub fn add(&mut self, form: &StudentForm) -> Result<StudentRecord> {
        let fields = utils::validate_form(form)?;
        let id = self.next_id().ok_or(StoreError::IdsExhausted)?;
        let record = StudentRecord::new(id, fields);

        let previous_high_water = self.high_water;
        if let Some(number) = utils::student_id_number(&record.id) {
            self.high_water = self.high_water.max(number);
        }
        self.records.push(record.clone());

        if let Err(e) = self.save() {
            self.records.pop();
            self.high_water = previous_high_water;
            return Err(e);
        }
        info!(id = %record.id, "student added");
        Ok(record)
    }

    /// Replaces all four editable fields of the record with `id`.
    pub fn update(&mut self, id: &str, form: &StudentForm) -> Result<StudentRecord> {
        let index = self.position(id)?;
        let fields = utils::validate_form(form)?;

        let previous = self.records[index].fields();
        self.records[index].apply(fields);

        if let Err(e) = self.save() {
            self.records[index].apply(previous);
            return Err(e);
        }
        info!(id, "student updated");
        Ok(self.records[index].clone())
    }

    /// Removes the first record with `id` and returns it.
    pub fn delete(&mut self, id: &str) -> Result<StudentRecord> {
        let index = self.position(id)?;
        let removed = self.records.remove(index);

        if let Err(e) = self.save() {
            self.records.insert(index, removed);
            return Err(e);
        }
        info!(id, "student deleted");
        Ok(removed)
    }

    /// IDs of records whose name contains `query`, ignoring case, in list
    /// order. No matches is an empty vector, not an error.
    pub fn search_by_name(&self, query: &str) -> Vec<String> {
        self.records
            .iter()
            .filter(|r| utils::name_matches(&r.name, query))
            .map(|r| r.id.clone())
            .collect()
    }

    pub fn summary(&self) -> Summary {
        let count = self.records.len();
        if count == 0 {
            return Summary::default();
        }
        let total: i64 = self.records.iter().map(|r| i64::from(r.mark)).sum();
        let max = self.records.iter().map(|r| r.mark).max().unwrap_or(0);
        let min = self.records.iter().map(|r| r.mark).min().unwrap_or(0);
        Summary {
            count,
            average: utils::round2(total as f64 / count as f64),
            max,
            min,
        }
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Numbers found on disk that cannot be incremented are left out, like
    /// any other malformed ID.
    fn highest_number(records: &[StudentRecord]) -> u64 {
        records
            .iter()
            .filter_map(|r| utils::student_id_number(&r.id))
            .filter(|n| n.checked_add(1).is_some())
            .max()
            .unwrap_or(0)
    }
}
