// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Whole-collection lead storage.
//!
//! Every call reads or writes the entire lead collection. There is no
//! partial access, no locking, and no transaction spanning calls: two
//! processes saving the same document race and the later write wins.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::lead::Lead;

/// Persistence seam for the lead collection.
pub trait LeadStore: Send + Sync {
    /// Reads the full collection in stored order.
    fn load(&self) -> Result<Vec<Lead>>;

    /// Replaces the full collection.
    fn save(&self, leads: &[Lead]) -> Result<()>;
}

impl<T: LeadStore + ?Sized> LeadStore for Box<T> {
    fn load(&self) -> Result<Vec<Lead>> {
        (**self).load()
    }

    fn save(&self, leads: &[Lead]) -> Result<()> {
        (**self).save(leads)
    }
}

impl<T: LeadStore + ?Sized> LeadStore for Arc<T> {
    fn load(&self) -> Result<Vec<Lead>> {
        (**self).load()
    }

    fn save(&self, leads: &[Lead]) -> Result<()> {
        (**self).save(leads)
    }
}

/// How [`JsonFileStore::load`] treats an unreadable document or record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadPolicy {
    /// Log a warning and leave out what cannot be read: the whole document
    /// reads as empty, a single bad record is skipped.
    #[default]
    Lenient,
    /// Fail with [`Error::Storage`].
    Strict,
}

/// Stores the collection as one pretty-printed JSON array.
///
/// Records that do not parse as a lead are never dropped: `save` writes
/// them back after the leads it was given.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    policy: LoadPolicy,
}

impl JsonFileStore {
    /// Opens the document at `path`, creating it (and its directory) as an
    /// empty array if it does not exist yet.
    pub fn open(path: impl Into<PathBuf>, policy: LoadPolicy) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        if !path.exists() {
            fs::write(&path, "[]")?;
            debug!("created empty lead document at {}", path.display());
        }
        Ok(JsonFileStore { path, policy })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn policy(&self) -> LoadPolicy {
        self.policy
    }

    fn read_records(&self) -> Result<Vec<Value>> {
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Records on disk that do not parse as a lead. They are kept verbatim
    /// on save since no operation can see or modify them.
    fn unreadable_records(&self) -> Vec<Value> {
        self.read_records()
            .unwrap_or_default()
            .into_iter()
            .filter(|record| Lead::deserialize(record).is_err())
            .collect()
    }
}

impl LeadStore for JsonFileStore {
    fn load(&self) -> Result<Vec<Lead>> {
        let records = match self.read_records() {
            Ok(records) => records,
            Err(e) => match self.policy {
                LoadPolicy::Lenient => {
                    warn!("treating {} as empty: {}", self.path.display(), e);
                    return Ok(Vec::new());
                }
                LoadPolicy::Strict => {
                    return Err(Error::Storage(format!(
                        "cannot read {}: {}",
                        self.path.display(),
                        e
                    )));
                }
            },
        };

        let mut leads = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            match Lead::deserialize(record) {
                Ok(lead) => leads.push(lead),
                Err(e) => match self.policy {
                    LoadPolicy::Lenient => {
                        warn!("skipping record {} in {}: {}", index, self.path.display(), e)
                    }
                    LoadPolicy::Strict => {
                        return Err(Error::Storage(format!(
                            "record {} in {} is malformed: {}",
                            index,
                            self.path.display(),
                            e
                        )));
                    }
                },
            }
        }
        Ok(leads)
    }

    fn save(&self, leads: &[Lead]) -> Result<()> {
        let mut records =
            leads.iter().map(serde_json::to_value).collect::<serde_json::Result<Vec<Value>>>()?;
        records.extend(self.unreadable_records());
        let json = serde_json::to_string_pretty(&records)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Keeps the collection in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    leads: Mutex<Vec<Lead>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `leads`.
    pub fn with_leads(leads: Vec<Lead>) -> Self {
        MemoryStore { leads: Mutex::new(leads) }
    }
}

impl LeadStore for MemoryStore {
    fn load(&self) -> Result<Vec<Lead>> {
        Ok(self.leads.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn save(&self, leads: &[Lead]) -> Result<()> {
        *self.leads.lock().unwrap_or_else(|e| e.into_inner()) = leads.to_vec();
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
