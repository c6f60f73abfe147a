//! Generic JSON-backed collection
//!
//! Each collection lives in memory as an id-ordered map and is persisted to
//! its own JSON file as a plain array.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{SquirrelError, SquirrelResult};

use super::file_io::{read_json, write_json_atomic};

/// A record that can be stored in a [`Repository`]
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// Primary key type; iteration order follows its ordering
    type Id: Ord + Clone + Display;

    /// Entity name used in error messages
    const ENTITY: &'static str;

    /// The record's primary key
    fn record_id(&self) -> Self::Id;
}

/// The bulk operations a collection exposes to backup and restore
pub trait CollectionStore<R: Record> {
    /// All records in id order
    fn all(&self) -> SquirrelResult<Vec<R>>;

    /// Remove every record
    fn clear(&self) -> SquirrelResult<()>;

    /// Insert records; fails without inserting anything if any id is taken
    fn bulk_insert(&self, records: Vec<R>) -> SquirrelResult<()>;
}

/// Repository for one collection
pub struct Repository<R: Record> {
    path: PathBuf,
    data: RwLock<BTreeMap<R::Id, R>>,
}

impl<R: Record> Repository<R> {
    /// Create a new, empty repository backed by `path`
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(BTreeMap::new()),
        }
    }

    /// Load records from disk, replacing what is in memory
    pub fn load(&self) -> SquirrelResult<()> {
        let records: Vec<R> = read_json(&self.path)?;
        let mut data = self.write()?;
        data.clear();
        for record in records {
            data.insert(record.record_id(), record);
        }
        Ok(())
    }

    /// Save records to disk
    pub fn save(&self) -> SquirrelResult<()> {
        let data = self.read()?;
        let records: Vec<&R> = data.values().collect();
        write_json_atomic(&self.path, &records)
    }

    /// Get a record by id
    pub fn get(&self, id: &R::Id) -> SquirrelResult<Option<R>> {
        Ok(self.read()?.get(id).cloned())
    }

    /// Insert a single record
    pub fn insert(&self, record: R) -> SquirrelResult<()> {
        self.bulk_insert(vec![record])
    }

    /// Insert or replace a record
    pub fn upsert(&self, record: R) -> SquirrelResult<()> {
        self.write()?.insert(record.record_id(), record);
        Ok(())
    }

    /// Apply `f` to the record with `id` and return the updated record
    pub fn update<F>(&self, id: &R::Id, f: F) -> SquirrelResult<Option<R>>
    where
        F: FnOnce(&mut R),
    {
        let mut data = self.write()?;
        Ok(data.get_mut(id).map(|record| {
            f(record);
            record.clone()
        }))
    }

    /// Number of records
    pub fn count(&self) -> SquirrelResult<usize> {
        Ok(self.read()?.len())
    }

    /// Path of the backing file
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn read(&self) -> SquirrelResult<RwLockReadGuard<'_, BTreeMap<R::Id, R>>> {
        self.data
            .read()
            .map_err(|e| SquirrelError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> SquirrelResult<RwLockWriteGuard<'_, BTreeMap<R::Id, R>>> {
        self.data
            .write()
            .map_err(|e| SquirrelError::Storage(format!("Failed to acquire write lock: {}", e)))
    }
}

impl<R: Record> CollectionStore<R> for Repository<R> {
    fn all(&self) -> SquirrelResult<Vec<R>> {
        Ok(self.read()?.values().cloned().collect())
    }

    fn clear(&self) -> SquirrelResult<()> {
        self.write()?.clear();
        Ok(())
    }

    fn bulk_insert(&self, records: Vec<R>) -> SquirrelResult<()> {
        let mut data = self.write()?;

        let mut staged = BTreeMap::new();
        for record in records {
            let id = record.record_id();
            if data.contains_key(&id) || staged.contains_key(&id) {
                return Err(SquirrelError::Duplicate {
                    entity_type: R::ENTITY,
                    identifier: id.to_string(),
                });
            }
            staged.insert(id, record);
        }

        data.append(&mut staged);
        Ok(())
    }
}
