// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Embedded catalog database backed by redb (pure Rust, ACID).
//!
//! ## Table Layout
//!
//! - `characters`, `cards`, `skills`: id → serialized record (JSON bytes)
//! - `sequences`: entity kind → last id handed out
//! - `character_names`: character name → id (unique index)

use std::path::Path;

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition, WriteTransaction};
use serde::{de::DeserializeOwned, Serialize};

// =============================================================================
// Table Definitions
// =============================================================================

/// Sequence table: entity kind → highest id ever assigned.
const SEQUENCES: TableDefinition<&str, u64> = TableDefinition::new("sequences");

/// Unique index: character name → character id.
pub(super) const CHARACTER_NAMES: TableDefinition<&str, u64> =
    TableDefinition::new("character_names");

// =============================================================================
// Error Type
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("redb error: {0}")]
    Redb(#[from] redb::Error),

    #[error("redb database error: {0}")]
    RedbDatabase(#[from] redb::DatabaseError),

    #[error("redb transaction error: {0}")]
    RedbTransaction(#[from] redb::TransactionError),

    #[error("redb table error: {0}")]
    RedbTable(#[from] redb::TableError),

    #[error("redb storage error: {0}")]
    RedbStorage(#[from] redb::StorageError),

    #[error("redb commit error: {0}")]
    RedbCommit(#[from] redb::CommitError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("unique constraint failed: {0}")]
    UniqueViolation(String),

    #[error("not null constraint failed: {0}")]
    NotNullViolation(String),

    #[error("foreign key constraint failed: {0}")]
    ForeignKeyViolation(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Entity
// =============================================================================

/// A record kind with its own table and integrity rules.
///
/// Constraint hooks run inside the write transaction before the entity's own
/// table is opened, so they are free to open any table including it. An
/// `Err` from a hook aborts the transaction.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Lowercase name used in sequence keys and error messages.
    const KIND: &'static str;
    const TABLE: TableDefinition<'static, u64, &'static [u8]>;

    fn id(&self) -> u64;
    fn assign_id(&mut self, id: u64);

    /// Validate (and index) the record about to be written. `previous` is the
    /// stored row on update, `None` on insert.
    fn apply_constraints(&self, txn: &WriteTransaction, previous: Option<&Self>)
        -> StoreResult<()>;

    /// Validate (and unindex) the record about to be deleted.
    fn release_constraints(&self, txn: &WriteTransaction) -> StoreResult<()>;
}

// =============================================================================
// CatalogDatabase
// =============================================================================

/// Embedded ACID catalog database.
pub struct CatalogDatabase {
    db: Database,
}

impl CatalogDatabase {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> StoreResult<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let db = Database::create(path)?;

        // Pre-create all tables so later read transactions don't fail
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(SEQUENCES)?;
            let _ = write_txn.open_table(CHARACTER_NAMES)?;
            let _ = write_txn.open_table(crate::models::Character::TABLE)?;
            let _ = write_txn.open_table(crate::models::Card::TABLE)?;
            let _ = write_txn.open_table(crate::models::Skill::TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }

    /// Cheap readiness probe: a read transaction over the sequence table.
    pub fn ping(&self) -> StoreResult<()> {
        let read_txn = self.db.begin_read()?;
        let _ = read_txn.open_table(SEQUENCES)?;
        Ok(())
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// All records of one kind, by ascending id.
    pub fn load_all<E: Entity>(&self) -> StoreResult<Vec<E>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(E::TABLE)?;

        let mut records = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            records.push(serde_json::from_slice(value.value())?);
        }
        Ok(records)
    }

    /// Look up one record by id.
    pub fn load<E: Entity>(&self, id: u64) -> StoreResult<Option<E>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(E::TABLE)?;
        match table.get(id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Assign the next id to `record` and store it.
    pub fn insert<E: Entity>(&self, mut record: E) -> StoreResult<E> {
        let write_txn = self.db.begin_write()?;
        let id = next_id(&write_txn, E::KIND)?;
        record.assign_id(id);

        record.apply_constraints(&write_txn, None)?;
        {
            let json = serde_json::to_vec(&record)?;
            let mut table = write_txn.open_table(E::TABLE)?;
            table.insert(id, json.as_slice())?;
        }
        write_txn.commit()?;
        Ok(record)
    }

    /// Replace the stored row with the same id as `record`.
    pub fn update<E: Entity>(&self, record: &E) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        let previous: E = load_in(&write_txn, record.id())?;

        record.apply_constraints(&write_txn, Some(&previous))?;
        {
            let json = serde_json::to_vec(record)?;
            let mut table = write_txn.open_table(E::TABLE)?;
            table.insert(record.id(), json.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Remove the record with the given id.
    pub fn delete<E: Entity>(&self, id: u64) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        let existing: E = load_in(&write_txn, id)?;

        existing.release_constraints(&write_txn)?;
        {
            let mut table = write_txn.open_table(E::TABLE)?;
            table.remove(id)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

/// Bump and return the sequence for `kind`. Sequences only grow, so ids of
/// deleted rows are never handed out again.
fn next_id(txn: &WriteTransaction, kind: &str) -> StoreResult<u64> {
    let mut table = txn.open_table(SEQUENCES)?;
    let last = table.get(kind)?.map(|v| v.value()).unwrap_or(0);
    let next = last + 1;
    table.insert(kind, next)?;
    Ok(next)
}

/// Read a row inside a write transaction, closing its table before returning.
pub(super) fn load_in<E: Entity>(txn: &WriteTransaction, id: u64) -> StoreResult<E> {
    let table = txn.open_table(E::TABLE)?;

    // Copy the bytes out before the guard's table goes away
    let bytes = {
        let existing = table
            .get(id)?
            .ok_or_else(|| StoreError::NotFound(format!("{} {id}", E::KIND)))?;
        existing.value().to_vec()
    };
    Ok(serde_json::from_slice(&bytes)?)
}

/// Whether a row with `id` exists in `E`'s table.
pub(super) fn exists_in<E: Entity>(txn: &WriteTransaction, id: u64) -> StoreResult<bool> {
    let table = txn.open_table(E::TABLE)?;
    let found = table.get(id)?.is_some();
    Ok(found)
}

/// Every stored row of `E`, read inside a write transaction.
pub(super) fn scan_in<E: Entity>(txn: &WriteTransaction) -> StoreResult<Vec<E>> {
    let table = txn.open_table(E::TABLE)?;
    let mut records = Vec::new();
    for entry in table.iter()? {
        let (_, value) = entry?;
        records.push(serde_json::from_slice(value.value())?);
    }
    Ok(records)
}
