// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Catalog Storage Module
//!
//! Persistent storage for characters, cards and skills in a single embedded
//! redb file.
//!
//! ## Storage Layout
//!
//! ```text
//! $DATA_DIR/
//!   catalog.redb    # all tables, see `database`
//! ```
//!
//! ## Integrity
//!
//! Every write runs the entity's constraint hooks inside the same write
//! transaction as the row itself. A violated constraint aborts the
//! transaction, so a failed request never leaves partial state behind.

pub mod constraints;
pub mod database;

pub use database::{CatalogDatabase, Entity, StoreError, StoreResult};

/// File name of the catalog database under the data directory.
pub const DATABASE_FILE: &str = "catalog.redb";
