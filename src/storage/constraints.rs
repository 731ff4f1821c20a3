// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Table bindings and integrity rules for each catalog entity.
//!
//! | Entity    | On write                                  | On delete                 |
//! |-----------|-------------------------------------------|---------------------------|
//! | Character | `name` unique                             | not referenced by a card  |
//! | Card      | all columns NOT NULL, character/skill FKs | -                         |
//! | Skill     | `name` NOT NULL                           | not referenced by a card  |

use redb::{ReadableTable, TableDefinition, WriteTransaction};

use super::database::{exists_in, scan_in, Entity, StoreError, StoreResult, CHARACTER_NAMES};
use crate::models::{Card, Character, Skill};

fn require<T>(column: &Option<T>, name: &str) -> StoreResult<()> {
    match column {
        Some(_) => Ok(()),
        None => Err(StoreError::NotNullViolation(name.to_string())),
    }
}

/// Fail if any card still points at the row being deleted.
fn ensure_unreferenced(
    txn: &WriteTransaction,
    what: &str,
    references: impl Fn(&Card) -> bool,
) -> StoreResult<()> {
    let cards: Vec<Card> = scan_in(txn)?;
    match cards.iter().find(|card| references(card)) {
        Some(card) => Err(StoreError::ForeignKeyViolation(format!(
            "{what} is referenced by card {}",
            card.id
        ))),
        None => Ok(()),
    }
}

impl Entity for Character {
    const KIND: &'static str = "character";
    const TABLE: TableDefinition<'static, u64, &'static [u8]> = TableDefinition::new("characters");

    fn id(&self) -> u64 {
        self.id
    }

    fn assign_id(&mut self, id: u64) {
        self.id = id;
    }

    fn apply_constraints(&self, txn: &WriteTransaction, previous: Option<&Self>) -> StoreResult<()> {
        let mut names = txn.open_table(CHARACTER_NAMES)?;

        if let Some(name) = self.name.as_deref() {
            let holder = names.get(name)?.map(|v| v.value());
            if holder.is_some_and(|id| id != self.id) {
                return Err(StoreError::UniqueViolation(format!("character.name {name:?}")));
            }
        }

        if let Some(old) = previous.and_then(|p| p.name.as_deref()) {
            if self.name.as_deref() != Some(old) {
                names.remove(old)?;
            }
        }
        if let Some(name) = self.name.as_deref() {
            names.insert(name, self.id)?;
        }
        Ok(())
    }

    fn release_constraints(&self, txn: &WriteTransaction) -> StoreResult<()> {
        ensure_unreferenced(txn, &format!("character {}", self.id), |card| {
            card.character_id == Some(self.id)
        })?;

        if let Some(name) = self.name.as_deref() {
            let mut names = txn.open_table(CHARACTER_NAMES)?;
            names.remove(name)?;
        }
        Ok(())
    }
}

impl Entity for Card {
    const KIND: &'static str = "card";
    const TABLE: TableDefinition<'static, u64, &'static [u8]> = TableDefinition::new("cards");

    fn id(&self) -> u64 {
        self.id
    }

    fn assign_id(&mut self, id: u64) {
        self.id = id;
    }

    fn apply_constraints(&self, txn: &WriteTransaction, _previous: Option<&Self>) -> StoreResult<()> {
        require(&self.name, "card.name")?;
        require(&self.character_id, "card.character_id")?;
        require(&self.skill_id, "card.skill_id")?;
        require(&self.rarity, "card.rarity")?;
        require(&self.stat_1, "card.stat_1")?;
        require(&self.stat_2, "card.stat_2")?;
        require(&self.stat_3, "card.stat_3")?;
        require(&self.stat_4, "card.stat_4")?;

        if let Some(character_id) = self.character_id {
            if !exists_in::<Character>(txn, character_id)? {
                return Err(StoreError::ForeignKeyViolation(format!(
                    "card.character_id {character_id}"
                )));
            }
        }
        if let Some(skill_id) = self.skill_id {
            if !exists_in::<Skill>(txn, skill_id)? {
                return Err(StoreError::ForeignKeyViolation(format!(
                    "card.skill_id {skill_id}"
                )));
            }
        }
        Ok(())
    }

    fn release_constraints(&self, _txn: &WriteTransaction) -> StoreResult<()> {
        Ok(())
    }
}

impl Entity for Skill {
    const KIND: &'static str = "skill";
    const TABLE: TableDefinition<'static, u64, &'static [u8]> = TableDefinition::new("skills");

    fn id(&self) -> u64 {
        self.id
    }

    fn assign_id(&mut self, id: u64) {
        self.id = id;
    }

    fn apply_constraints(&self, _txn: &WriteTransaction, _previous: Option<&Self>) -> StoreResult<()> {
        require(&self.name, "skill.name")
    }

    fn release_constraints(&self, txn: &WriteTransaction) -> StoreResult<()> {
        ensure_unreferenced(txn, &format!("skill {}", self.id), |card| {
            card.skill_id == Some(self.id)
        })
    }
}
