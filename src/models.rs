// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Catalog Data Models
//!
//! Records as stored and returned by the API, and the request bodies used to
//! create or patch them. All body fields are optional: presence is enforced
//! by the store's column constraints, not at parse time.
//!
//! ## Model Categories
//!
//! - **Character**: an idol and her profile
//! - **Card**: a collectible card featuring one character and one skill
//! - **Skill**: an effect that cards can carry

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// =============================================================================
// Character
// =============================================================================

/// A playable character. `name` is unique across all characters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Character {
    pub id: u64,
    pub name: Option<String>,
    pub age: Option<String>,
    pub height: Option<String>,
    pub weight: Option<String>,
    pub birthday: Option<String>,
    pub astrological_sign: Option<String>,
    pub bloodtype: Option<String>,
    pub three_sizes: Option<String>,
    pub handedness: Option<String>,
    pub hobbies: Option<String>,
    pub class_type: Option<String>,
}

/// Body of `POST /characters` and `PATCH /characters/{id}`.
///
/// Numbers are accepted for any field and kept in their decimal text form.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CharacterFields {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub age: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub height: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub weight: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub birthday: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub astrological_sign: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub bloodtype: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub three_sizes: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub handedness: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub hobbies: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub class_type: Option<String>,
}

// =============================================================================
// Card
// =============================================================================

/// A collectible card. Every column except `id` is NOT NULL in the store;
/// `character_id` and `skill_id` must reference existing rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Card {
    pub id: u64,
    pub name: Option<String>,
    pub character_id: Option<u64>,
    pub skill_id: Option<u64>,
    pub rarity: Option<String>,
    pub stat_1: Option<i64>,
    pub stat_2: Option<i64>,
    pub stat_3: Option<i64>,
    pub stat_4: Option<i64>,
}

/// Body of `POST /cards` and `PATCH /cards/{id}`.
///
/// Integer fields accept JSON numbers or numeric strings (`"8491"`).
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CardFields {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, alias = "character", deserialize_with = "lenient::id")]
    pub character_id: Option<u64>,
    #[serde(default, alias = "skill", deserialize_with = "lenient::id")]
    pub skill_id: Option<u64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub rarity: Option<String>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub stat_1: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub stat_2: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub stat_3: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub stat_4: Option<i64>,
}

// =============================================================================
// Skill
// =============================================================================

/// A card skill. `name` is NOT NULL in the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Skill {
    pub id: u64,
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Body of `POST /skills` and `PATCH /skills/{id}`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct SkillFields {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, alias = "desc", deserialize_with = "lenient::text")]
    pub description: Option<String>,
}

// =============================================================================
// Applying request bodies
// =============================================================================

/// Overwrite `target` only when the body supplied a value.
fn merge<T>(target: &mut Option<T>, supplied: Option<T>) {
    if supplied.is_some() {
        *target = supplied;
    }
}

impl Character {
    pub fn from_fields(fields: CharacterFields) -> Self {
        let mut character = Self::default();
        character.apply(fields);
        character
    }

    pub fn apply(&mut self, fields: CharacterFields) {
        merge(&mut self.name, fields.name);
        merge(&mut self.age, fields.age);
        merge(&mut self.height, fields.height);
        merge(&mut self.weight, fields.weight);
        merge(&mut self.birthday, fields.birthday);
        merge(&mut self.astrological_sign, fields.astrological_sign);
        merge(&mut self.bloodtype, fields.bloodtype);
        merge(&mut self.three_sizes, fields.three_sizes);
        merge(&mut self.handedness, fields.handedness);
        merge(&mut self.hobbies, fields.hobbies);
        merge(&mut self.class_type, fields.class_type);
    }
}

impl Card {
    pub fn from_fields(fields: CardFields) -> Self {
        let mut card = Self::default();
        card.apply(fields);
        card
    }

    pub fn apply(&mut self, fields: CardFields) {
        merge(&mut self.name, fields.name);
        merge(&mut self.character_id, fields.character_id);
        merge(&mut self.skill_id, fields.skill_id);
        merge(&mut self.rarity, fields.rarity);
        merge(&mut self.stat_1, fields.stat_1);
        merge(&mut self.stat_2, fields.stat_2);
        merge(&mut self.stat_3, fields.stat_3);
        merge(&mut self.stat_4, fields.stat_4);
    }
}

impl Skill {
    pub fn from_fields(fields: SkillFields) -> Self {
        let mut skill = Self::default();
        skill.apply(fields);
        skill
    }

    pub fn apply(&mut self, fields: SkillFields) {
        merge(&mut self.name, fields.name);
        merge(&mut self.description, fields.description);
    }
}

// =============================================================================
// Lenient scalar parsing
// =============================================================================

/// Deserializers coercing between JSON numbers and strings the way a
/// relational column would.
mod lenient {
    use serde::{de::Error, Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Int(i64),
        Float(f64),
        Text(String),
    }

    pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Scalar>::deserialize(deserializer)?.map(|scalar| match scalar {
            Scalar::Int(i) => i.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Text(s) => s,
        }))
    }

    pub fn int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Scalar>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Scalar::Int(i)) => Ok(Some(i)),
            Some(Scalar::Float(f)) => Err(D::Error::custom(format!(
                "expected an integer, found {f}"
            ))),
            Some(Scalar::Text(s)) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("expected an integer, found {s:?}"))),
        }
    }

    pub fn id<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match int(deserializer)? {
            None => Ok(None),
            Some(i) => u64::try_from(i)
                .map(Some)
                .map_err(|_| D::Error::custom(format!("expected an identifier, found {i}"))),
        }
    }
}
