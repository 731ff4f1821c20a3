// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Routing and permission tables of the three catalog resources.

use super::resource::Resource;
use crate::auth::ResourcePermissions;
use crate::models::{Card, CardFields, Character, CharacterFields, Skill, SkillFields};

impl Resource for Character {
    type Fields = CharacterFields;

    const KEY: &'static str = "character";
    const PATH: &'static str = "/characters";
    const TAG: &'static str = "Characters";
    const SCHEMA: &'static str = "Character";
    const FIELDS_SCHEMA: &'static str = "CharacterFields";
    const PERMISSIONS: ResourcePermissions = ResourcePermissions {
        list: "get:characters",
        get: "get:character",
        create: "post:character",
        update: "patch:character",
        delete: "delete:character",
    };

    fn from_fields(fields: CharacterFields) -> Self {
        Character::from_fields(fields)
    }

    fn merge(&mut self, fields: CharacterFields) {
        self.apply(fields);
    }
}

impl Resource for Card {
    type Fields = CardFields;

    const KEY: &'static str = "card";
    const PATH: &'static str = "/cards";
    const TAG: &'static str = "Cards";
    const SCHEMA: &'static str = "Card";
    const FIELDS_SCHEMA: &'static str = "CardFields";
    const PERMISSIONS: ResourcePermissions = ResourcePermissions {
        list: "get:cards",
        get: "get:card",
        create: "post:card",
        update: "patch:card",
        delete: "delete:card",
    };

    fn from_fields(fields: CardFields) -> Self {
        Card::from_fields(fields)
    }

    fn merge(&mut self, fields: CardFields) {
        self.apply(fields);
    }
}

impl Resource for Skill {
    type Fields = SkillFields;

    const KEY: &'static str = "skill";
    const PATH: &'static str = "/skills";
    const TAG: &'static str = "Skills";
    const SCHEMA: &'static str = "Skill";
    const FIELDS_SCHEMA: &'static str = "SkillFields";
    const PERMISSIONS: ResourcePermissions = ResourcePermissions {
        list: "get:skills",
        get: "get:skill",
        create: "post:skill",
        update: "patch:skill",
        delete: "delete:skill",
    };

    fn from_fields(fields: SkillFields) -> Self {
        Skill::from_fields(fields)
    }

    fn merge(&mut self, fields: SkillFields) {
        self.apply(fields);
    }
}
