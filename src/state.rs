// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::TokenVerifier;
use crate::storage::CatalogDatabase;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<CatalogDatabase>,
    pub verifier: Arc<TokenVerifier>,
}

impl AppState {
    pub fn new(store: CatalogDatabase, verifier: TokenVerifier) -> Self {
        Self {
            store: Arc::new(store),
            verifier: Arc::new(verifier),
        }
    }
}
