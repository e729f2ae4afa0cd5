// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub type Result<T> = std::result::Result<T, TallyError>;

#[derive(thiserror::Error, Debug)]
pub enum TallyError {
    /// Rejected user input. Nothing was mutated.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Cart is empty, nothing to check out")]
    EmptyCart,

    #[error("Could not load the product catalog ({0}); please try again")]
    Catalog(#[from] reqwest::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TallyError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        TallyError::InvalidInput(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        TallyError::NotFound(msg.into())
    }
}
