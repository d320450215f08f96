//! External food store capability: case-insensitive pattern lookups over the
//! ingredient table's two name columns.
//!
//! `NotConfigured` and `Unreachable` mean the store cannot be reached at all;
//! `Rejected` and `Network` mean a request was made and failed. The search
//! pipeline propagates either class unchanged and never retries.

pub mod postgrest;

#[cfg(test)]
pub(crate) mod mock;

use serde::Deserialize;

/// One row of the ingredient table. Nutrition values are per 100g and may be
/// absent; projection substitutes zero.
#[derive(Debug, Clone, Deserialize)]
pub struct FoodRecord {
    pub id: i64,
    /// Hebrew label.
    pub name: Option<String>,
    pub english_name: Option<String>,
    pub calories_energy: Option<f64>,
    pub protein_g: Option<f64>,
    pub fat_g: Option<f64>,
    pub carbohydrates_g: Option<f64>,
}

/// Which name column a lookup targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameColumn {
    Hebrew,
    English,
}

impl NameColumn {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            NameColumn::Hebrew => "name",
            NameColumn::English => "english_name",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("SUPABASE_URL / SUPABASE_ANON_KEY not set")]
    NotConfigured,

    #[error("food store unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    #[error("store rejected query ({code}): {message}")]
    Rejected { code: u16, message: String },

    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            StoreError::Unreachable(e)
        } else {
            StoreError::Network(e)
        }
    }
}

/// Abstraction over the pattern-searchable ingredient table.
/// Implemented by `PostgrestStore` for production; mock implementations used in tests.
pub trait FoodStore {
    /// Rows whose `column` starts with `word`, case-insensitive, at most `cap`.
    async fn match_prefix(
        &self,
        column: NameColumn,
        word: &str,
        cap: usize,
    ) -> Result<Vec<FoodRecord>, StoreError>;

    /// Rows whose `column` contains `word`, case-insensitive, at most `cap`.
    async fn match_substring(
        &self,
        column: NameColumn,
        word: &str,
        cap: usize,
    ) -> Result<Vec<FoodRecord>, StoreError>;

    /// Rows whose `column` contains at least one of `words`, case-insensitive,
    /// at most `cap`.
    async fn match_any_substring(
        &self,
        column: NameColumn,
        words: &[String],
        cap: usize,
    ) -> Result<Vec<FoodRecord>, StoreError>;
}
