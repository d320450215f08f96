use std::env;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

use super::{FoodRecord, FoodStore, NameColumn, StoreError};

const DEFAULT_TABLE: &str = "ingredients";
const SELECT_COLUMNS: &str =
    "id,name,english_name,calories_energy,protein_g,fat_g,carbohydrates_g";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
struct ApiKey(String);

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// Production `FoodStore` backed by a Supabase/PostgREST endpoint.
#[derive(Clone)]
pub struct PostgrestStore {
    http: Client,
    api_key: ApiKey,
    base_url: String,
    table: String,
}

impl PostgrestStore {
    /// Reads `SUPABASE_URL` and `SUPABASE_ANON_KEY`; `NOSH_TABLE` overrides
    /// the ingredient table name.
    pub fn from_env(http: Client) -> Result<Self, StoreError> {
        let base_url = env::var("SUPABASE_URL").map_err(|_| StoreError::NotConfigured)?;
        let api_key = env::var("SUPABASE_ANON_KEY").map_err(|_| StoreError::NotConfigured)?;
        let base_url = base_url.trim();
        let api_key = api_key.trim();
        if base_url.is_empty() || api_key.is_empty() {
            return Err(StoreError::NotConfigured);
        }
        let parsed = url::Url::parse(base_url).map_err(|_| StoreError::NotConfigured)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(StoreError::NotConfigured);
        }
        let table = env::var("NOSH_TABLE")
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_TABLE.to_string());
        Ok(Self {
            http,
            api_key: ApiKey(api_key.to_string()),
            base_url: base_url.trim_end_matches('/').to_string(),
            table,
        })
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(http: Client, base_url: &str) -> Self {
        Self {
            http,
            api_key: ApiKey("test-key".to_string()),
            base_url: base_url.trim_end_matches('/').to_string(),
            table: DEFAULT_TABLE.to_string(),
        }
    }

    async fn select(
        &self,
        filter: (&str, String),
        cap: usize,
    ) -> Result<Vec<FoodRecord>, StoreError> {
        let url = format!("{}/rest/v1/{}", self.base_url, self.table);
        let (key, value) = filter;
        let cap = cap.to_string();

        let response = self
            .http
            .get(&url)
            .header("apikey", &self.api_key.0)
            .header("Authorization", format!("Bearer {}", self.api_key.0))
            .header("User-Agent", crate::USER_AGENT)
            .query(&[
                ("select", SELECT_COLUMNS),
                ("limit", cap.as_str()),
                (key, value.as_str()),
            ])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, "store rejected query");
            return Err(StoreError::Rejected {
                code: status.as_u16(),
                message: truncate_snippet(&text, 200).to_string(),
            });
        }

        let rows: Vec<FoodRecord> = response.json().await?;
        debug!(table = %self.table, rows = rows.len(), "store query complete");
        Ok(rows)
    }
}

impl FoodStore for PostgrestStore {
    async fn match_prefix(
        &self,
        column: NameColumn,
        word: &str,
        cap: usize,
    ) -> Result<Vec<FoodRecord>, StoreError> {
        let filter = (column.as_str(), format!("ilike.{}", prefix_pattern(word)));
        self.select(filter, cap).await
    }

    async fn match_substring(
        &self,
        column: NameColumn,
        word: &str,
        cap: usize,
    ) -> Result<Vec<FoodRecord>, StoreError> {
        let filter = (column.as_str(), format!("ilike.{}", contains_pattern(word)));
        self.select(filter, cap).await
    }

    async fn match_any_substring(
        &self,
        column: NameColumn,
        words: &[String],
        cap: usize,
    ) -> Result<Vec<FoodRecord>, StoreError> {
        // PostgREST `or=` uses commas as condition separators, so each
        // pattern is double-quoted to keep token text inert.
        let conditions: Vec<String> = words
            .iter()
            .map(|w| format!("{}.ilike.\"{}\"", column.as_str(), contains_pattern(w)))
            .collect();
        let filter = ("or", format!("({})", conditions.join(",")));
        self.select(filter, cap).await
    }
}

/// PostgREST `ilike` patterns use `*` as the wildcard.
fn contains_pattern(word: &str) -> String {
    format!("*{}*", sanitize(word))
}

fn prefix_pattern(word: &str) -> String {
    format!("{}*", sanitize(word))
}

/// Cuts `text` at the last char boundary at or below `max` bytes; error
/// bodies can carry Hebrew row data, so a fixed byte offset may not land on a
/// boundary.
fn truncate_snippet(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Strips characters with reserved meaning in PostgREST filter syntax.
fn sanitize(word: &str) -> String {
    word.chars()
        .filter(|c| !matches!(c, '"' | '\\' | ',' | '(' | ')'))
        .collect()
}
