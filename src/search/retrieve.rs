//! Candidate retrieval: one or two pattern lookups against the store, biased
//! toward prefix matches for single-token queries and widened-then-filtered
//! for multi-token queries.

use std::collections::HashSet;

use tracing::debug;

use crate::store::{FoodRecord, FoodStore, NameColumn, StoreError};

use super::query::Query;

/// Cap on each single-token store query.
const SINGLE_TOKEN_CAP: usize = 50;
/// Below this many prefix hits, a substring query widens the candidate set.
const WIDEN_THRESHOLD: usize = 20;
/// Cap on the multi-token OR query; the AND post-filter narrows it.
const MULTI_TOKEN_CAP: usize = 200;

/// Gathers the candidate superset for scoring. Store errors propagate
/// unchanged; no retry, no partial results.
pub async fn retrieve(
    store: &impl FoodStore,
    query: &Query,
) -> Result<Vec<FoodRecord>, StoreError> {
    if query.tokens.is_empty() {
        return Ok(Vec::new());
    }

    let column = if query.is_hebrew {
        NameColumn::Hebrew
    } else {
        NameColumn::English
    };

    if let [word] = query.tokens.as_slice() {
        retrieve_single(store, column, word).await
    } else {
        retrieve_multi(store, column, &query.tokens).await
    }
}

async fn retrieve_single(
    store: &impl FoodStore,
    column: NameColumn,
    word: &str,
) -> Result<Vec<FoodRecord>, StoreError> {
    let mut candidates = store.match_prefix(column, word, SINGLE_TOKEN_CAP).await?;
    debug!(count = candidates.len(), "prefix matches");

    if candidates.len() < WIDEN_THRESHOLD {
        let broader = store.match_substring(column, word, SINGLE_TOKEN_CAP).await?;
        let seen: HashSet<i64> = candidates.iter().map(|r| r.id).collect();
        candidates.extend(broader.into_iter().filter(|r| !seen.contains(&r.id)));
        debug!(count = candidates.len(), "after substring widening");
    }

    Ok(candidates)
}

async fn retrieve_multi(
    store: &impl FoodStore,
    column: NameColumn,
    tokens: &[String],
) -> Result<Vec<FoodRecord>, StoreError> {
    // The OR fetch over-collects; AND over the tokens is the correctness
    // guarantee.
    let fetched = store
        .match_any_substring(column, tokens, MULTI_TOKEN_CAP)
        .await?;
    debug!(count = fetched.len(), "or-matches before AND filter");

    let tokens_lower: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();
    let candidates: Vec<FoodRecord> = fetched
        .into_iter()
        .filter(|r| {
            let text = column_text(r, column).to_lowercase();
            tokens_lower.iter().all(|t| text.contains(t.as_str()))
        })
        .collect();
    debug!(count = candidates.len(), "candidates after AND filter");

    Ok(candidates)
}

fn column_text(record: &FoodRecord, column: NameColumn) -> &str {
    match column {
        NameColumn::Hebrew => record.name.as_deref().unwrap_or(""),
        NameColumn::English => record.english_name.as_deref().unwrap_or(""),
    }
}
