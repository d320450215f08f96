use tracing::debug;

use crate::store::{FoodStore, StoreError};

use super::project::{ResultItem, project};
use super::query::Query;
use super::rank::rank;
use super::retrieve::retrieve;

/// Runs one search: analyze, retrieve, score, rank, project.
///
/// Blank or whitespace-only queries resolve to an empty list without touching
/// the store; store errors abort the whole call. Stateless and safe to invoke
/// concurrently.
pub async fn search(
    store: &impl FoodStore,
    raw: &str,
    limit: usize,
) -> Result<Vec<ResultItem>, StoreError> {
    let query = Query::analyze(raw);
    if query.tokens.is_empty() {
        return Ok(Vec::new());
    }

    let candidates = retrieve(store, &query).await?;
    let ranked = rank(candidates, &query);
    debug!(candidates = ranked.len(), limit, "ranking complete");

    Ok(project(ranked, limit))
}
