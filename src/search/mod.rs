//! Bilingual food search pipeline: query analysis, candidate retrieval,
//! relevance scoring, ranking, and result projection.
//!
//! Retrieval is the only stage that performs I/O (through the `FoodStore`
//! trait); everything after it is a pure transformation.

pub(crate) mod engine;
mod project;
mod query;
mod rank;
mod retrieve;
mod score;

pub use project::ResultItem;
