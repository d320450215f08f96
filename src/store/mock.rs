//! In-memory `FoodStore` for pipeline tests: canned responses consumed in
//! order, with every call recorded for assertion.

use std::collections::VecDeque;
use std::sync::Mutex;

use super::{FoodRecord, FoodStore, NameColumn, StoreError};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Prefix {
        column: NameColumn,
        word: String,
        cap: usize,
    },
    Substring {
        column: NameColumn,
        word: String,
        cap: usize,
    },
    AnySubstring {
        column: NameColumn,
        words: Vec<String>,
        cap: usize,
    },
}

pub(crate) struct MockStore {
    responses: Mutex<VecDeque<Result<Vec<FoodRecord>, StoreError>>>,
    calls: Mutex<Vec<Call>>,
}

impl MockStore {
    pub(crate) fn with_responses(
        responses: Vec<Result<Vec<FoodRecord>, StoreError>>,
    ) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn next(&self) -> Result<Vec<FoodRecord>, StoreError> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

impl FoodStore for MockStore {
    async fn match_prefix(
        &self,
        column: NameColumn,
        word: &str,
        cap: usize,
    ) -> Result<Vec<FoodRecord>, StoreError> {
        self.calls.lock().unwrap().push(Call::Prefix {
            column,
            word: word.to_string(),
            cap,
        });
        self.next()
    }

    async fn match_substring(
        &self,
        column: NameColumn,
        word: &str,
        cap: usize,
    ) -> Result<Vec<FoodRecord>, StoreError> {
        self.calls.lock().unwrap().push(Call::Substring {
            column,
            word: word.to_string(),
            cap,
        });
        self.next()
    }

    async fn match_any_substring(
        &self,
        column: NameColumn,
        words: &[String],
        cap: usize,
    ) -> Result<Vec<FoodRecord>, StoreError> {
        self.calls.lock().unwrap().push(Call::AnySubstring {
            column,
            words: words.to_vec(),
            cap,
        });
        self.next()
    }
}

/// Record fixture with zeroed nutrition.
pub(crate) fn food(id: i64, name: Option<&str>, english_name: Option<&str>) -> FoodRecord {
    FoodRecord {
        id,
        name: name.map(str::to_string),
        english_name: english_name.map(str::to_string),
        calories_energy: None,
        protein_g: None,
        fat_g: None,
        carbohydrates_g: None,
    }
}
