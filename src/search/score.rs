//! Relevance scoring: a strict priority ladder per name field, the candidate's
//! score being the better of its two fields.

use crate::store::FoodRecord;

use super::query::Query;

const EXACT: u32 = 10_000;
const STARTS_WITH: u32 = 9_000;
const PHRASE_AT_START: u32 = 8_800;
const LEADING_WORDS: u32 = 8_700;
const FIRST_WORD: u32 = 8_500;
const PHRASE_ANYWHERE: u32 = 5_000;
const CONTAINS_QUERY: u32 = 3_000;
const ALL_TOKENS: u32 = 2_000;
const CONTIGUOUS_BONUS: u32 = 1_000;
const IN_ORDER_BONUS: u32 = 500;
const TOKEN_FIRST_WORD: u32 = 1_000;
const TOKEN_WHOLE_WORD: u32 = 500;
const TOKEN_SUBSTRING: u32 = 100;

/// Which language label to surface for a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayChoice {
    Hebrew,
    English,
}

#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub record: FoodRecord,
    pub score: u32,
    pub matched_hebrew: bool,
    pub matched_english: bool,
    pub display: DisplayChoice,
}

impl ScoredCandidate {
    /// Preferred-language label, falling back to the other language when the
    /// preferred one is missing or empty.
    pub fn display_name(&self) -> &str {
        let (preferred, fallback) = match self.display {
            DisplayChoice::Hebrew => (&self.record.name, &self.record.english_name),
            DisplayChoice::English => (&self.record.english_name, &self.record.name),
        };
        preferred
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| fallback.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or("")
    }
}

/// Scores one candidate against the query. Pure; never fails.
pub fn score(record: FoodRecord, query: &Query) -> ScoredCandidate {
    let raw = query.raw.to_lowercase();
    let tokens: Vec<String> = query.tokens.iter().map(|t| t.to_lowercase()).collect();

    let hebrew_sub = record
        .name
        .as_deref()
        .map_or(0, |n| field_score(&n.to_lowercase(), &raw, &tokens));
    let english_sub = record
        .english_name
        .as_deref()
        .map_or(0, |n| field_score(&n.to_lowercase(), &raw, &tokens));

    ScoredCandidate {
        score: hebrew_sub.max(english_sub),
        matched_hebrew: hebrew_sub > 0,
        matched_english: english_sub > 0,
        display: resolve_display(query.is_hebrew, hebrew_sub, english_sub),
        record,
    }
}

/// Default to the query's own script; defer to the other field only when it
/// strictly outscores a field that did not match at all.
fn resolve_display(query_is_hebrew: bool, hebrew_sub: u32, english_sub: u32) -> DisplayChoice {
    if query_is_hebrew {
        if english_sub > hebrew_sub && hebrew_sub == 0 {
            DisplayChoice::English
        } else {
            DisplayChoice::Hebrew
        }
    } else if hebrew_sub > english_sub && english_sub == 0 {
        DisplayChoice::Hebrew
    } else {
        DisplayChoice::English
    }
}

/// Sub-score ladder for one name field. All inputs are lowercased by the
/// caller; the first matching tier wins, with only the all-tokens tier and the
/// per-token tier below it being additive.
fn field_score(field: &str, raw: &str, tokens: &[String]) -> u32 {
    if field.is_empty() || raw.is_empty() {
        return 0;
    }

    if field == raw {
        return EXACT;
    }
    if field.starts_with(raw) {
        return STARTS_WITH;
    }

    let words: Vec<&str> = field.split_whitespace().collect();

    if tokens.len() == 1 && words.first() == Some(&tokens[0].as_str()) {
        return FIRST_WORD;
    }

    if tokens.len() > 1 {
        let phrase = tokens.join(" ");
        if field.starts_with(phrase.as_str()) {
            return PHRASE_AT_START;
        }
        if words.len() >= tokens.len() && words.iter().zip(tokens).all(|(w, t)| *w == *t) {
            return LEADING_WORDS;
        }
        if field.contains(phrase.as_str()) {
            return PHRASE_ANYWHERE;
        }
    }

    if field.contains(raw) {
        return CONTAINS_QUERY;
    }

    if tokens.iter().all(|t| field.contains(t.as_str())) {
        let mut sub = ALL_TOKENS;
        let phrase = tokens.join(" ");
        if field.contains(phrase.as_str()) {
            sub += CONTIGUOUS_BONUS;
        }
        if tokens_in_order(field, tokens) {
            sub += IN_ORDER_BONUS;
        }
        return sub;
    }

    // Partial credit per token, lowest priority.
    let mut sub = 0;
    for token in tokens {
        match words.iter().position(|w| *w == token) {
            Some(0) => sub += TOKEN_FIRST_WORD,
            Some(_) => sub += TOKEN_WHOLE_WORD,
            None if field.contains(token.as_str()) => sub += TOKEN_SUBSTRING,
            None => {}
        }
    }
    sub
}

/// First occurrence of each token must sit strictly right of the previous
/// token's first occurrence.
fn tokens_in_order(field: &str, tokens: &[String]) -> bool {
    let mut last: Option<usize> = None;
    for token in tokens {
        match field.find(token.as_str()) {
            Some(idx) if last.is_none_or(|l| idx > l) => last = Some(idx),
            _ => return false,
        }
    }
    true
}
