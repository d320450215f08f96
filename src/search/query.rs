/// A parsed search query: trimmed raw text, its whitespace tokens, and the
/// script class used to pick the search column.
#[derive(Debug, Clone)]
pub struct Query {
    pub raw: String,
    pub tokens: Vec<String>,
    pub is_hebrew: bool,
}

impl Query {
    /// Never fails: blank or whitespace-only input yields an empty token list,
    /// which downstream stages turn into an empty result set.
    pub fn analyze(raw: &str) -> Self {
        let raw = raw.trim().to_string();
        let tokens = raw.split_whitespace().map(str::to_string).collect();
        let is_hebrew = contains_hebrew(&raw);
        Self {
            raw,
            tokens,
            is_hebrew,
        }
    }
}

fn contains_hebrew(text: &str) -> bool {
    text.chars().any(|c| matches!(c, '\u{0590}'..='\u{05FF}'))
}
