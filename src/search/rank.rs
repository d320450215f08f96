use std::collections::HashSet;

use crate::store::FoodRecord;

use super::query::Query;
use super::score::{ScoredCandidate, score};

/// Scores every candidate, drops duplicate ids (keeping the first instance,
/// a safety net for overlapping retrieval queries), and sorts by score
/// descending then display name ascending, case-insensitive. The order is
/// total, so identical input yields identical output.
pub fn rank(candidates: Vec<FoodRecord>, query: &Query) -> Vec<ScoredCandidate> {
    let mut seen = HashSet::new();
    let mut ranked: Vec<ScoredCandidate> = candidates
        .into_iter()
        .filter(|r| seen.insert(r.id))
        .map(|r| score(r, query))
        .collect();

    ranked.sort_by(|a, b| {
        b.score.cmp(&a.score).then_with(|| {
            a.display_name()
                .to_lowercase()
                .cmp(&b.display_name().to_lowercase())
        })
    });

    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mock::food;

    #[test]
    fn orders_by_score_descending() {
        let q = Query::analyze("milk");
        let ranked = rank(
            vec![
                food(1, None, Some("Almond Milk")),
                food(2, None, Some("Milk")),
                food(3, None, Some("Milk Chocolate")),
            ],
            &q,
        );
        let names: Vec<&str> = ranked.iter().map(|c| c.display_name()).collect();
        assert_eq!(names, vec!["Milk", "Milk Chocolate", "Almond Milk"]);
    }

    #[test]
    fn ties_break_alphabetically_case_insensitive() {
        let q = Query::analyze("milk");
        let ranked = rank(
            vec![
                food(1, None, Some("milk b")),
                food(2, None, Some("Milk A")),
            ],
            &q,
        );
        let names: Vec<&str> = ranked.iter().map(|c| c.display_name()).collect();
        assert_eq!(names, vec!["Milk A", "milk b"]);
    }

    #[test]
    fn duplicate_ids_keep_first_instance() {
        let q = Query::analyze("milk");
        let ranked = rank(
            vec![
                food(7, None, Some("Milk")),
                food(7, None, Some("Milk Duplicate")),
            ],
            &q,
        );
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].display_name(), "Milk");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let q = Query::analyze("milk");
        assert!(rank(Vec::new(), &q).is_empty());
    }
}
