use serde::Serialize;

use super::score::ScoredCandidate;

/// The store's nutrition columns are per 100g, so every item carries this
/// fixed portion size.
const PORTION_GRAMS: u32 = 100;

/// One search result as returned to callers: resolved display name plus
/// per-100g nutrition facts.
#[derive(Debug, Clone, Serialize)]
pub struct ResultItem {
    pub id: i64,
    pub name: String,
    pub english_name: String,
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    pub brand: String,
    pub household_measure: String,
    pub portion_grams: u32,
    pub upc: Option<String>,
}

/// Truncates to `limit` and maps candidates to the output shape. Absent
/// nutrition values become zero; brand, household measure, and UPC have no
/// source column and stay at their defaults.
pub fn project(ranked: Vec<ScoredCandidate>, limit: usize) -> Vec<ResultItem> {
    ranked
        .into_iter()
        .take(limit)
        .map(|candidate| {
            let name = candidate.display_name().to_string();
            let record = candidate.record;
            ResultItem {
                id: record.id,
                name,
                english_name: record.english_name.unwrap_or_default(),
                calories: record.calories_energy.unwrap_or(0.0),
                protein: record.protein_g.unwrap_or(0.0),
                fat: record.fat_g.unwrap_or(0.0),
                carbs: record.carbohydrates_g.unwrap_or(0.0),
                brand: String::new(),
                household_measure: String::new(),
                portion_grams: PORTION_GRAMS,
                upc: None,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::query::Query;
    use crate::search::score::score;
    use crate::store::FoodRecord;
    use crate::store::mock::food;

    #[test]
    fn truncates_to_limit() {
        let q = Query::analyze("milk");
        let ranked = vec![
            score(food(1, None, Some("Milk")), &q),
            score(food(2, None, Some("Milk Chocolate")), &q),
            score(food(3, None, Some("Almond Milk")), &q),
        ];
        assert_eq!(project(ranked.clone(), 2).len(), 2);
        assert!(project(ranked, 0).is_empty());
    }

    #[test]
    fn fills_defaults_and_nutrition() {
        let q = Query::analyze("milk");
        let record = FoodRecord {
            id: 5,
            name: Some("חלב".to_string()),
            english_name: Some("Milk".to_string()),
            calories_energy: Some(61.0),
            protein_g: Some(3.3),
            fat_g: None,
            carbohydrates_g: Some(4.7),
        };
        let items = project(vec![score(record, &q)], 10);

        let item = &items[0];
        assert_eq!(item.id, 5);
        assert_eq!(item.name, "Milk");
        assert_eq!(item.english_name, "Milk");
        assert_eq!(item.calories, 61.0);
        assert_eq!(item.fat, 0.0);
        assert_eq!(item.portion_grams, 100);
        assert_eq!(item.brand, "");
        assert_eq!(item.household_measure, "");
        assert_eq!(item.upc, None);
    }

    #[test]
    fn display_name_falls_back_across_languages() {
        let q = Query::analyze("milk");
        let items = project(vec![score(food(1, Some("שוקו"), None), &q)], 10);
        assert_eq!(items[0].name, "שוקו");
        assert_eq!(items[0].english_name, "");
    }
}
