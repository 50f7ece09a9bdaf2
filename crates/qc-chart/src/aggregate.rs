//! Category aggregation (sum or count per category)

use indexmap::IndexMap;
use serde::Serialize;

use qc_core::{RowCollection, Value};

/// Aggregated value of one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    #[serde(serialize_with = "qc_core::value::serialize_number")]
    pub total: f64,
}

impl CategoryTotal {
    pub fn new(category: impl Into<String>, total: f64) -> Self {
        Self {
            category: category.into(),
            total,
        }
    }
}

/// Collapse `rows` into one total per category, in first-seen order.
///
/// Each row adds the value of `value_column` when that value is a number,
/// and exactly 1 otherwise. Without a value column the result is a row count
/// per category. A row lacking the category column falls into `"null"`.
pub fn aggregate_categories(
    rows: &RowCollection,
    category_column: &str,
    value_column: Option<&str>,
) -> Vec<CategoryTotal> {
    let mut totals: IndexMap<String, f64> = IndexMap::new();

    for row in rows {
        let category = row
            .get(category_column)
            .unwrap_or(&Value::Null)
            .to_category();
        let amount = value_column
            .and_then(|column| row.get(column))
            .and_then(Value::as_number)
            .unwrap_or(1.0);

        *totals.entry(category).or_insert(0.0) += amount;
    }

    tracing::debug!(
        "Aggregated {} rows into {} categories by '{}'",
        rows.len(),
        totals.len(),
        category_column
    );

    totals
        .into_iter()
        .map(|(category, total)| CategoryTotal { category, total })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use qc_core::row;

    #[test]
    fn test_total_serializes_as_integer_or_null() {
        let whole = serde_json::to_string(&CategoryTotal::new("A", 30.0)).unwrap();
        assert_eq!(whole, r#"{"category":"A","total":30}"#);

        let gap = serde_json::to_value(CategoryTotal::new("B", f64::NAN)).unwrap();
        assert!(gap["total"].is_null());
    }

    #[test]
    fn test_count_without_value_column() {
        let rows = RowCollection::new(vec![
            row! { "cat" => "A" },
            row! { "cat" => "A" },
            row! { "cat" => "B" },
        ]);

        assert_eq!(
            aggregate_categories(&rows, "cat", None),
            vec![CategoryTotal::new("A", 2.0), CategoryTotal::new("B", 1.0)]
        );
    }

    #[test]
    fn test_sum_with_numeric_value_column() {
        let rows = RowCollection::new(vec![
            row! { "region" => "north", "sales" => 10 },
            row! { "region" => "south", "sales" => 4.5 },
            row! { "region" => "north", "sales" => 5 },
        ]);

        assert_eq!(
            aggregate_categories(&rows, "region", Some("sales")),
            vec![CategoryTotal::new("north", 15.0), CategoryTotal::new("south", 4.5)]
        );
    }

    #[test]
    fn test_non_numeric_values_count_as_one() {
        let rows = RowCollection::new(vec![
            row! { "k" => "x", "v" => 3 },
            row! { "k" => "x", "v" => "n/a" },
            row! { "k" => "x", "v" => Value::Null },
        ]);

        assert_eq!(aggregate_categories(&rows, "k", Some("v")), vec![CategoryTotal::new("x", 5.0)]);
    }

    #[test]
    fn test_categories_keep_first_seen_order() {
        let rows = RowCollection::new(vec![
            row! { "k" => "zeta" },
            row! { "k" => 2020 },
            row! { "k" => "alpha" },
            row! { "k" => 2019 },
            row! { "k" => "zeta" },
        ]);

        let first: Vec<_> = aggregate_categories(&rows, "k", None)
            .into_iter()
            .map(|t| t.category)
            .collect();
        assert_eq!(first, vec!["zeta", "2020", "alpha", "2019"]);

        let again: Vec<_> = aggregate_categories(&rows, "k", None)
            .into_iter()
            .map(|t| t.category)
            .collect();
        assert_eq!(first, again);
    }

    #[test]
    fn test_booleans_and_missing_are_stringified() {
        let rows = RowCollection::new(vec![
            row! { "flag" => true },
            row! { "other" => 1 },
        ]);

        let categories: Vec<_> = aggregate_categories(&rows, "flag", None)
            .into_iter()
            .map(|t| t.category)
            .collect();
        assert_eq!(categories, vec!["true", "null"]);
    }
}
