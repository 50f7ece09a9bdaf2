//! Column classification
//!
//! Types are sampled from the first row only. A column that changes type
//! further down keeps the classification of row 0.

use indexmap::IndexMap;
use serde::Serialize;

use qc_core::{RowCollection, Value};

/// Role a column can play in a chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Categorical,
    Unknown,
}

impl ColumnKind {
    /// Classify by runtime type
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Number(_) => ColumnKind::Numeric,
            Value::String(_) | Value::Boolean(_) => ColumnKind::Categorical,
            Value::Null => ColumnKind::Unknown,
        }
    }
}

/// Column name to kind, in column declaration order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ColumnClassification {
    columns: IndexMap<String, ColumnKind>,
}

impl ColumnClassification {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Kind of `column`; absent columns are unknown
    pub fn kind_of(&self, column: &str) -> ColumnKind {
        self.columns.get(column).copied().unwrap_or(ColumnKind::Unknown)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ColumnKind)> {
        self.columns.iter().map(|(name, kind)| (name.as_str(), *kind))
    }

    /// Numeric columns in declaration order
    pub fn numeric(&self) -> Vec<&str> {
        self.of_kind(ColumnKind::Numeric)
    }

    /// Categorical columns in declaration order
    pub fn categorical(&self) -> Vec<&str> {
        self.of_kind(ColumnKind::Categorical)
    }

    fn of_kind(&self, kind: ColumnKind) -> Vec<&str> {
        self.iter()
            .filter(|(_, k)| *k == kind)
            .map(|(name, _)| name)
            .collect()
    }
}

/// Classify every column of `rows` from its first row
pub fn classify_columns(rows: &RowCollection) -> ColumnClassification {
    let Some(first) = rows.first() else {
        return ColumnClassification::default();
    };

    let columns = first
        .iter()
        .map(|(name, value)| (name.clone(), ColumnKind::of(value)))
        .collect();

    ColumnClassification { columns }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qc_core::row;

    #[test]
    fn test_empty_rows_give_empty_classification() {
        assert!(classify_columns(&RowCollection::default()).is_empty());
    }

    #[test]
    fn test_classify_by_first_row_type() {
        let rows = RowCollection::new(vec![row! {
            "city" => "Oslo",
            "sales" => 12.5,
            "open" => true,
            "note" => Value::Null,
        }]);
        let classes = classify_columns(&rows);

        assert_eq!(classes.kind_of("city"), ColumnKind::Categorical);
        assert_eq!(classes.kind_of("sales"), ColumnKind::Numeric);
        assert_eq!(classes.kind_of("open"), ColumnKind::Categorical);
        assert_eq!(classes.kind_of("note"), ColumnKind::Unknown);
        assert_eq!(classes.kind_of("absent"), ColumnKind::Unknown);
        assert_eq!(classes.numeric(), vec!["sales"]);
        assert_eq!(classes.categorical(), vec!["city", "open"]);
    }

    #[test]
    fn test_later_rows_are_not_scanned() {
        let rows = RowCollection::new(vec![
            row! { "v" => 1 },
            row! { "v" => "oops" },
        ]);
        assert_eq!(classify_columns(&rows).kind_of("v"), ColumnKind::Numeric);
    }
}
