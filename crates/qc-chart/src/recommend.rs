//! Default chart type and axes for freshly received data

use qc_core::{AxisSelection, ChartKind};

use crate::classify::ColumnClassification;

/// A suggested chart, applied only while the user has not chosen one
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub kind: ChartKind,
    pub axes: AxisSelection,
}

/// Pick a chart for the classified columns; first matching rule wins.
///
/// 1. Two or more numeric columns: scatter of the first two.
/// 2. A categorical and a numeric column: bar of the first of each.
/// 3. A single numeric column over several rows: line against row index.
/// 4. Otherwise nothing.
pub fn recommend(classification: &ColumnClassification, row_count: usize) -> Option<Recommendation> {
    let numeric = classification.numeric();
    let categorical = classification.categorical();

    let recommendation = if numeric.len() >= 2 {
        Recommendation {
            kind: ChartKind::Scatter,
            axes: AxisSelection::xy(numeric[0], numeric[1]),
        }
    } else if !categorical.is_empty() && !numeric.is_empty() {
        Recommendation {
            kind: ChartKind::Bar,
            axes: AxisSelection::xy(categorical[0], numeric[0]),
        }
    } else if numeric.len() == 1 && row_count > 1 {
        Recommendation {
            kind: ChartKind::Line,
            axes: AxisSelection::x_only(numeric[0]),
        }
    } else {
        tracing::debug!(
            "No chart recommendation for {} numeric / {} categorical columns over {} rows",
            numeric.len(),
            categorical.len(),
            row_count
        );
        return None;
    };

    tracing::info!(
        "Recommending {} chart (x: {:?}, y: {:?})",
        recommendation.kind,
        recommendation.axes.x(),
        recommendation.axes.y()
    );
    Some(recommendation)
}
