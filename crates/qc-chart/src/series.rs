//! Chart-ready series
//!
//! [`build_series`] turns rows plus a (chart kind, axes) selection into the
//! exact structure the rendering surface draws, or `None` when the selection
//! cannot be satisfied. A series is never partially built.

use serde::{Serialize, Serializer};
use serde_json::json;

use qc_core::value::serialize_number;
use qc_core::{AxisSelection, ChartKind, Row, RowCollection, Value};

use crate::aggregate::{aggregate_categories, CategoryTotal};
use crate::colors::{slice_color, Hsl, Rgba, DATASET_BORDER, DATASET_FILL};

/// Offset applied to a hovered pie slice
const PIE_HOVER_OFFSET: u32 = 4;

/// Label of one position along a categorical axis
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Label {
    Text(String),
    Number(#[serde(serialize_with = "serialize_number")] f64),
    Missing,
}

impl From<&Value> for Label {
    fn from(value: &Value) -> Self {
        match value {
            Value::String(s) => Label::Text(s.clone()),
            Value::Number(n) => Label::Number(*n),
            Value::Boolean(b) => Label::Text(b.to_string()),
            Value::Null => Label::Missing,
        }
    }
}

/// One labeled value array
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    #[serde(serialize_with = "serialize_values")]
    pub data: Vec<f64>,
    pub background_color: Rgba,
    pub border_color: Rgba,
    pub border_width: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
}

impl Dataset {
    fn new(label: &str, data: Vec<f64>) -> Self {
        Self {
            label: label.to_string(),
            data,
            background_color: DATASET_FILL,
            border_color: DATASET_BORDER,
            border_width: 1,
            fill: None,
        }
    }
}

/// Labels plus value arrays, used by bar and line charts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledSeries {
    pub labels: Vec<Label>,
    pub datasets: Vec<Dataset>,
}

/// A scatter coordinate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    #[serde(serialize_with = "serialize_number")]
    pub x: f64,
    #[serde(serialize_with = "serialize_number")]
    pub y: f64,
}

/// Coordinate pairs, one per row
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub label: String,
    pub points: Vec<Point>,
    pub color: Rgba,
}

/// Pie slice: aggregated category with its positional color
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub category: String,
    pub value: f64,
    pub color: Hsl,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSeries {
    pub slices: Vec<Slice>,
    pub hover_offset: u32,
}

/// Finalized data for one chart
#[derive(Debug, Clone, PartialEq)]
pub enum Series {
    Labeled(LabeledSeries),
    Scatter(ScatterSeries),
    Pie(PieSeries),
}

impl Series {
    /// Axis labels, absent for scatter
    pub fn labels(&self) -> Option<Vec<Label>> {
        match self {
            Series::Labeled(series) => Some(series.labels.clone()),
            Series::Scatter(_) => None,
            Series::Pie(pie) => Some(
                pie.slices
                    .iter()
                    .map(|s| Label::Text(s.category.clone()))
                    .collect(),
            ),
        }
    }

    /// The data object in the shape the rendering surface expects
    pub fn to_chart_data(&self) -> serde_json::Value {
        match self {
            Series::Labeled(series) => json!({
                "labels": series.labels,
                "datasets": series.datasets,
            }),
            Series::Scatter(series) => json!({
                "datasets": [{
                    "label": series.label,
                    "data": series.points,
                    "backgroundColor": series.color,
                }],
            }),
            Series::Pie(pie) => {
                let labels: Vec<&str> = pie.slices.iter().map(|s| s.category.as_str()).collect();
                let values: Vec<f64> = pie.slices.iter().map(|s| s.value).collect();
                let colors: Vec<Hsl> = pie.slices.iter().map(|s| s.color).collect();
                json!({
                    "labels": labels,
                    "datasets": [{
                        "data": NumberList(&values),
                        "backgroundColor": colors,
                        "hoverOffset": pie.hover_offset,
                    }],
                })
            }
        }
    }
}

/// Build the series for `kind` over `rows`.
///
/// Requires non-empty rows and an x column; bar and scatter also need y.
/// Axis names that are not columns of `rows` count as unset.
pub fn build_series(rows: &RowCollection, kind: ChartKind, axes: &AxisSelection) -> Option<Series> {
    if rows.is_empty() {
        return None;
    }

    let axes = axes.resolve(rows);
    let Some(x) = axes.x() else {
        tracing::debug!("No x axis selected for {} chart", kind);
        return None;
    };

    let series = match (kind, axes.y()) {
        (ChartKind::Bar | ChartKind::Line, Some(y)) => Series::Labeled(labeled_series(rows, x, y)),
        (ChartKind::Scatter, Some(y)) => Series::Scatter(scatter_series(rows, x, y)),
        (ChartKind::Line, None) => Series::Labeled(index_series(rows, x)),
        (ChartKind::Pie, y) => {
            let columns = rows.columns();
            let value_column = y.or_else(|| columns.first().map(String::as_str));
            Series::Pie(pie_series(aggregate_categories(rows, x, value_column)))
        }
        _ => {
            tracing::debug!("Selection insufficient for {} chart (x: {}, y: {:?})", kind, x, axes.y());
            return None;
        }
    };

    Some(series)
}

fn cell<'a>(row: &'a Row, column: &str) -> &'a Value {
    row.get(column).unwrap_or(&Value::Null)
}

/// x values as labels, y values coerced to numbers
fn labeled_series(rows: &RowCollection, x: &str, y: &str) -> LabeledSeries {
    let labels = rows.iter().map(|row| Label::from(cell(row, x))).collect();
    let data = rows.iter().map(|row| cell(row, y).coerce_number()).collect();

    LabeledSeries {
        labels,
        datasets: vec![Dataset::new(y, data)],
    }
}

/// A single numeric column read against row index
fn index_series(rows: &RowCollection, x: &str) -> LabeledSeries {
    let labels = (0..rows.len()).map(|i| Label::Number(i as f64)).collect();
    let data = rows.iter().map(|row| cell(row, x).coerce_number()).collect();

    let mut dataset = Dataset::new(x, data);
    dataset.fill = Some(false);

    LabeledSeries {
        labels,
        datasets: vec![dataset],
    }
}

fn scatter_series(rows: &RowCollection, x: &str, y: &str) -> ScatterSeries {
    let points = rows
        .iter()
        .map(|row| Point {
            x: cell(row, x).coerce_number(),
            y: cell(row, y).coerce_number(),
        })
        .collect();

    ScatterSeries {
        label: format!("{} vs {}", y, x),
        points,
        color: DATASET_FILL,
    }
}

fn pie_series(totals: Vec<CategoryTotal>) -> PieSeries {
    let slices = totals
        .into_iter()
        .enumerate()
        .map(|(index, total)| Slice {
            category: total.category,
            value: total.total,
            color: slice_color(index),
        })
        .collect();

    PieSeries {
        slices,
        hover_offset: PIE_HOVER_OFFSET,
    }
}

fn serialize_values<S: Serializer>(values: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
    NumberList(values).serialize(serializer)
}

/// Numbers serialized through [`serialize_number`]
struct NumberList<'a>(&'a [f64]);

impl Serialize for NumberList<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeSeq;

        struct Number(f64);
        impl Serialize for Number {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serialize_number(&self.0, serializer)
            }
        }

        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for value in self.0 {
            seq.serialize_element(&Number(*value))?;
        }
        seq.end()
    }
}
