//! Chart type and axis selection

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::{CoreError, RowCollection};

/// Visualization family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
    Scatter,
    #[default]
    None,
}

impl ChartKind {
    /// Selector order
    pub const ALL: [ChartKind; 5] = [
        ChartKind::None,
        ChartKind::Bar,
        ChartKind::Line,
        ChartKind::Pie,
        ChartKind::Scatter,
    ];

    /// Wire tag understood by the rendering surface
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Pie => "pie",
            ChartKind::Scatter => "scatter",
            ChartKind::None => "none",
        }
    }

    /// Human label shown in the chart-type selector
    pub fn selector_label(&self) -> &'static str {
        match self {
            ChartKind::Bar => "Bar Chart",
            ChartKind::Line => "Line Chart",
            ChartKind::Pie => "Pie Chart",
            ChartKind::Scatter => "Scatter Plot",
            ChartKind::None => "None",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, ChartKind::None)
    }

    /// Kinds that cannot be built without a y column
    pub fn requires_y(&self) -> bool {
        matches!(self, ChartKind::Bar | ChartKind::Scatter)
    }

    /// Kinds drawn on cartesian axes
    pub fn has_axes(&self) -> bool {
        matches!(self, ChartKind::Bar | ChartKind::Line | ChartKind::Scatter)
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bar" => Ok(ChartKind::Bar),
            "line" => Ok(ChartKind::Line),
            "pie" => Ok(ChartKind::Pie),
            "scatter" => Ok(ChartKind::Scatter),
            "" | "none" => Ok(ChartKind::None),
            other => Err(CoreError::UnknownChartKind(other.to_string())),
        }
    }
}

/// The column pair driving a chart. An empty name means unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisSelection {
    #[serde(default, deserialize_with = "deserialize_axis")]
    x: Option<String>,
    #[serde(default, deserialize_with = "deserialize_axis")]
    y: Option<String>,
}

impl AxisSelection {
    pub fn new(x: Option<&str>, y: Option<&str>) -> Self {
        Self {
            x: normalize(x.map(str::to_string)),
            y: normalize(y.map(str::to_string)),
        }
    }

    /// Selection with only the x axis set
    pub fn x_only(x: &str) -> Self {
        Self::new(Some(x), None)
    }

    pub fn xy(x: &str, y: &str) -> Self {
        Self::new(Some(x), Some(y))
    }

    pub fn set_x(&mut self, column: Option<String>) {
        self.x = normalize(column);
    }

    pub fn set_y(&mut self, column: Option<String>) {
        self.y = normalize(column);
    }

    pub fn x(&self) -> Option<&str> {
        self.x.as_deref()
    }

    pub fn y(&self) -> Option<&str> {
        self.y.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none()
    }

    /// Drop axis names that are not columns of `rows`.
    ///
    /// A stale reference behaves exactly like an unset axis.
    pub fn resolve(&self, rows: &RowCollection) -> AxisSelection {
        let keep = |column: &Option<String>| {
            column
                .as_ref()
                .filter(|name| rows.contains_column(name))
                .cloned()
        };
        AxisSelection {
            x: keep(&self.x),
            y: keep(&self.y),
        }
    }
}

fn normalize(column: Option<String>) -> Option<String> {
    column.filter(|name| !name.is_empty())
}

fn deserialize_axis<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Option::<String>::deserialize(deserializer).map(normalize)
}
