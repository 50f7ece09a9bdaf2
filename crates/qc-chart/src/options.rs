//! Axis, legend and title metadata for the rendering surface

use serde::Serialize;

use qc_core::{AxisSelection, ChartKind, Value};

/// How an axis spaces its ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScaleKind {
    #[serde(rename = "linear")]
    Linear,
    #[serde(rename = "category")]
    Categorical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleOptions {
    pub display: bool,
    pub text: String,
}

impl TitleOptions {
    fn shown(text: impl Into<String>) -> Self {
        Self {
            display: true,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendOptions {
    pub position: LegendPosition,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PluginOptions {
    pub legend: LegendOptions,
    pub title: TitleOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisOptions {
    pub title: TitleOptions,
    #[serde(rename = "type")]
    pub scale: ScaleKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scales {
    pub x: AxisOptions,
    pub y: AxisOptions,
}

/// Display-only chart metadata, derived on demand
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub plugins: PluginOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scales: Option<Scales>,
}

impl ChartOptions {
    pub fn title(&self) -> &str {
        &self.plugins.title.text
    }

    pub fn legend_position(&self) -> LegendPosition {
        self.plugins.legend.position
    }

    pub fn x_scale(&self) -> Option<ScaleKind> {
        self.scales.as_ref().map(|s| s.x.scale)
    }

    pub fn y_scale(&self) -> Option<ScaleKind> {
        self.scales.as_ref().map(|s| s.y.scale)
    }
}

/// Title text: capitalized chart kind followed by "Chart"
pub fn chart_title(kind: ChartKind) -> String {
    if kind.is_none() {
        return "Chart".to_string();
    }
    let name = kind.as_str();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => format!("{}{} Chart", first.to_ascii_uppercase(), chars.as_str()),
        None => "Chart".to_string(),
    }
}

/// Derive options for `kind`.
///
/// `x_sample` is a representative value of the x column; it only decides
/// whether a scatter x axis is linear. The y sample is accepted for symmetry
/// but every cartesian y axis is linear.
pub fn build_options(
    kind: ChartKind,
    axes: &AxisSelection,
    x_sample: Option<&Value>,
    _y_sample: Option<&Value>,
) -> ChartOptions {
    let scales = kind.has_axes().then(|| {
        let x_scale = if kind == ChartKind::Scatter && x_sample.map_or(false, Value::is_number) {
            ScaleKind::Linear
        } else {
            ScaleKind::Categorical
        };

        Scales {
            x: AxisOptions {
                title: TitleOptions::shown(axes.x().unwrap_or_default()),
                scale: x_scale,
            },
            y: AxisOptions {
                title: TitleOptions::shown(axes.y().unwrap_or_default()),
                scale: ScaleKind::Linear,
            },
        }
    });

    ChartOptions {
        responsive: true,
        maintain_aspect_ratio: false,
        plugins: PluginOptions {
            legend: LegendOptions {
                position: LegendPosition::default(),
            },
            title: TitleOptions::shown(chart_title(kind)),
        },
        scales,
    }
}
