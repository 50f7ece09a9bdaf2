//! Envelope handed to the rendering surface

use serde::Serialize;

use qc_core::ChartKind;

use crate::options::ChartOptions;
use crate::series::Series;

/// `{ chartType, data, options }` as the renderer consumes it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderPayload {
    pub chart_type: ChartKind,
    pub data: serde_json::Value,
    pub options: ChartOptions,
}

impl RenderPayload {
    /// Wrap a finished series. Nothing is drawn for kind `none`.
    pub fn new(kind: ChartKind, series: &Series, options: ChartOptions) -> Option<Self> {
        if kind.is_none() {
            return None;
        }
        Some(Self {
            chart_type: kind,
            data: series.to_chart_data(),
            options,
        })
    }
}
