//! Caller-owned chart state
//!
//! [`ChartSession`] holds the current rows and selections. Everything derived
//! from them (series, options, status) is recomputed on each read, so any
//! sequence of selection changes yields the same result as a fresh build.

use std::sync::Arc;

use qc_core::events::events::ChartSelectionChanged;
use qc_core::{AxisSelection, ChartKind, RowCollection};

use crate::classify::{classify_columns, ColumnClassification};
use crate::options::{build_options, ChartOptions};
use crate::recommend::recommend;
use crate::render::RenderPayload;
use crate::series::{build_series, Series};

/// What the caller should show instead of (or along with) a chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartStatus {
    /// No rows: passive "nothing to show"
    EmptyData,
    /// Too few rows or columns to be worth charting
    NotVisualizable,
    /// No chart type chosen
    AwaitingSelection,
    /// The chosen type lacks a usable axis. A warning is due only when the
    /// user picked the selection themselves and expects output.
    InsufficientSelection { user_selected: bool },
    Ready,
}

impl ChartStatus {
    pub fn message(&self) -> &'static str {
        match self {
            ChartStatus::EmptyData => "No data to display.",
            ChartStatus::NotVisualizable => "This result cannot be visualized effectively.",
            ChartStatus::AwaitingSelection => "Select a chart type and axes to visualize your data.",
            ChartStatus::InsufficientSelection { .. } => {
                "Please select appropriate X and Y axes for the chosen chart type."
            }
            ChartStatus::Ready => "",
        }
    }
}

/// Whether a query result is worth offering as a chart at all
pub fn is_chartable(rows: &RowCollection) -> bool {
    rows.len() > 1 && rows.columns().len() >= 2
}

/// Rows plus the current chart selection
#[derive(Debug, Clone, Default)]
pub struct ChartSession {
    rows: Arc<RowCollection>,
    classification: ColumnClassification,
    kind: ChartKind,
    axes: AxisSelection,
    user_selected: bool,
}

impl ChartSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session over `rows` with the recommendation applied
    pub fn with_rows(rows: Arc<RowCollection>) -> Self {
        let mut session = Self::new();
        session.load(rows);
        session
    }

    /// Replace the rows.
    ///
    /// A new collection resets the selection and applies the recommendation
    /// once. Loading the collection already held keeps the user's choices.
    pub fn load(&mut self, rows: Arc<RowCollection>) {
        if Arc::ptr_eq(&self.rows, &rows) {
            return;
        }

        self.classification = classify_columns(&rows);
        self.kind = ChartKind::None;
        self.axes = AxisSelection::default();
        self.user_selected = false;

        if let Some(recommendation) = recommend(&self.classification, rows.len()) {
            self.kind = recommendation.kind;
            self.axes = recommendation.axes;
        }

        tracing::debug!(
            "Loaded {} rows with {} columns into chart session",
            rows.len(),
            self.classification.len()
        );
        self.rows = rows;
    }

    pub fn rows(&self) -> &RowCollection {
        &self.rows
    }

    pub fn classification(&self) -> &ColumnClassification {
        &self.classification
    }

    pub fn chart_kind(&self) -> ChartKind {
        self.kind
    }

    pub fn axes(&self) -> &AxisSelection {
        &self.axes
    }

    /// Whether any selection came from the user rather than the recommendation
    pub fn user_selected(&self) -> bool {
        self.user_selected
    }

    pub fn set_chart_kind(&mut self, kind: ChartKind) {
        self.kind = kind;
        self.user_selected = true;
    }

    pub fn set_x_axis(&mut self, column: Option<String>) {
        self.axes.set_x(column);
        self.user_selected = true;
    }

    pub fn set_y_axis(&mut self, column: Option<String>) {
        self.axes.set_y(column);
        self.user_selected = true;
    }

    /// Options for the axis selectors
    pub fn column_names(&self) -> Vec<String> {
        self.rows.columns()
    }

    /// Pie charts take no separate y selection
    pub fn y_selector_visible(&self) -> bool {
        self.kind != ChartKind::Pie
    }

    pub fn series(&self) -> Option<Series> {
        build_series(&self.rows, self.kind, &self.axes)
    }

    pub fn options(&self) -> ChartOptions {
        let axes = self.axes.resolve(&self.rows);
        let x_sample = axes.x().and_then(|x| self.rows.sample(x));
        let y_sample = axes.y().and_then(|y| self.rows.sample(y));
        build_options(self.kind, &axes, x_sample, y_sample)
    }

    /// Everything the renderer needs, or `None` when nothing can be drawn
    pub fn payload(&self) -> Option<RenderPayload> {
        let series = self.series()?;
        RenderPayload::new(self.kind, &series, self.options())
    }

    pub fn status(&self) -> ChartStatus {
        if self.rows.is_empty() {
            ChartStatus::EmptyData
        } else if !is_chartable(&self.rows) {
            ChartStatus::NotVisualizable
        } else if self.kind.is_none() {
            ChartStatus::AwaitingSelection
        } else if self.series().is_none() {
            ChartStatus::InsufficientSelection {
                user_selected: self.user_selected,
            }
        } else {
            ChartStatus::Ready
        }
    }

    /// Current selection as a bus event
    pub fn selection_event(&self) -> ChartSelectionChanged {
        ChartSelectionChanged {
            kind: self.kind,
            x: self.axes.x().map(str::to_string),
            y: self.axes.y().map(str::to_string),
            user_selected: self.user_selected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qc_core::row;

    fn sales() -> Arc<RowCollection> {
        Arc::new(RowCollection::new(vec![
            row! { "category" => "A", "value" => 10 },
            row! { "category" => "B", "value" => 20 },
        ]))
    }

    #[test]
    fn test_recommendation_applied_on_load() {
        let session = ChartSession::with_rows(sales());

        assert_eq!(session.chart_kind(), ChartKind::Bar);
        assert_eq!(session.axes(), &AxisSelection::xy("category", "value"));
        assert!(!session.user_selected());
        assert_eq!(session.status(), ChartStatus::Ready);

        let payload = session.payload().unwrap();
        assert_eq!(payload.chart_type, ChartKind::Bar);
        assert_eq!(payload.options.title(), "Bar Chart");
    }

    #[test]
    fn test_user_choice_survives_reloading_same_rows() {
        let rows = sales();
        let mut session = ChartSession::with_rows(rows.clone());
        session.set_chart_kind(ChartKind::Line);

        session.load(rows);
        assert_eq!(session.chart_kind(), ChartKind::Line);
        assert!(session.user_selected());
    }

    #[test]
    fn test_new_rows_reset_selection() {
        let mut session = ChartSession::with_rows(sales());
        session.set_chart_kind(ChartKind::Pie);

        session.load(Arc::new(RowCollection::new(vec![
            row! { "a" => 1, "b" => 2 },
        ])));
        assert_eq!(session.chart_kind(), ChartKind::Scatter);
        assert!(!session.user_selected());

        session.load(Arc::new(RowCollection::new(vec![row! { "only" => "text" }])));
        assert_eq!(session.chart_kind(), ChartKind::None);
        assert!(session.axes().is_empty());
        assert_eq!(session.status(), ChartStatus::NotVisualizable);
    }

    #[test]
    fn test_kind_none_awaits_selection() {
        let mut session = ChartSession::with_rows(sales());
        session.set_chart_kind(ChartKind::None);
        assert_eq!(session.status(), ChartStatus::AwaitingSelection);
        assert!(session.payload().is_none());
    }

    #[test]
    fn test_single_row_not_visualizable() {
        let session = ChartSession::with_rows(Arc::new(RowCollection::new(vec![
            row! { "category" => "A", "value" => 10 },
        ])));
        assert_eq!(session.status(), ChartStatus::NotVisualizable);
        assert_ne!(
            ChartStatus::NotVisualizable.message(),
            ChartStatus::EmptyData.message()
        );
    }

    #[test]
    fn test_switching_to_line_then_pie() {
        let mut session = ChartSession::with_rows(sales());

        session.set_chart_kind(ChartKind::Line);
        assert_eq!(session.status(), ChartStatus::Ready);
        assert!(session.y_selector_visible());

        session.set_chart_kind(ChartKind::Pie);
        assert!(!session.y_selector_visible());
        assert!(session.options().scales.is_none());
        assert!(matches!(session.series(), Some(Series::Pie(_))));
    }

    #[test]
    fn test_clearing_y_on_bar_warns() {
        let mut session = ChartSession::with_rows(sales());
        session.set_y_axis(None);

        assert!(session.series().is_none());
        assert!(session.payload().is_none());
        assert_eq!(session.status(), ChartStatus::InsufficientSelection { user_selected: true });
    }

    #[test]
    fn test_stale_axis_treated_as_unset() {
        let mut session = ChartSession::with_rows(sales());
        session.set_y_axis(Some("not_a_column".to_string()));

        assert!(session.series().is_none());
        assert_eq!(session.options().scales.unwrap().y.title.text, "");
    }

    #[test]
    fn test_empty_rows() {
        let session = ChartSession::with_rows(Arc::new(RowCollection::default()));
        assert_eq!(session.status(), ChartStatus::EmptyData);
        assert!(session.payload().is_none());
        assert!(session.column_names().is_empty());
    }

    #[test]
    fn test_is_chartable() {
        assert!(is_chartable(&sales()));
        assert!(!is_chartable(&RowCollection::new(vec![row! { "a" => 1, "b" => 2 }])));
        assert!(!is_chartable(&RowCollection::new(vec![row! { "a" => 1 }, row! { "a" => 2 }])));
    }

    #[test]
    fn test_repeated_reads_are_stable() {
        let session = ChartSession::with_rows(sales());
        assert_eq!(session.payload(), session.payload());
    }
}
