//! Chart-data pipeline
//!
//! Rows flow through the column classifier, the recommendation engine and
//! the series builder; the options builder adds display metadata. All stages
//! are pure functions of their inputs and never fail: unusable input
//! degrades to `None` and the caller picks the affordance.

pub mod aggregate;
pub mod classify;
pub mod colors;
pub mod options;
pub mod recommend;
pub mod render;
pub mod series;
pub mod session;

// Re-exports
pub use aggregate::{aggregate_categories, CategoryTotal};
pub use classify::{classify_columns, ColumnClassification, ColumnKind};
pub use options::{build_options, ChartOptions, LegendPosition, ScaleKind};
pub use recommend::{recommend, Recommendation};
pub use render::RenderPayload;
pub use series::{build_series, Label, Series};
pub use session::{is_chartable, ChartSession, ChartStatus};
