//! Command line definition

use std::path::PathBuf;
use clap::{Args, Parser, Subcommand};
use qc_core::ChartKind;

#[derive(Parser)]
#[command(name = "querychart")]
#[command(about = "Ask questions about tabular data and get chart-ready JSON back")]
#[command(version)]
pub struct Cli {
    /// Query service base URL (overrides config file and environment)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check that the query service is reachable
    Health,

    /// Upload a CSV or Excel file as a new table
    Upload {
        /// File to upload (.csv, .xls, .xlsx)
        file: PathBuf,
    },

    /// Ask a question about a table uploaded earlier
    Ask {
        /// Table name returned by `upload`
        #[arg(long)]
        table: String,

        /// The question, in plain language
        question: String,

        #[command(flatten)]
        chart: ChartArgs,
    },

    /// Upload a file, then ask a question about it
    Run {
        /// File to upload (.csv, .xls, .xlsx)
        file: PathBuf,

        /// The question, in plain language
        question: String,

        #[command(flatten)]
        chart: ChartArgs,
    },

    /// Chart a local CSV file without the service
    Chart {
        /// CSV file to read
        csv: PathBuf,

        #[command(flatten)]
        chart: ChartArgs,
    },
}

/// Selections that replace the recommended chart
#[derive(Args, Debug, Default)]
pub struct ChartArgs {
    /// Chart type: bar, line, pie, scatter or none
    #[arg(long)]
    pub kind: Option<ChartKind>,

    /// X axis column
    #[arg(long)]
    pub x: Option<String>,

    /// Y axis column (value column for pie charts)
    #[arg(long)]
    pub y: Option<String>,
}

impl ChartArgs {
    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.x.is_none() && self.y.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chart_overrides() {
        let cli = Cli::parse_from([
            "querychart", "chart", "sales.csv", "--kind", "pie", "--x", "region",
        ]);
        match cli.command {
            Commands::Chart { csv, chart } => {
                assert_eq!(csv, PathBuf::from("sales.csv"));
                assert_eq!(chart.kind, Some(ChartKind::Pie));
                assert_eq!(chart.x.as_deref(), Some("region"));
                assert!(chart.y.is_none());
            }
            _ => panic!("expected chart command"),
        }
    }

    #[test]
    fn test_unknown_kind_rejected() {
        assert!(Cli::try_parse_from(["querychart", "chart", "a.csv", "--kind", "donut"]).is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from([
            "querychart", "ask", "--table", "sales", "top cities", "-v", "--api-url", "http://h:1",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.api_url.as_deref(), Some("http://h:1"));
        assert!(matches!(cli.command, Commands::Ask { ref table, .. } if table == "sales"));
    }
}
