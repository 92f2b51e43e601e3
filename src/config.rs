//! Command-line and environment configuration shared by the binaries.

use crate::filter::Filter;
use crate::record::Table;
use clap::{Args, Parser};
use std::net::SocketAddr;
use std::path::PathBuf;

/// CSV file read when neither `--data` nor `F1_DASHBOARD_DATA` is given.
pub const DEFAULT_DATA: &str = "Cleaned_table_part_Two.csv";
/// Address the dashboard binds to by default.
pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// Where the results table lives.
#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    /// Path to the cleaned race results CSV
    #[arg(long, env = "F1_DASHBOARD_DATA", default_value = DEFAULT_DATA)]
    pub data: PathBuf,
}

/// Options for the `dashboard` web server.
#[derive(Parser, Debug, Clone)]
#[command(name = "dashboard", version, about = "Serve the F1 results dashboard over HTTP")]
pub struct DashboardArgs {
    #[command(flatten)]
    pub source: DataArgs,

    /// Socket address to listen on
    #[arg(long, env = "F1_DASHBOARD_ADDR", default_value = DEFAULT_ADDR)]
    pub addr: SocketAddr,
}

/// The sidebar filters as flags.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// First season to include (defaults to the earliest in the data)
    #[arg(long)]
    pub year_min: Option<i32>,

    /// Last season to include (defaults to the latest in the data)
    #[arg(long)]
    pub year_max: Option<i32>,

    /// Country name, or "All Countries"
    #[arg(long)]
    pub country: Option<String>,

    /// Circuit names, comma separated; "All Circuits" disables the filter
    #[arg(long, value_delimiter = ',')]
    pub circuits: Vec<String>,
}

impl FilterArgs {
    pub fn to_filter(&self, table: &Table) -> Filter {
        Filter::from_sidebar(
            table,
            self.year_min,
            self.year_max,
            self.country.as_deref(),
            &self.circuits,
        )
    }
}
