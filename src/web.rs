#![cfg(not(tarpaulin_include))]

use clap::Parser;
use f1_dashboard::{app, config::DashboardArgs, loader};

/// Main entry point for the dashboard web server
///
/// Loads the results table once, then serves the dashboard over HTTP.
///
/// # Configuration
/// * `--data` / `F1_DASHBOARD_DATA` - CSV file to read
/// * `--addr` / `F1_DASHBOARD_ADDR` - socket address to bind
/// * `RUST_LOG` - log filter, e.g. `info` or `f1_dashboard=debug`
///
/// # Returns
/// * `Result<(), Box<dyn std::error::Error>>` - Success or error object;
///   an unreadable data file stops startup here
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = DashboardArgs::parse();

    let table = loader::load(&args.source.data)?;
    app::run(table, args.addr).await
}
