#![cfg(not(tarpaulin_include))]

use clap::Parser;
use f1_dashboard::config::{DataArgs, FilterArgs};
use f1_dashboard::downloader;
use f1_dashboard::loader;
use f1_dashboard::views::{self, Drilldown, Report, View};
use std::fs;
use std::path::PathBuf;

/// Print one dashboard view to the terminal
#[derive(Parser, Debug)]
#[command(name = "report", version)]
struct ReportArgs {
    /// overview, race-insight, driver-performance, constructor-analysis or fastest-lap
    #[arg(default_value = "overview")]
    view: String,

    #[command(flatten)]
    source: DataArgs,

    #[command(flatten)]
    filters: FilterArgs,

    /// Race Insight season (defaults to the first available)
    #[arg(long)]
    year: Option<i32>,

    /// Race Insight race name (defaults to the first in the season)
    #[arg(long)]
    race: Option<String>,

    #[arg(long)]
    driver: Option<String>,

    #[arg(long)]
    constructor: Option<String>,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Also write every table as a CSV file into this directory
    #[arg(long)]
    csv_dir: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = ReportArgs::parse();

    let view: View = args.view.parse()?;
    let table = loader::load(&args.source.data)?;
    let filtered = table.filter(&args.filters.to_filter(&table));

    let drilldown = Drilldown {
        year: args.year,
        race: args.race.clone(),
        driver: args.driver.clone(),
        constructor: args.constructor.clone(),
    };

    let report = match views::run(view, &filtered, &drilldown) {
        Ok(report) => report,
        Err(e) if e.is_no_data() => {
            println!("{}: {}", view, e);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}\n", view);
        for metric in report.metrics() {
            println!("{:<20} {}", metric.label, metric.value);
        }
        for table in report.display_tables() {
            println!("\n{}", table.to_text());
        }
    }

    if let Some(dir) = &args.csv_dir {
        fs::create_dir_all(dir)?;
        for table in report.display_tables() {
            let path = dir.join(format!("{}.csv", downloader::file_stem(&table.title)));
            fs::write(&path, downloader::to_csv(&table)?)?;
            log::info!("wrote {}", path.display());
        }
    }

    Ok(())
}
