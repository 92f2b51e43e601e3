/*!
# F1 Results Dashboard

An analytics dashboard over historical Formula 1 race results, built in Rust.

## Overview

The dashboard loads a flat table of race results (one row per driver per race)
from CSV once per process, narrows it with the sidebar filters and computes five
read-only report views over the remaining slice. Every view yields headline
metrics, display-ready tables and chart-ready series; the web shell and the
terminal report only present them.

## Architecture

### Data Layer
- **loader**: Reads and validates the CSV, coerces fastest lap speeds, backfills
  rank, and caches the table per path for the life of the process
- **record**: `ResultRecord` rows and the immutable `Table`

### Analysis Layer
- **filter**: Year range, country and circuit predicates, combined with AND,
  plus the option lists the sidebar offers
- **views**: Overview, Race Insight, Driver Performance, Constructor Analysis
  and Fastest Lap selectors
- **table**: Display tables and number formatting
- **chart**: Chart-ready series (line, bar, scatter, histogram)

### Presentation Layer (feature `web`)
- **graph**: SVG chart rendering with plotters
- **downloader**: CSV export, and XLSX export with the `web` feature
- **app**: axum routes and the static dashboard page

## Views

- **Overview**: row count, year span, distinct drivers and constructors, races
  per year, top 10 constructors by wins
- **Race Insight**: results of one race with grid against finishing position
- **Driver Performance**: races, wins, podiums and per-season form of a driver
- **Constructor Analysis**: the same for a constructor, plus its top 5 drivers
- **Fastest Lap**: fastest laps, yearly speed trend, fastest drivers and the
  speed distribution

## REST API Endpoints

- `/` - The dashboard page
- `/api/options` - Sidebar choices from the unfiltered table
- `/api/races` - Race Insight year and race choices for the filtered slice
- `/api/views/{view}` - Metrics, tables and chart series of a view
- `/api/charts/{view}/{index}` - One chart of a view as SVG
- `/api/export/{view}` - A view's tables as CSV or XLSX

Every view endpoint accepts `year_min`, `year_max`, `country`, `circuits`
(comma separated), `year`, `race`, `driver` and `constructor`.
*/

pub mod chart;
pub mod config;
pub mod downloader;
pub mod error;
pub mod filter;
pub mod loader;
pub mod record;
pub mod table;
pub mod views;

#[cfg(feature = "web")]
pub mod app;
#[cfg(feature = "web")]
pub mod graph;

pub use error::DashboardError;
pub use filter::{CircuitFilter, CountryFilter, Filter, FilterOptions, YearRange};
pub use loader::load;
pub use record::{ResultRecord, Table};
pub use views::{Drilldown, Report, View, ViewReport};
