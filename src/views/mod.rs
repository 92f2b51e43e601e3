//! The five dashboard views.
//!
//! Every selector is a pure function of a (usually filtered) [`Table`] and at
//! most one drill-down value. Empty inputs come back as
//! [`DashboardError::NoDataForFilter`], which callers show inline.

pub mod constructor;
pub mod driver;
pub mod fastest_lap;
pub mod overview;
pub mod race;

use crate::chart::Chart;
use crate::error::DashboardError;
use crate::record::{ResultRecord, Table};
use crate::table::{self, DisplayTable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub use constructor::{ConstructorAnalysis, DriverContribution, constructor_analysis};
pub use driver::{DriverPerformance, driver_performance};
pub use fastest_lap::{FastestLapAnalysis, HistogramBin, fastest_lap, histogram};
pub use overview::{Overview, overview};
pub use race::{RaceInsight, RaceResult, race_insight, race_years, races_in_year};

/// A labelled headline number.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

impl Metric {
    pub fn new(label: impl Into<String>, value: impl ToString) -> Self {
        Self {
            label: label.into(),
            value: value.to_string(),
        }
    }
}

/// What every view hands to the presentation layer.
pub trait Report {
    fn metrics(&self) -> Vec<Metric>;
    fn display_tables(&self) -> Vec<DisplayTable>;
    fn charts(&self) -> Vec<Chart>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    Overview,
    RaceInsight,
    DriverPerformance,
    ConstructorAnalysis,
    FastestLap,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Overview,
        View::RaceInsight,
        View::DriverPerformance,
        View::ConstructorAnalysis,
        View::FastestLap,
    ];

    pub fn title(self) -> &'static str {
        match self {
            View::Overview => "Overview",
            View::RaceInsight => "Race Insight",
            View::DriverPerformance => "Driver Performance",
            View::ConstructorAnalysis => "Constructor Analysis",
            View::FastestLap => "Fastest Lap",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            View::Overview => "overview",
            View::RaceInsight => "race-insight",
            View::DriverPerformance => "driver-performance",
            View::ConstructorAnalysis => "constructor-analysis",
            View::FastestLap => "fastest-lap",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for View {
    type Err = DashboardError;

    /// Accepts the slug, the title, or the short names `race`, `driver`,
    /// `constructor`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace([' ', '_'], "-");
        let short = match wanted.as_str() {
            "race" => Some(View::RaceInsight),
            "driver" => Some(View::DriverPerformance),
            "constructor" => Some(View::ConstructorAnalysis),
            _ => None,
        };
        short
            .or_else(|| View::ALL.into_iter().find(|v| v.slug() == wanted))
            .ok_or_else(|| DashboardError::UnknownView(s.to_string()))
    }
}

/// The per-view selection that follows the sidebar filters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drilldown {
    pub year: Option<i32>,
    pub race: Option<String>,
    pub driver: Option<String>,
    pub constructor: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "kebab-case")]
pub enum ViewReport {
    Overview(Overview),
    RaceInsight(RaceInsight),
    DriverPerformance(DriverPerformance),
    ConstructorAnalysis(ConstructorAnalysis),
    FastestLap(FastestLapAnalysis),
}

impl ViewReport {
    fn as_report(&self) -> &dyn Report {
        match self {
            ViewReport::Overview(r) => r as &dyn Report,
            ViewReport::RaceInsight(r) => r as &dyn Report,
            ViewReport::DriverPerformance(r) => r as &dyn Report,
            ViewReport::ConstructorAnalysis(r) => r as &dyn Report,
            ViewReport::FastestLap(r) => r as &dyn Report,
        }
    }
}

impl Report for ViewReport {
    fn metrics(&self) -> Vec<Metric> {
        self.as_report().metrics()
    }

    fn display_tables(&self) -> Vec<DisplayTable> {
        self.as_report().display_tables()
    }

    fn charts(&self) -> Vec<Chart> {
        self.as_report().charts()
    }
}

/// Run `view` over `table`.
///
/// Race Insight falls back to the first available year and race, the way the
/// dashboard's select boxes default to their first option. Driver and
/// constructor views need an explicit name.
pub fn run(view: View, table: &Table, drilldown: &Drilldown) -> Result<ViewReport, DashboardError> {
    match view {
        View::Overview => overview(table).map(ViewReport::Overview),
        View::RaceInsight => {
            let year = match drilldown.year {
                Some(year) => year,
                None => race_years(table)
                    .first()
                    .copied()
                    .ok_or_else(|| DashboardError::no_data("No races match the selected filters"))?,
            };
            let race = match &drilldown.race {
                Some(race) => race.clone(),
                None => races_in_year(table, year)
                    .into_iter()
                    .next()
                    .ok_or_else(|| DashboardError::no_data(format!("No races in {}", year)))?,
            };
            race_insight(table, year, &race).map(ViewReport::RaceInsight)
        }
        View::DriverPerformance => {
            let driver = drilldown
                .driver
                .as_deref()
                .ok_or_else(|| DashboardError::InvalidParameter("driver is required".to_string()))?;
            driver_performance(table, driver).map(ViewReport::DriverPerformance)
        }
        View::ConstructorAnalysis => {
            let constructor = drilldown.constructor.as_deref().ok_or_else(|| {
                DashboardError::InvalidParameter("constructor is required".to_string())
            })?;
            constructor_analysis(table, constructor).map(ViewReport::ConstructorAnalysis)
        }
        View::FastestLap => fastest_lap(table).map(ViewReport::FastestLap),
    }
}

/// Races entered, wins and podiums.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    pub races: usize,
    pub wins: usize,
    pub podiums: usize,
}

impl Counts {
    pub fn tally<'a>(rows: impl IntoIterator<Item = &'a ResultRecord>) -> Self {
        rows.into_iter().fold(Counts::default(), |mut counts, row| {
            counts.races += 1;
            counts.wins += row.is_win() as usize;
            counts.podiums += row.is_podium() as usize;
            counts
        })
    }

    pub fn metrics(&self) -> Vec<Metric> {
        vec![
            Metric::new("Races Participated", self.races),
            Metric::new("Wins", self.wins),
            Metric::new("Podiums", self.podiums),
        ]
    }
}

/// Mean finishing position and total points in one season.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct YearPerformance {
    pub year: i32,
    pub average_position: f64,
    pub points: f64,
}

/// Per-season aggregates, ascending by year.
pub fn performance_by_year<'a>(rows: impl IntoIterator<Item = &'a ResultRecord>) -> Vec<YearPerformance> {
    group_by(rows, |r| r.year)
        .into_iter()
        .map(|(year, rows)| YearPerformance {
            year,
            average_position: mean(rows.iter().map(|r| r.position_order as f64)).unwrap_or(0.0),
            points: rows.iter().map(|r| r.points).sum(),
        })
        .collect()
}

pub(crate) fn performance_table(title: &str, by_year: &[YearPerformance]) -> DisplayTable {
    let mut out = DisplayTable::new(title, ["Year", "Average Position", "Points"]);
    for season in by_year {
        out.push_row(vec![
            season.year.to_string(),
            table::average(season.average_position),
            table::whole(season.points),
        ]);
    }
    out
}

/// Group rows by `key`; groups come back in ascending key order.
pub fn group_by<'a, K, I, F>(rows: I, key: F) -> BTreeMap<K, Vec<&'a ResultRecord>>
where
    K: Ord,
    I: IntoIterator<Item = &'a ResultRecord>,
    F: Fn(&'a ResultRecord) -> K,
{
    let mut groups: BTreeMap<K, Vec<&'a ResultRecord>> = BTreeMap::new();
    for row in rows {
        groups.entry(key(row)).or_default().push(row);
    }
    groups
}

/// Arithmetic mean, `None` for no values.
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}
