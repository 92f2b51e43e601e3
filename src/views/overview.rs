use super::{Metric, Report, group_by};
use crate::chart::{Chart, ChartKind, Series};
use crate::error::DashboardError;
use crate::record::{Table, is_blank};
use crate::table::{self, DisplayTable};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub const TOP_CONSTRUCTORS: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RacesInYear {
    pub year: i32,
    pub races: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorWins {
    pub constructor: String,
    pub wins: usize,
}

/// Headline numbers for the whole filtered slice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overview {
    pub rows: usize,
    pub first_year: i32,
    pub last_year: i32,
    pub drivers: usize,
    pub constructors: usize,
    pub races_per_year: Vec<RacesInYear>,
    pub top_constructors: Vec<ConstructorWins>,
}

/// Summarise a filtered slice for the Overview page
///
/// Blank driver and constructor names are treated as missing and are not
/// counted.
///
/// # Arguments
/// * `table` - The filtered results
///
/// # Returns
/// * The overview, or `NoDataForFilter` when the slice is empty
pub fn overview(table: &Table) -> Result<Overview, DashboardError> {
    let (first_year, last_year) = table
        .year_bounds()
        .ok_or_else(|| DashboardError::no_data("No results match the selected filters"))?;

    let drivers: BTreeSet<&str> = table
        .iter()
        .map(|r| r.driver_name.as_str())
        .filter(|name| !is_blank(name))
        .collect();
    let constructors: BTreeSet<&str> = table
        .iter()
        .map(|r| r.constructor_name.as_str())
        .filter(|name| !is_blank(name))
        .collect();

    let races_per_year = group_by(table, |r| r.year)
        .into_iter()
        .map(|(year, rows)| RacesInYear {
            year,
            races: rows.iter().map(|r| r.race_id).collect::<BTreeSet<_>>().len(),
        })
        .collect();

    Ok(Overview {
        rows: table.len(),
        first_year,
        last_year,
        drivers: drivers.len(),
        constructors: constructors.len(),
        races_per_year,
        top_constructors: top_constructors_by_wins(table, TOP_CONSTRUCTORS),
    })
}

/// Constructors ranked by race wins, most first.
///
/// Constructors on equal wins keep their grouping order, which is ascending
/// by name.
pub fn top_constructors_by_wins(table: &Table, limit: usize) -> Vec<ConstructorWins> {
    let mut wins: BTreeMap<&str, usize> = BTreeMap::new();
    for row in table.iter().filter(|r| r.is_win() && !is_blank(&r.constructor_name)) {
        *wins.entry(row.constructor_name.as_str()).or_default() += 1;
    }

    let mut ranked: Vec<ConstructorWins> = wins
        .into_iter()
        .map(|(constructor, wins)| ConstructorWins {
            constructor: constructor.to_string(),
            wins,
        })
        .collect();
    ranked.sort_by(|a, b| b.wins.cmp(&a.wins));
    ranked.truncate(limit);
    ranked
}

impl Report for Overview {
    fn metrics(&self) -> Vec<Metric> {
        vec![
            Metric::new("Data Rows", table::thousands(self.rows)),
            Metric::new("Years", format!("{} - {}", self.first_year, self.last_year)),
            Metric::new("Drivers", self.drivers),
            Metric::new("Constructors", self.constructors),
        ]
    }

    fn display_tables(&self) -> Vec<DisplayTable> {
        let mut races = DisplayTable::new("Races per Year", ["Year", "Races"]);
        for entry in &self.races_per_year {
            races.push_row(vec![entry.year.to_string(), entry.races.to_string()]);
        }

        let mut wins = DisplayTable::new("Top Constructors by Wins", ["Constructor", "Wins"]);
        for entry in &self.top_constructors {
            wins.push_row(vec![entry.constructor.clone(), entry.wins.to_string()]);
        }

        vec![races, wins]
    }

    fn charts(&self) -> Vec<Chart> {
        let races = Chart::new(ChartKind::Line, "Races per Year", "Year", "Races").with_series(Series::new(
            "races",
            self.races_per_year
                .iter()
                .map(|e| (e.year as f64, e.races as f64))
                .collect(),
        ));

        let wins = Chart::new(ChartKind::Bar, "Top Constructors by Wins", "Constructor", "Wins")
            .with_categories(self.top_constructors.iter().map(|e| e.constructor.clone()).collect())
            .with_series(Series::new(
                "wins",
                self.top_constructors
                    .iter()
                    .enumerate()
                    .map(|(i, e)| (i as f64, e.wins as f64))
                    .collect(),
            ));

        vec![races, wins]
    }
}
