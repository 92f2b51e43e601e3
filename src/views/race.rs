use super::{Metric, Report};
use crate::chart::{Chart, ChartKind, Series};
use crate::error::DashboardError;
use crate::record::Table;
use crate::table::{self, DisplayTable};
use serde::{Deserialize, Serialize};

/// One classified finisher, labelled the way the results table shows it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RaceResult {
    #[serde(rename = "Position")]
    pub position: i32,
    #[serde(rename = "Driver")]
    pub driver: String,
    #[serde(rename = "Constructor")]
    pub constructor: String,
    #[serde(rename = "Grid Position")]
    pub grid: i32,
    #[serde(rename = "Points")]
    pub points: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RaceInsight {
    pub year: i32,
    pub race_name: String,
    /// Ascending by finishing position.
    pub results: Vec<RaceResult>,
}

/// Years offered by the race picker.
pub fn race_years(table: &Table) -> Vec<i32> {
    table.years()
}

/// Sorted race names held in `year`.
pub fn races_in_year(table: &Table, year: i32) -> Vec<String> {
    table
        .retain_rows(|r| r.year == year)
        .distinct(|r| r.race_name.as_str())
}

/// Classified results of one race
///
/// # Arguments
/// * `table` - The filtered results
/// * `year` - Season of the race
/// * `race_name` - Race name as it appears in the data
///
/// # Returns
/// * Results sorted by finishing position, or `NoDataForFilter` when the
///   race is not in the slice
pub fn race_insight(table: &Table, year: i32, race_name: &str) -> Result<RaceInsight, DashboardError> {
    let mut rows: Vec<_> = table
        .iter()
        .filter(|r| r.year == year && r.race_name == race_name)
        .collect();
    if rows.is_empty() {
        return Err(DashboardError::no_data(format!(
            "No results for {} ({}) with the selected filters",
            race_name, year
        )));
    }
    rows.sort_by_key(|r| r.position_order);

    let results = rows
        .into_iter()
        .map(|r| RaceResult {
            position: r.position_order,
            driver: r.driver_name.clone(),
            constructor: r.constructor_name.clone(),
            grid: r.grid,
            points: r.points,
        })
        .collect();

    Ok(RaceInsight {
        year,
        race_name: race_name.to_string(),
        results,
    })
}

impl RaceInsight {
    /// Grid slot against finishing position, one series per constructor in
    /// order of their best finisher.
    pub fn grid_vs_finish(&self) -> Vec<Series> {
        let mut series: Vec<Series> = Vec::new();
        for result in &self.results {
            let point = (result.grid as f64, result.position as f64);
            match series.iter_mut().find(|s| s.name == result.constructor) {
                Some(existing) => existing.points.push(point),
                None => series.push(Series::new(result.constructor.clone(), vec![point])),
            }
        }
        series
    }
}

impl Report for RaceInsight {
    fn metrics(&self) -> Vec<Metric> {
        vec![
            Metric::new("Race", &self.race_name),
            Metric::new("Year", self.year),
            Metric::new("Entries", self.results.len()),
        ]
    }

    fn display_tables(&self) -> Vec<DisplayTable> {
        let mut results = DisplayTable::new(
            format!("Results - {} ({})", self.race_name, self.year),
            ["Position", "Driver", "Constructor", "Grid Position", "Points"],
        );
        for r in &self.results {
            results.push_row(vec![
                r.position.to_string(),
                r.driver.clone(),
                r.constructor.clone(),
                r.grid.to_string(),
                table::plain(r.points),
            ]);
        }
        vec![results]
    }

    fn charts(&self) -> Vec<Chart> {
        let mut chart = Chart::new(
            ChartKind::Scatter,
            format!("Grid vs Final Position - {} {}", self.race_name, self.year),
            "Starting Grid Position",
            "Final Position",
        )
        .inverted();
        chart.series = self.grid_vs_finish();
        vec![chart]
    }
}
