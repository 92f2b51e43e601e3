use super::{
    Counts, Metric, Report, YearPerformance, group_by, mean, performance_by_year, performance_table,
};
use crate::chart::{Chart, ChartKind, Series};
use crate::error::DashboardError;
use crate::record::{Table, is_blank};
use crate::table::{self, DisplayTable};
use serde::{Deserialize, Serialize};

pub const TOP_DRIVERS: usize = 5;

/// A driver's share of a constructor's results.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DriverContribution {
    pub driver: String,
    pub average_position: f64,
    pub points: f64,
    pub races: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConstructorAnalysis {
    pub constructor: String,
    pub counts: Counts,
    pub by_year: Vec<YearPerformance>,
    pub top_drivers: Vec<DriverContribution>,
}

/// Team numbers of one constructor within the filtered slice
///
/// # Arguments
/// * `table` - The filtered results
/// * `constructor` - Constructor name
///
/// # Returns
/// * Races, wins, podiums, per-season form and the top drivers by points,
///   or `NoDataForFilter` when the constructor has no results in the slice
pub fn constructor_analysis(table: &Table, constructor: &str) -> Result<ConstructorAnalysis, DashboardError> {
    let rows: Vec<_> = table
        .iter()
        .filter(|r| r.constructor_name == constructor)
        .collect();
    if rows.is_empty() {
        return Err(DashboardError::no_data(format!(
            "No results for {} with the selected filters",
            constructor
        )));
    }

    let named = rows.iter().copied().filter(|r| !is_blank(&r.driver_name));
    let mut top_drivers: Vec<DriverContribution> = group_by(named, |r| r.driver_name.as_str())
        .into_iter()
        .map(|(driver, rows)| DriverContribution {
            driver: driver.to_string(),
            average_position: mean(rows.iter().map(|r| r.position_order as f64)).unwrap_or(0.0),
            points: rows.iter().map(|r| r.points).sum(),
            races: rows.len(),
        })
        .collect();
    // Stable, so drivers on equal points stay in name order.
    top_drivers.sort_by(|a, b| b.points.total_cmp(&a.points));
    top_drivers.truncate(TOP_DRIVERS);

    Ok(ConstructorAnalysis {
        constructor: constructor.to_string(),
        counts: Counts::tally(rows.iter().copied()),
        by_year: performance_by_year(rows.iter().copied()),
        top_drivers,
    })
}

impl Report for ConstructorAnalysis {
    fn metrics(&self) -> Vec<Metric> {
        self.counts.metrics()
    }

    fn display_tables(&self) -> Vec<DisplayTable> {
        let mut drivers = DisplayTable::new("Top Drivers", ["Driver", "Average Position", "Points", "Races"]);
        for d in &self.top_drivers {
            drivers.push_row(vec![
                d.driver.clone(),
                table::average(d.average_position),
                table::whole(d.points),
                table::whole(d.races as f64),
            ]);
        }
        vec![performance_table("Performance Over Years", &self.by_year), drivers]
    }

    fn charts(&self) -> Vec<Chart> {
        let positions = Chart::new(ChartKind::Line, "Average Race Position", "Year", "Average Position")
            .inverted()
            .with_series(Series::new(
                &self.constructor,
                self.by_year
                    .iter()
                    .map(|s| (s.year as f64, s.average_position))
                    .collect(),
            ));

        let points = Chart::new(ChartKind::Bar, "Total Points per Season", "Year", "Total Points").with_series(
            Series::new(
                &self.constructor,
                self.by_year.iter().map(|s| (s.year as f64, s.points)).collect(),
            ),
        );

        vec![positions, points]
    }
}
