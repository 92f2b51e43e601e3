use super::{Counts, Metric, Report, YearPerformance, performance_by_year, performance_table};
use crate::chart::{Chart, ChartKind, Series};
use crate::error::DashboardError;
use crate::record::Table;
use crate::table::DisplayTable;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DriverPerformance {
    pub driver: String,
    pub counts: Counts,
    pub by_year: Vec<YearPerformance>,
}

/// Career numbers of one driver within the filtered slice
///
/// # Arguments
/// * `table` - The filtered results
/// * `driver` - Driver name
///
/// # Returns
/// * Races, wins, podiums and per-season form, or `NoDataForFilter` when
///   the driver has no results in the slice
pub fn driver_performance(table: &Table, driver: &str) -> Result<DriverPerformance, DashboardError> {
    let rows: Vec<_> = table.iter().filter(|r| r.driver_name == driver).collect();
    if rows.is_empty() {
        return Err(DashboardError::no_data(format!(
            "No results for {} with the selected filters",
            driver
        )));
    }

    Ok(DriverPerformance {
        driver: driver.to_string(),
        counts: Counts::tally(rows.iter().copied()),
        by_year: performance_by_year(rows.iter().copied()),
    })
}

impl Report for DriverPerformance {
    fn metrics(&self) -> Vec<Metric> {
        self.counts.metrics()
    }

    fn display_tables(&self) -> Vec<DisplayTable> {
        vec![performance_table("Performance Over Years", &self.by_year)]
    }

    fn charts(&self) -> Vec<Chart> {
        let positions = Chart::new(
            ChartKind::Line,
            format!("{}'s Average Position Over Time", self.driver),
            "Year",
            "Average Position",
        )
        .inverted()
        .with_series(Series::new(
            "average position",
            self.by_year
                .iter()
                .map(|s| (s.year as f64, s.average_position))
                .collect(),
        ));

        let points = Chart::new(ChartKind::Line, "Points Accumulation", "Year", "Points").with_series(
            Series::new(
                "points",
                self.by_year.iter().map(|s| (s.year as f64, s.points)).collect(),
            ),
        );

        vec![positions, points]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::fixtures::record;

    #[test]
    fn wins_and_podiums() {
        let table = Table::new(
            vec![
                record(2019, "A", "Ann", "Red", 1),
                record(2019, "B", "Ann", "Red", 2),
                record(2020, "A", "Ann", "Red", 5),
                record(2020, "A", "Bob", "Blue", 1),
            ],
            false,
        );
        let report = driver_performance(&table, "Ann").unwrap();
        assert_eq!(report.counts, Counts { races: 3, wins: 1, podiums: 2 });
        assert_eq!(report.by_year.len(), 2);
        assert_eq!(report.by_year[0].average_position, 1.5);
        assert_eq!(report.by_year[0].points, 43.0);
        assert_eq!(report.by_year[1].points, 0.0);
        assert_eq!(report.metrics()[1], Metric::new("Wins", 1));
    }

    #[test]
    fn absent_driver_is_no_data() {
        let table = Table::new(vec![record(2019, "A", "Ann", "Red", 1)], false);
        assert!(driver_performance(&table, "Zed").unwrap_err().is_no_data());
    }
}
