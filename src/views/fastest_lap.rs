use super::{Metric, Report, group_by, mean};
use crate::chart::{Chart, ChartKind, Series};
use crate::error::DashboardError;
use crate::record::{ResultRecord, Table, is_blank};
use crate::table::{self, DisplayTable};
use serde::{Deserialize, Serialize};

pub const TOP_LAPS: usize = 10;
pub const TOP_DRIVERS: usize = 10;
pub const HISTOGRAM_BINS: usize = 20;

pub const MISSING_COLUMN_NOTICE: &str = "Fastest lap speed data is not available in the dataset";
pub const NO_SPEEDS_NOTICE: &str = "No fastest lap speed data available for the selected filters";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FastLap {
    pub year: i32,
    pub race_name: String,
    pub driver: String,
    pub constructor: String,
    pub speed: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct YearSpeed {
    pub year: i32,
    pub average_speed: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DriverSpeed {
    pub driver: String,
    /// `None` when none of the driver's fastest laps has a recorded speed.
    pub average_speed: Option<f64>,
    /// Races in which the driver set the fastest lap, with or without a
    /// recorded speed.
    pub fastest_laps: usize,
}

/// Half-open `[lower, upper)`, except the last bin which also holds `upper`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FastestLapAnalysis {
    /// Rows with `rank == 1` in the slice.
    pub fastest_laps: usize,
    pub top_laps: Vec<FastLap>,
    pub speed_trend: Vec<YearSpeed>,
    pub fastest_drivers: Vec<DriverSpeed>,
    pub distribution: Vec<HistogramBin>,
}

/// Analyse the fastest laps (rank 1) in the filtered slice
///
/// # Arguments
/// * `table` - The filtered results
///
/// # Returns
/// * Top laps, the yearly speed trend, fastest drivers and the speed
///   distribution
/// * `NoDataForFilter` with [`MISSING_COLUMN_NOTICE`] when the data has no
///   speed column, or [`NO_SPEEDS_NOTICE`] when no fastest lap has a speed
pub fn fastest_lap(table: &Table) -> Result<FastestLapAnalysis, DashboardError> {
    if !table.has_fastest_lap_speed() {
        return Err(DashboardError::no_data(MISSING_COLUMN_NOTICE));
    }

    let laps: Vec<&ResultRecord> = table.iter().filter(|r| r.is_fastest_lap()).collect();
    let timed: Vec<(&ResultRecord, f64)> = laps
        .iter()
        .filter_map(|r| r.fastest_lap_speed.map(|speed| (*r, speed)))
        .collect();
    if timed.is_empty() {
        return Err(DashboardError::no_data(NO_SPEEDS_NOTICE));
    }

    let mut top_laps: Vec<FastLap> = timed
        .iter()
        .map(|(r, speed)| FastLap {
            year: r.year,
            race_name: r.race_name.clone(),
            driver: r.driver_name.clone(),
            constructor: r.constructor_name.clone(),
            speed: *speed,
        })
        .collect();
    top_laps.sort_by(|a, b| b.speed.total_cmp(&a.speed));
    top_laps.truncate(TOP_LAPS);

    let speed_trend = group_by(laps.iter().copied(), |r| r.year)
        .into_iter()
        .filter_map(|(year, rows)| {
            mean(rows.iter().filter_map(|r| r.fastest_lap_speed)).map(|average_speed| YearSpeed {
                year,
                average_speed,
            })
        })
        .collect();

    let named = laps.iter().copied().filter(|r| !is_blank(&r.driver_name));
    let mut fastest_drivers: Vec<DriverSpeed> = group_by(named, |r| r.driver_name.as_str())
        .into_iter()
        .map(|(driver, rows)| DriverSpeed {
            driver: driver.to_string(),
            average_speed: mean(rows.iter().filter_map(|r| r.fastest_lap_speed)),
            fastest_laps: rows.len(),
        })
        .collect();
    // Fastest first; drivers without any recorded speed go last, in name order.
    fastest_drivers.sort_by(|a, b| match (a.average_speed, b.average_speed) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (x, y) => x.is_none().cmp(&y.is_none()),
    });
    fastest_drivers.truncate(TOP_DRIVERS);

    let speeds: Vec<f64> = timed.iter().map(|(_, speed)| *speed).collect();

    Ok(FastestLapAnalysis {
        fastest_laps: laps.len(),
        top_laps,
        speed_trend,
        fastest_drivers,
        distribution: histogram(&speeds, HISTOGRAM_BINS),
    })
}

/// Count `values` into `bins` equal-width bins spanning their range.
///
/// A range of zero width is widened to half a unit either side so the single
/// value still lands in a bin. Returns no bins for no values.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let Some(&first) = values.first() else {
        return Vec::new();
    };
    if bins == 0 {
        return Vec::new();
    }

    let (mut lo, mut hi) = values
        .iter()
        .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;

    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: lo + width * i as f64,
            upper: if i + 1 == bins { hi } else { lo + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();
    for &v in values {
        let index = (((v - lo) / width).floor() as usize).min(bins - 1);
        out[index].count += 1;
    }
    out
}

impl Report for FastestLapAnalysis {
    fn metrics(&self) -> Vec<Metric> {
        let top = self.top_laps.first().map(|l| l.speed).unwrap_or_default();
        vec![
            Metric::new("Fastest Laps", self.fastest_laps),
            Metric::new("Top Speed (kph)", table::average(top)),
        ]
    }

    fn display_tables(&self) -> Vec<DisplayTable> {
        let mut laps = DisplayTable::new(
            "Top 10 Fastest Laps",
            ["Year", "Race", "Driver", "Constructor", "Speed (kph)"],
        );
        for lap in &self.top_laps {
            laps.push_row(vec![
                lap.year.to_string(),
                lap.race_name.clone(),
                lap.driver.clone(),
                lap.constructor.clone(),
                table::plain(lap.speed),
            ]);
        }

        let mut trend = DisplayTable::new("Fastest Lap Speed Trend", ["Year", "Avg Speed (kph)"]);
        for entry in &self.speed_trend {
            trend.push_row(vec![entry.year.to_string(), table::average(entry.average_speed)]);
        }

        let mut drivers = DisplayTable::new(
            "Fastest Drivers",
            ["Driver", "Avg Speed (kph)", "Fastest Laps Achieved"],
        );
        for d in &self.fastest_drivers {
            drivers.push_row(vec![
                d.driver.clone(),
                d.average_speed.map(table::average).unwrap_or_default(),
                d.fastest_laps.to_string(),
            ]);
        }

        let mut distribution = DisplayTable::new(
            "Fastest Lap Speed Distribution",
            ["From (kph)", "To (kph)", "Frequency"],
        );
        for bin in &self.distribution {
            distribution.push_row(vec![
                table::average(bin.lower),
                table::average(bin.upper),
                bin.count.to_string(),
            ]);
        }

        vec![laps, trend, drivers, distribution]
    }

    fn charts(&self) -> Vec<Chart> {
        let trend = Chart::new(
            ChartKind::Line,
            "Evolution of Fastest Lap Speeds Over Time",
            "Year",
            "Average Fastest Lap Speed (kph)",
        )
        .with_series(Series::new(
            "average speed",
            self.speed_trend
                .iter()
                .map(|e| (e.year as f64, e.average_speed))
                .collect(),
        ));

        let distribution = Chart::new(
            ChartKind::Histogram,
            "Distribution of Fastest Lap Speeds",
            "Fastest Lap Speed (kph)",
            "Frequency",
        )
        .with_series(Series::new(
            "frequency",
            self.distribution
                .iter()
                .map(|b| (b.lower, b.count as f64))
                .collect(),
        ));

        vec![trend, distribution]
    }
}
