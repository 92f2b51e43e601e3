use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One driver's result in one race.
///
/// Field names follow the CSV headers through serde renames, so the same type
/// is used for loading and for JSON responses.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub year: i32,
    pub race_id: i64,
    pub race_name: String,
    pub country: String,
    pub circuit_name: String,
    pub driver_name: String,
    pub constructor_name: String,
    pub grid: i32,
    #[serde(rename = "positionOrder")]
    pub position_order: i32,
    pub points: f64,
    /// Fastest-lap rank; `Some(1)` marks the fastest lap of the race.
    pub rank: Option<i32>,
    #[serde(rename = "fastestLapSpeed")]
    pub fastest_lap_speed: Option<f64>,
}

/// Blank text cells stand for missing values and never name a driver,
/// constructor, country or circuit.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

impl ResultRecord {
    pub fn is_win(&self) -> bool {
        self.position_order == 1
    }

    pub fn is_podium(&self) -> bool {
        (1..=3).contains(&self.position_order)
    }

    pub fn is_fastest_lap(&self) -> bool {
        self.rank == Some(1)
    }
}

/// The loaded dataset, or any slice derived from it.
///
/// Tables are built once and never mutated; filters and views produce new
/// values.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    records: Vec<ResultRecord>,
    has_fastest_lap_speed: bool,
}

impl Table {
    pub fn new(records: Vec<ResultRecord>, has_fastest_lap_speed: bool) -> Self {
        Self {
            records,
            has_fastest_lap_speed,
        }
    }

    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResultRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the source file carried a `fastestLapSpeed` column at all.
    pub fn has_fastest_lap_speed(&self) -> bool {
        self.has_fastest_lap_speed
    }

    /// Keeps the rows matching `keep`, preserving order and the schema flag.
    pub fn retain_rows(&self, mut keep: impl FnMut(&ResultRecord) -> bool) -> Table {
        Table {
            records: self.records.iter().filter(|r| keep(r)).cloned().collect(),
            has_fastest_lap_speed: self.has_fastest_lap_speed,
        }
    }

    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        let min = self.records.iter().map(|r| r.year).min()?;
        let max = self.records.iter().map(|r| r.year).max()?;
        Some((min, max))
    }

    /// Sorted distinct years.
    pub fn years(&self) -> Vec<i32> {
        let set: BTreeSet<i32> = self.records.iter().map(|r| r.year).collect();
        set.into_iter().collect()
    }

    /// Sorted distinct non-blank values of a text column.
    pub fn distinct<'a>(&'a self, column: impl Fn(&'a ResultRecord) -> &'a str) -> Vec<String> {
        let set: BTreeSet<&str> = self
            .records
            .iter()
            .map(column)
            .filter(|v| !is_blank(v))
            .collect();
        set.into_iter().map(str::to_string).collect()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a ResultRecord;
    type IntoIter = std::slice::Iter<'a, ResultRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
