use crate::record::{ResultRecord, Table};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Selection meaning "every country".
pub const ALL_COUNTRIES: &str = "All Countries";
/// Short form of [`ALL_COUNTRIES`] also accepted from callers.
pub const ALL: &str = "All";
/// Selection meaning "every circuit".
pub const ALL_CIRCUITS: &str = "All Circuits";

/// Inclusive range over the `year` column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// An inverted range contains nothing.
    pub fn contains(&self, year: i32) -> bool {
        self.min <= year && year <= self.max
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CountryFilter {
    #[default]
    All,
    Only(String),
}

impl CountryFilter {
    /// Interpret a single-select value, mapping the sentinels to `All`.
    pub fn from_selection(selection: &str) -> Self {
        let selection = selection.trim();
        if selection.is_empty() || selection == ALL || selection == ALL_COUNTRIES {
            CountryFilter::All
        } else {
            CountryFilter::Only(selection.to_string())
        }
    }

    pub fn matches(&self, record: &ResultRecord) -> bool {
        match self {
            CountryFilter::All => true,
            CountryFilter::Only(country) => record.country == *country,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CircuitFilter {
    #[default]
    All,
    AnyOf(BTreeSet<String>),
}

impl CircuitFilter {
    /// Interpret a multi-select value.
    ///
    /// An empty selection, or one that contains [`ALL_CIRCUITS`], applies no
    /// circuit filtering at all.
    pub fn from_selections<I, S>(selections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut circuits = BTreeSet::new();
        for selection in selections {
            let selection = selection.as_ref().trim();
            if selection == ALL_CIRCUITS {
                return CircuitFilter::All;
            }
            if !selection.is_empty() {
                circuits.insert(selection.to_string());
            }
        }

        if circuits.is_empty() {
            CircuitFilter::All
        } else {
            CircuitFilter::AnyOf(circuits)
        }
    }

    pub fn matches(&self, record: &ResultRecord) -> bool {
        match self {
            CircuitFilter::All => true,
            CircuitFilter::AnyOf(circuits) => circuits.contains(&record.circuit_name),
        }
    }
}

/// The sidebar predicates, combined with AND.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub years: YearRange,
    pub country: CountryFilter,
    pub circuits: CircuitFilter,
}

impl Filter {
    pub fn new(years: YearRange, country: CountryFilter, circuits: CircuitFilter) -> Self {
        Self {
            years,
            country,
            circuits,
        }
    }

    /// The filter a fresh dashboard starts with: every year in the table and
    /// both sentinels selected.
    pub fn everything(table: &Table) -> Self {
        let (min, max) = table.year_bounds().unwrap_or((i32::MIN, i32::MAX));
        Self::new(YearRange::new(min, max), CountryFilter::All, CircuitFilter::All)
    }

    /// Build a filter from raw sidebar values. Missing year bounds fall back
    /// to the table's own first and last year.
    pub fn from_sidebar<I, S>(
        table: &Table,
        year_min: Option<i32>,
        year_max: Option<i32>,
        country: Option<&str>,
        circuits: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let defaults = Self::everything(table).years;
        Self::new(
            YearRange::new(year_min.unwrap_or(defaults.min), year_max.unwrap_or(defaults.max)),
            country.map(CountryFilter::from_selection).unwrap_or_default(),
            CircuitFilter::from_selections(circuits),
        )
    }

    pub fn matches(&self, record: &ResultRecord) -> bool {
        self.years.contains(record.year) && self.country.matches(record) && self.circuits.matches(record)
    }
}

impl Table {
    /// Rows satisfying every predicate of `filter`, in their original order.
    ///
    /// No matching rows is not an error; the result is simply empty.
    pub fn filter(&self, filter: &Filter) -> Table {
        let filtered = self.retain_rows(|record| filter.matches(record));
        debug!(
            "filter {:?} kept {} of {} rows",
            filter,
            filtered.len(),
            self.len()
        );
        filtered
    }
}

/// Choices offered by the sidebar, drawn from the unfiltered table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub years: Vec<i32>,
    pub default_years: Option<YearRange>,
    pub countries: Vec<String>,
    pub circuits: Vec<String>,
    pub drivers: Vec<String>,
    pub constructors: Vec<String>,
}

impl FilterOptions {
    pub fn from_table(table: &Table) -> Self {
        Self {
            years: table.years(),
            default_years: table.year_bounds().map(|(min, max)| YearRange::new(min, max)),
            countries: table.distinct(|r| r.country.as_str()),
            circuits: table.distinct(|r| r.circuit_name.as_str()),
            drivers: table.distinct(|r| r.driver_name.as_str()),
            constructors: table.distinct(|r| r.constructor_name.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::fixtures::record;

    fn sample() -> Table {
        let mut spa = record(2021, "Belgian Grand Prix", "Ann", "Red", 1);
        spa.country = "Belgium".to_string();
        spa.circuit_name = "Spa".to_string();
        Table::new(
            vec![
                record(2020, "Italian Grand Prix", "Ann", "Red", 1),
                record(2020, "Italian Grand Prix", "Bob", "Blue", 2),
                spa,
            ],
            false,
        )
    }

    #[test]
    fn sentinels_map_to_all() {
        assert_eq!(CountryFilter::from_selection("All"), CountryFilter::All);
        assert_eq!(CountryFilter::from_selection("All Countries"), CountryFilter::All);
        assert_eq!(
            CountryFilter::from_selection("Italy"),
            CountryFilter::Only("Italy".to_string())
        );
        assert_eq!(CircuitFilter::from_selections(["Spa", "All Circuits"]), CircuitFilter::All);
        assert_eq!(CircuitFilter::from_selections(Vec::<String>::new()), CircuitFilter::All);
    }

    #[test]
    fn predicates_compose() {
        let table = sample();
        let filter = Filter::new(
            YearRange::new(2020, 2021),
            CountryFilter::Only("Belgium".to_string()),
            CircuitFilter::from_selections(["Spa", "Monza"]),
        );
        let filtered = table.filter(&filter);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.records()[0].circuit_name, "Spa");
    }

    #[test]
    fn inverted_range_is_empty() {
        let table = sample();
        let filter = Filter::new(YearRange::new(2021, 2020), CountryFilter::All, CircuitFilter::All);
        assert!(table.filter(&filter).is_empty());
    }

    #[test]
    fn sidebar_defaults_to_table_bounds() {
        let table = sample();
        let filter = Filter::from_sidebar(&table, None, Some(2020), Some("All Countries"), Vec::<String>::new());
        assert_eq!(filter.years, YearRange::new(2020, 2020));
        assert_eq!(filter, Filter::new(YearRange::new(2020, 2020), CountryFilter::All, CircuitFilter::All));
        assert_eq!(table.filter(&filter).len(), 2);
    }

    #[test]
    fn options_come_sorted() {
        let options = FilterOptions::from_table(&sample());
        assert_eq!(options.years, vec![2020, 2021]);
        assert_eq!(options.default_years, Some(YearRange::new(2020, 2021)));
        assert_eq!(options.countries, vec!["Belgium", "Italy"]);
        assert_eq!(options.circuits, vec!["Monza", "Spa"]);
        assert_eq!(options.constructors, vec!["Blue", "Red"]);
    }
}
