mod common;

use common::results;
use f1_dashboard::filter::ALL_CIRCUITS;
use f1_dashboard::views::overview::top_constructors_by_wins;
use f1_dashboard::{CircuitFilter, CountryFilter, Filter, ResultRecord, Table, YearRange};

fn years(min: i32, max: i32) -> Filter {
    Filter::new(YearRange::new(min, max), CountryFilter::All, CircuitFilter::All)
}

#[test]
fn year_ranges_are_inclusive_subsets() {
    let table = results();
    for (min, max) in [(2019, 2019), (2020, 2020), (2019, 2020), (2018, 2025), (2021, 2030)] {
        let filtered = table.filter(&years(min, max));
        assert!(filtered.iter().all(|r| min <= r.year && r.year <= max));
        assert!(filtered.iter().all(|r| table.records().contains(r)));
        let expected = table.iter().filter(|r| min <= r.year && r.year <= max).count();
        assert_eq!(filtered.len(), expected);
    }
}

#[test]
fn country_present_and_absent() {
    let table = results();
    let mut filter = Filter::everything(&table);

    filter.country = CountryFilter::from_selection("Belgium");
    let belgium = table.filter(&filter);
    assert_eq!(belgium.len(), 3);
    assert!(belgium.iter().all(|r| r.country == "Belgium"));

    filter.country = CountryFilter::from_selection("Monaco");
    assert!(table.filter(&filter).is_empty());
}

#[test]
fn circuit_sentinel_is_identity() {
    let table = results();
    let mut filter = Filter::everything(&table);
    let unfiltered = table.filter(&filter);

    filter.circuits = CircuitFilter::from_selections(["Monza", ALL_CIRCUITS]);
    assert_eq!(table.filter(&filter), unfiltered);

    filter.circuits = CircuitFilter::from_selections(["Monza"]);
    let monza = table.filter(&filter);
    assert_eq!(monza.len(), 6);
    assert!(monza.iter().all(|r| r.circuit_name == "Monza"));
}

#[test]
fn full_range_round_trip_is_identity() {
    let table = results();
    let filter = Filter::from_sidebar(&table, None, None, Some("All"), [ALL_CIRCUITS]);
    assert_eq!(table.filter(&filter), table);
}

#[test]
fn round_trip_backfills_rank_without_the_column() {
    let csv = "year,race_id,race_name,country,circuit_name,driver_name,constructor_name,grid,positionOrder,points
2019,1001,Italian Grand Prix,Italy,Monza,Charles Leclerc,Ferrari,1,1,25
2019,1001,Italian Grand Prix,Italy,Monza,Lewis Hamilton,Mercedes,2,3,15
2020,1021,Italian Grand Prix,Italy,Monza,Pierre Gasly,AlphaTauri,10,1,25
2020,1022,Emilia Romagna Grand Prix,Italy,Imola,Daniel Ricciardo,Renault,5,3,15
";
    let file = common::csv_file(csv);
    let table = f1_dashboard::loader::load_uncached(file.path()).unwrap();
    assert!(!table.has_fastest_lap_speed());
    assert!(table.iter().all(|r| r.rank == Some(r.position_order)));

    let filter = Filter::from_sidebar(&table, None, None, Some("All Countries"), [ALL_CIRCUITS]);
    let round_trip = table.filter(&filter);
    assert_eq!(round_trip, table);
    let ranks: Vec<_> = round_trip.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, vec![Some(1), Some(3), Some(1), Some(3)]);
}

fn row(year: i32, position: i32, constructor: &str) -> ResultRecord {
    ResultRecord {
        year,
        race_id: year as i64,
        race_name: format!("{} Grand Prix", year),
        country: "Italy".to_string(),
        circuit_name: "Monza".to_string(),
        driver_name: format!("{} driver", constructor),
        constructor_name: constructor.to_string(),
        grid: position,
        position_order: position,
        points: 0.0,
        rank: Some(position),
        fastest_lap_speed: None,
    }
}

#[test]
fn three_row_example() {
    let table = Table::new(
        vec![row(2020, 1, "Red"), row(2020, 2, "Blue"), row(2021, 1, "Blue")],
        false,
    );

    let filtered = table.filter(&years(2021, 2021));
    assert_eq!(filtered.records(), &table.records()[2..]);

    let wins: Vec<(String, usize)> = top_constructors_by_wins(&table, 10)
        .into_iter()
        .map(|c| (c.constructor, c.wins))
        .collect();
    assert_eq!(wins, vec![("Blue".to_string(), 1), ("Red".to_string(), 1)]);
}
