mod common;

use common::results;
use f1_dashboard::views::{self, Drilldown, Report, View, ViewReport};
use f1_dashboard::{Filter, Table};

#[test]
fn overview_of_everything() {
    let overview = views::overview(&results()).unwrap();
    assert_eq!(overview.rows, 12);
    assert_eq!((overview.first_year, overview.last_year), (2019, 2020));
    assert_eq!(overview.drivers, 6);
    assert_eq!(overview.constructors, 5);
    let races: Vec<usize> = overview.races_per_year.iter().map(|y| y.races).collect();
    assert_eq!(races, vec![2, 2]);
    assert_eq!(overview.top_constructors[0].constructor, "Ferrari");
    assert_eq!(overview.top_constructors[0].wins, 2);
}

#[test]
fn wins_and_podiums_follow_positions() {
    let table = results();
    for driver in table.distinct(|r| r.driver_name.as_str()) {
        let report = views::driver_performance(&table, &driver).unwrap();
        let rows: Vec<_> = table.iter().filter(|r| r.driver_name == driver).collect();
        let wins = rows.iter().filter(|r| r.position_order == 1).count();
        let podiums = rows.iter().filter(|r| (1..=3).contains(&r.position_order)).count();
        assert_eq!(report.counts.wins, wins);
        assert_eq!(report.counts.podiums, podiums);
        assert!(report.counts.podiums >= report.counts.wins);
    }

    let mercedes = views::constructor_analysis(&table, "Mercedes").unwrap();
    assert_eq!(mercedes.counts.races, 7);
    assert_eq!(mercedes.counts.wins, 1);
    assert_eq!(mercedes.counts.podiums, 6);
    assert_eq!(mercedes.top_drivers[0].driver, "Lewis Hamilton");
    assert_eq!(mercedes.top_drivers[0].points, 66.0);
}

#[test]
fn fastest_laps_sorted_descending() {
    let analysis = views::fastest_lap(&results()).unwrap();
    assert_eq!(analysis.fastest_laps, 4);

    let speeds: Vec<f64> = analysis.top_laps.iter().map(|l| l.speed).collect();
    assert_eq!(speeds, vec![264.4, 252.3, 231.9]);
    assert!(speeds.windows(2).all(|w| w[0] > w[1]));

    assert_eq!(analysis.fastest_drivers[0].driver, "Valtteri Bottas");
    assert_eq!(analysis.fastest_drivers[1].driver, "Lewis Hamilton");
    assert_eq!(analysis.fastest_drivers[1].fastest_laps, 3);
}

#[test]
fn fastest_laps_capped_at_ten() {
    let mut csv = String::from(
        "year,race_id,race_name,country,circuit_name,driver_name,constructor_name,grid,positionOrder,points,rank,fastestLapSpeed\n",
    );
    for i in 0..15 {
        csv.push_str(&format!(
            "2020,{},Race {},Italy,Monza,Driver {},Team,1,1,25,1,{}\n",
            i,
            i,
            i,
            200 + i
        ));
    }
    let table = f1_dashboard::loader::read_table(csv.as_bytes()).unwrap();
    let analysis = views::fastest_lap(&table).unwrap();
    assert_eq!(analysis.top_laps.len(), 10);
    assert_eq!(analysis.top_laps[0].speed, 214.0);
    assert_eq!(analysis.top_laps[9].speed, 205.0);
}

#[test]
fn race_insight_defaults_to_first_race() {
    let table = results();
    let report = views::run(View::RaceInsight, &table, &Drilldown::default()).unwrap();
    let ViewReport::RaceInsight(race) = &report else {
        panic!("wrong report: {:?}", report);
    };
    assert_eq!(race.year, 2019);
    assert_eq!(race.race_name, "Belgian Grand Prix");
    let positions: Vec<i32> = race.results.iter().map(|r| r.position).collect();
    assert_eq!(positions, vec![1, 2, 3]);
    assert_eq!(report.display_tables()[0].columns, vec!["Position", "Driver", "Constructor", "Grid Position", "Points"]);
}

#[test]
fn empty_slice_is_a_notice_not_a_failure() {
    let table = results();
    let mut filter = Filter::everything(&table);
    filter.country = f1_dashboard::CountryFilter::from_selection("Monaco");
    let empty: Table = table.filter(&filter);

    for view in View::ALL {
        let drilldown = Drilldown {
            driver: Some("Lewis Hamilton".to_string()),
            constructor: Some("Mercedes".to_string()),
            ..Drilldown::default()
        };
        let err = views::run(view, &empty, &drilldown).unwrap_err();
        assert!(err.is_no_data(), "{view}: {err}");
    }
}
