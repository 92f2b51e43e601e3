#![allow(dead_code)]

use f1_dashboard::{Table, loader};
use std::io::Write;
use tempfile::NamedTempFile;

/// Two seasons, two races each. Hamilton's Imola fastest lap has no speed.
pub const RESULTS_CSV: &str = "\
year,race_id,race_name,country,circuit_name,driver_name,constructor_name,grid,positionOrder,points,rank,fastestLapSpeed
2019,1001,Italian Grand Prix,Italy,Monza,Charles Leclerc,Ferrari,1,1,25,2,250.1
2019,1001,Italian Grand Prix,Italy,Monza,Valtteri Bottas,Mercedes,3,2,18,1,252.3
2019,1001,Italian Grand Prix,Italy,Monza,Lewis Hamilton,Mercedes,2,3,15,3,249.0
2019,1002,Belgian Grand Prix,Belgium,Spa-Francorchamps,Charles Leclerc,Ferrari,1,1,25,3,230.5
2019,1002,Belgian Grand Prix,Belgium,Spa-Francorchamps,Lewis Hamilton,Mercedes,3,2,18,1,231.9
2019,1002,Belgian Grand Prix,Belgium,Spa-Francorchamps,Valtteri Bottas,Mercedes,4,3,15,2,229.8
2020,1021,Italian Grand Prix,Italy,Monza,Pierre Gasly,AlphaTauri,10,1,25,4,\\N
2020,1021,Italian Grand Prix,Italy,Monza,Carlos Sainz,McLaren,3,2,18,2,254.0
2020,1021,Italian Grand Prix,Italy,Monza,Lewis Hamilton,Mercedes,1,7,7,1,264.4
2020,1022,Emilia Romagna Grand Prix,Italy,Imola,Lewis Hamilton,Mercedes,2,1,26,1,\\N
2020,1022,Emilia Romagna Grand Prix,Italy,Imola,Valtteri Bottas,Mercedes,1,2,18,3,230.0
2020,1022,Emilia Romagna Grand Prix,Italy,Imola,Daniel Ricciardo,Renault,5,3,15,5,229.0
";

/// Write `contents` to a temporary `.csv` file.
pub fn csv_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("create temp csv");
    file.write_all(contents.as_bytes()).expect("write temp csv");
    file.flush().expect("flush temp csv");
    file
}

pub fn results() -> Table {
    loader::read_table(RESULTS_CSV.as_bytes()).expect("parse sample results")
}
