use crate::error::DashboardError;
use crate::record::{ResultRecord, Table};
use lazy_static::lazy_static;
use log::{debug, info, warn};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

/// Columns every results file must provide.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "year",
    "country",
    "circuit_name",
    "driver_name",
    "constructor_name",
    "race_id",
    "race_name",
    "grid",
    "points",
    "positionOrder",
];

pub const RANK_COLUMN: &str = "rank";
pub const SPEED_COLUMN: &str = "fastestLapSpeed";

lazy_static! {
    /// Tables loaded so far, keyed by the path they were read from.
    ///
    /// Entries are inserted once and never evicted for the life of the process.
    static ref TABLES: RwLock<HashMap<PathBuf, Arc<Table>>> = RwLock::new(HashMap::new());
}

// Row shape as it appears on disk, before coercion.
#[derive(Debug, Deserialize)]
struct RawRecord {
    year: i32,
    race_id: i64,
    race_name: String,
    country: String,
    circuit_name: String,
    driver_name: String,
    constructor_name: String,
    grid: i32,
    #[serde(rename = "positionOrder")]
    position_order: i32,
    points: f64,
    #[serde(default)]
    rank: Option<String>,
    #[serde(default, rename = "fastestLapSpeed")]
    fastest_lap_speed: Option<String>,
}

/// Load the results table at `path`, reading the file at most once.
///
/// The first successful call parses the file and caches the result; every
/// later call for the same path returns a clone of the same `Arc`. Failures
/// are not cached, so a missing file is reported again on the next call.
///
/// # Examples
/// ```no_run
/// use f1_dashboard::loader::load;
///
/// match load("Cleaned_table_part_Two.csv") {
///     Ok(table) => println!("Loaded {} results", table.len()),
///     Err(e) => eprintln!("Error loading results: {}", e),
/// }
/// ```
pub fn load(path: impl AsRef<Path>) -> Result<Arc<Table>, DashboardError> {
    let path = path.as_ref();

    if let Some(table) = TABLES
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(path)
    {
        debug!("cache hit for {}", path.display());
        return Ok(Arc::clone(table));
    }

    let table = Arc::new(load_uncached(path)?);

    let mut tables = TABLES.write().unwrap_or_else(PoisonError::into_inner);
    // Another caller may have won the race; keep whichever landed first.
    let cached = tables.entry(path.to_path_buf()).or_insert(table);
    Ok(Arc::clone(cached))
}

/// Parse the file at `path` without consulting the cache.
pub fn load_uncached(path: impl AsRef<Path>) -> Result<Table, DashboardError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    match extension.as_deref() {
        Some("csv") => {}
        Some(ext) => {
            return Err(DashboardError::data_unavailable(
                path,
                format!("unsupported file extension: {}", ext),
            ));
        }
        None => return Err(DashboardError::data_unavailable(path, "file has no extension")),
    }

    let file = File::open(path).map_err(|e| DashboardError::data_unavailable(path, e))?;
    let table = read_table(file).map_err(|e| match e {
        DashboardError::DataUnavailable { reason, .. } => {
            DashboardError::data_unavailable(path, reason)
        }
        other => other,
    })?;

    info!(
        "loaded {} results from {} ({} seasons)",
        table.len(),
        path.display(),
        table.years().len()
    );
    Ok(table)
}

/// Parse a results table from any CSV source.
///
/// Required columns are checked against the header row before any record is
/// read. `rank` is backfilled from `positionOrder` when the column is absent;
/// lap speeds that do not parse as finite numbers become missing values.
pub fn read_table(reader: impl Read) -> Result<Table, DashboardError> {
    let source = PathBuf::from("<reader>");
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| DashboardError::data_unavailable(&source, e))?
        .clone();
    let has_column = |name: &str| headers.iter().any(|h| h == name);

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|name| !has_column(*name))
        .collect();
    if !missing.is_empty() {
        return Err(DashboardError::data_unavailable(
            &source,
            format!("missing required columns: {}", missing.join(", ")),
        ));
    }

    let has_rank = has_column(RANK_COLUMN);
    let has_speed = has_column(SPEED_COLUMN);

    let mut records = Vec::new();
    let mut coerced_speeds = 0usize;
    for row in csv_reader.deserialize::<RawRecord>() {
        let raw = row.map_err(|e| DashboardError::data_unavailable(&source, e))?;

        let rank = if has_rank {
            raw.rank.as_deref().and_then(parse_integer)
        } else {
            Some(raw.position_order)
        };

        let fastest_lap_speed = match raw.fastest_lap_speed.as_deref() {
            Some(text) if !text.trim().is_empty() => {
                let speed = coerce_numeric(text);
                if speed.is_none() {
                    coerced_speeds += 1;
                }
                speed
            }
            _ => None,
        };

        records.push(ResultRecord {
            year: raw.year,
            race_id: raw.race_id,
            race_name: raw.race_name,
            country: raw.country,
            circuit_name: raw.circuit_name,
            driver_name: raw.driver_name,
            constructor_name: raw.constructor_name,
            grid: raw.grid,
            position_order: raw.position_order,
            points: raw.points,
            rank,
            fastest_lap_speed,
        });
    }

    if coerced_speeds > 0 {
        warn!(
            "{} non-numeric {} values treated as missing",
            coerced_speeds, SPEED_COLUMN
        );
    }

    Ok(Table::new(records, has_speed))
}

/// Parse a numeric field, treating anything non-numeric as missing.
pub fn coerce_numeric(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

// Ranks are sometimes written as floats ("1.0") by upstream exports.
fn parse_integer(text: &str) -> Option<i32> {
    let text = text.trim();
    text.parse::<i32>().ok().or_else(|| {
        coerce_numeric(text)
            .filter(|v| v.fract() == 0.0 && *v >= i32::MIN as f64 && *v <= i32::MAX as f64)
            .map(|v| v as i32)
    })
}
