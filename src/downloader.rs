use crate::error::DashboardError;
use crate::table::DisplayTable;

/// Convert a display table to CSV format
///
/// The header row carries the display column names; cells are written exactly
/// as formatted, with quoting handled by the csv writer.
///
/// # Arguments
/// * `table` - The table to convert
///
/// # Returns
/// * `Result<String, DashboardError>` - CSV content as a string or an error
///
/// # Examples
/// ```
/// use f1_dashboard::downloader::to_csv;
/// use f1_dashboard::table::DisplayTable;
///
/// let mut table = DisplayTable::new("Top Drivers", ["Driver", "Points"]);
/// table.push_row(vec!["Hamilton, Lewis".to_string(), "413".to_string()]);
/// let csv = to_csv(&table).unwrap();
/// assert_eq!(csv, "Driver,Points\n\"Hamilton, Lewis\",413\n");
/// ```
pub fn to_csv(table: &DisplayTable) -> Result<String, DashboardError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(&table.columns)
        .map_err(|e| DashboardError::Export(e.to_string()))?;
    for row in &table.rows {
        writer
            .write_record(row)
            .map_err(|e| DashboardError::Export(e.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| DashboardError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| DashboardError::Export(e.to_string()))
}

/// Convert display tables to XLSX format
///
/// Each table becomes one worksheet named after its title. Cells that parse
/// as numbers are written as numbers so spreadsheet tools can sort and sum
/// them; everything else is written as text.
///
/// # Arguments
/// * `tables` - The tables to export, one worksheet each
///
/// # Returns
/// * `Result<Vec<u8>, DashboardError>` - XLSX file content as bytes or an error
#[cfg(feature = "web")]
pub fn to_xlsx(tables: &[DisplayTable]) -> Result<Vec<u8>, DashboardError> {
    use rust_xlsxwriter::{Format, Workbook, Worksheet};

    let export_err = |e: rust_xlsxwriter::XlsxError| DashboardError::Export(e.to_string());
    let header = Format::new().set_bold();

    let mut workbook = Workbook::new();
    let mut used_names: Vec<String> = Vec::new();

    for table in tables {
        let mut worksheet = Worksheet::new();
        let name = unique_sheet_name(&table.title, &used_names);
        worksheet.set_name(name.as_str()).map_err(export_err)?;
        used_names.push(name);

        for (c, column) in table.columns.iter().enumerate() {
            worksheet
                .write_string_with_format(0, c as u16, column.as_str(), &header)
                .map_err(export_err)?;
        }

        for (r, row) in table.rows.iter().enumerate() {
            let r = (r + 1) as u32;
            for (c, cell) in row.iter().enumerate() {
                let c = c as u16;
                match cell.parse::<f64>() {
                    Ok(number) if number.is_finite() => {
                        worksheet.write_number(r, c, number).map_err(export_err)?;
                    }
                    _ => {
                        worksheet.write_string(r, c, cell.as_str()).map_err(export_err)?;
                    }
                }
            }
        }

        workbook.push_worksheet(worksheet);
    }

    workbook.save_to_buffer().map_err(export_err)
}

/// Lower-case, dash-separated file stem for a table title.
///
/// # Examples
/// ```
/// use f1_dashboard::downloader::file_stem;
///
/// assert_eq!(file_stem("Results - Italian Grand Prix (2020)"), "results-italian-grand-prix-2020");
/// ```
pub fn file_stem(title: &str) -> String {
    let mut stem = String::new();
    for ch in title.chars() {
        if ch.is_alphanumeric() {
            stem.extend(ch.to_lowercase());
        } else if !stem.is_empty() && !stem.ends_with('-') {
            stem.push('-');
        }
    }
    let stem = stem.trim_end_matches('-').to_string();
    if stem.is_empty() { "table".to_string() } else { stem }
}

// Worksheet names: at most 31 characters, none of []:*?/\ and unique.
#[cfg(feature = "web")]
fn unique_sheet_name(title: &str, used: &[String]) -> String {
    let base: String = title
        .chars()
        .map(|ch| if "[]:*?/\\".contains(ch) { '-' } else { ch })
        .take(31)
        .collect();
    let base = if base.trim().is_empty() { "Sheet".to_string() } else { base };

    let mut name = base.clone();
    let mut n = 2;
    while used.iter().any(|u| u.eq_ignore_ascii_case(&name)) {
        let suffix = format!(" {}", n);
        let keep = 31usize.saturating_sub(suffix.chars().count());
        name = base.chars().take(keep).collect::<String>() + &suffix;
        n += 1;
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DisplayTable {
        let mut table = DisplayTable::new("Top Constructors by Wins", ["Constructor", "Wins"]);
        table.push_row(vec!["Ferrari".to_string(), "243".to_string()]);
        table.push_row(vec!["McLaren".to_string(), "183".to_string()]);
        table
    }

    #[test]
    fn csv_has_header_and_rows() {
        let csv = to_csv(&sample()).unwrap();
        assert_eq!(csv, "Constructor,Wins\nFerrari,243\nMcLaren,183\n");
    }

    #[test]
    fn stems_are_path_safe() {
        assert_eq!(file_stem("Top 10 Fastest Laps"), "top-10-fastest-laps");
        assert_eq!(file_stem("***"), "table");
    }

    #[cfg(feature = "web")]
    #[test]
    fn xlsx_is_a_zip_archive() {
        let bytes = to_xlsx(&[sample(), sample()]).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[cfg(feature = "web")]
    #[test]
    fn sheet_names_stay_valid() {
        let long = "Results - A Very Long Grand Prix Name Indeed (2020)";
        let first = unique_sheet_name(long, &[]);
        assert_eq!(first.chars().count(), 31);
        let second = unique_sheet_name(long, &[first.clone()]);
        assert_ne!(first, second);
        assert!(second.ends_with(" 2"));
        assert_eq!(unique_sheet_name("a/b", &[]), "a-b");
    }
}
