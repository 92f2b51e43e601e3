use serde::{Deserialize, Serialize};

/// A table ready for display: renamed columns and pre-formatted cells.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisplayTable {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DisplayTable {
    pub fn new<S: Into<String>>(title: impl Into<String>, columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            title: title.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render as aligned plain text for terminals.
    pub fn to_text(&self) -> String {
        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let render = |cells: &[String]| {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut out = String::new();
        out.push_str(&self.title);
        out.push('\n');
        out.push_str(&render(self.columns.as_slice()));
        out.push('\n');
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        out.push_str(&render(rule.as_slice()));
        out.push('\n');
        for row in &self.rows {
            out.push_str(&render(row.as_slice()));
            out.push('\n');
        }
        out
    }
}

/// Format with a fixed number of decimals.
pub fn fixed(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value)
}

/// Averages are shown with two decimals.
pub fn average(value: f64) -> String {
    fixed(value, 2)
}

/// Counts and points are shown as whole numbers.
pub fn whole(value: f64) -> String {
    fixed(value, 0)
}

/// Whole values without decimals, anything else as-is (`25`, `4.5`).
pub fn plain(value: f64) -> String {
    if value.fract() == 0.0 {
        whole(value)
    } else {
        value.to_string()
    }
}

/// Integer with comma thousands separators.
pub fn thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separators_and_plain_numbers() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(25840), "25,840");
        assert_eq!(thousands(1234567), "1,234,567");
        assert_eq!(plain(25.0), "25");
        assert_eq!(plain(4.5), "4.5");
    }

    #[test]
    fn fixed_precision() {
        assert_eq!(average(7.1234), "7.12");
        assert_eq!(average(2.0), "2.00");
        assert_eq!(whole(43.0), "43");
        assert_eq!(whole(12.4), "12");
    }

    #[test]
    fn text_rendering_aligns_columns() {
        let mut table = DisplayTable::new("Results", ["Position", "Driver"]);
        table.push_row(vec!["1".to_string(), "Lewis Hamilton".to_string()]);
        let text = table.to_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Results");
        assert_eq!(lines[1], "Position  Driver");
        assert_eq!(lines[3], "1         Lewis Hamilton");
    }
}
