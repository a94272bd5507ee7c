use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::cell::cell_str;
use crate::workbook::RawSheet;

pub const DEFAULT_DATE_SCAN_ROWS: usize = 10;

static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"202[0-9]").expect("valid year regex"));

/// Looks for the reporting date in the title block of a sheet.
///
/// A cell matches when it mentions `marker` (a month-day phrase such as
/// "December 31", compared case-insensitively) together with a year of the
/// form `202x`. The date is the marker's month and day in that year.
pub fn find_reporting_date(sheet: &RawSheet, scan_rows: usize, marker: &str) -> Option<NaiveDate> {
    let marker_lower = marker.to_lowercase();

    sheet
        .rows()
        .iter()
        .take(scan_rows)
        .flat_map(|row| row.iter())
        .filter_map(|cell| cell_str(Some(cell)))
        .filter(|text| text.to_lowercase().contains(&marker_lower))
        .find_map(|text| {
            let year = YEAR_RE.find(&text)?;
            date_from_marker(marker, year.as_str())
        })
}

fn date_from_marker(marker: &str, year: &str) -> Option<NaiveDate> {
    let candidate = format!("{} {}", marker.trim(), year);
    NaiveDate::parse_from_str(&candidate, "%B %d %Y").ok()
}
