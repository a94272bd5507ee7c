use crate::cell::row_text;
use crate::workbook::RawSheet;

pub const DEFAULT_HEADER_SCAN_LIMIT: usize = 20;

/// Column label of the instrument name column in the header row.
pub const INSTRUMENT_NAME_MARKER: &str = "Name of the Instrument";
/// Column label of the ISIN column in the header row.
pub const ISIN_MARKER: &str = "ISIN";

/// Finds the header row within the first `scan_limit` rows.
///
/// A row qualifies when its text contains both column markers
/// (case-sensitive). `None` means the sheet carries no holdings table.
pub fn locate_header(sheet: &RawSheet, scan_limit: usize) -> Option<usize> {
    sheet
        .rows()
        .iter()
        .take(scan_limit)
        .position(|row| {
            let text = row_text(row);
            text.contains(INSTRUMENT_NAME_MARKER) && text.contains(ISIN_MARKER)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::Data;

    fn banner(s: &str) -> Vec<Data> {
        vec![Data::Empty, Data::String(s.to_string())]
    }

    fn header_row() -> Vec<Data> {
        vec![
            Data::String("Company Code".into()),
            Data::String("Name of the Instrument".into()),
            Data::String("ISIN".into()),
            Data::String("Industry".into()),
        ]
    }

    #[test]
    fn test_header_found_by_content() {
        let mut rows: Vec<Vec<Data>> = (0..5).map(|i| banner(&format!("Title line {i}"))).collect();
        rows.push(header_row());
        rows.push(banner("Equity & Equity related"));
        let sheet = RawSheet::from_rows(rows);

        assert_eq!(locate_header(&sheet, DEFAULT_HEADER_SCAN_LIMIT), Some(5));
    }

    #[test]
    fn test_first_qualifying_row_wins() {
        let sheet = RawSheet::from_rows(vec![header_row(), header_row()]);
        assert_eq!(locate_header(&sheet, DEFAULT_HEADER_SCAN_LIMIT), Some(0));
    }

    #[test]
    fn test_both_markers_required() {
        let sheet = RawSheet::from_rows(vec![
            banner("Name of the Instrument"),
            banner("ISIN"),
        ]);
        assert_eq!(locate_header(&sheet, DEFAULT_HEADER_SCAN_LIMIT), None);
    }

    #[test]
    fn test_markers_are_case_sensitive() {
        let sheet = RawSheet::from_rows(vec![vec![
            Data::String("name of the instrument".into()),
            Data::String("isin".into()),
        ]]);
        assert_eq!(locate_header(&sheet, DEFAULT_HEADER_SCAN_LIMIT), None);
    }

    #[test]
    fn test_header_beyond_scan_window_is_not_found() {
        let mut rows: Vec<Vec<Data>> = (0..25).map(|_| banner("notes")).collect();
        rows.push(header_row());
        let sheet = RawSheet::from_rows(rows);

        assert_eq!(locate_header(&sheet, DEFAULT_HEADER_SCAN_LIMIT), None);
        assert_eq!(locate_header(&sheet, 30), Some(25));
    }

    #[test]
    fn test_scan_window_boundary() {
        let mut rows: Vec<Vec<Data>> = (0..19).map(|_| banner("notes")).collect();
        rows.push(header_row());
        let sheet = RawSheet::from_rows(rows);
        assert_eq!(locate_header(&sheet, 20), Some(19));

        let mut rows: Vec<Vec<Data>> = (0..20).map(|_| banner("notes")).collect();
        rows.push(header_row());
        let sheet = RawSheet::from_rows(rows);
        assert_eq!(locate_header(&sheet, 20), None);
    }

    #[test]
    fn test_empty_sheet() {
        assert_eq!(locate_header(&RawSheet::default(), DEFAULT_HEADER_SCAN_LIMIT), None);
    }
}
