//! Sheet access: the raw grid type and the workbook seam the parser reads through.

use std::io::{Read, Seek};

use calamine::{Data, Range, Reader, Sheets};

use crate::ParseError;

/// Rows x columns of raw cells for one sheet. Columns are positional only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSheet {
    rows: Vec<Vec<Data>>,
}

impl RawSheet {
    pub fn from_rows(rows: Vec<Vec<Data>>) -> Self {
        Self { rows }
    }

    /// Copies a calamine range, padded so that indices count from cell A1.
    pub fn from_range(range: &Range<Data>) -> Self {
        let (row_offset, col_offset) = range
            .start()
            .map(|(r, c)| (r as usize, c as usize))
            .unwrap_or((0, 0));

        let mut rows: Vec<Vec<Data>> = vec![Vec::new(); row_offset];
        for row in range.rows() {
            let mut padded = vec![Data::Empty; col_offset];
            padded.extend_from_slice(row);
            rows.push(padded);
        }
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<Data>] {
        &self.rows
    }

    pub fn row(&self, idx: usize) -> Option<&[Data]> {
        self.rows.get(idx).map(|r| r.as_slice())
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Data> {
        self.rows.get(row)?.get(col)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0)
    }
}

/// A multi-sheet document the consolidation run reads from.
pub trait WorkbookSource {
    fn sheet_names(&self) -> Vec<String>;
    fn read_sheet(&mut self, name: &str) -> Result<RawSheet, ParseError>;
}

impl<RS: Read + Seek> WorkbookSource for Sheets<RS> {
    fn sheet_names(&self) -> Vec<String> {
        Reader::sheet_names(self)
    }

    fn read_sheet(&mut self, name: &str) -> Result<RawSheet, ParseError> {
        let range = self
            .worksheet_range(name)
            .map_err(|e| ParseError::SheetRead {
                sheet: name.to_string(),
                message: e.to_string(),
            })?;
        Ok(RawSheet::from_range(&range))
    }
}

/// Workbook held in memory, sheets kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkbook {
    sheets: Vec<(String, RawSheet)>,
}

impl InMemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(mut self, name: impl Into<String>, sheet: RawSheet) -> Self {
        self.insert(name, sheet);
        self
    }

    /// Adds a sheet, replacing any sheet with the same name.
    pub fn insert(&mut self, name: impl Into<String>, sheet: RawSheet) {
        let name = name.into();
        match self.sheets.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = sheet,
            None => self.sheets.push((name, sheet)),
        }
    }
}

impl WorkbookSource for InMemoryWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(n, _)| n.clone()).collect()
    }

    fn read_sheet(&mut self, name: &str) -> Result<RawSheet, ParseError> {
        self.sheets
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s.clone())
            .ok_or_else(|| ParseError::SheetRead {
                sheet: name.to_string(),
                message: "sheet not found".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_sheet_accessors() {
        let sheet = RawSheet::from_rows(vec![
            vec![Data::String("a".into())],
            vec![Data::Empty, Data::Float(1.0), Data::Int(2)],
        ]);
        assert_eq!(sheet.height(), 2);
        assert_eq!(sheet.width(), 3);
        assert_eq!(sheet.cell(1, 2), Some(&Data::Int(2)));
        assert_eq!(sheet.cell(0, 2), None);
        assert_eq!(sheet.row(5), None);
    }

    #[test]
    fn test_raw_sheet_from_range() {
        let mut range: Range<Data> = Range::new((0, 0), (1, 1));
        range.set_value((1, 1), Data::Float(2.5));
        let sheet = RawSheet::from_range(&range);
        assert_eq!(sheet.height(), 2);
        assert_eq!(sheet.cell(1, 1), Some(&Data::Float(2.5)));
        assert_eq!(sheet.cell(0, 0), Some(&Data::Empty));
    }

    #[test]
    fn test_raw_sheet_from_offset_range_keeps_positions() {
        let mut range: Range<Data> = Range::new((2, 1), (3, 2));
        range.set_value((3, 2), Data::String("ISIN".into()));
        let sheet = RawSheet::from_range(&range);
        assert_eq!(sheet.height(), 4);
        assert_eq!(sheet.cell(3, 2), Some(&Data::String("ISIN".into())));
        assert_eq!(sheet.cell(0, 0), None);
        assert_eq!(sheet.cell(2, 0), Some(&Data::Empty));
    }

    #[test]
    fn test_in_memory_workbook() {
        let mut wb = InMemoryWorkbook::new()
            .with_sheet("Index", RawSheet::default())
            .with_sheet("FUND1", RawSheet::default());
        wb.insert("Index", RawSheet::from_rows(vec![vec![Data::Int(1)]]));

        assert_eq!(wb.sheet_names(), vec!["Index".to_string(), "FUND1".to_string()]);
        assert_eq!(wb.read_sheet("Index").unwrap().height(), 1);
        assert!(matches!(
            wb.read_sheet("MISSING"),
            Err(ParseError::SheetRead { .. })
        ));
    }
}
