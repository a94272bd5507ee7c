//! Scheme index: sheet short codes to full scheme names.

use std::collections::HashMap;

use models::IndexColumns;

use crate::cell::coerce_text;
use crate::workbook::RawSheet;

/// Header label of the short-code column; rows carrying it are not schemes.
pub const SHORT_NAME_LABEL: &str = "Short Name";

/// Short code to full name, iterated in the order codes first appear.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemeIndex {
    entries: Vec<(String, String)>,
    positions: HashMap<String, usize>,
}

impl SchemeIndex {
    /// Adds or replaces a mapping. A replaced code keeps its original position.
    pub fn insert(&mut self, short_code: String, full_name: String) {
        match self.positions.get(&short_code) {
            Some(&pos) => self.entries[pos].1 = full_name,
            None => {
                self.positions.insert(short_code.clone(), self.entries.len());
                self.entries.push((short_code, full_name));
            }
        }
    }

    pub fn full_name(&self, short_code: &str) -> Option<&str> {
        self.positions
            .get(short_code)
            .map(|&pos| self.entries[pos].1.as_str())
    }

    pub fn contains(&self, short_code: &str) -> bool {
        self.positions.contains_key(short_code)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(c, n)| (c.as_str(), n.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds the index with the default column layout (short code in column 1,
/// full name in column 2).
pub fn build_index(sheet: &RawSheet) -> SchemeIndex {
    build_index_with(sheet, &IndexColumns::default())
}

/// Builds the index from an index sheet. The first row is its header.
///
/// Rows missing either value, or repeating the header label, are skipped.
/// A code listed twice maps to its last full name.
pub fn build_index_with(sheet: &RawSheet, columns: &IndexColumns) -> SchemeIndex {
    let mut index = SchemeIndex::default();

    for row in sheet.rows().iter().skip(1) {
        let short_code = coerce_text(row.get(columns.short_code));
        let full_name = coerce_text(row.get(columns.full_name));
        let (Some(short_code), Some(full_name)) = (short_code, full_name) else {
            continue;
        };
        if short_code == SHORT_NAME_LABEL {
            continue;
        }
        index.insert(short_code, full_name);
    }

    index
}
