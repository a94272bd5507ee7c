//! Field extraction from a single data row.
//!
//! Columns are positional relative to the header row: 0 is the instrument
//! code, 1 the instrument name, 2 the ISIN. The weight column drifts between
//! sheet variants and is searched over a priority list.

use calamine::Data;
use chrono::NaiveDate;
use models::{Holding, InstrumentType};

use crate::cell::{coerce_number, coerce_text};

pub const CODE_COL: usize = 0;
pub const NAME_COL: usize = 1;
pub const ISIN_COL: usize = 2;
pub const ISIN_LEN: usize = 12;

/// Instrument names that are really subtotal lines.
pub const BANNER_NAMES: [&str; 3] = ["Sub Total", "Total", "GRAND TOTAL"];

/// Candidate columns for the weight field, tried in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightColumns(Vec<usize>);

impl WeightColumns {
    pub fn new(columns: Vec<usize>) -> Self {
        Self(columns)
    }

    pub fn columns(&self) -> &[usize] {
        &self.0
    }

    /// First candidate column holding a number.
    pub fn first_number(&self, row: &[Data]) -> Option<f64> {
        self.0.iter().find_map(|&col| coerce_number(row.get(col)))
    }
}

impl Default for WeightColumns {
    fn default() -> Self {
        Self(vec![6, 5, 7])
    }
}

/// Run and scheme identity stamped onto every holding of a sheet.
#[derive(Debug, Clone, Copy)]
pub struct HoldingTag<'a> {
    pub amc_name: &'a str,
    pub scheme_code: &'a str,
    pub scheme_name: &'a str,
    pub reporting_date: NaiveDate,
}

/// Builds a holding from a data row, or `None` when the row is not a valid record.
pub fn extract_holding(
    row: &[Data],
    section: InstrumentType,
    weights: &WeightColumns,
    tag: &HoldingTag<'_>,
) -> Option<Holding> {
    let instrument_name = coerce_text(row.get(NAME_COL))?;
    if BANNER_NAMES.contains(&instrument_name.as_str()) {
        return None;
    }

    let portfolio_percentage = weights.first_number(row)?;

    let isin = coerce_text(row.get(ISIN_COL)).filter(|s| s.chars().count() == ISIN_LEN);

    Some(Holding {
        amc_name: tag.amc_name.to_string(),
        scheme_name: tag.scheme_name.to_string(),
        scheme_code: tag.scheme_code.to_string(),
        instrument_code: coerce_text(row.get(CODE_COL)),
        instrument_name,
        instrument_type: section,
        isin,
        portfolio_percentage,
        reporting_date: tag.reporting_date,
    })
}
