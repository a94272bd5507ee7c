//! Row classification into sections.
//!
//! Report sheets interleave banners, subtotals and data rows with no
//! structural delimiter, so rows are told apart by keywords in their text.
//! Rules are checked in order and the first match wins.

use models::InstrumentType;

const SUBTOTAL_MARKERS: [&str; 3] = ["Sub Total", "GRAND TOTAL", "Grand Total"];
const LISTING_MARKERS: [&str; 3] = ["Listed", "Unlisted", "Privately placed"];
const CASH_MARKERS: [&str; 3] = ["Reverse Repo", "TREPS", "Net Receivables"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowClass {
    /// Section banner; the row itself carries no holding.
    EnterSection(InstrumentType),
    Ignorable,
    DataRow(InstrumentType),
}

impl RowClass {
    /// Active section after a row of this class.
    pub fn next_section(self, current: Option<InstrumentType>) -> Option<InstrumentType> {
        match self {
            RowClass::EnterSection(section) => Some(section),
            RowClass::Ignorable | RowClass::DataRow(_) => current,
        }
    }
}

pub fn classify(row_text: &str, current: Option<InstrumentType>) -> RowClass {
    if row_text.contains("Equity") && row_text.contains("related") {
        return RowClass::EnterSection(InstrumentType::Equity);
    }
    if row_text.contains("Debt Instruments") {
        return RowClass::EnterSection(InstrumentType::Debt);
    }
    if contains_any(row_text, &SUBTOTAL_MARKERS)
        || contains_any(row_text, &LISTING_MARKERS)
        || contains_any(row_text, &CASH_MARKERS)
    {
        return RowClass::Ignorable;
    }

    match current {
        Some(section) => RowClass::DataRow(section),
        None => RowClass::Ignorable,
    }
}

fn contains_any(text: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| text.contains(m))
}
