//! Sheet parsing: header, sections and rows of one scheme sheet.

use std::fmt;

use chrono::NaiveDate;
use models::{Holding, InstrumentType, Settings};

use crate::cell::row_text;
use crate::header::locate_header;
use crate::reporting_date::find_reporting_date;
use crate::row::{extract_holding, HoldingTag, WeightColumns};
use crate::section::{classify, RowClass};
use crate::workbook::RawSheet;

/// Holdings of one sheet, split by asset class, in row order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetHoldings {
    pub equity: Vec<Holding>,
    pub debt: Vec<Holding>,
}

impl SheetHoldings {
    pub fn len(&self) -> usize {
        self.equity.len() + self.debt.len()
    }

    pub fn is_empty(&self) -> bool {
        self.equity.is_empty() && self.debt.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No header row within the scan window.
    HeaderNotFound,
    /// The sheet named by the index could not be read.
    Unreadable(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::HeaderNotFound => write!(f, "header row not found"),
            SkipReason::Unreadable(msg) => write!(f, "unreadable: {}", msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSheet {
    pub scheme_code: String,
    pub reason: SkipReason,
}

/// Per-run parser state, handed to every sheet of one workbook.
///
/// Holds the run configuration, the reporting date (resolved from the first
/// sheet parsed) and the log of skipped sheets. Call [`ParserContext::reset`]
/// before reusing it for another workbook.
#[derive(Debug, Clone)]
pub struct ParserContext {
    amc_name: String,
    header_scan_limit: usize,
    date_scan_rows: usize,
    date_marker: String,
    fallback_date: NaiveDate,
    weights: WeightColumns,
    reporting_date: Option<NaiveDate>,
    skipped: Vec<SkippedSheet>,
}

impl ParserContext {
    pub fn new(settings: &Settings) -> Self {
        Self {
            amc_name: settings.amc_name.clone(),
            header_scan_limit: settings.header_scan_limit,
            date_scan_rows: settings.date_scan_rows,
            date_marker: settings.reporting_date_marker.clone(),
            fallback_date: settings.fallback_reporting_date,
            weights: WeightColumns::new(settings.weight_columns.clone()),
            reporting_date: None,
            skipped: Vec::new(),
        }
    }

    pub fn with_amc_name(mut self, amc_name: impl Into<String>) -> Self {
        self.amc_name = amc_name.into();
        self
    }

    pub fn amc_name(&self) -> &str {
        &self.amc_name
    }

    /// Reporting date of this run, once a sheet has been parsed.
    pub fn reporting_date(&self) -> Option<NaiveDate> {
        self.reporting_date
    }

    pub fn skipped_sheets(&self) -> &[SkippedSheet] {
        &self.skipped
    }

    pub fn record_skip(&mut self, scheme_code: &str, reason: SkipReason) {
        tracing::debug!("Skipping sheet {}: {}", scheme_code, reason);
        self.skipped.push(SkippedSheet {
            scheme_code: scheme_code.to_string(),
            reason,
        });
    }

    /// Clears run-scoped state: the reporting date and the skip log.
    pub fn reset(&mut self) {
        self.reporting_date = None;
        self.skipped.clear();
    }

    fn ensure_reporting_date(&mut self, sheet: &RawSheet) -> NaiveDate {
        if let Some(date) = self.reporting_date {
            return date;
        }
        let date = find_reporting_date(sheet, self.date_scan_rows, &self.date_marker)
            .unwrap_or_else(|| {
                tracing::debug!(
                    "No '{}' date marker found, using fallback {}",
                    self.date_marker,
                    self.fallback_date
                );
                self.fallback_date
            });
        self.reporting_date = Some(date);
        date
    }

    /// Parses one scheme sheet into equity and debt holdings.
    ///
    /// A sheet without a header row yields no holdings and is recorded as
    /// skipped. Rows are never an error: anything that does not form a valid
    /// holding is dropped.
    pub fn parse_sheet(
        &mut self,
        sheet: &RawSheet,
        scheme_code: &str,
        scheme_name: &str,
    ) -> SheetHoldings {
        let reporting_date = self.ensure_reporting_date(sheet);

        let mut out = SheetHoldings::default();
        let Some(header_row) = locate_header(sheet, self.header_scan_limit) else {
            self.record_skip(scheme_code, SkipReason::HeaderNotFound);
            return out;
        };

        let tag = HoldingTag {
            amc_name: &self.amc_name,
            scheme_code,
            scheme_name,
            reporting_date,
        };

        let mut section: Option<InstrumentType> = None;
        for row in sheet.rows().iter().skip(header_row + 1) {
            let class = classify(&row_text(row), section);
            section = class.next_section(section);

            let RowClass::DataRow(active) = class else {
                continue;
            };
            if let Some(holding) = extract_holding(row, active, &self.weights, &tag) {
                match active {
                    InstrumentType::Equity => out.equity.push(holding),
                    InstrumentType::Debt => out.debt.push(holding),
                }
            }
        }

        tracing::debug!(
            "Sheet {}: {} equity, {} debt holdings",
            scheme_code,
            out.equity.len(),
            out.debt.len()
        );
        out
    }
}

impl Default for ParserContext {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}
