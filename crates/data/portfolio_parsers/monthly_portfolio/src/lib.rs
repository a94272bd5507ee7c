//! Holdings extraction from monthly portfolio disclosure workbooks.
//!
//! A workbook carries an index sheet listing every scheme (short code and full
//! name) and one sheet per scheme. Scheme sheets are human-formatted: a title
//! block, a header row somewhere near the top, then section banners, subtotal
//! lines and holding rows. [`ParserContext::parse_sheet`] turns one such sheet
//! into typed [`Holding`]s; [`MonthlyPortfolioParser`] runs it over a whole
//! workbook.

pub mod cell;
pub mod header;
pub mod index;
pub mod reporting_date;
pub mod row;
pub mod section;
pub mod sheet;
pub mod workbook;

use std::path::Path;

use calamine::open_workbook_auto;
use chrono::NaiveDate;
use models::{Holding, Settings};
use thiserror::Error;

pub use index::{build_index, build_index_with, SchemeIndex};
pub use sheet::{ParserContext, SheetHoldings, SkipReason, SkippedSheet};
pub use workbook::{InMemoryWorkbook, RawSheet, WorkbookSource};

pub const PARSER_NAME: &str = "monthly_portfolio";

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("cannot open workbook {path}: {message}")]
    Open { path: String, message: String },
    #[error("cannot read sheet '{sheet}': {message}")]
    SheetRead { sheet: String, message: String },
    #[error("index sheet '{0}' not found in workbook")]
    MissingIndexSheet(String),
}

/// Result of a whole-workbook run.
#[derive(Debug, Clone)]
pub struct Consolidation {
    pub equity: Vec<Holding>,
    pub debt: Vec<Holding>,
    pub reporting_date: NaiveDate,
    /// Schemes listed in the index.
    pub scheme_count: usize,
    /// Scheme sheets that could be read (including ones without a header).
    pub processed: usize,
    pub skipped: Vec<SkippedSheet>,
    /// Workbook sheets the index does not mention; never parsed.
    pub unindexed_sheets: Vec<String>,
}

impl Consolidation {
    pub fn total_holdings(&self) -> usize {
        self.equity.len() + self.debt.len()
    }
}

pub struct MonthlyPortfolioParser {
    pub settings: Settings,
}

impl MonthlyPortfolioParser {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn with_amc_name(mut self, amc_name: impl Into<String>) -> Self {
        self.settings.amc_name = amc_name.into();
        self
    }

    /// Opens a workbook (xlsx, xlsm, xlsb, xls or ods) and consolidates it.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Consolidation, ParseError> {
        let path = path.as_ref();
        let mut workbook = open_workbook_auto(path).map_err(|e| ParseError::Open {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        self.consolidate(&mut workbook)
    }

    /// Parses every scheme named by the index sheet, in index order.
    ///
    /// Only a missing or unreadable index sheet is an error. Scheme sheets
    /// that are missing, unreadable or without a header are recorded in
    /// [`Consolidation::skipped`] and the run continues.
    pub fn consolidate<W: WorkbookSource>(
        &self,
        workbook: &mut W,
    ) -> Result<Consolidation, ParseError> {
        let sheet_names = workbook.sheet_names();
        let index_sheet = &self.settings.index_sheet;
        if !sheet_names.iter().any(|n| n == index_sheet) {
            return Err(ParseError::MissingIndexSheet(index_sheet.clone()));
        }

        let index = build_index_with(
            &workbook.read_sheet(index_sheet)?,
            &self.settings.index_columns,
        );
        tracing::info!("Found {} schemes to process", index.len());

        let mut ctx = ParserContext::new(&self.settings);
        let mut equity = Vec::new();
        let mut debt = Vec::new();
        let mut processed = 0usize;

        for (scheme_code, scheme_name) in index.iter() {
            let sheet = match workbook.read_sheet(scheme_code) {
                Ok(sheet) => sheet,
                Err(e) => {
                    tracing::warn!("Error processing {}: {}", scheme_code, e);
                    ctx.record_skip(scheme_code, SkipReason::Unreadable(e.to_string()));
                    continue;
                }
            };

            let holdings = ctx.parse_sheet(&sheet, scheme_code, scheme_name);
            equity.extend(holdings.equity);
            debt.extend(holdings.debt);

            processed += 1;
            if processed % 10 == 0 {
                tracing::info!("Processed {}/{} schemes...", processed, index.len());
            }
        }

        let unindexed_sheets: Vec<String> = sheet_names
            .into_iter()
            .filter(|n| n != index_sheet && !index.contains(n))
            .collect();
        if !unindexed_sheets.is_empty() {
            tracing::debug!("Sheets not listed in the index: {:?}", unindexed_sheets);
        }

        tracing::info!(
            "Successfully processed {} schemes ({} equity, {} debt holdings, {} skipped)",
            processed,
            equity.len(),
            debt.len(),
            ctx.skipped_sheets().len()
        );

        Ok(Consolidation {
            equity,
            debt,
            reporting_date: ctx
                .reporting_date()
                .unwrap_or(self.settings.fallback_reporting_date),
            scheme_count: index.len(),
            processed,
            skipped: ctx.skipped_sheets().to_vec(),
            unindexed_sheets,
        })
    }
}

impl Default for MonthlyPortfolioParser {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
