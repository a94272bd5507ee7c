use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// Output record
/// One instrument's reported weight within one scheme's portfolio.
///
/// Field order is the export column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
	pub amc_name: String,
	pub scheme_name: String,
	pub scheme_code: String,
	pub instrument_code: Option<String>,
	pub instrument_name: String,
	pub instrument_type: InstrumentType,
	pub isin: Option<String>,
	pub portfolio_percentage: f64,
	pub reporting_date: NaiveDate,
}

/// Column names of an exported holdings file, in order.
pub const HOLDING_COLUMNS: [&str; 9] = [
	"amc_name",
	"scheme_name",
	"scheme_code",
	"instrument_code",
	"instrument_name",
	"instrument_type",
	"isin",
	"portfolio_percentage",
	"reporting_date",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InstrumentType {
	Equity,
	Debt,
}

impl InstrumentType {
	pub fn as_str(&self) -> &'static str {
		match self {
			InstrumentType::Equity => "Equity",
			InstrumentType::Debt => "Debt",
		}
	}

	pub fn from_str(s: &str) -> Option<Self> {
		match s.trim().to_lowercase().as_str() {
			"equity" => Some(InstrumentType::Equity),
			"debt" => Some(InstrumentType::Debt),
			_ => None,
		}
	}
}

impl fmt::Display for InstrumentType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

// Settings models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexColumns {
	pub short_code: usize,
	pub full_name: usize,
}

impl Default for IndexColumns {
	fn default() -> Self {
		Self {
			short_code: 1,
			full_name: 2,
		}
	}
}

/// Run configuration, usually read from `settings.json`.
///
/// Every field is optional in the file; missing ones take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	pub amc_name: String,
	pub index_sheet: String,
	pub header_scan_limit: usize,
	pub date_scan_rows: usize,
	/// Candidate columns for the weight field, tried in order.
	pub weight_columns: Vec<usize>,
	/// Month-day phrase that marks the reporting date, e.g. "December 31".
	pub reporting_date_marker: String,
	pub fallback_reporting_date: NaiveDate,
	pub index_columns: IndexColumns,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			amc_name: "Axis Mutual Fund".to_string(),
			index_sheet: "Index".to_string(),
			header_scan_limit: 20,
			date_scan_rows: 10,
			weight_columns: vec![6, 5, 7],
			reporting_date_marker: "December 31".to_string(),
			fallback_reporting_date: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap_or_default(),
			index_columns: IndexColumns::default(),
		}
	}
}
