pub mod export;
pub mod summary;
pub mod validation;

// Re-export commonly used items
pub use crate::export::{
    export_holdings, file_stamp, read_holdings_csv, write_holdings_csv, ExportedFiles,
};
pub use crate::summary::{ConsolidationSummary, TypeSummary};
pub use crate::validation::{insights, quality_report, Insights, QualityReport};
