use anyhow::{Context, Result};
use calamine::open_workbook_auto;
use monthly_portfolio::cell::cell_str;
use monthly_portfolio::header::{locate_header, DEFAULT_HEADER_SCAN_LIMIT};
use monthly_portfolio::reporting_date::{find_reporting_date, DEFAULT_DATE_SCAN_ROWS};
use monthly_portfolio::{RawSheet, WorkbookSource};
use std::env;

const INDEX_SHEET: &str = "Index";
const SAMPLE_SHEETS: usize = 3;

fn main() -> Result<()> {
    let xlsx_path = env::args()
        .nth(1)
        .unwrap_or_else(|| "Monthly Portfolio-31 12 25.xlsx".to_string());

    let mut workbook =
        open_workbook_auto(&xlsx_path).with_context(|| format!("Cannot open {}", xlsx_path))?;

    let sheet_names = WorkbookSource::sheet_names(&workbook);
    println!("Sheets ({}):", sheet_names.len());
    for (i, name) in sheet_names.iter().enumerate() {
        println!("  {}. {}", i + 1, name);
    }

    println!("\n== {} ==", INDEX_SHEET);
    match workbook.read_sheet(INDEX_SHEET) {
        Ok(sheet) => print_sheet(&sheet, 15),
        Err(e) => println!("  (cannot read: {e})"),
    }

    let scheme_sheets = sheet_names
        .iter()
        .filter(|n| !n.eq_ignore_ascii_case(INDEX_SHEET))
        .take(SAMPLE_SHEETS);

    for sheet_name in scheme_sheets {
        println!("\n== {} ==", sheet_name);

        let sheet = match workbook.read_sheet(sheet_name) {
            Ok(s) => s,
            Err(e) => {
                println!("  (cannot read: {e})");
                continue;
            }
        };

        print_sheet(&sheet, 20);

        match locate_header(&sheet, DEFAULT_HEADER_SCAN_LIMIT) {
            Some(row) => println!("  header row: {}", row + 1),
            None => println!(
                "  header row: (none within first {} rows)",
                DEFAULT_HEADER_SCAN_LIMIT
            ),
        }
        match find_reporting_date(&sheet, DEFAULT_DATE_SCAN_ROWS, "December 31") {
            Some(date) => println!("  reporting date: {}", date),
            None => println!("  reporting date: (not found)"),
        }
    }

    Ok(())
}

/// Prints size and the first non-empty `limit` rows, up to 12 columns each.
fn print_sheet(sheet: &RawSheet, limit: usize) {
    println!("  size: rows={}, cols={}", sheet.height(), sheet.width());

    let mut printed = 0usize;
    for (r_idx, row) in sheet.rows().iter().enumerate() {
        if printed >= limit {
            break;
        }

        let mut cells: Vec<String> = row
            .iter()
            .take(12)
            .map(|c| cell_str(Some(c)).unwrap_or_default())
            .map(|s| s.trim().to_string())
            .collect();

        if cells.iter().all(|s| s.is_empty()) {
            continue;
        }

        // Trim trailing empties for readability
        while matches!(cells.last(), Some(s) if s.is_empty()) {
            cells.pop();
        }

        println!("  row {:>4}: {}", r_idx + 1, cells.join(" | "));
        printed += 1;
    }
}
