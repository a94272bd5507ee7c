//! Cell coercion: raw `calamine::Data` to typed values.
//!
//! Nothing here fails. A cell that cannot be read as the requested type is
//! reported as `None` and the row-level rules decide what that means.

use calamine::Data;

/// Text values that stand for "no data" in exported sheets.
const NULL_MARKERS: [&str; 4] = ["nan", "NaN", "None", "NULL"];

/// Display text of a cell, `None` for empty cells.
pub fn cell_str(cell: Option<&Data>) -> Option<String> {
    let c = cell?;
    match c {
        Data::String(s) => Some(s.clone()),
        Data::Float(f) => Some(f.to_string()),
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        Data::Empty => None,
        _ => Some(c.to_string()),
    }
}

/// Trimmed text of a cell, or `None` for empty, blank and null-marker cells.
pub fn coerce_text(cell: Option<&Data>) -> Option<String> {
    let text = cell_str(cell)?;
    let text = text.trim();
    if text.is_empty() || NULL_MARKERS.contains(&text) {
        return None;
    }
    Some(text.to_string())
}

/// Numeric value of a cell.
///
/// Numbers pass through. Text is parsed after trimming, dropping thousands
/// separators and a trailing `%`. Dates, booleans, errors and non-finite
/// values are `None`.
pub fn coerce_number(cell: Option<&Data>) -> Option<f64> {
    let value = match cell? {
        Data::Float(f) => *f,
        Data::Int(i) => *i as f64,
        Data::String(s) => parse_number_text(s)?,
        _ => return None,
    };
    value.is_finite().then_some(value)
}

fn parse_number_text(s: &str) -> Option<f64> {
    let cleaned = s.trim().trim_end_matches('%').trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

/// Non-empty cell texts of a row joined by single spaces.
pub fn row_text(row: &[Data]) -> String {
    row.iter()
        .filter_map(|c| cell_str(Some(c)))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Data {
        Data::String(s.to_string())
    }

    #[test]
    fn test_coerce_number_from_numeric_cells() {
        assert_eq!(coerce_number(Some(&Data::Float(3.25))), Some(3.25));
        assert_eq!(coerce_number(Some(&Data::Int(4))), Some(4.0));
    }

    #[test]
    fn test_coerce_number_from_text() {
        assert_eq!(coerce_number(Some(&text(" 3.25 "))), Some(3.25));
        assert_eq!(coerce_number(Some(&text("1,234.5"))), Some(1234.5));
        assert_eq!(coerce_number(Some(&text("12.5%"))), Some(12.5));
        assert_eq!(coerce_number(Some(&text("-0.01"))), Some(-0.01));
    }

    #[test]
    fn test_coerce_number_absent_on_failure() {
        assert_eq!(coerce_number(None), None);
        assert_eq!(coerce_number(Some(&Data::Empty)), None);
        assert_eq!(coerce_number(Some(&text("Equity"))), None);
        assert_eq!(coerce_number(Some(&text("   "))), None);
        assert_eq!(coerce_number(Some(&Data::Bool(true))), None);
        assert_eq!(coerce_number(Some(&Data::Float(f64::NAN))), None);
        assert_eq!(coerce_number(Some(&text("NaN"))), None);
    }

    #[test]
    fn test_coerce_text() {
        assert_eq!(coerce_text(Some(&text("  Acme Corp "))), Some("Acme Corp".to_string()));
        assert_eq!(coerce_text(Some(&Data::Int(500034))), Some("500034".to_string()));
        assert_eq!(coerce_text(Some(&text(""))), None);
        assert_eq!(coerce_text(Some(&text("   "))), None);
        assert_eq!(coerce_text(Some(&text("nan"))), None);
        assert_eq!(coerce_text(Some(&Data::Empty)), None);
        assert_eq!(coerce_text(None), None);
    }

    #[test]
    fn test_row_text_skips_empty_cells() {
        let row = vec![Data::Empty, text("Equity & Equity related"), Data::Empty, Data::Float(1.5)];
        assert_eq!(row_text(&row), "Equity & Equity related 1.5");
    }
}
