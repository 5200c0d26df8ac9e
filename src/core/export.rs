//! CSV export of the personal ledger.

use crate::{core::ledger::Ledger, errors::Result};
use std::path::Path;

/// Header row of the exported CSV.
pub const CSV_HEADER: &str = "Type,Date,Title,Category/Source,Amount,Notes";

/// Renders the whole ledger as CSV text.
///
/// Expenses come first, then credits, each newest first. Dates are
/// `YYYY-MM-DD`, amounts have two decimal places, and fields containing a
/// comma, quote, or newline are quoted.
#[must_use]
pub fn export_csv(ledger: &Ledger) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');

    for expense in &ledger.expenses {
        push_row(
            &mut out,
            "Expense",
            &expense.date.format("%Y-%m-%d").to_string(),
            &expense.title,
            &expense.category,
            expense.amount,
            &expense.notes,
        );
    }
    for credit in &ledger.credits {
        push_row(
            &mut out,
            "Credit",
            &credit.date.format("%Y-%m-%d").to_string(),
            &credit.title,
            &credit.source,
            credit.amount,
            &credit.notes,
        );
    }

    out
}

/// Renders the ledger as CSV and writes it to `path`.
pub fn write_csv<P: AsRef<Path>>(ledger: &Ledger, path: P) -> Result<()> {
    std::fs::write(path, export_csv(ledger)).map_err(Into::into)
}

fn push_row(out: &mut String, kind: &str, date: &str, title: &str, group: &str, amount: f64, notes: &str) {
    out.push_str(&format!(
        "{},{},{},{},{:.2},{}\n",
        kind,
        date,
        escape_field(title),
        escape_field(group),
        amount,
        escape_field(notes)
    ));
}

/// Quotes a field when it contains a separator, doubling inner quotes.
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::{credit, expense};
    use chrono::{TimeZone, Utc};

    fn sample_ledger() -> Ledger {
        let newer = Utc.with_ymd_and_hms(2025, 6, 14, 18, 30, 0).unwrap();
        let older = Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap();
        Ledger {
            expenses: vec![
                expense::Model {
                    id: 2,
                    title: "Groceries, weekly".to_string(),
                    amount: 54.2,
                    category: "Food".to_string(),
                    date: newer,
                    notes: String::new(),
                },
                expense::Model {
                    id: 1,
                    title: "Train ticket".to_string(),
                    amount: 12.0,
                    category: "Travel".to_string(),
                    date: older,
                    notes: "off-peak".to_string(),
                },
            ],
            credits: vec![credit::Model {
                id: 1,
                title: "June salary".to_string(),
                amount: 2500.0,
                source: "Salary".to_string(),
                date: newer,
                notes: String::new(),
            }],
        }
    }

    #[test]
    fn test_export_csv_layout() {
        let csv = export_csv(&sample_ledger());
        let expected = "\
Type,Date,Title,Category/Source,Amount,Notes
Expense,2025-06-14,\"Groceries, weekly\",Food,54.20,
Expense,2025-06-02,Train ticket,Travel,12.00,off-peak
Credit,2025-06-14,June salary,Salary,2500.00,
";
        assert_eq!(csv, expected);
    }

    #[test]
    fn test_export_csv_empty_ledger() {
        let ledger = Ledger {
            expenses: vec![],
            credits: vec![],
        };
        assert_eq!(export_csv(&ledger), "Type,Date,Title,Category/Source,Amount,Notes\n");
    }

    #[test]
    fn test_escape_field_quotes_and_doubles() {
        assert_eq!(escape_field("plain"), "plain");
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field("line\nbreak"), "\"line\nbreak\"");
    }

    #[test]
    fn test_write_csv_creates_file() -> Result<()> {
        let dir = std::env::temp_dir();
        let path = dir.join("pocket_ledger_export_test.csv");
        write_csv(&sample_ledger(), &path)?;

        let written = std::fs::read_to_string(&path)?;
        assert!(written.starts_with(CSV_HEADER));
        assert!(written.contains("Train ticket"));

        std::fs::remove_file(&path)?;
        Ok(())
    }
}
