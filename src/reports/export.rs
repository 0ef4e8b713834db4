//! CSV export of registers and summaries

use std::io::Write;

use crate::error::LedgerResult;
use crate::services::aggregation::MonthlySummary;

use super::register::{DepositRow, ExpenseRow, DEPOSIT_COLUMNS, EXPENSE_COLUMNS};

/// Write the deposit register as CSV
pub fn write_deposit_register_csv<W: Write>(writer: W, rows: &[DepositRow]) -> LedgerResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(DEPOSIT_COLUMNS)?;
    for row in rows {
        csv_writer.write_record(row.cells())?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the expense register as CSV
pub fn write_expense_register_csv<W: Write>(writer: W, rows: &[ExpenseRow]) -> LedgerResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(EXPENSE_COLUMNS)?;
    for row in rows {
        csv_writer.write_record(row.cells())?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write a monthly summary as a CSV grid
///
/// One row per period, one column per payment method, a Total column, and a
/// final Grand Total row summing each column.
pub fn write_summary_csv<W: Write>(writer: W, summary: &MonthlySummary) -> LedgerResult<()> {
    let methods = summary.methods();

    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = vec!["Period".to_string()];
    header.extend(methods.iter().cloned());
    header.push("Total".to_string());
    csv_writer.write_record(&header)?;

    let mut grand: Vec<f64> = vec![0.0; methods.len() + 1];
    for (period, totals) in &summary.periods {
        let mut record = vec![period.label()];
        for (i, method) in methods.iter().enumerate() {
            let amount = totals.by_method.get(method).copied().unwrap_or(0.0);
            grand[i] += amount;
            record.push(format_amount(amount));
        }
        grand[methods.len()] += totals.total();
        record.push(format_amount(totals.total()));
        csv_writer.write_record(&record)?;
    }

    let mut footer = vec!["Grand Total".to_string()];
    footer.extend(grand.iter().map(|a| format_amount(*a)));
    csv_writer.write_record(&footer)?;

    csv_writer.flush()?;
    Ok(())
}

fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{}", amount as i64)
    } else {
        format!("{:.2}", amount)
    }
}
