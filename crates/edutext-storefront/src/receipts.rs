//! Projects stored orders into printable receipts.

use chrono::DateTime;
use tracing::warn;

use edutext_api::OrderRecord;
use edutext_commerce::{Receipt, ReceiptLine};

/// Formats an RFC 3339 timestamp the way the receipt prints dates,
/// `dd/mm/yyyy`. An unparseable timestamp is shown as sent.
fn receipt_date(created_at: &str) -> String {
    match DateTime::parse_from_rfc3339(created_at) {
        Ok(timestamp) => timestamp.format("%d/%m/%Y").to_string(),
        Err(_) => created_at.to_string(),
    }
}

/// Builds the receipt for a fetched order.
///
/// Line totals are recomputed from unit price and quantity; the recorded
/// grand total is kept as-is and a mismatch is logged rather than patched.
pub fn receipt_from_record(record: OrderRecord) -> Receipt {
    let lines: Vec<ReceiptLine> = record
        .items
        .into_iter()
        .map(|item| ReceiptLine::new(item.title, item.quantity, item.unit_price))
        .collect();
    let receipt = Receipt {
        reference: record.reference,
        order_id: record.id,
        date: receipt_date(&record.created_at),
        student_name: record.student_name,
        matric_number: record.matric_number,
        department: record.department,
        level: record.level,
        lines,
        total: record.total_amount,
    };
    if receipt.lines_total() != receipt.total {
        warn!(
            reference = %receipt.reference,
            recorded = %receipt.total,
            recomputed = %receipt.lines_total(),
            "receipt line totals differ from recorded total"
        );
    }
    receipt
}
