use crate::domain::transaction::Transaction;
use crate::error::Result;
use std::io::Write;

/// Writes the order history as CSV rows.
///
/// Columns: `id,amount,contact,timestamp,items,status`.
pub struct OrderWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> OrderWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    /// Writes `transactions` in the order given and flushes.
    ///
    /// The header is written even when there are no transactions.
    pub fn write_orders(&mut self, transactions: impl IntoIterator<Item = Transaction>) -> Result<()> {
        let mut wrote_any = false;
        for tx in transactions {
            self.writer.serialize(tx)?;
            wrote_any = true;
        }
        if !wrote_any {
            self.writer
                .write_record(["id", "amount", "contact", "timestamp", "items", "status"])?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes the order history as a pretty-printed JSON array.
pub fn write_orders_json<W: Write>(sink: W, transactions: &[Transaction]) -> Result<()> {
    serde_json::to_writer_pretty(sink, transactions)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::Amount;
    use crate::domain::payment::ContactId;
    use crate::domain::transaction::{TransactionIdGenerator, TransactionStatus};
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn transaction() -> Transaction {
        let at = Utc.timestamp_millis_opt(1_700_000_123_456).unwrap();
        Transaction {
            id: TransactionIdGenerator::new().next_id(at),
            amount: Amount::new(dec!(3500)).unwrap(),
            contact: ContactId::parse("0712345678", 10).unwrap(),
            timestamp: at,
            items: 1,
            status: TransactionStatus::Completed,
        }
    }

    #[test]
    fn test_write_orders_csv() {
        let mut out = Vec::new();
        OrderWriter::new(&mut out)
            .write_orders(vec![transaction()])
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("id,amount,contact,timestamp,items,status")
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("MPX00123456,3500,0712345678,2023-11-14T22:15:23"));
        assert!(row.ends_with(",1,completed"));
    }

    #[test]
    fn test_write_empty_history_has_header() {
        let mut out = Vec::new();
        OrderWriter::new(&mut out).write_orders(Vec::new()).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.trim(), "id,amount,contact,timestamp,items,status");
    }

    #[test]
    fn test_write_orders_json() {
        let mut out = Vec::new();
        write_orders_json(&mut out, &[transaction()]).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["id"], "MPX00123456");
        assert_eq!(value[0]["status"], "completed");
        assert_eq!(value[0]["items"], 1);
    }
}
