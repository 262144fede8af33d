//! Input row models and CSV loaders.

use crate::error::{PipelineError, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use std::io::Read;

/// A single ticket barcode as read from `barcodes.csv`.
///
/// Barcodes are expected to be globally unique; duplicates are resolved by
/// the deduplicator. `order_id` is absent for barcodes that were never
/// attached to a purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BarcodeRecord {
    /// Ticket identifier
    pub barcode: u64,

    /// Order this barcode was sold under, if any
    pub order_id: Option<u64>,
}

/// A purchase order as read from `orders.csv`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct OrderRecord {
    /// Order identifier (unique per the source contract)
    pub order_id: u64,

    /// Customer that placed the order
    pub customer_id: u64,
}

/// The loaded barcode table, in file order.
///
/// `column_had_nulls` records whether any raw `order_id` field was empty.
/// The unused-barcode reporter uses it to tell "the column carries no null
/// concept" apart from "nulls are possible but none survived".
#[derive(Debug, Clone, Default)]
pub struct BarcodeTable {
    pub records: Vec<BarcodeRecord>,
    pub column_had_nulls: bool,
}

fn check_columns(headers: &StringRecord, table: &str, required: &[&str]) -> Result<()> {
    for column in required {
        if !headers.iter().any(|header| header == *column) {
            return Err(PipelineError::MissingColumn {
                table: table.to_string(),
                column: column.to_string(),
            });
        }
    }
    Ok(())
}

/// Loads the barcode table.
///
/// Requires `barcode` and `order_id` columns; extra columns are ignored.
/// Any I/O, parse or missing-column failure is fatal and propagates to the
/// caller, so a bad input never produces partial results.
pub fn load_barcodes<R: Read>(reader: R) -> Result<BarcodeTable> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    check_columns(csv_reader.headers()?, "barcode", &["barcode", "order_id"])?;

    let mut records = Vec::new();
    let mut column_had_nulls = false;
    for result in csv_reader.deserialize::<BarcodeRecord>() {
        let record = result?;
        column_had_nulls |= record.order_id.is_none();
        records.push(record);
    }

    Ok(BarcodeTable {
        records,
        column_had_nulls,
    })
}

/// Loads the order table. Requires `order_id` and `customer_id` columns.
pub fn load_orders<R: Read>(reader: R) -> Result<Vec<OrderRecord>> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    check_columns(csv_reader.headers()?, "order", &["order_id", "customer_id"])?;

    let mut records = Vec::new();
    for result in csv_reader.deserialize::<OrderRecord>() {
        records.push(result?);
    }

    Ok(records)
}
