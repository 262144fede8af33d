//! Barcode deduplication.
//!
//! Barcodes identify physical tickets and must be unique. When the same
//! barcode value appears on more than one record, exactly one record
//! survives; the [`TieBreak`] policy decides which.

use crate::record::BarcodeRecord;
use std::collections::{HashMap, HashSet};

/// Rule selecting which record survives when a barcode value is duplicated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// Keep a record that has an order id, if any of the duplicates does.
    #[default]
    PreferAssigned,

    /// Keep a record without an order id, if any of the duplicates lacks one.
    PreferUnassigned,
}

/// Removes duplicate barcode records under the given tie-break policy.
///
/// Returns the validated set (one record per distinct barcode value) along
/// with the distinct duplicated barcode values in first-encounter order.
/// The caller decides how to report the violations; this function only
/// transforms.
///
/// When no value is duplicated the input comes back untouched, so a clean
/// table keeps its file order. Otherwise the records are stable-sorted by
/// order-id presence and the first occurrence per barcode value is kept;
/// stability preserves the relative order of records sharing an order id,
/// which the final per-order barcode sequences rely on.
///
/// A unique barcode without an order id is not a duplicate and survives
/// here; the unused-barcode reporter accounts for it separately.
pub fn deduplicate(records: Vec<BarcodeRecord>, policy: TieBreak) -> (Vec<BarcodeRecord>, Vec<u64>) {
    let mut occurrences: HashMap<u64, usize> = HashMap::new();
    for record in &records {
        *occurrences.entry(record.barcode).or_default() += 1;
    }

    let mut duplicates = Vec::new();
    let mut reported = HashSet::new();
    for record in &records {
        if occurrences[&record.barcode] > 1 && reported.insert(record.barcode) {
            duplicates.push(record.barcode);
        }
    }

    if duplicates.is_empty() {
        return (records, duplicates);
    }

    let mut sorted = records;
    sorted.sort_by_key(|record| match policy {
        TieBreak::PreferAssigned => record.order_id.is_none(),
        TieBreak::PreferUnassigned => record.order_id.is_some(),
    });

    let mut seen = HashSet::new();
    sorted.retain(|record| seen.insert(record.barcode));

    (sorted, duplicates)
}
