//! Diagnostics channel.
//!
//! Every data-quality finding flows through a [`DiagnosticsSink`] injected
//! into the pipeline, so tests can assert on the emitted events instead of
//! capturing console output. None of the events alter the computed output.

use crate::mapping::CustomerTicketCount;
use crate::record::BarcodeRecord;
use log::{debug, info, warn};

/// Outcome of the unused-barcode check.
///
/// One type with an explicit variant per reason, so the three cases stay
/// distinguishable; all of them are non-fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnusedBarcodeReport {
    /// Validated records without an order id.
    Found { barcodes: Vec<u64> },

    /// The order-id column never held an empty field, so an unassigned
    /// barcode is not even representable in this input.
    ColumnNotNullable,

    /// Empty order ids existed in the raw input, but none survived
    /// deduplication.
    NoneFound,
}

/// Counts barcodes left without an order id after deduplication.
///
/// Pure diagnostic; never mutates the data and never fails.
pub fn unused_barcodes(
    validated: &[BarcodeRecord],
    column_had_nulls: bool,
) -> UnusedBarcodeReport {
    let barcodes: Vec<u64> = validated
        .iter()
        .filter(|record| record.order_id.is_none())
        .map(|record| record.barcode)
        .collect();

    if !barcodes.is_empty() {
        UnusedBarcodeReport::Found { barcodes }
    } else if !column_had_nulls {
        UnusedBarcodeReport::ColumnNotNullable
    } else {
        UnusedBarcodeReport::NoneFound
    }
}

/// A single observational finding emitted by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticEvent {
    /// A barcode value appeared on more than one record; one event per
    /// distinct value.
    DuplicateBarcode { barcode: u64 },

    /// Outcome of the unused-barcode check.
    UnusedBarcodes(UnusedBarcodeReport),

    /// An order had no barcode in the validated set and was dropped.
    OrderWithoutBarcode { customer_id: u64, order_id: u64 },

    /// Customers ranked by total tickets bought, best first.
    TopCustomers(Vec<CustomerTicketCount>),
}

/// Receiver for diagnostic events.
pub trait DiagnosticsSink {
    fn record(&mut self, event: DiagnosticEvent);
}

/// Sink that forwards events to the `log` crate.
///
/// Data anomalies go to warn, observational reports to info; verbosity is
/// controlled through `RUST_LOG` as usual.
pub struct LogSink;

impl DiagnosticsSink for LogSink {
    fn record(&mut self, event: DiagnosticEvent) {
        match event {
            DiagnosticEvent::DuplicateBarcode { barcode } => {
                warn!("Duplicate barcode: {}", barcode);
            }
            DiagnosticEvent::UnusedBarcodes(report) => match report {
                UnusedBarcodeReport::Found { barcodes } => {
                    info!("Amount of unused barcodes: {}", barcodes.len());
                    for barcode in barcodes {
                        debug!("Unused barcode: {}", barcode);
                    }
                }
                UnusedBarcodeReport::ColumnNotNullable => {
                    debug!("Order id column holds no empty values; no unused barcodes possible");
                }
                UnusedBarcodeReport::NoneFound => {
                    info!("Amount of unused barcodes: 0");
                }
            },
            DiagnosticEvent::OrderWithoutBarcode {
                customer_id,
                order_id,
            } => {
                warn!(
                    "Order without barcodes dropped: customer id {}, order id {}",
                    customer_id, order_id
                );
            }
            DiagnosticEvent::TopCustomers(ranking) => {
                info!("Top {} customers with most tickets bought:", ranking.len());
                for entry in ranking {
                    info!(
                        "Customer id: {}, amount of tickets: {}",
                        entry.customer_id, entry.tickets
                    );
                }
            }
        }
    }
}

/// Sink that accumulates events in memory, for tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Vec<DiagnosticEvent>,
}

impl MemorySink {
    pub fn new() -> Self {
        MemorySink::default()
    }

    pub fn events(&self) -> &[DiagnosticEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<DiagnosticEvent> {
        self.events
    }
}

impl DiagnosticsSink for MemorySink {
    fn record(&mut self, event: DiagnosticEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(barcode: u64, order_id: Option<u64>) -> BarcodeRecord {
        BarcodeRecord { barcode, order_id }
    }

    #[test]
    fn test_unused_barcodes_found() {
        let validated = vec![rec(1, Some(10)), rec(2, None), rec(3, None)];

        let report = unused_barcodes(&validated, true);
        assert_eq!(
            report,
            UnusedBarcodeReport::Found {
                barcodes: vec![2, 3],
            }
        );
    }

    #[test]
    fn test_unused_barcodes_column_not_nullable() {
        let validated = vec![rec(1, Some(10)), rec(2, Some(11))];

        let report = unused_barcodes(&validated, false);
        assert_eq!(report, UnusedBarcodeReport::ColumnNotNullable);
    }

    #[test]
    fn test_unused_barcodes_none_left_after_dedup() {
        // The raw table held empty order ids but deduplication removed them.
        let validated = vec![rec(1, Some(10))];

        let report = unused_barcodes(&validated, true);
        assert_eq!(report, UnusedBarcodeReport::NoneFound);
    }

    #[test]
    fn test_memory_sink_keeps_event_order() {
        let mut sink = MemorySink::new();
        sink.record(DiagnosticEvent::DuplicateBarcode { barcode: 5 });
        sink.record(DiagnosticEvent::OrderWithoutBarcode {
            customer_id: 99,
            order_id: 12,
        });

        assert_eq!(
            sink.events(),
            &[
                DiagnosticEvent::DuplicateBarcode { barcode: 5 },
                DiagnosticEvent::OrderWithoutBarcode {
                    customer_id: 99,
                    order_id: 12,
                },
            ]
        );
    }
}
