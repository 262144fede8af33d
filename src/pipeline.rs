//! Pipeline orchestration.
//!
//! Sequences load, deduplication, the join and aggregation over the two
//! input tables, recording every data-quality finding through the injected
//! diagnostics sink. All stages are pure transformations; the sink is the
//! only side channel.

use crate::dedup::{deduplicate, TieBreak};
use crate::error::Result;
use crate::join::join_orders;
use crate::mapping::{aggregate, CustomerTicketMapping};
use crate::record::{load_barcodes, load_orders};
use crate::report::{unused_barcodes, DiagnosticEvent, DiagnosticsSink};
use std::io::Read;

/// Pipeline configuration, mirroring the CLI surface.
#[derive(Debug, Clone, Copy)]
pub struct PipelineConfig {
    /// Which duplicate barcode record survives deduplication.
    pub tie_break: TieBreak,

    /// How many customers the ticket-count ranking reports.
    pub top_customers: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            tie_break: TieBreak::default(),
            top_customers: 5,
        }
    }
}

/// The barcode mapping pipeline.
///
/// One batch pass, single-threaded: reads both tables fully into memory,
/// resolves duplicate barcodes, drops orders without any barcode and
/// groups the rest per (customer_id, order_id).
pub struct MappingPipeline<S> {
    config: PipelineConfig,
    sink: S,
}

impl<S: DiagnosticsSink> MappingPipeline<S> {
    pub fn new(config: PipelineConfig, sink: S) -> Self {
        MappingPipeline { config, sink }
    }

    /// Runs the pipeline over the two CSV sources.
    ///
    /// Load failures abort with an error; duplicate barcodes and orders
    /// without barcodes are resolved and reported, never fatal. The result
    /// is deterministic for a fixed input snapshot, so rerunning yields an
    /// identical mapping.
    pub fn run<B: Read, O: Read>(&mut self, barcodes: B, orders: O) -> Result<CustomerTicketMapping> {
        let table = load_barcodes(barcodes)?;
        let column_had_nulls = table.column_had_nulls;

        let (validated, duplicates) = deduplicate(table.records, self.config.tie_break);
        for barcode in duplicates {
            self.sink
                .record(DiagnosticEvent::DuplicateBarcode { barcode });
        }

        self.sink.record(DiagnosticEvent::UnusedBarcodes(
            unused_barcodes(&validated, column_had_nulls),
        ));

        let orders = load_orders(orders)?;
        let (rows, dropped) = join_orders(&orders, &validated);
        for order in dropped {
            self.sink.record(DiagnosticEvent::OrderWithoutBarcode {
                customer_id: order.customer_id,
                order_id: order.order_id,
            });
        }

        let mapping = aggregate(&rows);
        self.sink.record(DiagnosticEvent::TopCustomers(
            mapping.top_customers(self.config.top_customers),
        ));

        Ok(mapping)
    }

    /// Hands the sink back, so callers can inspect recorded events.
    pub fn into_sink(self) -> S {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{MemorySink, UnusedBarcodeReport};
    use std::io::Cursor;

    fn run(barcodes: &str, orders: &str, config: PipelineConfig) -> (CustomerTicketMapping, Vec<DiagnosticEvent>) {
        let mut pipeline = MappingPipeline::new(config, MemorySink::new());
        let mapping = pipeline
            .run(Cursor::new(barcodes), Cursor::new(orders))
            .unwrap();
        (mapping, pipeline.into_sink().into_events())
    }

    #[test]
    fn test_three_barcodes_one_order() {
        let barcodes = "barcode,order_id\n11111111380,193\n11111111297,193\n11111111614,193\n";
        let orders = "order_id,customer_id\n193,4\n";

        let (mapping, _) = run(barcodes, orders, PipelineConfig::default());
        assert_eq!(mapping.len(), 1);
        assert_eq!(
            mapping.barcodes(4, 193),
            Some(&[11111111380, 11111111297, 11111111614][..])
        );
    }

    #[test]
    fn test_events_cover_all_findings() {
        let barcodes = "barcode,order_id\n11111111111,193\n11111111111,\n11111111222,\n";
        let orders = "order_id,customer_id\n193,4\n12,99\n";

        let (mapping, events) = run(barcodes, orders, PipelineConfig::default());
        assert_eq!(mapping.len(), 1);
        assert_eq!(
            events,
            vec![
                DiagnosticEvent::DuplicateBarcode {
                    barcode: 11111111111,
                },
                DiagnosticEvent::UnusedBarcodes(UnusedBarcodeReport::Found {
                    barcodes: vec![11111111222],
                }),
                DiagnosticEvent::OrderWithoutBarcode {
                    customer_id: 99,
                    order_id: 12,
                },
                DiagnosticEvent::TopCustomers(vec![crate::mapping::CustomerTicketCount {
                    customer_id: 4,
                    tickets: 1,
                }]),
            ]
        );
    }

    #[test]
    fn test_load_failure_is_fatal() {
        let barcodes = "barcode\n11111111380\n";
        let orders = "order_id,customer_id\n193,4\n";

        let mut pipeline = MappingPipeline::new(PipelineConfig::default(), MemorySink::new());
        assert!(pipeline
            .run(Cursor::new(barcodes), Cursor::new(orders))
            .is_err());
    }
}
