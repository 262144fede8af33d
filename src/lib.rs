//! # Barcode Mapper
//!
//! Joins a CSV of ticket barcodes with a CSV of purchase orders into a
//! per-customer, per-order mapping of barcodes, so we can see how many
//! individual tickets a customer holds across order ids.
//!
//! ## Design Principles
//!
//! - **Pure stages**: deduplication and the join return (clean data,
//!   violations) pairs instead of logging as they filter
//! - **Injected diagnostics**: findings flow through a [`DiagnosticsSink`],
//!   so tests assert on events rather than captured console output
//! - **Deterministic output**: groups are ordered ascending by
//!   (customer_id, order_id) and the file is written atomically
//!
//! ## Example
//!
//! ```no_run
//! use barcode_mapper::{MappingPipeline, MemorySink, PipelineConfig};
//! use std::io::Cursor;
//!
//! let barcodes = "barcode,order_id\n11111111380,193\n";
//! let orders = "order_id,customer_id\n193,4\n";
//!
//! let mut pipeline = MappingPipeline::new(PipelineConfig::default(), MemorySink::new());
//! let mapping = pipeline.run(Cursor::new(barcodes), Cursor::new(orders)).unwrap();
//! mapping.write_csv(std::io::stdout()).unwrap();
//! ```

pub mod dedup;
pub mod error;
pub mod join;
pub mod mapping;
pub mod pipeline;
pub mod record;
pub mod report;

pub use dedup::{deduplicate, TieBreak};
pub use error::{PipelineError, Result};
pub use join::{join_orders, DroppedOrder, JoinedRow};
pub use mapping::{aggregate, CustomerTicketCount, CustomerTicketMapping};
pub use pipeline::{MappingPipeline, PipelineConfig};
pub use record::{load_barcodes, load_orders, BarcodeRecord, BarcodeTable, OrderRecord};
pub use report::{
    unused_barcodes, DiagnosticEvent, DiagnosticsSink, LogSink, MemorySink, UnusedBarcodeReport,
};
