//! Final per-customer, per-order barcode mapping and its CSV writer.

use crate::error::{PipelineError, Result};
use crate::join::JoinedRow;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Total tickets bought by one customer, for the top-customer report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomerTicketCount {
    pub customer_id: u64,
    pub tickets: usize,
}

/// Mapping from (customer_id, order_id) to the order's barcodes.
///
/// # Invariants
///
/// - Every entry holds at least one barcode; orders without barcodes are
///   dropped by the join and never get here.
/// - Iteration is ascending by customer id, then order id, so serialized
///   output is deterministic regardless of input order.
/// - Within an entry, barcodes keep the order they were encountered in for
///   that order id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerTicketMapping {
    groups: BTreeMap<(u64, u64), Vec<u64>>,
}

/// Groups joined rows by (customer_id, order_id), collecting each group's
/// barcodes in row order.
pub fn aggregate(rows: &[JoinedRow]) -> CustomerTicketMapping {
    let mut groups: BTreeMap<(u64, u64), Vec<u64>> = BTreeMap::new();
    for row in rows {
        groups
            .entry((row.customer_id, row.order_id))
            .or_default()
            .push(row.barcode);
    }
    CustomerTicketMapping { groups }
}

impl CustomerTicketMapping {
    /// Number of (customer_id, order_id) groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterates groups in ascending (customer_id, order_id) order.
    pub fn iter(&self) -> impl Iterator<Item = (&(u64, u64), &Vec<u64>)> {
        self.groups.iter()
    }

    /// Barcodes for one group, if present.
    pub fn barcodes(&self, customer_id: u64, order_id: u64) -> Option<&[u64]> {
        self.groups
            .get(&(customer_id, order_id))
            .map(Vec::as_slice)
    }

    /// Ranks customers by total tickets across all their orders, descending,
    /// and returns the first `n`. Ties break on ascending customer id so
    /// reruns always report the same ranking.
    pub fn top_customers(&self, n: usize) -> Vec<CustomerTicketCount> {
        let mut totals: BTreeMap<u64, usize> = BTreeMap::new();
        for ((customer_id, _), barcodes) in &self.groups {
            *totals.entry(*customer_id).or_default() += barcodes.len();
        }

        let mut ranking: Vec<CustomerTicketCount> = totals
            .into_iter()
            .map(|(customer_id, tickets)| CustomerTicketCount {
                customer_id,
                tickets,
            })
            .collect();
        ranking.sort_by(|a, b| {
            b.tickets
                .cmp(&a.tickets)
                .then(a.customer_id.cmp(&b.customer_id))
        });
        ranking.truncate(n);
        ranking
    }

    /// Serializes the mapping as CSV.
    ///
    /// One row per group, barcodes rendered as a JSON-style array literal:
    ///
    /// ```text
    /// customer_id,order_id,barcodes
    /// 4,193,"[11111111380, 11111111297, 11111111614]"
    /// ```
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["customer_id", "order_id", "barcodes"])?;
        for ((customer_id, order_id), barcodes) in &self.groups {
            csv_writer.write_record([
                customer_id.to_string(),
                order_id.to_string(),
                render_barcode_list(barcodes),
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Writes the mapping to `path` atomically.
    ///
    /// Serializes into a temporary file in the destination directory, then
    /// renames it onto the final path, so a failed run leaves no partial
    /// output file behind.
    pub fn write_csv_atomic(&self, path: &Path) -> Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir)?;
        self.write_csv(tmp.as_file_mut())?;
        tmp.persist(path).map_err(|e| PipelineError::Io(e.error))?;
        Ok(())
    }
}

fn render_barcode_list(barcodes: &[u64]) -> String {
    let rendered: Vec<String> = barcodes.iter().map(u64::to_string).collect();
    format!("[{}]", rendered.join(", "))
}
