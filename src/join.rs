//! Joining orders to their validated barcodes.

use crate::record::{BarcodeRecord, OrderRecord};
use std::collections::HashMap;

/// One order/barcode pair out of the join. An order with several barcodes
/// produces several rows sharing the same (customer_id, order_id) key; the
/// aggregator collapses them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinedRow {
    pub customer_id: u64,
    pub order_id: u64,
    pub barcode: u64,
}

/// An order removed from the result because no validated barcode matched it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DroppedOrder {
    pub customer_id: u64,
    pub order_id: u64,
}

/// Left-joins orders against the validated barcode set on order id.
///
/// Orders are walked in input order. Each order with at least one barcode
/// yields one [`JoinedRow`] per barcode, keeping the barcodes' encounter
/// order within the validated set; orders with none are returned as
/// [`DroppedOrder`] violations for the caller to report. When nothing is
/// dropped the rows cover the orders in exactly the input order.
///
/// Barcodes without an order id never match and are simply not consumed
/// here.
pub fn join_orders(
    orders: &[OrderRecord],
    validated: &[BarcodeRecord],
) -> (Vec<JoinedRow>, Vec<DroppedOrder>) {
    let mut barcodes_by_order: HashMap<u64, Vec<u64>> = HashMap::new();
    for record in validated {
        if let Some(order_id) = record.order_id {
            barcodes_by_order
                .entry(order_id)
                .or_default()
                .push(record.barcode);
        }
    }

    let mut rows = Vec::new();
    let mut dropped = Vec::new();
    for order in orders {
        match barcodes_by_order.get(&order.order_id) {
            Some(barcodes) => rows.extend(barcodes.iter().map(|&barcode| JoinedRow {
                customer_id: order.customer_id,
                order_id: order.order_id,
                barcode,
            })),
            None => dropped.push(DroppedOrder {
                customer_id: order.customer_id,
                order_id: order.order_id,
            }),
        }
    }

    (rows, dropped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn barcode(barcode: u64, order_id: Option<u64>) -> BarcodeRecord {
        BarcodeRecord { barcode, order_id }
    }

    fn order(order_id: u64, customer_id: u64) -> OrderRecord {
        OrderRecord {
            order_id,
            customer_id,
        }
    }

    #[test]
    fn test_join_fans_out_one_row_per_barcode() {
        let orders = vec![order(193, 4)];
        let validated = vec![
            barcode(11111111380, Some(193)),
            barcode(11111111297, Some(193)),
        ];

        let (rows, dropped) = join_orders(&orders, &validated);
        assert!(dropped.is_empty());
        assert_eq!(
            rows,
            vec![
                JoinedRow {
                    customer_id: 4,
                    order_id: 193,
                    barcode: 11111111380,
                },
                JoinedRow {
                    customer_id: 4,
                    order_id: 193,
                    barcode: 11111111297,
                },
            ]
        );
    }

    #[test]
    fn test_order_without_barcode_is_dropped_and_returned() {
        let orders = vec![order(12, 99)];
        let validated = vec![];

        let (rows, dropped) = join_orders(&orders, &validated);
        assert!(rows.is_empty());
        assert_eq!(
            dropped,
            vec![DroppedOrder {
                customer_id: 99,
                order_id: 12,
            }]
        );
    }

    #[test]
    fn test_no_dropped_orders_preserves_input_order() {
        let orders = vec![order(203, 4), order(193, 4)];
        let validated = vec![barcode(1, Some(193)), barcode(2, Some(203))];

        let (rows, dropped) = join_orders(&orders, &validated);
        assert!(dropped.is_empty());
        let keys: Vec<u64> = rows.iter().map(|r| r.order_id).collect();
        assert_eq!(keys, vec![203, 193]);
    }

    #[test]
    fn test_unassigned_barcodes_never_join() {
        let orders = vec![order(193, 4)];
        let validated = vec![barcode(1, None), barcode(2, Some(193))];

        let (rows, _) = join_orders(&orders, &validated);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].barcode, 2);
    }
}
