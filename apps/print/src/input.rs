//! # Input Loading
//!
//! Work orders arrive either as a single object or as the backend's list
//! response (`{"work_orders": [...]}`); payments as a bare array or
//! `{"payments": [...]}`.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use serde::Deserialize;
use smartline_core::validation::validate_payment_amount;
use smartline_core::{Payment, WorkOrder};
use tracing::debug;

use crate::error::{PrintError, PrintResult};

#[derive(Deserialize)]
#[serde(untagged)]
enum WorkOrderPayload {
    List { work_orders: Vec<WorkOrder> },
    Single(Box<WorkOrder>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PaymentsPayload {
    Wrapped { payments: Vec<Payment> },
    Bare(Vec<Payment>),
}

/// Reads a file, or stdin when `path` is `-`.
pub fn read_source(path: &Path) -> PrintResult<String> {
    let io_err = |source: io::Error| PrintError::Io {
        path: path.to_path_buf(),
        source,
    };

    if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).map_err(io_err)?;
        return Ok(buf);
    }

    fs::read_to_string(path).map_err(io_err)
}

/// Picks one work order out of a JSON payload.
///
/// A list payload needs `id` unless it holds exactly one order.
pub fn parse_work_order(json: &str, id: Option<i64>) -> PrintResult<WorkOrder> {
    match serde_json::from_str::<WorkOrderPayload>(json)? {
        WorkOrderPayload::Single(order) => match id {
            Some(wanted) if order.id != wanted => Err(PrintError::WorkOrderNotFound(wanted)),
            _ => Ok(*order),
        },
        WorkOrderPayload::List { mut work_orders } => {
            debug!(count = work_orders.len(), "Work order list payload");
            match id {
                Some(wanted) => work_orders
                    .into_iter()
                    .find(|order| order.id == wanted)
                    .ok_or(PrintError::WorkOrderNotFound(wanted)),
                None if work_orders.len() == 1 => Ok(work_orders.remove(0)),
                None => Err(PrintError::AmbiguousWorkOrder(work_orders.len())),
            }
        }
    }
}

/// Parses a payments payload. Every amount must be positive.
pub fn parse_payments(json: &str) -> PrintResult<Vec<Payment>> {
    let payments = match serde_json::from_str::<PaymentsPayload>(json)? {
        PaymentsPayload::Wrapped { payments } => payments,
        PaymentsPayload::Bare(payments) => payments,
    };

    for payment in &payments {
        validate_payment_amount(payment.amount).map_err(|source| PrintError::InvalidPayment {
            id: payment.id,
            source,
        })?;
    }
    Ok(payments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const ORDER: &str = r#"{"id": 7, "number": "ЗН-0007", "client": "Иванов",
        "status": "done", "works": [], "parts": []}"#;

    #[test]
    fn test_single_object() {
        let order = parse_work_order(ORDER, None).unwrap();
        assert_eq!(order.number, "ЗН-0007");
        assert!(parse_work_order(ORDER, Some(7)).is_ok());
        assert!(matches!(
            parse_work_order(ORDER, Some(8)),
            Err(PrintError::WorkOrderNotFound(8))
        ));
    }

    #[test]
    fn test_list_payload() {
        let json = format!(
            r#"{{"work_orders": [{ORDER}, {{"id": 9, "number": "ЗН-0009", "client": "Петров"}}]}}"#
        );
        assert_eq!(parse_work_order(&json, Some(9)).unwrap().client, "Петров");
        assert!(matches!(
            parse_work_order(&json, None),
            Err(PrintError::AmbiguousWorkOrder(2))
        ));
        assert!(matches!(
            parse_work_order(&json, Some(1)),
            Err(PrintError::WorkOrderNotFound(1))
        ));
    }

    #[test]
    fn test_list_with_one_order_needs_no_id() {
        let json = format!(r#"{{"work_orders": [{ORDER}]}}"#);
        assert_eq!(parse_work_order(&json, None).unwrap().id, 7);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            parse_work_order("{not json", None),
            Err(PrintError::Json(_))
        ));
    }

    #[test]
    fn test_payments_both_shapes() {
        let bare = r#"[{"id": 1, "amount": 1000, "payment_method": "card",
            "cashbox_name": "Терминал", "created_at": "2025-03-15 12:00:00"}]"#;
        let wrapped = format!(r#"{{"payments": {bare}}}"#);

        let a = parse_payments(bare).unwrap();
        let b = parse_payments(&wrapped).unwrap();
        assert_eq!(a, b);
        assert_eq!(a[0].amount.kopecks(), 100_000);
    }

    #[test]
    fn test_payments_with_non_positive_amount_are_rejected() {
        let json = r#"[{"id": 1, "amount": 500}, {"id": 2, "amount": 0}]"#;
        assert!(matches!(
            parse_payments(json),
            Err(PrintError::InvalidPayment { id: 2, .. })
        ));

        let refund = r#"{"payments": [{"id": 3, "amount": -100}]}"#;
        assert!(matches!(
            parse_payments(refund),
            Err(PrintError::InvalidPayment { id: 3, .. })
        ));
    }

    #[test]
    fn test_read_source_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{ORDER}").unwrap();
        let text = read_source(file.path()).unwrap();
        assert_eq!(parse_work_order(&text, None).unwrap().id, 7);

        assert!(matches!(
            read_source(Path::new("/nonexistent/order.json")),
            Err(PrintError::Io { .. })
        ));
    }
}
