//! # Work-Order Totals
//!
//! Every monetary aggregate the list card, detail view and printout show,
//! derived from the current `works`/`parts` on each call. Nothing is cached
//! and nothing mutates the order.
//!
//! ```text
//! works[].price ─────────────────────────┐
//!                                        ├──► grand_total
//! parts[].price × qty ──► parts_total ───┤
//!                              │         │
//! parts[].purchase × qty ──► parts_cost  │
//!                              │         │
//!                              ▼         │
//!                         parts_margin ──┴──► profit = works_total + margin
//! ```
//!
//! Labor carries no cost basis, so all of it counts as profit.
//!
//! ## Example
//! ```rust
//! use smartline_core::{totals, Money, PartItem, WorkItem, WorkOrder, WorkOrderStatus};
//!
//! let rub = |r| Money::from_rubles_kopecks(r, 0);
//! let mut order = WorkOrder::new(1, "ЗН-0001", "Иванов", WorkOrderStatus::New);
//! order.add_work(WorkItem::new("Замена масла", rub(1500)).unwrap());
//! order.add_part(PartItem::new("Масло", 4, rub(500)).unwrap().with_purchase_price(rub(350)));
//!
//! assert_eq!(totals::grand_total(&order), rub(3500));
//! assert_eq!(totals::profit(&order), rub(2100));
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{self, Money};
use crate::types::{Payment, WorkOrder};

/// Σ `works[].price`. Labor quantity is not multiplied in: `price` is the
/// billed line amount.
pub fn works_total(order: &WorkOrder) -> Money {
    order.works.iter().map(|work| work.price).sum()
}

/// Σ `parts[].price × parts[].qty`.
pub fn parts_total(order: &WorkOrder) -> Money {
    order.parts.iter().map(|part| part.line_total()).sum()
}

/// Σ `parts[].purchase_price × parts[].qty`, unknown cost counts as zero.
pub fn parts_cost(order: &WorkOrder) -> Money {
    order.parts.iter().map(|part| part.line_cost()).sum()
}

/// `parts_total − parts_cost`. Negative when parts were sold below cost.
pub fn parts_margin(order: &WorkOrder) -> Money {
    parts_total(order) - parts_cost(order)
}

/// `works_total + parts_total`: the amount billed to the client.
pub fn grand_total(order: &WorkOrder) -> Money {
    works_total(order) + parts_total(order)
}

/// `works_total + parts_margin`.
pub fn profit(order: &WorkOrder) -> Money {
    works_total(order) + parts_margin(order)
}

// =============================================================================
// Payments
// =============================================================================

/// Σ of the recorded payments.
pub fn total_paid(payments: &[Payment]) -> Money {
    payments.iter().map(|payment| payment.amount).sum()
}

/// What is still owed, never negative. Also the amount the payment dialog
/// pre-fills.
pub fn balance_due(total: Money, paid: Money) -> Money {
    (total - paid).clamp_non_negative()
}

pub fn is_fully_paid(total: Money, paid: Money) -> bool {
    balance_due(total, paid).is_zero()
}

// =============================================================================
// Snapshot
// =============================================================================

/// All aggregates of one order, computed together for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WorkOrderTotals {
    #[serde(with = "money::rubles")]
    #[ts(type = "number")]
    pub works_total: Money,
    #[serde(with = "money::rubles")]
    #[ts(type = "number")]
    pub parts_total: Money,
    #[serde(with = "money::rubles")]
    #[ts(type = "number")]
    pub parts_cost: Money,
    #[serde(with = "money::rubles")]
    #[ts(type = "number")]
    pub parts_margin: Money,
    #[serde(with = "money::rubles")]
    #[ts(type = "number")]
    pub grand_total: Money,
    #[serde(with = "money::rubles")]
    #[ts(type = "number")]
    pub profit: Money,
}

impl WorkOrderTotals {
    pub fn of(order: &WorkOrder) -> Self {
        let works_total = works_total(order);
        let parts_total = parts_total(order);
        let parts_cost = parts_cost(order);
        let parts_margin = parts_total - parts_cost;

        WorkOrderTotals {
            works_total,
            parts_total,
            parts_cost,
            parts_margin,
            grand_total: works_total + parts_total,
            profit: works_total + parts_margin,
        }
    }

    /// Whether any part carries a cost basis; profit is only meaningful then.
    pub fn has_cost_basis(&self) -> bool {
        self.parts_cost.is_positive()
    }
}

impl From<&WorkOrder> for WorkOrderTotals {
    fn from(order: &WorkOrder) -> Self {
        WorkOrderTotals::of(order)
    }
}
