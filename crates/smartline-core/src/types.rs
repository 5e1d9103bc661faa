//! # Domain Types
//!
//! The work-order aggregate and its line items, as the backend sends them.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌───────────────────────────────────────────────┐                      │
//! │  │  WorkOrder (заказ-наряд)                      │                      │
//! │  │  ───────────────────────────────────────────  │                      │
//! │  │  id, number ("ЗН-0042"), date                 │                      │
//! │  │  client, car   (text snapshots)               │                      │
//! │  │  status        (WorkOrderStatus)              │                      │
//! │  │  works ────────► Vec<WorkItem>  (labor)       │                      │
//! │  │  parts ────────► Vec<PartItem>  (materials)   │                      │
//! │  └───────────────────────────────────────────────┘                      │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ WorkOrderStatus │   │ PaymentMethod   │   │    Payment      │       │
//! │  │  New            │   │  Cash           │   │  amount         │       │
//! │  │  InProgress     │   │  Card           │   │  method         │       │
//! │  │  Done           │   │  Transfer       │   │  cashbox_name   │       │
//! │  │  Issued         │   │  Online         │   │  created_at     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! `client` and `car` are frozen display strings, not foreign keys, so an old
//! work order still prints what was agreed even after the client record is
//! edited. Line items only exist inside their parent order.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::{self, Money};
use crate::validation::{validate_item_name, validate_part_quantity, validate_price};

// =============================================================================
// Work Order Status
// =============================================================================

/// Lifecycle tag of a work order.
///
/// There is no transition graph: the UI offers all four values at all
/// times. `Issued` is only a soft terminal state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum WorkOrderStatus {
    /// Just created, nobody started yet.
    #[default]
    New,
    /// Being worked on.
    InProgress,
    /// Work finished, car not yet returned.
    Done,
    /// Car handed back to the client.
    Issued,
}

impl WorkOrderStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [WorkOrderStatus; 4] = [
        WorkOrderStatus::New,
        WorkOrderStatus::InProgress,
        WorkOrderStatus::Done,
        WorkOrderStatus::Issued,
    ];

    /// Wire string used by the backend.
    pub const fn as_str(&self) -> &'static str {
        match self {
            WorkOrderStatus::New => "new",
            WorkOrderStatus::InProgress => "in-progress",
            WorkOrderStatus::Done => "done",
            WorkOrderStatus::Issued => "issued",
        }
    }

    /// Russian label shown on cards, detail view and printout.
    ///
    /// ## Example
    /// ```rust
    /// use smartline_core::WorkOrderStatus;
    ///
    /// assert_eq!(WorkOrderStatus::InProgress.label(), "В работе");
    /// ```
    pub const fn label(&self) -> &'static str {
        match self {
            WorkOrderStatus::New => "Новый",
            WorkOrderStatus::InProgress => "В работе",
            WorkOrderStatus::Done => "Готов",
            WorkOrderStatus::Issued => "Выдан",
        }
    }

    #[inline]
    pub const fn is_issued(&self) -> bool {
        matches!(self, WorkOrderStatus::Issued)
    }
}

impl fmt::Display for WorkOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkOrderStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let s = s.trim();
        WorkOrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| CoreError::InvalidStatus(s.to_string()))
    }
}

// =============================================================================
// Work Item (labor line)
// =============================================================================

fn default_qty() -> f64 {
    1.0
}

/// A performed labor line.
///
/// `price` is the billed amount, already net of `discount`. The norm-hour
/// fields and the discount are annotations and are never reconciled with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WorkItem {
    /// Absent for lines not yet saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    pub name: String,

    #[serde(with = "money::rubles")]
    #[ts(type = "number")]
    pub price: Money,

    #[serde(default = "default_qty")]
    pub qty: f64,

    /// Standard hours for the operation (н/ч), 0 when unused.
    #[serde(default)]
    pub norm_hours: f64,

    /// Hourly rate backing the estimate, 0 when unused.
    #[serde(with = "money::rubles", default)]
    #[ts(type = "number")]
    pub norm_hour_price: Money,

    /// Absolute discount, display only.
    #[serde(with = "money::rubles", default)]
    #[ts(type = "number")]
    pub discount: Money,
}

impl WorkItem {
    /// Builds a new, unsaved labor line from user input.
    ///
    /// ## Example
    /// ```rust
    /// use smartline_core::{Money, WorkItem};
    ///
    /// let work = WorkItem::new("Замена масла", Money::from_rubles_kopecks(1500, 0)).unwrap();
    /// assert_eq!(work.qty, 1.0);
    /// assert!(WorkItem::new("  ", Money::zero()).is_err());
    /// ```
    pub fn new(name: &str, price: Money) -> CoreResult<Self> {
        validate_item_name(name)?;
        validate_price(price)?;

        Ok(WorkItem {
            id: None,
            name: name.trim().to_string(),
            price,
            qty: default_qty(),
            norm_hours: 0.0,
            norm_hour_price: Money::zero(),
            discount: Money::zero(),
        })
    }

    /// Attaches a norm-hour estimate.
    pub fn with_norm(mut self, hours: f64, hour_price: Money) -> Self {
        self.norm_hours = hours;
        self.norm_hour_price = hour_price;
        self
    }

    /// Attaches a display discount.
    pub fn with_discount(mut self, discount: Money) -> Self {
        self.discount = discount;
        self
    }

    /// Reference amount `norm_hours × norm_hour_price`.
    pub fn norm_amount(&self) -> Money {
        self.norm_hour_price.multiply_hours(self.norm_hours)
    }

    pub fn has_norm(&self) -> bool {
        self.norm_hours > 0.0 && self.norm_hour_price.is_positive()
    }
}

// =============================================================================
// Part Item (material line)
// =============================================================================

/// A consumed part or material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PartItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    pub name: String,

    pub qty: i64,

    /// Unit sale price.
    #[serde(with = "money::rubles")]
    #[ts(type = "number")]
    pub price: Money,

    /// Unit cost basis. `None` or zero means unknown.
    #[serde(with = "money::rubles_opt", default)]
    #[ts(type = "number | null")]
    pub purchase_price: Option<Money>,

    /// Warehouse stock item this part was drawn from.
    #[serde(default)]
    pub product_id: Option<i64>,
}

impl PartItem {
    /// Builds a manually entered part line from user input.
    ///
    /// ## Example
    /// ```rust
    /// use smartline_core::{Money, PartItem};
    ///
    /// let part = PartItem::new("Масло 5W-30", 4, Money::from_rubles_kopecks(500, 0)).unwrap();
    /// assert_eq!(part.line_total(), Money::from_rubles_kopecks(2000, 0));
    /// assert!(PartItem::new("Масло", 0, Money::zero()).is_err());
    /// ```
    pub fn new(name: &str, qty: i64, price: Money) -> CoreResult<Self> {
        validate_item_name(name)?;
        validate_part_quantity(qty)?;
        validate_price(price)?;

        Ok(PartItem {
            id: None,
            name: name.trim().to_string(),
            qty,
            price,
            purchase_price: None,
            product_id: None,
        })
    }

    /// Records the unit cost basis.
    pub fn with_purchase_price(mut self, purchase_price: Money) -> Self {
        self.purchase_price = Some(purchase_price);
        self
    }

    /// Marks the part as drawn from warehouse stock.
    pub fn from_stock(mut self, product_id: i64) -> Self {
        self.product_id = Some(product_id);
        self
    }

    /// Extended amount `price × qty`.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.qty)
    }

    /// Known unit cost, if any.
    pub fn known_cost(&self) -> Option<Money> {
        self.purchase_price.filter(Money::is_positive)
    }

    /// Extended cost `purchase_price × qty`, missing cost counts as zero.
    pub fn line_cost(&self) -> Money {
        self.purchase_price
            .unwrap_or_default()
            .multiply_quantity(self.qty)
    }

    /// `(price − purchase_price) × qty`, only when the cost is known.
    pub fn line_margin(&self) -> Option<Money> {
        self.known_cost()
            .map(|cost| (self.price - cost).multiply_quantity(self.qty))
    }

    #[inline]
    pub fn is_from_stock(&self) -> bool {
        self.product_id.is_some()
    }
}

// =============================================================================
// Work Order
// =============================================================================

/// The job ticket aggregate. Totals are always derived, never stored; see
/// [`crate::totals`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WorkOrder {
    pub id: i64,

    /// Human-facing ticket code, e.g. "ЗН-0042".
    pub number: String,

    /// Creation date as displayed (dd.mm.yyyy).
    #[serde(default)]
    pub date: String,

    /// Raw backend timestamp, empty when unknown.
    #[serde(default)]
    pub created_at: String,

    /// Raw backend timestamp of the `issued` transition, empty until then.
    #[serde(default)]
    pub issued_at: String,

    pub client: String,

    #[serde(default)]
    pub car: String,

    #[serde(default)]
    pub status: WorkOrderStatus,

    #[serde(default)]
    pub works: Vec<WorkItem>,

    #[serde(default)]
    pub parts: Vec<PartItem>,

    /// Assignee, empty means unassigned.
    #[serde(default)]
    pub master: String,

    /// Who pays, when it is not the client.
    #[serde(default)]
    pub payer_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car_vin: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_name: Option<String>,
}

/// Backend timestamp layouts (`str(datetime)` and ISO 8601).
const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parses a backend timestamp, ignoring a trailing UTC offset.
pub fn parse_backend_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

impl WorkOrder {
    /// Creates an empty work order with the given status.
    pub fn new(id: i64, number: impl Into<String>, client: impl Into<String>, status: WorkOrderStatus) -> Self {
        WorkOrder {
            id,
            number: number.into(),
            date: String::new(),
            created_at: String::new(),
            issued_at: String::new(),
            client: client.into(),
            car: String::new(),
            status,
            works: Vec::new(),
            parts: Vec::new(),
            master: String::new(),
            payer_name: String::new(),
            client_phone: None,
            car_vin: None,
            employee_name: None,
        }
    }

    /// Any status can follow any other.
    pub fn set_status(&mut self, status: WorkOrderStatus) {
        self.status = status;
    }

    /// Whether the UI should offer "add line" controls.
    ///
    /// This is a presentation convention; `add_work`/`add_part` still work
    /// on issued orders.
    pub fn accepts_line_items(&self) -> bool {
        !self.status.is_issued()
    }

    pub fn add_work(&mut self, work: WorkItem) {
        self.works.push(work);
    }

    pub fn add_part(&mut self, part: PartItem) {
        self.parts.push(part);
    }

    /// Removes the labor line at `index`, if present.
    pub fn remove_work(&mut self, index: usize) -> Option<WorkItem> {
        (index < self.works.len()).then(|| self.works.remove(index))
    }

    /// Removes the part line at `index`, if present.
    pub fn remove_part(&mut self, index: usize) -> Option<PartItem> {
        (index < self.parts.len()).then(|| self.parts.remove(index))
    }

    pub fn is_assigned(&self) -> bool {
        !self.master.trim().is_empty()
    }

    pub fn has_lines(&self) -> bool {
        !self.works.is_empty() || !self.parts.is_empty()
    }

    /// Creation date from the raw timestamp.
    pub fn created_on(&self) -> Option<NaiveDate> {
        parse_backend_timestamp(&self.created_at).map(|dt| dt.date())
    }

    /// Date the car was handed back.
    pub fn issued_on(&self) -> Option<NaiveDate> {
        parse_backend_timestamp(&self.issued_at).map(|dt| dt.date())
    }
}

// =============================================================================
// Work Order Filter
// =============================================================================

/// List-page filter: optional status plus free-text search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WorkOrderFilter {
    /// `None` means all statuses.
    #[serde(default)]
    pub status: Option<WorkOrderStatus>,

    /// Case-insensitive substring of client, car or number.
    #[serde(default)]
    pub query: String,
}

impl WorkOrderFilter {
    pub fn matches(&self, order: &WorkOrder) -> bool {
        if let Some(status) = self.status {
            if order.status != status {
                return false;
            }
        }

        let query = self.query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        [&order.client, &order.car, &order.number]
            .iter()
            .any(|field| field.to_lowercase().contains(&query))
    }

    /// Applies the filter, keeping the original order.
    pub fn apply<'a>(&self, orders: &'a [WorkOrder]) -> Vec<&'a WorkOrder> {
        orders.iter().filter(|order| self.matches(order)).collect()
    }
}

// =============================================================================
// Payments
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash into a cash drawer.
    #[default]
    Cash,
    /// Card via payment terminal.
    Card,
    /// Bank transfer.
    Transfer,
    /// Online wallet / payment link.
    Online,
}

impl PaymentMethod {
    pub const fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Наличные",
            PaymentMethod::Card => "Карта",
            PaymentMethod::Transfer => "Перевод",
            PaymentMethod::Online => "Онлайн",
        }
    }
}

/// A payment recorded against a work order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Payment {
    pub id: i64,

    #[serde(with = "money::rubles")]
    #[ts(type = "number")]
    pub amount: Money,

    #[serde(default)]
    pub payment_method: PaymentMethod,

    #[serde(default)]
    pub cashbox_name: String,

    #[serde(default)]
    pub created_at: String,
}

impl Payment {
    pub fn paid_on(&self) -> Option<NaiveDate> {
        parse_backend_timestamp(&self.created_at).map(|dt| dt.date())
    }
}
