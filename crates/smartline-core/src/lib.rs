//! # smartline-core: Pure Business Logic for Smartline
//!
//! Work-order math for the Smartline installation centre: totals, margins,
//! ruble formatting, and the Russian amount-in-words used on printed
//! documents. Every function is pure and synchronous.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Smartline Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Frontend (React) / HTTP backend                    │   │
//! │  │   list cards ── detail view ── payment dialog ── print view     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ WorkOrder JSON                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                apps/print (smartline-print)                     │   │
//! │  │        config, logging, document rendering, CLI                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ smartline-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐  │   │
//! │  │   │  types  │ │  money  │ │ totals  │ │  words  │ │ format  │  │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - WorkOrder, WorkItem, PartItem, statuses, payments
//! - [`money`] - Money in integer kopecks
//! - [`totals`] - works/parts totals, cost, margin, profit, balance due
//! - [`words`] - amount in Russian words
//! - [`format`] - ru-RU ruble text, dates, ticket numbers
//! - [`validation`] - rules for new line items and settings
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use smartline_core::{format, totals, words, Money, PartItem, WorkItem, WorkOrder, WorkOrderStatus};
//! use smartline_core::format::Precision;
//!
//! let rub = |r| Money::from_rubles_kopecks(r, 0);
//! let mut order = WorkOrder::new(1, "ЗН-0001", "Иванов", WorkOrderStatus::New);
//! order.add_work(WorkItem::new("Установка магнитолы", rub(300)).unwrap());
//!
//! let total = totals::grand_total(&order);
//! assert_eq!(format::format_rub(total, Precision::Rubles), "300\u{a0}₽");
//! assert_eq!(words::amount_in_words(total).unwrap(), "Триста рублей 00 копеек");
//! ```

pub mod error;
pub mod format;
pub mod money;
pub mod totals;
pub mod types;
pub mod validation;
pub mod words;

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use totals::WorkOrderTotals;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of a single part line.
///
/// Catches typos like 1000 instead of 10 oil litres.
pub const MAX_PART_QUANTITY: i64 = 9_999;

/// Maximum length (chars) of a work or part name.
pub const MAX_ITEM_NAME_LEN: usize = 200;

/// Maximum length (chars) of the work-order number prefix.
pub const MAX_NUMBER_PREFIX_LEN: usize = 10;

/// Prefix the backend uses for ticket codes.
pub const DEFAULT_NUMBER_PREFIX: &str = "ЗН-";
