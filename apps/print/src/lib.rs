//! # Smartline Print
//!
//! Printable work orders on top of `smartline-core`.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Smartline Print                                │
//! │                                                                         │
//! │  order.json ──► input ──► WorkOrder ──┐                                 │
//! │                                       ├──► document ──► stdout          │
//! │  smartline.toml + SMARTLINE_* ──► config ─┘                             │
//! │                                                                         │
//! │  Errors: PrintError wraps ConfigError, io, serde_json and CoreError     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod input;

// Re-exports
pub use config::{CompanyInfo, PrintConfig};
pub use document::render_document;
pub use error::{PrintError, PrintResult};
