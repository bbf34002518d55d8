//! # GST Invoice Core
//!
//! Tax calculation and invoice total reconciliation for Indian GST invoicing.
//!
//! ## Features
//!
//! - **Inter-state classification**: IGST vs CGST+SGST from `"NN-StateName"` state codes
//! - **Line resolution**: tax-inclusive and tax-exclusive pricing with per-line discounts
//! - **Order-level discounts**: proportional allocation of a header discount across lines
//! - **Totals**: sub-total, tax, shipping, grand total, balance and an HSN-wise tax summary
//! - **Lenient input**: missing or non-numeric fields count as zero, never NaN
//!
//! Every computation is a pure function of its inputs, so the API, the PDF
//! renderer and the live preview produce identical totals for identical carts.
//!
//! ## Quick Start
//!
//! ```rust
//! use bigdecimal::BigDecimal;
//! use gst_invoice_core::{Customer, EngineConfig, InvoiceEngine, InvoiceRequest, LineItem};
//!
//! let engine = InvoiceEngine::new(EngineConfig::for_seller("27-Maharashtra")).unwrap();
//! let request = InvoiceRequest::new(
//!     Customer {
//!         name: "Acme Traders".to_string(),
//!         state: Some("06-Haryana".to_string()),
//!         gstin: None,
//!     },
//!     vec![LineItem::new(BigDecimal::from(1000), BigDecimal::from(2), BigDecimal::from(18))],
//! );
//!
//! let invoice = engine.compute(&request).unwrap();
//! assert_eq!(invoice.totals.total_igst, BigDecimal::from(360));
//! assert_eq!(invoice.totals.grand_total, BigDecimal::from(2360));
//! ```

pub mod config;
pub mod invoice;
pub mod tax;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::*;
pub use invoice::*;
pub use tax::*;
pub use types::*;

pub use utils::number::parse_number_or_zero;
